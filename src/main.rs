//! Solar sizer entry point: CLI wiring, scenario loading and report output.

use std::path::Path;
use std::process;

use solar_sizer::io::export::{export_breakdown_csv, export_summary_csv};
use solar_sizer::{Locale, Scenario, SizingReport, logging, size_system};
use tracing::{error, info};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    locale: Locale,
    json: bool,
    breakdown_out: Option<String>,
    summary_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("solar-sizer: off-grid solar system sizing calculator");
    eprintln!();
    eprintln!("Usage: solar-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML file");
    eprintln!(
        "  --preset <name>          Use a built-in scenario ({})",
        Scenario::PRESETS.join(", ")
    );
    eprintln!("  --locale <en|fa>         Language of validation messages (default: en)");
    eprintln!("  --json                   Print the result as JSON instead of a report");
    eprintln!("  --breakdown-out <path>   Export the consumption breakdown to CSV");
    eprintln!("  --summary-out <path>     Export the sizing figures to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start the REST API instead of a one-off run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the household preset is used.");
    eprintln!("Set SOLAR_SIZER_LOG (or RUST_LOG) to control diagnostics on stderr.");
}

/// Returns the value following flag `args[*i]`, exiting with an error if absent.
fn flag_value(args: &[String], i: &mut usize, what: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {} requires {what}", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        locale: Locale::default(),
        json: false,
        breakdown_out: None,
        summary_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                cli.scenario_path = Some(flag_value(&args, &mut i, "a path argument"));
            }
            "--preset" => {
                cli.preset = Some(flag_value(&args, &mut i, "a name argument"));
            }
            "--locale" => {
                let tag = flag_value(&args, &mut i, "a locale tag");
                match Locale::from_tag(&tag) {
                    Some(locale) => cli.locale = locale,
                    None => {
                        eprintln!("error: --locale value \"{tag}\" is not one of en, fa");
                        process::exit(1);
                    }
                }
            }
            "--json" => cli.json = true,
            "--breakdown-out" => {
                cli.breakdown_out = Some(flag_value(&args, &mut i, "a path argument"));
            }
            "--summary-out" => {
                cli.summary_out = Some(flag_value(&args, &mut i, "a path argument"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let raw = flag_value(&args, &mut i, "a u16 argument");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.scenario_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --scenario and --preset are mutually exclusive; choose one source");
        process::exit(1);
    }

    cli
}

fn main() {
    let cli = parse_args();
    logging::init();

    // Load scenario: --scenario takes priority, then --preset, then the household default
    let scenario = if let Some(ref path) = cli.scenario_path {
        Scenario::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        Scenario::from_preset(name)
    } else {
        Ok(Scenario::household())
    };
    let scenario = scenario.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });
    info!(appliances = scenario.appliances.len(), "scenario loaded");

    #[cfg(feature = "api")]
    if cli.serve {
        serve_api(scenario, cli.locale, cli.port);
        return;
    }

    let result = match size_system(cli.locale, &scenario.system, &scenario.appliances) {
        Ok(result) => result,
        Err(errors) => {
            for e in errors.iter() {
                eprintln!("invalid input: {}: {}", e.field, e.message);
            }
            process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialize result: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{}", SizingReport::new(&scenario.system, &result));
    }

    if let Some(ref path) = cli.breakdown_out {
        if let Err(e) = export_breakdown_csv(&result, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(%path, "breakdown written");
    }
    if let Some(ref path) = cli.summary_out {
        if let Err(e) = export_summary_csv(&result, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(%path, "summary written");
    }
}

#[cfg(feature = "api")]
fn serve_api(defaults: Scenario, locale: Locale, port: u16) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(solar_sizer::api::AppState { defaults, locale });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(solar_sizer::api::serve(state, addr)) {
        eprintln!("error: API server failed: {e}");
        process::exit(1);
    }
}
