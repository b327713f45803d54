//! End-to-end tests for the REST API served by `solar-sizer --serve`.

#![cfg(feature = "api")]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

const RESULT_KEYS: &[&str] = &[
    "total_consumption_wh",
    "total_consumption_kwh",
    "peak_load_w",
    "required_daily_production_wh",
    "required_panel_count",
    "required_inverter_size_w",
    "total_battery_capacity_ah",
    "batteries_in_series",
    "strings_in_parallel",
    "total_batteries",
    "total_panel_area",
    "consumption_breakdown",
];

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn api_serves_defaults_presets_and_calculations() {
    let port = allocate_port();
    let _child = spawn_api_process(port);
    let addr = format!("127.0.0.1:{port}");

    wait_for_server(&addr, Duration::from_secs(8));

    let (status, body) = http_request(&addr, "GET", "/defaults", None).expect("/defaults");
    assert_eq!(status, 200);
    let defaults: Value = serde_json::from_str(&body).expect("defaults should be JSON");
    assert_eq!(defaults["appliances"].as_array().map(Vec::len), Some(4));

    let (status, body) = http_request(&addr, "GET", "/presets", None).expect("/presets");
    assert_eq!(status, 200);
    let presets: Value = serde_json::from_str(&body).expect("presets should be JSON");
    assert_eq!(presets, serde_json::json!(["household", "cabin", "workshop"]));

    let (status, _) = http_request(&addr, "GET", "/presets/castle", None).expect("/presets/castle");
    assert_eq!(status, 404);

    // Round-trip the defaults through /calculate.
    let (status, body) =
        http_request(&addr, "POST", "/calculate", Some(&defaults.to_string())).expect("/calculate");
    assert_eq!(status, 200);
    let result: Value = serde_json::from_str(&body).expect("result should be JSON");
    let obj = result.as_object().expect("result should be an object");
    for key in RESULT_KEYS {
        assert!(obj.contains_key(*key), "missing key: {key}");
    }
    assert_eq!(result["total_consumption_wh"], 2590.0);
    assert_eq!(result["total_batteries"], 2.0);
}

#[test]
fn api_rejects_invalid_snapshot_with_422() {
    let port = allocate_port();
    let _child = spawn_api_process(port);
    let addr = format!("127.0.0.1:{port}");

    wait_for_server(&addr, Duration::from_secs(8));

    let body = r#"{"system":{"sun_hours":0},"appliances":[{"id":"p","name":"Pump","power":0,"quantity":0,"hours":2}]}"#;
    let (status, body) =
        http_request(&addr, "POST", "/calculate", Some(body)).expect("/calculate");
    assert_eq!(status, 422);

    let json: Value = serde_json::from_str(&body).expect("errors should be JSON");
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .expect("errors should be an array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, ["sunHours", "app_power_p", "app_quantity_p"]);
}

fn allocate_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port bind should succeed");
    let port = listener
        .local_addr()
        .expect("local_addr should be available")
        .port();
    drop(listener);
    port
}

fn spawn_api_process(port: u16) -> ChildGuard {
    let child = Command::new(env!("CARGO_BIN_EXE_solar-sizer"))
        .args(["--preset", "household", "--serve", "--port", &port.to_string()])
        .env("SOLAR_SIZER_LOG", "off")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("solar-sizer process should spawn");

    ChildGuard { child }
}

fn wait_for_server(addr: &str, timeout: Duration) {
    let start = Instant::now();
    loop {
        if let Ok((200, _)) = http_request(addr, "GET", "/presets", None) {
            return;
        }

        if start.elapsed() >= timeout {
            panic!("timed out waiting for API server on {addr}");
        }

        thread::sleep(Duration::from_millis(50));
    }
}

fn http_request(
    addr: &str,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> Result<(u16, String), String> {
    let mut stream = TcpStream::connect(addr).map_err(|err| format!("connect: {err}"))?;
    let request = match body {
        Some(body) => format!(
            "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\
             Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ),
        None => format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"),
    };
    stream
        .write_all(request.as_bytes())
        .map_err(|err| format!("write: {err}"))?;

    let mut raw = String::new();
    stream
        .read_to_string(&mut raw)
        .map_err(|err| format!("read: {err}"))?;

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .ok_or_else(|| "invalid HTTP response".to_string())?;
    let status_code = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| "missing status code".to_string())?
        .parse::<u16>()
        .map_err(|err| format!("invalid status code: {err}"))?;

    Ok((status_code, body.to_string()))
}
