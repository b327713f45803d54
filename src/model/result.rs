use serde::{Deserialize, Serialize};

/// Serde adapter that keeps non-finite floats distinguishable in JSON.
///
/// Finite values stay numbers. `inf`, `-inf` and `NaN` travel as those strings,
/// since JSON has no literal for them.
mod non_finite {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Tag(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Tag(tag) => match tag.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"inf\", \"-inf\" or \"NaN\"",
                )),
            },
        }
    }
}

/// One appliance's share of daily consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    /// Appliance display name.
    pub name: String,
    /// Daily energy (Wh).
    #[serde(with = "non_finite")]
    pub value_wh: f64,
}

impl BreakdownEntry {
    /// Percentage of `total_wh` this entry accounts for.
    ///
    /// Returns 0.0 when `total_wh` is not positive.
    pub fn share_pct(&self, total_wh: f64) -> f64 {
        if total_wh > 0.0 {
            100.0 * self.value_wh / total_wh
        } else {
            0.0
        }
    }
}

/// Recommended system sizing derived from one validated input snapshot.
///
/// Counts (panels, inverter watts, batteries) are whole numbers carried as
/// `f64`: inputs that slip past the range checks at a boundary yield
/// `inf`/`NaN` here instead of a saturated integer. Check
/// [`SizingResult::is_finite`] before trusting a result built from
/// boundary inputs. In JSON those values appear as the strings `"inf"`,
/// `"-inf"` and `"NaN"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Total daily consumption (Wh).
    #[serde(with = "non_finite")]
    pub total_consumption_wh: f64,
    /// Total daily consumption (kWh).
    #[serde(with = "non_finite")]
    pub total_consumption_kwh: f64,
    /// Sum of every appliance's full draw (W), assuming all run at once.
    #[serde(with = "non_finite")]
    pub peak_load_w: f64,
    /// Daily panel production needed after losses (Wh).
    #[serde(with = "non_finite")]
    pub required_daily_production_wh: f64,
    /// Panels needed, rounded up.
    #[serde(with = "non_finite")]
    pub required_panel_count: f64,
    /// Inverter rating with safety margin (W), rounded up.
    #[serde(with = "non_finite")]
    pub required_inverter_size_w: f64,
    /// Battery bank capacity at the system voltage (Ah).
    #[serde(with = "non_finite")]
    pub total_battery_capacity_ah: f64,
    /// Battery units wired in series per string.
    #[serde(with = "non_finite")]
    pub batteries_in_series: f64,
    /// Parallel strings needed to reach the bank capacity.
    #[serde(with = "non_finite")]
    pub strings_in_parallel: f64,
    /// `batteries_in_series * strings_in_parallel`.
    #[serde(with = "non_finite")]
    pub total_batteries: f64,
    /// Estimated panel footprint (m², 2 decimals).
    #[serde(with = "non_finite")]
    pub total_panel_area: f64,
    /// Per-appliance daily energy, list order, zero entries omitted.
    pub consumption_breakdown: Vec<BreakdownEntry>,
}

impl SizingResult {
    /// Returns `true` if every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.total_consumption_wh,
            self.total_consumption_kwh,
            self.peak_load_w,
            self.required_daily_production_wh,
            self.required_panel_count,
            self.required_inverter_size_w,
            self.total_battery_capacity_ah,
            self.batteries_in_series,
            self.strings_in_parallel,
            self.total_batteries,
            self.total_panel_area,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self
                .consumption_breakdown
                .iter()
                .all(|e| e.value_wh.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Appliance, SystemParameters};
    use crate::sizing::calculate;

    #[test]
    fn share_pct_of_total() {
        let e = BreakdownEntry {
            name: "Fridge".into(),
            value_wh: 1600.0,
        };
        assert!((e.share_pct(2590.0) - 61.776_061_776).abs() < 1e-6);
        assert_eq!(e.share_pct(0.0), 0.0);
    }

    fn lossless_site() -> SystemParameters {
        SystemParameters {
            system_loss: 100.0,
            ..SystemParameters::default()
        }
    }

    #[test]
    fn finite_fields_serialize_as_numbers() {
        let apps = [Appliance::new("Fridge", 200.0, 1, 8.0)];
        let json = serde_json::to_value(calculate(&SystemParameters::default(), &apps))
            .unwrap_or_default();
        assert_eq!(json["total_consumption_wh"], 1600.0);
        assert_eq!(json["required_inverter_size_w"], 250.0);
        assert_eq!(json["consumption_breakdown"][0]["value_wh"], 1600.0);
    }

    #[test]
    fn infinite_fields_serialize_as_tags_and_read_back() {
        let apps = [Appliance::new("Fridge", 200.0, 1, 8.0)];
        let result = calculate(&lossless_site(), &apps);
        let text = serde_json::to_string(&result).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["required_daily_production_wh"], "inf");
        assert_eq!(json["required_panel_count"], "inf");
        assert_eq!(json["total_panel_area"], "inf");
        assert_eq!(json["total_consumption_wh"], 1600.0);

        let back: SizingResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
        assert!(!back.is_finite());
    }

    #[test]
    fn nan_fields_serialize_as_nan_tag() {
        let result = calculate(&lossless_site(), &[]);
        let text = serde_json::to_string(&result).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["required_daily_production_wh"], "NaN");
        assert_eq!(json["required_panel_count"], "NaN");

        let back: SizingResult = serde_json::from_str(&text).unwrap();
        assert!(back.required_panel_count.is_nan());
        assert_eq!(back.total_consumption_wh, 0.0);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let entry = serde_json::from_str::<BreakdownEntry>(r#"{"name":"x","value_wh":"huge"}"#);
        assert!(entry.is_err());
        let entry = serde_json::from_str::<BreakdownEntry>(r#"{"name":"x","value_wh":"-inf"}"#);
        assert_eq!(entry.ok().map(|e| e.value_wh), Some(f64::NEG_INFINITY));
    }
}
