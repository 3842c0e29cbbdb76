//! JSON series payloads
//!
//! Accepted shapes:
//!
//! ```text
//! [ {reading}, ... ]
//! { "sensor": "...", "unit": "...", "data" | "readings": [ {reading}, ... ] }
//! { "series": [ { "sensor" | "name": "...", "unit": "...", "readings" | "data": [...] }, ... ] }
//! ```
//!
//! A reading carries `label` (string or number) or `timestamp` (epoch
//! milliseconds), `value` (number or numeric string) and an optional
//! `statusCode` / `status`.

use super::SensorSeries;
use crate::error::{Result, TraceChartsError};
use crate::types::Sample;
use serde::Deserialize;
use serde_json::Value;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Multi {
        series: Vec<RawSeries>,
    },
    Wrapped {
        #[serde(default, alias = "name")]
        sensor: Option<String>,
        #[serde(default)]
        unit: Option<String>,
        #[serde(alias = "readings")]
        data: Vec<RawReading>,
    },
    Bare(Vec<RawReading>),
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    #[serde(default, alias = "name")]
    sensor: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(alias = "data")]
    readings: Vec<RawReading>,
}

#[derive(Debug, Deserialize)]
struct RawReading {
    #[serde(default)]
    label: Value,
    #[serde(default)]
    timestamp: Value,
    #[serde(default)]
    value: Value,
    #[serde(default, rename = "statusCode", alias = "status")]
    status_code: Value,
}

impl RawReading {
    fn into_sample(self, index: usize) -> Sample {
        Sample {
            label: reading_label(&self.label, &self.timestamp, index),
            value: reading_value(&self.value),
            status_code: reading_status(&self.status_code),
        }
    }
}

fn reading_label(label: &Value, timestamp: &Value, index: usize) -> String {
    match label {
        Value::String(s) => return s.clone(),
        Value::Number(n) => return n.to_string(),
        _ => {}
    }
    timestamp
        .as_i64()
        .or_else(|| timestamp.as_f64().map(|f| f as i64))
        .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| format!("#{}", index + 1))
}

fn reading_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn reading_status(status: &Value) -> Option<i32> {
    match status {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn build_series(
    name: Option<String>,
    unit: Option<String>,
    readings: Vec<RawReading>,
    fallback_name: String,
) -> SensorSeries {
    let samples = readings
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_sample(i))
        .collect();
    SensorSeries {
        name: name.filter(|n| !n.is_empty()).unwrap_or(fallback_name),
        unit,
        samples,
    }
}

/// Parse a JSON payload into one or more series
pub fn parse_json_str(text: &str, default_name: &str) -> Result<Vec<SensorSeries>> {
    let payload: Payload = serde_json::from_str(text).map_err(|e| {
        TraceChartsError::Serialization(format!("unrecognized series payload: {}", e))
    })?;

    let series = match payload {
        Payload::Bare(readings) => {
            vec![build_series(None, None, readings, default_name.to_string())]
        }
        Payload::Wrapped { sensor, unit, data } => {
            vec![build_series(sensor, unit, data, default_name.to_string())]
        }
        Payload::Multi { series } => {
            let single = series.len() == 1;
            series
                .into_iter()
                .enumerate()
                .map(|(i, s)| {
                    let fallback = if single {
                        default_name.to_string()
                    } else {
                        format!("{} {}", default_name, i + 1)
                    };
                    build_series(s.sensor, s.unit, s.readings, fallback)
                })
                .collect()
        }
    };

    for s in &series {
        let invalid = s.samples.len() - s.valid_count();
        if invalid > 0 {
            tracing::debug!(series = %s.name, invalid, "series contains invalid readings");
        }
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let text = r#"[
            {"label": "t1", "value": 10, "statusCode": 0},
            {"label": "t2", "value": "20.5"},
            {"label": "t3", "value": null, "status": 20}
        ]"#;
        let series = parse_json_str(text, "boiler").unwrap();
        assert_eq!(series.len(), 1);
        let s = &series[0];
        assert_eq!(s.name, "boiler");
        assert_eq!(s.samples[0], Sample::new("t1", 10.0).with_status(0));
        assert_eq!(s.samples[1].value, 20.5);
        assert_eq!(s.samples[1].status_code, None);
        assert!(s.samples[2].value.is_nan());
        assert_eq!(s.samples[2].status_code, Some(20));
    }

    #[test]
    fn test_wrapped_with_sensor() {
        let text = r#"{"sensor": "Pressure", "unit": "bar",
            "readings": [{"label": "a", "value": 1}, {"label": "b", "value": 2}]}"#;
        let series = parse_json_str(text, "file").unwrap();
        assert_eq!(series[0].name, "Pressure");
        assert_eq!(series[0].unit.as_deref(), Some("bar"));
        assert_eq!(series[0].samples.len(), 2);
    }

    #[test]
    fn test_data_key() {
        let text = r#"{"data": [{"label": "a", "value": 3}]}"#;
        let series = parse_json_str(text, "file").unwrap();
        assert_eq!(series[0].name, "file");
        assert_eq!(series[0].samples[0].value, 3.0);
    }

    #[test]
    fn test_multi_series() {
        let text = r#"{"series": [
            {"sensor": "Temp", "readings": [{"label": "a", "value": 1}]},
            {"data": [{"label": "a", "value": 2}]}
        ]}"#;
        let series = parse_json_str(text, "plant").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Temp");
        assert_eq!(series[1].name, "plant 2");
    }

    #[test]
    fn test_timestamp_label() {
        let text = r#"[{"timestamp": 0, "value": 1}, {"timestamp": 1700000000000, "value": 2}]"#;
        let series = parse_json_str(text, "s").unwrap();
        assert_eq!(series[0].samples[0].label, "1970-01-01 00:00:00");
        assert_eq!(series[0].samples[1].label, "2023-11-14 22:13:20");
    }

    #[test]
    fn test_missing_label_uses_position() {
        let series = parse_json_str(r#"[{"value": 1}, {"value": 2}]"#, "s").unwrap();
        assert_eq!(series[0].samples[1].label, "#2");
    }

    #[test]
    fn test_order_preserved() {
        let text = r#"[{"label": "z", "value": 3}, {"label": "a", "value": 1}]"#;
        let series = parse_json_str(text, "s").unwrap();
        let labels: Vec<_> = series[0].samples.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["z", "a"]);
    }

    #[test]
    fn test_non_numeric_values_are_invalid() {
        let text = r#"[{"label": "a", "value": "n/a"}, {"label": "b", "value": true}, {"label": "c"}]"#;
        let series = parse_json_str(text, "s").unwrap();
        assert!(series[0].samples.iter().all(|s| !s.is_valid()));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            parse_json_str("{\"foo\": 1}", "s"),
            Err(TraceChartsError::Serialization(_))
        ));
        assert!(parse_json_str("not json", "s").is_err());
    }
}
