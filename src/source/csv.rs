//! CSV series files
//!
//! Format: a `label,value[,status]` header followed by one reading per
//! line. Blank lines and lines starting with `#` are skipped. Fields are
//! trimmed; quoting is not supported.

use super::SensorSeries;
use crate::error::{Result, TraceChartsError};
use crate::types::Sample;

/// Parse CSV text into a single series
pub fn parse_csv_str(text: &str, name: &str) -> Result<SensorSeries> {
    let mut samples = Vec::new();
    let mut header_seen = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        if !header_seen {
            header_seen = true;
            if is_header(&fields) {
                continue;
            }
            return Err(TraceChartsError::parse(
                line_no,
                "expected header `label,value[,status]`",
            ));
        }

        if fields.len() < 2 {
            return Err(TraceChartsError::parse(
                line_no,
                format!("expected at least 2 columns, found {}", fields.len()),
            ));
        }

        let value = fields[1].parse::<f64>().unwrap_or_else(|_| {
            tracing::trace!(line = line_no, raw = fields[1], "unreadable value");
            f64::NAN
        });
        let status_code = fields
            .get(2)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i32>().ok());

        samples.push(Sample {
            label: fields[0].to_string(),
            value,
            status_code,
        });
    }

    Ok(SensorSeries::new(name, samples))
}

fn is_header(fields: &[&str]) -> bool {
    fields.len() >= 2
        && fields[0].eq_ignore_ascii_case("label")
        && fields[1].eq_ignore_ascii_case("value")
}
