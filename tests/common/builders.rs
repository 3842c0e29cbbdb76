//! Test data builders for creating sample series

use trace_charts::{Sample, SensorSeries};

/// Builder for a single sample
pub struct SampleBuilder {
    label: String,
    value: f64,
    status: Option<i32>,
}

impl SampleBuilder {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: 0.0,
            status: None,
        }
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn invalid(mut self) -> Self {
        self.value = f64::NAN;
        self
    }

    pub fn status(mut self, code: i32) -> Self {
        self.status = Some(code);
        self
    }

    pub fn build(self) -> Sample {
        Sample {
            label: self.label,
            value: self.value,
            status_code: self.status,
        }
    }
}

/// Builder for a labeled series; labels default to `t1`, `t2`, ...
pub struct SeriesBuilder {
    name: String,
    unit: Option<String>,
    samples: Vec<Sample>,
}

impl SeriesBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: None,
            samples: Vec::new(),
        }
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Append one sample per value with generated labels
    pub fn values(mut self, values: &[f64]) -> Self {
        for &v in values {
            let label = format!("t{}", self.samples.len() + 1);
            self.samples.push(Sample::new(label, v));
        }
        self
    }

    /// Append one sample per `(value, status)` pair
    pub fn with_statuses(mut self, values: &[(f64, i32)]) -> Self {
        for &(v, code) in values {
            let label = format!("t{}", self.samples.len() + 1);
            self.samples.push(Sample::new(label, v).with_status(code));
        }
        self
    }

    pub fn sample(mut self, sample: Sample) -> Self {
        self.samples.push(sample);
        self
    }

    pub fn samples(&self) -> Vec<Sample> {
        self.samples.clone()
    }

    pub fn build(self) -> SensorSeries {
        SensorSeries {
            name: self.name,
            unit: self.unit,
            samples: self.samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_builder() {
        let sample = SampleBuilder::new("t9").value(4.5).status(10).build();
        assert_eq!(sample.label, "t9");
        assert_eq!(sample.value, 4.5);
        assert_eq!(sample.status_code, Some(10));
    }

    #[test]
    fn test_series_builder_labels() {
        let series = SeriesBuilder::new("temp")
            .unit("°C")
            .values(&[1.0, 2.0])
            .sample(SampleBuilder::new("gap").invalid().build())
            .values(&[3.0])
            .build();

        let labels: Vec<_> = series.samples.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["t1", "t2", "gap", "t4"]);
        assert_eq!(series.unit.as_deref(), Some("°C"));
        assert_eq!(series.valid_count(), 3);
    }
}
