use serde::Serialize;

/// One measured point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExperimentResult {
    data_size: usize,
    duration_ms: f64,
}

impl ExperimentResult {
    pub fn new(data_size: usize, duration_ms: f64) -> Self {
        Self {
            data_size,
            duration_ms,
        }
    }

    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Mean duration of one repetition, in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::ExperimentResult;

    #[test]
    fn getters_return_the_measured_point() {
        let point = ExperimentResult::new(512, 0.25);
        assert_eq!(point.data_size(), 512);
        assert_eq!(point.duration_ms(), 0.25);
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let point = ExperimentResult::new(16, 0.5);
        let yaml = serde_yaml::to_string(&point).unwrap_or_default();
        assert!(yaml.contains("data_size: 16"));
        assert!(yaml.contains("duration_ms: 0.5"));
    }
}
