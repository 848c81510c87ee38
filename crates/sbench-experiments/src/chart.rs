//! Chart data aggregation and the two experiment entry points.

use serde::Serialize;

use sbench_core::{Benchmark, ExperimentResult, SbenchError};

use crate::factory::{ExperimentFamily, ExperimentsFactory, WorkloadSettings};

pub const ARRAY_CREATION_TITLE: &str = "Create array";
pub const METHOD_CALL_TITLE: &str = "Call method with argument";

/// Both variant series of one experiment under a title.
///
/// The two series always have the same length and the same `data_size` at
/// every index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    title: String,
    class_points: Vec<ExperimentResult>,
    struct_points: Vec<ExperimentResult>,
}

impl ChartData {
    pub fn new(
        title: impl Into<String>,
        class_points: Vec<ExperimentResult>,
        struct_points: Vec<ExperimentResult>,
    ) -> Result<Self, SbenchError> {
        let longest = class_points.len().max(struct_points.len());
        for index in 0..longest {
            let class_size = class_points.get(index).map(ExperimentResult::data_size);
            let struct_size = struct_points.get(index).map(ExperimentResult::data_size);
            if class_size != struct_size {
                return Err(SbenchError::MismatchedSeries {
                    index,
                    class_size,
                    struct_size,
                });
            }
        }
        Ok(Self {
            title: title.into(),
            class_points,
            struct_points,
        })
    }

    /// Runs the class sweep, then the struct sweep, with the same repetition
    /// count.
    pub fn build(
        title: impl Into<String>,
        factory: &ExperimentsFactory,
        benchmark: &dyn Benchmark,
        repetition_count: usize,
    ) -> Result<Self, SbenchError> {
        let title = title.into();
        let class_points = factory
            .create_class_runner()
            .run_sweep(benchmark, repetition_count)?;
        let struct_points = factory
            .create_struct_runner()
            .run_sweep(benchmark, repetition_count)?;
        tracing::info!(
            title = %title,
            family = %factory.family(),
            points = class_points.len(),
            repetition_count,
            "built chart data"
        );
        Self::new(title, class_points, struct_points)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn class_points(&self) -> &[ExperimentResult] {
        &self.class_points
    }

    pub fn struct_points(&self) -> &[ExperimentResult] {
        &self.struct_points
    }

    /// Class and struct points paired by index.
    pub fn rows(&self) -> impl Iterator<Item = (&ExperimentResult, &ExperimentResult)> + '_ {
        self.class_points.iter().zip(self.struct_points.iter())
    }
}

/// Owns one factory per family; built once and passed to whoever needs to
/// produce charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experiments {
    array_creation: ExperimentsFactory,
    method_call: ExperimentsFactory,
}

impl Default for Experiments {
    fn default() -> Self {
        Self::new(WorkloadSettings::default())
    }
}

impl Experiments {
    pub fn new(settings: WorkloadSettings) -> Self {
        Self {
            array_creation: ExperimentsFactory::new(ExperimentFamily::ArrayCreation, settings),
            method_call: ExperimentsFactory::new(ExperimentFamily::MethodCall, settings),
        }
    }

    pub fn build_chart_data_for_array_creation(
        &self,
        benchmark: &dyn Benchmark,
        repetition_count: usize,
    ) -> Result<ChartData, SbenchError> {
        ChartData::build(
            ARRAY_CREATION_TITLE,
            &self.array_creation,
            benchmark,
            repetition_count,
        )
    }

    pub fn build_chart_data_for_method_call(
        &self,
        benchmark: &dyn Benchmark,
        repetition_count: usize,
    ) -> Result<ChartData, SbenchError> {
        ChartData::build(METHOD_CALL_TITLE, &self.method_call, benchmark, repetition_count)
    }

    pub fn build_chart_data(
        &self,
        family: ExperimentFamily,
        benchmark: &dyn Benchmark,
        repetition_count: usize,
    ) -> Result<ChartData, SbenchError> {
        match family {
            ExperimentFamily::ArrayCreation => {
                self.build_chart_data_for_array_creation(benchmark, repetition_count)
            }
            ExperimentFamily::MethodCall => {
                self.build_chart_data_for_method_call(benchmark, repetition_count)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use sbench_core::{ExperimentResult, SbenchError};

    use super::ChartData;

    fn points(sizes: &[usize]) -> Vec<ExperimentResult> {
        sizes.iter().map(|&s| ExperimentResult::new(s, 1.0)).collect()
    }

    #[test]
    fn matching_series_are_accepted() {
        let chart = ChartData::new("t", points(&[16, 32]), points(&[16, 32])).unwrap();
        assert_eq!(chart.title(), "t");
        assert_eq!(chart.rows().count(), 2);
    }

    #[test]
    fn length_mismatch_is_reported_at_first_missing_index() {
        let err = ChartData::new("t", points(&[16, 32]), points(&[16])).unwrap_err();
        assert_eq!(
            err,
            SbenchError::MismatchedSeries {
                index: 1,
                class_size: Some(32),
                struct_size: None,
            }
        );
    }

    #[test]
    fn size_mismatch_is_reported() {
        let err = ChartData::new("t", points(&[16, 32]), points(&[16, 64])).unwrap_err();
        assert!(matches!(err, SbenchError::MismatchedSeries { index: 1, .. }));
    }

    #[test]
    fn serializes_title_and_both_series() {
        let chart = ChartData::new("Create array", points(&[16]), points(&[16])).unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["title"], "Create array");
        assert_eq!(json["class_points"][0]["data_size"], 16);
        assert_eq!(json["struct_points"][0]["duration_ms"], 1.0);
    }
}
