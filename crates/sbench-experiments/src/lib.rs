//! sbench-experiments: class-like vs struct-like workloads and the sweep
//! orchestration that turns them into chart data.
//!
//! - `payload`: fixed-size byte blobs and size dispatch
//! - `array_creation`, `method_call`: the two workload families
//! - `runner`: runs one variant across the size sweep
//! - `factory`: picks the runner pair for a family
//! - `chart`: pairs both series under a title

pub mod array_creation;
pub mod chart;
pub mod factory;
pub mod method_call;
pub mod payload;
pub mod runner;

pub use chart::{ChartData, Experiments, ARRAY_CREATION_TITLE, METHOD_CALL_TITLE};
pub use factory::{ExperimentFamily, ExperimentsFactory, WorkloadSettings};
pub use runner::{Variant, VariantRunner};

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "sbench-experiments"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_label_is_stable() {
        assert_eq!(crate_label(), "sbench-experiments");
    }
}
