//! sbench-core: measurement primitives for the sbench harness.
//!
//! Defines the task contracts, the stopwatch benchmark engine, the
//! experiment result record, the size sweep policy, configuration loading,
//! and the shared error type. Everything here runs on the caller's thread.

pub mod benchmark;
pub mod config;
pub mod error;
pub mod result;
pub mod sweep;
pub mod task;

pub use benchmark::{Benchmark, StopwatchBenchmark, DEFAULT_WARMUP_RUNS};
pub use error::{SbenchError, TaskError};
pub use result::ExperimentResult;
pub use sweep::SizeSweep;
pub use task::{Task, TaskResult, TaskSource};

/// Crate identity label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "sbench-core"
}
