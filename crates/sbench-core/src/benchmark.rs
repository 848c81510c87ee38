//! Stopwatch benchmark engine.
//!
//! `measure_duration_ms` runs the warm-up pass, then times a tight loop of
//! repetitions and returns the mean wall-clock cost of one call.

use std::time::Instant;

use crate::error::SbenchError;
use crate::task::Task;

pub const DEFAULT_WARMUP_RUNS: usize = 1;

/// Measures the mean duration of a task.
pub trait Benchmark {
    fn measure_duration_ms(
        &self,
        task: &mut dyn Task,
        repetition_count: usize,
    ) -> Result<f64, SbenchError>;
}

/// Wall-clock benchmark on a monotonic [`Instant`] timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopwatchBenchmark {
    warmup_runs: usize,
}

impl Default for StopwatchBenchmark {
    fn default() -> Self {
        Self {
            warmup_runs: DEFAULT_WARMUP_RUNS,
        }
    }
}

impl StopwatchBenchmark {
    pub fn new() -> Self {
        Self::default()
    }

    /// Untimed runs before the timer starts. Zero disables the warm-up.
    pub fn with_warmup_runs(warmup_runs: usize) -> Self {
        Self { warmup_runs }
    }

    pub fn warmup_runs(&self) -> usize {
        self.warmup_runs
    }

    // Values left over from earlier runs were already dropped at scope exit,
    // so there is no collector to drain here.
    fn settle(&self) {}
}

impl Benchmark for StopwatchBenchmark {
    fn measure_duration_ms(
        &self,
        task: &mut dyn Task,
        repetition_count: usize,
    ) -> Result<f64, SbenchError> {
        if repetition_count == 0 {
            return Err(SbenchError::InvalidRepetitionCount(repetition_count));
        }

        self.settle();
        for _ in 0..self.warmup_runs {
            task.run()?;
        }

        let started = Instant::now();
        for _ in 0..repetition_count {
            task.run()?;
        }
        let elapsed = started.elapsed();

        Ok(elapsed.as_secs_f64() * 1000.0 / repetition_count as f64)
    }
}
