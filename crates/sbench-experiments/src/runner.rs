//! Runs one variant of a workload family across the size sweep.

use std::fmt;

use sbench_core::{Benchmark, ExperimentResult, SbenchError, SizeSweep, TaskSource};

/// Reference semantics (`Class`) or value semantics (`Struct`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Class,
    Struct,
}

impl Variant {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct VariantRunner {
    variant: Variant,
    sweep: SizeSweep,
    source: Box<dyn TaskSource>,
}

impl fmt::Debug for VariantRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantRunner")
            .field("variant", &self.variant)
            .field("sweep", &self.sweep)
            .finish_non_exhaustive()
    }
}

impl VariantRunner {
    pub fn new(variant: Variant, sweep: SizeSweep, source: Box<dyn TaskSource>) -> Self {
        Self {
            variant,
            sweep,
            source,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn sweep(&self) -> SizeSweep {
        self.sweep
    }

    /// Measures a fresh task at every sweep size, smallest first.
    ///
    /// The first failure is returned and the points gathered so far are
    /// dropped.
    pub fn run_sweep(
        &self,
        benchmark: &dyn Benchmark,
        repetition_count: usize,
    ) -> Result<Vec<ExperimentResult>, SbenchError> {
        if repetition_count == 0 {
            return Err(SbenchError::InvalidRepetitionCount(repetition_count));
        }

        let sizes = self.sweep.sizes();
        let mut results = Vec::with_capacity(sizes.len());
        for data_size in sizes {
            let mut task = self.source.create_task(data_size)?;
            let duration_ms = benchmark.measure_duration_ms(task.as_mut(), repetition_count)?;
            tracing::debug!(
                variant = self.variant.label(),
                data_size,
                duration_ms,
                "measured sweep point"
            );
            results.push(ExperimentResult::new(data_size, duration_ms));
        }
        Ok(results)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use sbench_core::{
        Benchmark, SbenchError, SizeSweep, StopwatchBenchmark, Task, TaskError, TaskResult,
    };

    use super::{Variant, VariantRunner};

    /// Returns the data size as the duration so ordering is observable.
    struct SizeEchoBenchmark {
        sizes: Rc<RefCell<Vec<usize>>>,
    }

    impl Benchmark for SizeEchoBenchmark {
        fn measure_duration_ms(
            &self,
            task: &mut dyn Task,
            _repetition_count: usize,
        ) -> Result<f64, SbenchError> {
            task.run()?;
            let last = self.sizes.borrow().last().copied().unwrap_or(0);
            Ok(last as f64)
        }
    }

    fn recording_runner(sizes: Rc<RefCell<Vec<usize>>>) -> VariantRunner {
        VariantRunner::new(
            Variant::Struct,
            SizeSweep::default(),
            Box::new(move |size: usize| -> Result<Box<dyn Task>, SbenchError> {
                sizes.borrow_mut().push(size);
                Ok(Box::new(|| -> TaskResult { Ok(()) }))
            }),
        )
    }

    #[test]
    fn builds_a_fresh_task_per_size_in_order() {
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let runner = recording_runner(Rc::clone(&sizes));
        let benchmark = SizeEchoBenchmark {
            sizes: Rc::clone(&sizes),
        };

        let results = runner.run_sweep(&benchmark, 5).unwrap();
        assert_eq!(*sizes.borrow(), vec![16, 32, 64, 128, 256, 512]);
        for point in &results {
            assert_eq!(point.duration_ms(), point.data_size() as f64);
        }
    }

    #[test]
    fn zero_repetitions_fails_before_building_tasks() {
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let runner = recording_runner(Rc::clone(&sizes));
        let err = runner
            .run_sweep(&StopwatchBenchmark::new(), 0)
            .unwrap_err();
        assert_eq!(err, SbenchError::InvalidRepetitionCount(0));
        assert!(sizes.borrow().is_empty());
    }

    #[test]
    fn failing_size_aborts_the_whole_sweep() {
        let runner = VariantRunner::new(
            Variant::Class,
            SizeSweep::default(),
            Box::new(|size: usize| -> Result<Box<dyn Task>, SbenchError> {
                Ok(Box::new(move || -> TaskResult {
                    if size == 128 {
                        Err(TaskError::new("size 128 exploded"))
                    } else {
                        Ok(())
                    }
                }))
            }),
        );
        let err = runner
            .run_sweep(&StopwatchBenchmark::new(), 2)
            .unwrap_err();
        assert_eq!(err, SbenchError::Task(TaskError::new("size 128 exploded")));
    }

    #[test]
    fn variant_labels() {
        assert_eq!(Variant::Class.to_string(), "class");
        assert_eq!(Variant::Struct.label(), "struct");
    }
}
