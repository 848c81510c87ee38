//! Task contracts: the unit of work under measurement and the
//! size-parameterized constructor that workload families expose.

use crate::error::{SbenchError, TaskError};

pub type TaskResult = Result<(), TaskError>;

/// A repeatable, side-effect-only unit of work.
///
/// Every call performs the same logical operation. Allocations made inside
/// `run` are part of what gets measured.
pub trait Task {
    fn run(&mut self) -> TaskResult;
}

impl<F> Task for F
where
    F: FnMut() -> TaskResult,
{
    fn run(&mut self) -> TaskResult {
        self()
    }
}

/// Builds a fresh task for a given data size.
pub trait TaskSource {
    fn create_task(&self, data_size: usize) -> Result<Box<dyn Task>, SbenchError>;
}

impl<F> TaskSource for F
where
    F: Fn(usize) -> Result<Box<dyn Task>, SbenchError>,
{
    fn create_task(&self, data_size: usize) -> Result<Box<dyn Task>, SbenchError> {
        self(data_size)
    }
}
