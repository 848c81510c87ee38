//! Method call with argument: passing a boxed blob by reference versus
//! passing the blob itself by value.

use std::hint::black_box;

use sbench_core::{SbenchError, Task, TaskResult, TaskSource};

use crate::payload::{build_for_size, Blob, BlobTaskBuilder};
use crate::runner::Variant;

#[inline(never)]
fn take_by_reference<const N: usize>(blob: &Blob<N>) {
    black_box(blob.as_bytes());
}

#[inline(never)]
fn take_by_value<const N: usize>(blob: Blob<N>) {
    black_box(blob.as_bytes());
}

/// Holds a boxed blob allocated once; each run passes a reference to it.
#[derive(Debug, Clone)]
pub struct MethodCallWithClassArgumentTask<const N: usize> {
    argument: Box<Blob<N>>,
}

impl<const N: usize> MethodCallWithClassArgumentTask<N> {
    pub fn new() -> Self {
        Self {
            argument: Box::new(Blob::filled(1)),
        }
    }
}

impl<const N: usize> Default for MethodCallWithClassArgumentTask<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Task for MethodCallWithClassArgumentTask<N> {
    fn run(&mut self) -> TaskResult {
        take_by_reference(black_box(&*self.argument));
        Ok(())
    }
}

/// Holds a blob inline; each run copies all `N` bytes into the call.
#[derive(Debug, Clone, Copy)]
pub struct MethodCallWithStructArgumentTask<const N: usize> {
    argument: Blob<N>,
}

impl<const N: usize> MethodCallWithStructArgumentTask<N> {
    pub fn new() -> Self {
        Self {
            argument: Blob::filled(1),
        }
    }
}

impl<const N: usize> Default for MethodCallWithStructArgumentTask<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Task for MethodCallWithStructArgumentTask<N> {
    fn run(&mut self) -> TaskResult {
        take_by_value(black_box(self.argument));
        Ok(())
    }
}

struct ClassArgumentBuilder;

impl BlobTaskBuilder for ClassArgumentBuilder {
    fn build<const N: usize>(&self) -> Box<dyn Task> {
        Box::new(MethodCallWithClassArgumentTask::<N>::new())
    }
}

struct StructArgumentBuilder;

impl BlobTaskBuilder for StructArgumentBuilder {
    fn build<const N: usize>(&self) -> Box<dyn Task> {
        Box::new(MethodCallWithStructArgumentTask::<N>::new())
    }
}

/// Size-parameterized constructor for method-call tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodCall {
    variant: Variant,
}

impl MethodCall {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }
}

impl TaskSource for MethodCall {
    fn create_task(&self, data_size: usize) -> Result<Box<dyn Task>, SbenchError> {
        match self.variant {
            Variant::Class => build_for_size(data_size, &ClassArgumentBuilder),
            Variant::Struct => build_for_size(data_size, &StructArgumentBuilder),
        }
    }
}
