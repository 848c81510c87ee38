//! Array creation: a heap box per element versus elements stored inline.

use std::hint::black_box;
use std::num::NonZeroUsize;

use sbench_core::{SbenchError, Task, TaskResult, TaskSource};

use crate::payload::{build_for_size, Blob, BlobTaskBuilder};
use crate::runner::Variant;

/// Fills a `Vec<Box<Blob<N>>>`: one allocation per element.
#[derive(Debug, Clone, Copy)]
pub struct ClassArrayCreationTask<const N: usize> {
    length: usize,
}

impl<const N: usize> ClassArrayCreationTask<N> {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl<const N: usize> Task for ClassArrayCreationTask<N> {
    fn run(&mut self) -> TaskResult {
        let array: Vec<Box<Blob<N>>> = (0..self.length)
            .map(|_| Box::new(black_box(Blob::zeroed())))
            .collect();
        black_box(&array);
        Ok(())
    }
}

/// Fills a `Vec<Blob<N>>`: a single contiguous allocation.
#[derive(Debug, Clone, Copy)]
pub struct StructArrayCreationTask<const N: usize> {
    length: usize,
}

impl<const N: usize> StructArrayCreationTask<N> {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl<const N: usize> Task for StructArrayCreationTask<N> {
    fn run(&mut self) -> TaskResult {
        let array: Vec<Blob<N>> = vec![black_box(Blob::zeroed()); self.length];
        black_box(&array);
        Ok(())
    }
}

struct ClassArrayBuilder {
    length: usize,
}

impl BlobTaskBuilder for ClassArrayBuilder {
    fn build<const N: usize>(&self) -> Box<dyn Task> {
        Box::new(ClassArrayCreationTask::<N>::new(self.length))
    }
}

struct StructArrayBuilder {
    length: usize,
}

impl BlobTaskBuilder for StructArrayBuilder {
    fn build<const N: usize>(&self) -> Box<dyn Task> {
        Box::new(StructArrayCreationTask::<N>::new(self.length))
    }
}

/// Size-parameterized constructor for array-creation tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayCreation {
    variant: Variant,
    array_length: NonZeroUsize,
}

impl ArrayCreation {
    pub fn new(variant: Variant, array_length: NonZeroUsize) -> Self {
        Self {
            variant,
            array_length,
        }
    }
}

impl TaskSource for ArrayCreation {
    fn create_task(&self, data_size: usize) -> Result<Box<dyn Task>, SbenchError> {
        let length = self.array_length.get();
        match self.variant {
            Variant::Class => build_for_size(data_size, &ClassArrayBuilder { length }),
            Variant::Struct => build_for_size(data_size, &StructArrayBuilder { length }),
        }
    }
}
