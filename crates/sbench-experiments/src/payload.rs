//! Fixed-size payloads and runtime size dispatch.
//!
//! A data size picked at runtime selects one monomorphized `Blob<N>` task.
//! Only powers of two between [`MIN_BLOB_SIZE`] and [`MAX_BLOB_SIZE`] have a
//! matching instantiation.

use sbench_core::{SbenchError, Task};

pub const MIN_BLOB_SIZE: usize = 1;
pub const MAX_BLOB_SIZE: usize = 4096;

/// `N` bytes held inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blob<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Blob<N> {
    pub fn filled(byte: u8) -> Self {
        Self { bytes: [byte; N] }
    }

    pub fn zeroed() -> Self {
        Self::filled(0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Builds a task for one concrete blob size.
pub trait BlobTaskBuilder {
    fn build<const N: usize>(&self) -> Box<dyn Task>;
}

pub fn is_supported_size(size: usize) -> bool {
    (MIN_BLOB_SIZE..=MAX_BLOB_SIZE).contains(&size) && size.is_power_of_two()
}

/// Builds the task matching `size`, or rejects sizes without an instantiation.
pub fn build_for_size<B: BlobTaskBuilder>(
    size: usize,
    builder: &B,
) -> Result<Box<dyn Task>, SbenchError> {
    let task = match size {
        1 => builder.build::<1>(),
        2 => builder.build::<2>(),
        4 => builder.build::<4>(),
        8 => builder.build::<8>(),
        16 => builder.build::<16>(),
        32 => builder.build::<32>(),
        64 => builder.build::<64>(),
        128 => builder.build::<128>(),
        256 => builder.build::<256>(),
        512 => builder.build::<512>(),
        1024 => builder.build::<1024>(),
        2048 => builder.build::<2048>(),
        4096 => builder.build::<4096>(),
        other => {
            return Err(SbenchError::UnsupportedDataSize {
                size: other,
                min: MIN_BLOB_SIZE,
                max: MAX_BLOB_SIZE,
            })
        }
    };
    Ok(task)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::cell::Cell;

    use sbench_core::{SbenchError, Task, TaskResult};

    use super::{build_for_size, is_supported_size, Blob, BlobTaskBuilder, MAX_BLOB_SIZE};

    struct SizeRecorder {
        seen: Cell<usize>,
    }

    impl BlobTaskBuilder for SizeRecorder {
        fn build<const N: usize>(&self) -> Box<dyn Task> {
            self.seen.set(std::mem::size_of_val(&Blob::<N>::zeroed()));
            Box::new(|| -> TaskResult { Ok(()) })
        }
    }

    #[test]
    fn blob_occupies_exactly_n_bytes() {
        assert_eq!(std::mem::size_of::<Blob<16>>(), 16);
        assert_eq!(std::mem::size_of::<Blob<512>>(), 512);
        assert_eq!(Blob::<8>::filled(7).as_bytes(), &[7; 8]);
    }

    #[test]
    fn every_power_of_two_dispatches_to_its_own_size() {
        let recorder = SizeRecorder { seen: Cell::new(0) };
        let mut size = 1;
        while size <= MAX_BLOB_SIZE {
            assert!(is_supported_size(size));
            build_for_size(size, &recorder).unwrap();
            assert_eq!(recorder.seen.get(), size);
            size *= 2;
        }
    }

    #[test]
    fn other_sizes_are_rejected() {
        let recorder = SizeRecorder { seen: Cell::new(0) };
        for size in [0, 3, 48, 8192] {
            assert!(!is_supported_size(size));
            let err = build_for_size(size, &recorder).err().unwrap();
            assert!(matches!(err, SbenchError::UnsupportedDataSize { size: s, .. } if s == size));
        }
        assert_eq!(recorder.seen.get(), 0);
    }
}
