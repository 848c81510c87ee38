//! Geometric size sweep shared by every workload family.

use crate::error::SbenchError;

pub const DEFAULT_SWEEP_START: usize = 16;
pub const DEFAULT_SWEEP_END: usize = 512;
pub const DEFAULT_SWEEP_MULTIPLIER: usize = 2;

/// Sizes from `start` up to and including `end`, multiplying by
/// `multiplier` at each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSweep {
    start: usize,
    end: usize,
    multiplier: usize,
}

impl Default for SizeSweep {
    fn default() -> Self {
        Self {
            start: DEFAULT_SWEEP_START,
            end: DEFAULT_SWEEP_END,
            multiplier: DEFAULT_SWEEP_MULTIPLIER,
        }
    }
}

impl SizeSweep {
    pub fn new(start: usize, end: usize, multiplier: usize) -> Result<Self, SbenchError> {
        if start == 0 {
            return Err(SbenchError::InvalidSweep("start must be at least 1".into()));
        }
        if end < start {
            return Err(SbenchError::InvalidSweep(format!(
                "end {end} is below start {start}"
            )));
        }
        if multiplier < 2 {
            return Err(SbenchError::InvalidSweep(
                "multiplier must be at least 2".into(),
            ));
        }
        Ok(Self {
            start,
            end,
            multiplier,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn multiplier(&self) -> usize {
        self.multiplier
    }

    /// Sizes in ascending order.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut size = self.start;
        while size <= self.end {
            sizes.push(size);
            match size.checked_mul(self.multiplier) {
                Some(next) => size = next,
                None => break,
            }
        }
        sizes
    }
}
