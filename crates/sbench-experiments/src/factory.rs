//! Selects the class/struct runner pair for a workload family.

use std::fmt;
use std::num::NonZeroUsize;

use sbench_core::config::{Config, DEFAULT_ARRAY_LENGTH};
use sbench_core::{SbenchError, SizeSweep};

use crate::array_creation::ArrayCreation;
use crate::method_call::MethodCall;
use crate::payload::{is_supported_size, MAX_BLOB_SIZE, MIN_BLOB_SIZE};
use crate::runner::{Variant, VariantRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperimentFamily {
    ArrayCreation,
    MethodCall,
}

impl ExperimentFamily {
    pub const ALL: [ExperimentFamily; 2] = [Self::ArrayCreation, Self::MethodCall];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ArrayCreation => "array",
            Self::MethodCall => "method",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "array" | "array-creation" | "array_creation" => Some(Self::ArrayCreation),
            "method" | "method-call" | "method_call" => Some(Self::MethodCall),
            _ => None,
        }
    }
}

impl fmt::Display for ExperimentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sweep and workload parameters shared by both variants of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadSettings {
    sweep: SizeSweep,
    array_length: NonZeroUsize,
}

impl Default for WorkloadSettings {
    fn default() -> Self {
        Self {
            sweep: SizeSweep::default(),
            array_length: NonZeroUsize::MIN.saturating_add(DEFAULT_ARRAY_LENGTH - 1),
        }
    }
}

impl WorkloadSettings {
    /// Rejects a sweep that reaches any size without a payload, before
    /// anything is measured.
    pub fn new(sweep: SizeSweep, array_length: usize) -> Result<Self, SbenchError> {
        if let Some(size) = sweep.sizes().into_iter().find(|&s| !is_supported_size(s)) {
            return Err(SbenchError::UnsupportedDataSize {
                size,
                min: MIN_BLOB_SIZE,
                max: MAX_BLOB_SIZE,
            });
        }
        let array_length =
            NonZeroUsize::new(array_length).ok_or(SbenchError::InvalidArrayLength)?;
        Ok(Self {
            sweep,
            array_length,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, SbenchError> {
        Self::new(cfg.size_sweep()?, cfg.workload.array_length)
    }

    pub fn sweep(&self) -> SizeSweep {
        self.sweep
    }

    pub fn array_length(&self) -> usize {
        self.array_length.get()
    }
}

/// Stateless lookup of the two runners for one family, fixed at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentsFactory {
    family: ExperimentFamily,
    settings: WorkloadSettings,
}

impl ExperimentsFactory {
    pub fn new(family: ExperimentFamily, settings: WorkloadSettings) -> Self {
        Self { family, settings }
    }

    pub fn family(&self) -> ExperimentFamily {
        self.family
    }

    pub fn create_class_runner(&self) -> VariantRunner {
        self.create_runner(Variant::Class)
    }

    pub fn create_struct_runner(&self) -> VariantRunner {
        self.create_runner(Variant::Struct)
    }

    fn create_runner(&self, variant: Variant) -> VariantRunner {
        let sweep = self.settings.sweep;
        match self.family {
            ExperimentFamily::ArrayCreation => VariantRunner::new(
                variant,
                sweep,
                Box::new(ArrayCreation::new(variant, self.settings.array_length)),
            ),
            ExperimentFamily::MethodCall => {
                VariantRunner::new(variant, sweep, Box::new(MethodCall::new(variant)))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use sbench_core::config::Config;
    use sbench_core::{SbenchError, SizeSweep};

    use super::{ExperimentFamily, ExperimentsFactory, WorkloadSettings};
    use crate::runner::Variant;

    #[test]
    fn default_settings_match_default_config() {
        let settings = WorkloadSettings::default();
        assert_eq!(settings.array_length(), 10_000);
        assert_eq!(settings, WorkloadSettings::from_config(&Config::default()).unwrap());
    }

    #[test]
    fn zero_array_length_is_rejected() {
        assert_eq!(
            WorkloadSettings::new(SizeSweep::default(), 0),
            Err(SbenchError::InvalidArrayLength)
        );
    }

    #[test]
    fn unsupported_sweep_sizes_are_rejected_up_front() {
        let sweep = SizeSweep::new(16, 48, 3).unwrap();
        assert_eq!(
            WorkloadSettings::new(sweep, 8),
            Err(SbenchError::UnsupportedDataSize {
                size: 48,
                min: 1,
                max: 4096,
            })
        );

        let too_large = SizeSweep::new(4096, 8192, 2).unwrap();
        assert!(matches!(
            WorkloadSettings::new(too_large, 8),
            Err(SbenchError::UnsupportedDataSize { size: 8192, .. })
        ));
    }

    #[test]
    fn runners_carry_their_variant_and_the_shared_sweep() {
        let sweep = SizeSweep::new(8, 64, 2).unwrap();
        let settings = WorkloadSettings::new(sweep, 4).unwrap();
        for family in ExperimentFamily::ALL {
            let factory = ExperimentsFactory::new(family, settings);
            assert_eq!(factory.family(), family);
            let class_runner = factory.create_class_runner();
            let struct_runner = factory.create_struct_runner();
            assert_eq!(class_runner.variant(), Variant::Class);
            assert_eq!(struct_runner.variant(), Variant::Struct);
            assert_eq!(class_runner.sweep(), sweep);
            assert_eq!(struct_runner.sweep(), sweep);
        }
    }

    #[test]
    fn family_parsing_accepts_short_and_long_names() {
        assert_eq!(ExperimentFamily::parse("array"), Some(ExperimentFamily::ArrayCreation));
        assert_eq!(
            ExperimentFamily::parse(" Method-Call "),
            Some(ExperimentFamily::MethodCall)
        );
        assert_eq!(ExperimentFamily::parse("sort"), None);
        assert_eq!(ExperimentFamily::MethodCall.to_string(), "method");
    }
}
