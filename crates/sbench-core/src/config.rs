//! Harness configuration: defaults, YAML file overlay, validation and tilde
//! path expansion.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::benchmark::{StopwatchBenchmark, DEFAULT_WARMUP_RUNS};
use crate::error::SbenchError;
use crate::sweep::{
    SizeSweep, DEFAULT_SWEEP_END, DEFAULT_SWEEP_MULTIPLIER, DEFAULT_SWEEP_START,
};

pub const DEFAULT_REPETITIONS: usize = 20;
pub const DEFAULT_ARRAY_LENGTH: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub benchmark: BenchmarkConfig,
    pub sweep: SweepConfig,
    pub workload: WorkloadConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    pub repetitions: usize,
    pub warmup_runs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    pub start: usize,
    pub end: usize,
    pub multiplier: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Elements per array in the array-creation experiment.
    pub array_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            benchmark: BenchmarkConfig {
                repetitions: DEFAULT_REPETITIONS,
                warmup_runs: DEFAULT_WARMUP_RUNS,
            },
            sweep: SweepConfig {
                start: DEFAULT_SWEEP_START,
                end: DEFAULT_SWEEP_END,
                multiplier: DEFAULT_SWEEP_MULTIPLIER,
            },
            workload: WorkloadConfig {
                array_length: DEFAULT_ARRAY_LENGTH,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "console".to_string(),
            },
        }
    }
}

impl Config {
    /// Validates the whole configuration, reporting the first failing key.
    pub fn validate(&self) -> Result<(), SbenchError> {
        if self.benchmark.repetitions < 1 {
            return Err(config_error("benchmark.repetitions must be at least 1"));
        }

        SizeSweep::new(self.sweep.start, self.sweep.end, self.sweep.multiplier)
            .map_err(|err| config_error(&format!("sweep: {err}")))?;

        if self.workload.array_length < 1 {
            return Err(config_error("workload.array_length must be at least 1"));
        }

        match self.logging.level.to_lowercase().trim() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(config_error(
                    "logging.level must be one of trace, debug, info, warn, error",
                ))
            }
        }
        match self.logging.format.to_lowercase().trim() {
            "console" | "json" => {}
            _ => return Err(config_error("logging.format must be one of console, json")),
        }

        Ok(())
    }

    pub fn size_sweep(&self) -> Result<SizeSweep, SbenchError> {
        SizeSweep::new(self.sweep.start, self.sweep.end, self.sweep.multiplier)
    }

    pub fn stopwatch(&self) -> StopwatchBenchmark {
        StopwatchBenchmark::with_warmup_runs(self.benchmark.warmup_runs)
    }
}

fn config_error(message: &str) -> SbenchError {
    SbenchError::Config(message.to_string())
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    #[serde(default)]
    benchmark: PartialBenchmarkConfig,
    #[serde(default)]
    sweep: PartialSweepConfig,
    #[serde(default)]
    workload: PartialWorkloadConfig,
    #[serde(default)]
    logging: PartialLoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialBenchmarkConfig {
    #[serde(default)]
    repetitions: Option<usize>,
    #[serde(default)]
    warmup_runs: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialSweepConfig {
    #[serde(default)]
    start: Option<usize>,
    #[serde(default)]
    end: Option<usize>,
    #[serde(default)]
    multiplier: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialWorkloadConfig {
    #[serde(default)]
    array_length: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialLoggingConfig {
    #[serde(default)]
    level: String,
    #[serde(default)]
    format: String,
}

/// Load config with precedence defaults < config file.
///
/// An explicit path that cannot be read is a hard error; a missing default
/// file is not. Returns the path that was applied, if any.
pub fn load_config(config_file: Option<&str>) -> Result<(Config, Option<PathBuf>), SbenchError> {
    load_config_or(config_file, default_config_path())
}

fn load_config_or(
    config_file: Option<&str>,
    fallback: Option<PathBuf>,
) -> Result<(Config, Option<PathBuf>), SbenchError> {
    let mut cfg = Config::default();

    let explicit = config_file
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(expand_tilde)
        .transpose()?;

    let (path_to_try, used) = match explicit {
        Some(path) => (Some(path), true),
        None => (fallback, false),
    };

    if let Some(path) = path_to_try {
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                apply_yaml(&mut cfg, &text)?;
                return Ok((cfg, Some(path)));
            }
            Err(err) => {
                if used {
                    return Err(config_error(&format!(
                        "failed to load config file {}: {err}",
                        path.display()
                    )));
                }
            }
        }
    }

    Ok((cfg, None))
}

/// Overlay YAML text onto an existing config and re-validate it.
pub fn apply_yaml(cfg: &mut Config, text: &str) -> Result<(), SbenchError> {
    let parsed: PartialConfig = if text.trim().is_empty() {
        PartialConfig::default()
    } else {
        serde_yaml::from_str(text).map_err(|err| config_error(&format!("parse config: {err}")))?
    };
    apply_partial(cfg, parsed);
    cfg.validate()
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            return Some(PathBuf::from(xdg).join("sbench").join("config.yaml"));
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(
                PathBuf::from(home)
                    .join(".config")
                    .join("sbench")
                    .join("config.yaml"),
            );
        }
    }
    None
}

fn apply_partial(cfg: &mut Config, partial: PartialConfig) {
    if let Some(repetitions) = partial.benchmark.repetitions {
        cfg.benchmark.repetitions = repetitions;
    }
    if let Some(warmup_runs) = partial.benchmark.warmup_runs {
        cfg.benchmark.warmup_runs = warmup_runs;
    }
    if let Some(start) = partial.sweep.start {
        cfg.sweep.start = start;
    }
    if let Some(end) = partial.sweep.end {
        cfg.sweep.end = end;
    }
    if let Some(multiplier) = partial.sweep.multiplier {
        cfg.sweep.multiplier = multiplier;
    }
    if let Some(array_length) = partial.workload.array_length {
        cfg.workload.array_length = array_length;
    }
    if !partial.logging.level.trim().is_empty() {
        cfg.logging.level = partial.logging.level.trim().to_lowercase();
    }
    if !partial.logging.format.trim().is_empty() {
        cfg.logging.format = partial.logging.format.trim().to_lowercase();
    }
}

fn expand_tilde(input: &str) -> Result<PathBuf, SbenchError> {
    if input == "~" {
        let home = std::env::var("HOME").map_err(|_| config_error("failed to resolve HOME"))?;
        return Ok(PathBuf::from(home));
    }
    if let Some(rest) = input.strip_prefix("~/") {
        let home = std::env::var("HOME").map_err(|_| config_error("failed to resolve HOME"))?;
        return Ok(PathBuf::from(home).join(rest));
    }
    Ok(Path::new(input).to_path_buf())
}
