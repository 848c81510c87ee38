//! sbench-cli: command-line surface for the sbench harness.

pub mod logging;
pub mod report;

use sbench_core::config::{load_config, Config};
use sbench_core::{SbenchError, StopwatchBenchmark};
use sbench_experiments::{ChartData, ExperimentFamily, Experiments, WorkloadSettings};

use crate::report::{render_json, render_tables, Report};

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "sbench-cli"
}

fn help_text() -> String {
    "\
sbench measures class-like (boxed, by reference) against struct-like
(inline, by value) workloads across a sweep of data sizes.

Usage:
  sbench [flags]

Flags:
  -e, --experiment string      array, method or all (default \"all\")
  -r, --repetitions int        timed runs per data size (default 20)
      --warmup int             untimed runs before timing (default 1)
      --sweep-start int        first data size (default 16)
      --sweep-end int          last data size, inclusive (default 512)
      --sweep-multiplier int   growth factor between sizes (default 2)
      --array-length int       elements per array in the array experiment (default 10000)
      --config string          config file (default $XDG_CONFIG_HOME/sbench/config.yaml)
      --log-level string       trace, debug, info, warn or error
      --log-format string      console or json
      --json                   print a JSON report instead of tables
  -h, --help                   help for sbench
  -v, --version                version for sbench
"
    .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn ok(stdout: String) -> Self {
        Self {
            stdout,
            stderr: String::new(),
            exit_code: 0,
        }
    }

    fn failure(exit_code: i32, message: &str) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("{message}\n"),
            exit_code,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RunArgs {
    families: Vec<ExperimentFamily>,
    repetitions: Option<usize>,
    warmup_runs: Option<usize>,
    sweep_start: Option<usize>,
    sweep_end: Option<usize>,
    sweep_multiplier: Option<usize>,
    array_length: Option<usize>,
    config_file: Option<String>,
    log_level: Option<String>,
    log_format: Option<String>,
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Help,
    Version,
    Run(RunArgs),
}

/// Run the CLI from test arguments.
pub fn run_cli_for_test(args: &[&str]) -> CommandOutput {
    let owned: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
    run_cli(&owned)
}

pub fn run_cli(args: &[String]) -> CommandOutput {
    match execute(args) {
        Ok(output) => output,
        Err((exit_code, message)) => CommandOutput::failure(exit_code, &message),
    }
}

fn execute(args: &[String]) -> Result<CommandOutput, (i32, String)> {
    let run = match parse_args(args)? {
        Parsed::Help => return Ok(CommandOutput::ok(help_text())),
        Parsed::Version => {
            return Ok(CommandOutput::ok(format!(
                "sbench version {}\n",
                env!("CARGO_PKG_VERSION")
            )))
        }
        Parsed::Run(run) => run,
    };

    let (cfg, config_path) = load_config(run.config_file.as_deref())
        .map_err(|err| (1, format!("error: {err}")))?;
    let cfg = apply_flags(cfg, &run).map_err(|err| (2, format!("error: {err}")))?;
    logging::init(&cfg.logging).map_err(|err| (2, format!("error: {err}")))?;
    if let Some(path) = &config_path {
        tracing::info!(path = %path.display(), "using config file");
    }

    let charts = run_experiments(&cfg, &run.families).map_err(|err| {
        let exit_code = if err.is_precondition() { 2 } else { 1 };
        (exit_code, format!("error: {err}"))
    })?;

    let stdout = if run.json {
        let report = Report::new(
            chrono::Utc::now(),
            cfg.benchmark.repetitions,
            cfg.benchmark.warmup_runs,
            &charts,
        );
        render_json(&report)
    } else {
        render_tables(&charts)
    }
    .map_err(|err| (1, format!("error: {err}")))?;

    Ok(CommandOutput::ok(stdout))
}

/// Builds every requested chart in order; the first failure aborts the run.
///
/// Workload settings are checked before any chart is measured.
pub fn run_experiments(
    cfg: &Config,
    families: &[ExperimentFamily],
) -> Result<Vec<ChartData>, SbenchError> {
    let experiments = Experiments::new(WorkloadSettings::from_config(cfg)?);
    let benchmark: StopwatchBenchmark = cfg.stopwatch();

    let mut charts = Vec::with_capacity(families.len());
    for &family in families {
        tracing::info!(
            family = %family,
            repetitions = cfg.benchmark.repetitions,
            warmup_runs = cfg.benchmark.warmup_runs,
            "running experiment"
        );
        let chart =
            experiments.build_chart_data(family, &benchmark, cfg.benchmark.repetitions)?;
        charts.push(chart);
    }
    Ok(charts)
}

fn apply_flags(mut cfg: Config, run: &RunArgs) -> Result<Config, SbenchError> {
    if let Some(value) = run.repetitions {
        cfg.benchmark.repetitions = value;
    }
    if let Some(value) = run.warmup_runs {
        cfg.benchmark.warmup_runs = value;
    }
    if let Some(value) = run.sweep_start {
        cfg.sweep.start = value;
    }
    if let Some(value) = run.sweep_end {
        cfg.sweep.end = value;
    }
    if let Some(value) = run.sweep_multiplier {
        cfg.sweep.multiplier = value;
    }
    if let Some(value) = run.array_length {
        cfg.workload.array_length = value;
    }
    if let Some(value) = &run.log_level {
        cfg.logging.level = value.trim().to_lowercase();
    }
    if let Some(value) = &run.log_format {
        cfg.logging.format = value.trim().to_lowercase();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn parse_args(args: &[String]) -> Result<Parsed, (i32, String)> {
    let mut run = RunArgs::default();
    let mut experiment: Option<String> = None;
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
            _ => (arg, None),
        };

        match flag {
            "-h" | "--help" => return Ok(Parsed::Help),
            "-v" | "--version" => return Ok(Parsed::Version),
            "--json" => run.json = true,
            "-e" | "--experiment" => {
                experiment = Some(flag_value(args, &mut i, flag, inline)?);
            }
            "-r" | "--repetitions" => {
                run.repetitions = Some(count_value(args, &mut i, flag, inline)?);
            }
            "--warmup" => {
                run.warmup_runs = Some(count_value(args, &mut i, flag, inline)?);
            }
            "--sweep-start" => {
                run.sweep_start = Some(count_value(args, &mut i, flag, inline)?);
            }
            "--sweep-end" => {
                run.sweep_end = Some(count_value(args, &mut i, flag, inline)?);
            }
            "--sweep-multiplier" => {
                run.sweep_multiplier = Some(count_value(args, &mut i, flag, inline)?);
            }
            "--array-length" => {
                run.array_length = Some(count_value(args, &mut i, flag, inline)?);
            }
            "--config" => {
                run.config_file = Some(flag_value(args, &mut i, flag, inline)?);
            }
            "--log-level" => {
                run.log_level = Some(flag_value(args, &mut i, flag, inline)?);
            }
            "--log-format" => {
                run.log_format = Some(flag_value(args, &mut i, flag, inline)?);
            }
            v if v.starts_with('-') => return Err((2, format!("unknown flag: {v}"))),
            v => return Err((2, format!("unexpected argument: {v}"))),
        }
        i += 1;
    }

    run.families = parse_families(experiment.as_deref().unwrap_or("all"))?;
    Ok(Parsed::Run(run))
}

fn flag_value(
    args: &[String],
    i: &mut usize,
    flag: &str,
    inline: Option<String>,
) -> Result<String, (i32, String)> {
    if let Some(value) = inline {
        return Ok(value);
    }
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| (2, format!("flag {flag} requires a value")))
}

fn count_value(
    args: &[String],
    i: &mut usize,
    flag: &str,
    inline: Option<String>,
) -> Result<usize, (i32, String)> {
    let value = flag_value(args, i, flag, inline)?;
    parse_count(flag, &value)
}

fn parse_count(flag: &str, value: &str) -> Result<usize, (i32, String)> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| (2, format!("invalid {flag} value: {value}")))
}

fn parse_families(value: &str) -> Result<Vec<ExperimentFamily>, (i32, String)> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(ExperimentFamily::ALL.to_vec());
    }
    ExperimentFamily::parse(value)
        .map(|family| vec![family])
        .ok_or_else(|| {
            (
                2,
                format!("invalid --experiment value: {value} (expected array, method or all)"),
            )
        })
}
