//! Table and JSON rendering of chart data.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tabwriter::TabWriter;

use sbench_experiments::ChartData;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub generated_at: String,
    pub repetitions: usize,
    pub warmup_runs: usize,
    pub charts: &'a [ChartData],
}

impl<'a> Report<'a> {
    pub fn new(
        generated_at: DateTime<Utc>,
        repetitions: usize,
        warmup_runs: usize,
        charts: &'a [ChartData],
    ) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            repetitions,
            warmup_runs,
            charts,
        }
    }
}

pub fn render_json(report: &Report<'_>) -> Result<String, String> {
    let mut out = serde_json::to_string_pretty(report).map_err(|err| err.to_string())?;
    out.push('\n');
    Ok(out)
}

pub fn render_tables(charts: &[ChartData]) -> Result<String, String> {
    let mut out: Vec<u8> = Vec::new();
    for (i, chart) in charts.iter().enumerate() {
        if i > 0 {
            writeln!(out).map_err(|err| err.to_string())?;
        }
        writeln!(out, "{}", chart.title()).map_err(|err| err.to_string())?;

        let mut tw = TabWriter::new(&mut out).padding(2);
        writeln!(tw, "SIZE\tCLASS (ms)\tSTRUCT (ms)\tCLASS/STRUCT").map_err(|err| err.to_string())?;
        for (class_point, struct_point) in chart.rows() {
            writeln!(
                tw,
                "{}\t{:.6}\t{:.6}\t{}",
                class_point.data_size(),
                class_point.duration_ms(),
                struct_point.duration_ms(),
                format_ratio(class_point.duration_ms(), struct_point.duration_ms()),
            )
            .map_err(|err| err.to_string())?;
        }
        tw.flush().map_err(|err| err.to_string())?;
    }
    String::from_utf8(out).map_err(|err| err.to_string())
}

pub fn format_ratio(class_ms: f64, struct_ms: f64) -> String {
    if struct_ms <= 0.0 {
        return "n/a".to_string();
    }
    format!("{:.2}x", class_ms / struct_ms)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sbench_core::ExperimentResult;
    use sbench_experiments::ChartData;

    use super::{format_ratio, render_json, render_tables, Report};

    fn chart(title: &str) -> ChartData {
        ChartData::new(
            title,
            vec![ExperimentResult::new(16, 0.5), ExperimentResult::new(32, 1.0)],
            vec![ExperimentResult::new(16, 0.25), ExperimentResult::new(32, 0.0)],
        )
        .unwrap()
    }

    #[test]
    fn ratio_handles_zero_struct_duration() {
        assert_eq!(format_ratio(1.0, 0.5), "2.00x");
        assert_eq!(format_ratio(1.0, 0.0), "n/a");
    }

    #[test]
    fn tables_are_aligned_per_chart() {
        let text = render_tables(&[chart("Create array"), chart("Call method with argument")])
            .unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Create array");
        assert!(lines[1].starts_with("SIZE  CLASS (ms)"));
        assert!(lines[2].starts_with("16 "));
        assert!(lines[2].contains("0.500000"));
        assert!(lines[2].ends_with("2.00x"));
        assert!(lines[3].ends_with("n/a"));
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Call method with argument");
    }

    #[test]
    fn json_report_carries_run_settings() {
        let charts = vec![chart("Create array")];
        let at = Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap();
        let text = render_json(&Report::new(at, 20, 1, &charts)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["generated_at"], "2026-02-10T12:00:00Z");
        assert_eq!(value["repetitions"], 20);
        assert_eq!(value["warmup_runs"], 1);
        assert_eq!(value["charts"][0]["title"], "Create array");
        assert_eq!(value["charts"][0]["class_points"][1]["data_size"], 32);
    }
}
