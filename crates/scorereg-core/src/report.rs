use crate::pipeline::PipelineReport;

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

pub const DEFAULT_PREVIEW_ROWS: usize = 10;
const RULE_WIDTH: usize = 50;

#[derive(Debug)]
pub struct ParseStyleError(String);

impl fmt::Display for ParseStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for ParseStyleError {}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize)]
pub enum ReportStyle {
    /// Banner layout with a prediction table.
    #[default]
    Detailed,
    /// One line per stage.
    Brief,
}

impl FromStr for ReportStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "detailed" | "full" => Ok(ReportStyle::Detailed),
            "brief" | "short" => Ok(ReportStyle::Brief),
            other => Err(ParseStyleError(format!("invalid report style: {other}"))),
        }
    }
}

impl fmt::Display for ReportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStyle::Detailed => write!(f, "detailed"),
            ReportStyle::Brief => write!(f, "brief"),
        }
    }
}

fn opt4(v: Option<f64>) -> String {
    v.map_or_else(|| "undefined".to_string(), |v| format!("{v:.4}"))
}

pub fn write_text<W: Write>(
    out: &mut W,
    report: &PipelineReport,
    style: ReportStyle,
    preview_rows: usize,
) -> io::Result<()> {
    match style {
        ReportStyle::Detailed => write_detailed(out, report, preview_rows),
        ReportStyle::Brief => write_brief(out, report, preview_rows),
    }
}

pub fn render_text(
    report: &PipelineReport,
    style: ReportStyle,
    preview_rows: usize,
) -> io::Result<String> {
    let mut buf = Vec::new();
    write_text(&mut buf, report, style, preview_rows)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn render_json(report: &PipelineReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn write_head<W: Write>(out: &mut W, report: &PipelineReport) -> io::Result<()> {
    let ds = &report.dataset;
    writeln!(out, "Data loaded: ({}, {})", ds.shape.0, ds.shape.1)?;
    writeln!(out, "Columns: [\"{}\", \"{}\"]", ds.predictor, ds.target)?;
    writeln!(out)?;
    writeln!(out, "First {} rows:", ds.head.len())?;
    writeln!(out, "{:>4} {:>10} {:>10}", "", ds.predictor, ds.target)?;
    for (i, s) in ds.head.iter().enumerate() {
        writeln!(out, "{:>4} {:>10} {:>10}", i, s.predictor, s.target)?;
    }
    Ok(())
}

fn write_detailed<W: Write>(
    out: &mut W,
    report: &PipelineReport,
    preview_rows: usize,
) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let ds = &report.dataset;
    let fit = &report.fit;
    let metrics = &report.evaluation.metrics;

    writeln!(out, "{rule}")?;
    writeln!(out, "Linear regression: {} from {}", ds.target, ds.predictor)?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;
    write_head(out, report)?;

    writeln!(out)?;
    writeln!(out, "Predictor (X): {}", ds.predictor)?;
    writeln!(out, "Target (y): '{}'", ds.target)?;
    writeln!(out)?;
    writeln!(
        out,
        "Train rows: {}, test rows: {} (test fraction {:.2}, seed {})",
        report.split.train_rows, report.split.test_rows, report.split.test_fraction, report.split.seed
    )?;

    writeln!(out)?;
    writeln!(out, "Model trained: LinearRegression")?;
    writeln!(out, "   - slope (coefficient): {:.4}", fit.slope())?;
    writeln!(out, "   - intercept: {:.4}", fit.intercept())?;
    writeln!(out, "   - train R² score: {}", opt4(fit.r2))?;
    writeln!(out, "   - residual std error: {}", opt4(fit.sigma))?;
    writeln!(out, "   - slope p-value: {}", opt4(fit.p_value))?;

    writeln!(out)?;
    writeln!(out, "Predictions: {} samples", report.evaluation.predictions.len())?;

    writeln!(out)?;
    writeln!(out, "Evaluation:")?;
    writeln!(out, "   - Mean Squared Error (MSE): {:.4}", metrics.mse)?;
    writeln!(out, "   - Root Mean Squared Error (RMSE): {:.4}", metrics.rmse)?;
    writeln!(out, "   - Mean Absolute Error (MAE): {:.4}", metrics.mae)?;
    writeln!(out, "   - R² Score: {}", metrics.r2)?;

    let shown = preview_rows.min(report.evaluation.predictions.len());
    writeln!(out)?;
    writeln!(out, "Predictions (first {shown}):")?;
    writeln!(out, "{:<10} {:<12} {:<12} {:<10}", ds.predictor, "actual", "predicted", "error")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for p in report.evaluation.predictions.iter().take(shown) {
        writeln!(
            out,
            "{:<10.0} {:<12.0} {:<12.2} {:<10.2}",
            p.predictor, p.actual, p.predicted, p.abs_error
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Pipeline complete")?;
    writeln!(out, "{rule}")?;
    Ok(())
}

fn write_brief<W: Write>(
    out: &mut W,
    report: &PipelineReport,
    preview_rows: usize,
) -> io::Result<()> {
    let metrics = &report.evaluation.metrics;

    write_head(out, report)?;
    writeln!(out, "Train rows: {}, test rows: {}", report.split.train_rows, report.split.test_rows)?;
    writeln!(out, "Target: '{}'", report.dataset.target)?;
    writeln!(out, "Model trained: LinearRegression")?;
    writeln!(out, "Train R² score: {}", opt4(report.fit.r2))?;
    writeln!(out, "Predictions: {} samples", report.evaluation.predictions.len())?;

    let first: Vec<String> = report
        .evaluation
        .predictions
        .iter()
        .take(preview_rows)
        .map(|p| format!("{:.4}", p.predicted))
        .collect();
    writeln!(out, "First {} predictions: [{}]", first.len(), first.join(", "))?;

    writeln!(out, "Mean Squared Error (MSE): {:.4}", metrics.mse)?;
    writeln!(out, "Root Mean Squared Error (RMSE): {:.4}", metrics.rmse)?;
    writeln!(out, "Mean Absolute Error (MAE): {:.4}", metrics.mae)?;
    writeln!(out, "R² Score: {}", metrics.r2)?;
    Ok(())
}
