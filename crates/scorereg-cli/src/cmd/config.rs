use scorereg_core::report::{render_json, write_text};
use scorereg_core::{run, Dataset, DatasetError, PipelineError, ReportStyle, SplitConfig};

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Embedded,
    File(PathBuf),
    Stdin,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Embedded => write!(f, "embedded scores"),
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Stdin => write!(f, "stdin"),
        }
    }
}

#[derive(Debug)]
pub struct ParseFormatError(String);

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for ParseFormatError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ParseFormatError(format!("invalid output format: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: DataSource,
    pub split: SplitConfig,
    pub format: OutputFormat,
    pub style: ReportStyle,
    pub preview_rows: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failed to load {source_name}: {err}")]
    Load { source_name: String, err: DatasetError },
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl Config {
    pub fn run(&self) -> Result<(), AppError> {
        let dataset = self.load()?;
        let report = run(&dataset, &self.split)?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.format {
            OutputFormat::Text => write_text(&mut out, &report, self.style, self.preview_rows)?,
            OutputFormat::Json => writeln!(out, "{}", render_json(&report)?)?,
        }
        out.flush()?;
        Ok(())
    }

    fn load(&self) -> Result<Dataset, AppError> {
        tracing::debug!("loading {}", self.source);
        let loaded = match &self.source {
            DataSource::Embedded => Dataset::embedded(),
            DataSource::File(path) => Dataset::from_path(path),
            DataSource::Stdin => Dataset::from_reader(io::stdin().lock()),
        };
        loaded.map_err(|err| AppError::Load { source_name: self.source.to_string(), err })
    }
}
