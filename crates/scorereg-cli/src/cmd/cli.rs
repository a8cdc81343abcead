use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

use crate::cmd::config::{Config, DataSource, OutputFormat};
use scorereg_core::report::DEFAULT_PREVIEW_ROWS;
use scorereg_core::split::{DEFAULT_SEED, DEFAULT_TEST_FRACTION};
use scorereg_core::{ReportStyle, SplitConfig};

#[derive(Debug, Parser)]
#[command(
    name = "scorereg",
    about = "Fit final exam scores from midterm scores and report test-set error",
    version
)]
pub struct Cli {
    /// Two column CSV (header + numeric rows), `-` for stdin. Defaults to the bundled scores
    #[arg(short = 'i', long = "input", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// Fraction of rows held out for testing
    #[arg(short = 't', long = "test-size", default_value_t = DEFAULT_TEST_FRACTION)]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of prediction rows to print
    #[arg(short = 'r', long = "rows", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: usize,

    /// Output format: text or json
    #[arg(short = 'f', long = "format", default_value = "text")]
    pub format: OutputFormat,

    /// Text layout: detailed or brief
    #[arg(long = "style", default_value = "detailed")]
    pub style: ReportStyle,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn into_config(self) -> Config {
        let source = match self.input.as_deref() {
            None => DataSource::Embedded,
            Some("-") => DataSource::Stdin,
            Some(path) => DataSource::File(PathBuf::from(path)),
        };

        Config {
            source,
            split: SplitConfig { test_fraction: self.test_size, seed: self.seed },
            format: self.format,
            style: self.style,
            preview_rows: self.rows,
        }
    }
}
