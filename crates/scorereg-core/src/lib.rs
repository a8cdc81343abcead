//! Least squares regression of final exam scores on midterm scores.
//!
//! The crate is a single forward pipeline:
//!
//! - [`dataset`] decodes the bundled score table (or any two column CSV),
//! - [`split`] shuffles it into train/test subsets with a fixed seed,
//! - [`fit`] trains a [`stats::LinReg`] on the training rows,
//! - [`evaluate`] predicts the test rows and scores them,
//! - [`report`] renders the result as text or JSON.
//!
//! [`pipeline::run`] chains the stages.

pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod fit;
pub mod pipeline;
pub mod report;
pub mod split;
pub mod stats;

pub use dataset::{Dataset, DatasetError, Sample};
pub use error::{PipelineError, PipelineResult};
pub use evaluate::{Evaluation, Metrics, Prediction, RSquared};
pub use fit::LinearFit;
pub use pipeline::{run, PipelineReport};
pub use report::ReportStyle;
pub use split::{train_test_split, Split, SplitConfig};
