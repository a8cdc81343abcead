use crate::dataset::DatasetError;
use crate::evaluate::EvalError;
use crate::split::SplitError;
use crate::stats::FitError;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("split failed: {0}")]
    Split(#[from] SplitError),
    #[error("fit failed: {0}")]
    Fit(#[from] FitError),
    #[error("evaluation failed: {0}")]
    Eval(#[from] EvalError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
