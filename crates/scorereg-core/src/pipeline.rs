//! Load -> split -> fit -> evaluate, one forward pass.

use crate::dataset::{Dataset, Sample};
use crate::error::PipelineResult;
use crate::evaluate::{evaluate, Evaluation};
use crate::fit::LinearFit;
use crate::split::{train_test_split, SplitConfig};

use serde::Serialize;

const HEAD_ROWS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub shape: (usize, usize),
    pub predictor: String,
    pub target: String,
    pub head: Vec<Sample>,
}

impl DatasetSummary {
    pub fn of(dataset: &Dataset) -> Self {
        Self {
            shape: dataset.shape(),
            predictor: dataset.predictor_name.clone(),
            target: dataset.target_name.clone(),
            head: dataset.head(HEAD_ROWS).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    pub test_fraction: f64,
    pub seed: u64,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Everything the reporter needs, nothing it has to compute.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub dataset: DatasetSummary,
    pub split: SplitSummary,
    pub fit: LinearFit,
    pub evaluation: Evaluation,
}

pub fn run(dataset: &Dataset, config: &SplitConfig) -> PipelineResult<PipelineReport> {
    let summary = DatasetSummary::of(dataset);
    tracing::info!("loaded {} rows, columns {:?}", dataset.len(), dataset.column_names());

    let split = train_test_split(dataset, config)?;
    let fit = LinearFit::from_samples(&split.train)?;
    tracing::info!("trained on {} rows: {}", split.train.len(), fit);

    let evaluation = evaluate(&fit.model, &split.test)?;
    tracing::info!(
        "evaluated {} rows: rmse {:.4}, r2 {}",
        evaluation.predictions.len(),
        evaluation.metrics.rmse,
        evaluation.metrics.r2
    );

    Ok(PipelineReport {
        dataset: summary,
        split: SplitSummary {
            test_fraction: config.test_fraction,
            seed: config.seed,
            train_rows: split.train.len(),
            test_rows: split.test.len(),
        },
        fit,
        evaluation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::stats::FitError;

    #[test]
    fn test_embedded_run() {
        let data = Dataset::embedded().unwrap();
        let report = run(&data, &SplitConfig::default()).unwrap();

        assert_eq!(report.dataset.shape, (43, 2));
        assert_eq!(report.dataset.head.len(), 5);
        assert_eq!(report.split.train_rows, 34);
        assert_eq!(report.split.test_rows, 9);
        assert_eq!(report.evaluation.predictions.len(), 9);
        assert_eq!(report.fit.n, 34);
    }

    #[test]
    fn test_run_is_repeatable() {
        let data = Dataset::embedded().unwrap();
        let a = run(&data, &SplitConfig::default()).unwrap();
        let b = run(&data, &SplitConfig::default()).unwrap();
        assert_eq!(a.fit.model, b.fit.model);
        assert_eq!(a.evaluation, b.evaluation);
    }

    #[test]
    fn test_constant_predictor_is_degenerate() {
        let samples = (0..10).map(|i| Sample::new(60., i as f64)).collect();
        let data = Dataset::new("midterm", "final", samples).unwrap();
        let err = run(&data, &SplitConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Fit(FitError::DegenerateX)));
    }
}
