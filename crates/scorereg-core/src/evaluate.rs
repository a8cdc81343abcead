use crate::dataset::Sample;
use crate::stats::{mae, mse, r2_score, FitError, LinReg};

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EvalError {
    #[error("nothing to evaluate: test set is empty")]
    EmptyEvaluation,
    #[error("metric failed: {0}")]
    Metric(FitError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RSquared {
    Value(f64),
    /// Actual values have zero variance.
    Undefined,
}

impl RSquared {
    pub fn value(&self) -> Option<f64> {
        match self {
            RSquared::Value(v) => Some(*v),
            RSquared::Undefined => None,
        }
    }
}

impl fmt::Display for RSquared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RSquared::Value(v) => write!(f, "{v:.4}"),
            RSquared::Undefined => write!(f, "undefined"),
        }
    }
}

impl Serialize for RSquared {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub predictor: f64,
    pub actual: f64,
    pub predicted: f64,
    pub abs_error: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r2: RSquared,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub predictions: Vec<Prediction>,
    pub metrics: Metrics,
}

pub fn predict(model: &LinReg, samples: &[Sample]) -> Vec<Prediction> {
    samples
        .iter()
        .map(|s| {
            let predicted = model.calculate(s.predictor);
            Prediction {
                predictor: s.predictor,
                actual: s.target,
                predicted,
                abs_error: (s.target - predicted).abs(),
            }
        })
        .collect()
}

/// R² over the test targets. Only a zero denominator is tolerated, as `Undefined`.
fn r_squared(actual: &[f64], predicted: &[f64]) -> Result<RSquared, EvalError> {
    match r2_score(actual, predicted) {
        Ok(v) => Ok(RSquared::Value(v)),
        Err(FitError::UndefinedMetric(name)) => {
            tracing::warn!("{name} undefined: all {} test targets are equal", actual.len());
            Ok(RSquared::Undefined)
        },
        Err(e) => Err(EvalError::Metric(e)),
    }
}

pub fn evaluate(model: &LinReg, samples: &[Sample]) -> Result<Evaluation, EvalError> {
    if samples.is_empty() {
        return Err(EvalError::EmptyEvaluation);
    }

    let predictions = predict(model, samples);
    let actual: Vec<f64> = predictions.iter().map(|p| p.actual).collect();
    let predicted: Vec<f64> = predictions.iter().map(|p| p.predicted).collect();

    // lengths match and are non-zero, so these are always Some
    let mse = mse(&actual, &predicted).ok_or(EvalError::EmptyEvaluation)?;
    let mae = mae(&actual, &predicted).ok_or(EvalError::EmptyEvaluation)?;
    let rmse = mse.sqrt();

    let r2 = r_squared(&actual, &predicted)?;

    Ok(Evaluation { predictions, metrics: Metrics { mse, rmse, mae, r2 } })
}
