use crate::dataset::Sample;
use crate::stats::{adjusted_r2, aic_from_rss, r2_from_predictions, rmse, FitResult, LinReg};

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::fmt;

/// A fitted line together with its in-sample diagnostics.
#[derive(Clone, Debug, Serialize)]
pub struct LinearFit {
    pub model: LinReg,
    pub n: usize,
    pub r2: Option<f64>,
    pub adjusted_r2: Option<f64>,
    pub sigma: Option<f64>,
    pub p_value: Option<f64>,
    pub aic: f64,
    pub rmse: f64,
}

impl fmt::Display for LinearFit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, n: {}", self.model, self.n)?;
        if let Some(r2) = self.r2 {
            write!(f, ", r2: {r2:.4}")?;
        }
        Ok(())
    }
}

impl LinearFit {
    pub fn from_samples(samples: &[Sample]) -> FitResult<Self> {
        let x: Vec<f64> = samples.iter().map(|s| s.predictor).collect();
        let y: Vec<f64> = samples.iter().map(|s| s.target).collect();
        Self::from_data(&x, &y)
    }

    pub fn from_data(x: &[f64], y: &[f64]) -> FitResult<Self> {
        let model = LinReg::train(x, y)?;
        let n = x.len();

        let y_hat: Vec<f64> = x.iter().map(|&xi| model.calculate(xi)).collect();
        let rss: f64 = y.iter().zip(&y_hat).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();
        let rmse_val = rmse(y, &y_hat).unwrap_or(0.0);

        let r2 = r2_from_predictions(y, &y_hat);
        let adjusted_r2 = r2.map(|r2| adjusted_r2(r2, n, 1));
        let aic = aic_from_rss(rss, n, 2);

        let (sigma, p_value) = slope_significance(x, &model, rss);

        tracing::debug!(
            "fitted {} on {} rows, rss {:.4}, p {:?}",
            model,
            n,
            rss,
            p_value
        );

        Ok(Self { model, n, r2, adjusted_r2, sigma, p_value, aic, rmse: rmse_val })
    }

    pub fn slope(&self) -> f64 {
        self.model.slope
    }

    pub fn intercept(&self) -> f64 {
        self.model.intercept
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.model.calculate(x)
    }
}

// residual standard error and two sided p-value of the slope
fn slope_significance(x: &[f64], model: &LinReg, rss: f64) -> (Option<f64>, Option<f64>) {
    let n = x.len() as f64;
    if n <= 2.0 {
        return (None, None);
    }
    let sigma = (rss / (n - 2.0)).sqrt();
    if !sigma.is_finite() {
        return (None, None);
    }

    let x_mean = x.iter().sum::<f64>() / n;
    let ss_xx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
    let se_slope = sigma / ss_xx.sqrt();
    // perfect fit, t is unbounded
    if !se_slope.is_finite() || se_slope <= 0.0 {
        return (Some(sigma), None);
    }

    let t_stat = model.slope / se_slope;
    let p_value = StudentsT::new(0.0, 1.0, n - 2.0)
        .ok()
        .map(|dist| 2.0 * (1.0 - dist.cdf(t_stat.abs())));

    (Some(sigma), p_value)
}
