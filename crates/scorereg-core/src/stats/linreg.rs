use crate::stats::fiterror::{FitError, FitResult};

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LinReg {
    pub intercept: f64,
    pub slope: f64,
}

impl fmt::Display for LinReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "y = {:.4} * x + {:.4}", self.slope, self.intercept)
    }
}

impl LinReg {
    pub fn calculate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
    pub fn from_val(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Ordinary least squares fit of `y` on `x`.
    pub fn train(x: &[f64], y: &[f64]) -> FitResult<Self> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch { len_x: x.len(), len_y: y.len() });
        }
        if x.len() < 2 {
            return Err(FitError::NotEnoughPoints { len: x.len(), needed: 2 });
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(FitError::NonFiniteInput);
        }

        let n = x.len() as f64;
        let avg_x: f64 = x.iter().sum::<f64>() / n;
        let avg_y: f64 = y.iter().sum::<f64>() / n;

        let mut ss_xx = 0.0;
        let mut ss_xy = 0.0;
        let mut sum_x2 = 0.0;
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            let dx = xi - avg_x;
            ss_xx += dx * dx;
            ss_xy += dx * (yi - avg_y);
            sum_x2 += xi * xi;
        }

        // no variance in x relative to its magnitude, no meaningful regression
        if !ss_xx.is_finite() || ss_xx == 0.0 || ss_xx <= f64::EPSILON * sum_x2 {
            return Err(FitError::DegenerateX);
        }

        let slope = ss_xy / ss_xx;
        let intercept = avg_y - slope * avg_x;

        Ok(Self { intercept, slope })
    }
}
