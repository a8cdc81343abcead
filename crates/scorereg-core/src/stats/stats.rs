use crate::stats::fiterror::{FitError, FitResult};

fn sum_sq_residuals(y: &[f64], y_hat: &[f64]) -> f64 {
    y.iter().zip(y_hat.iter()).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum()
}

pub fn mse(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() != y_hat.len() || y.is_empty() {
        return None;
    }
    Some(sum_sq_residuals(y, y_hat) / y.len() as f64)
}

pub fn rmse(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    mse(y, y_hat).map(f64::sqrt)
}

pub fn mae(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() != y_hat.len() || y.is_empty() {
        return None;
    }
    let sum_abs: f64 = y.iter().zip(y_hat.iter()).map(|(&yi, &yhi)| (yi - yhi).abs()).sum();
    Some(sum_abs / y.len() as f64)
}

pub fn aic_from_rss(rss: f64, n: usize, k: usize) -> f64 {
    if rss <= 0.0 || n == 0 {
        return f64::INFINITY; // Avoid log(0) or divide-by-zero
    }
    n as f64 * (rss / n as f64).ln() + 2.0 * k as f64
}

/// Coefficient of determination. Errors when the actual values have no variance.
pub fn r2_score(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    if y.len() != y_hat.len() {
        return Err(FitError::LengthMismatch { len_x: y.len(), len_y: y_hat.len() });
    }
    if y.is_empty() {
        return Err(FitError::NotEnoughPoints { len: 0, needed: 1 });
    }

    let y_mean = y.iter().sum::<f64>() / y.len() as f64;
    let ss_res = sum_sq_residuals(y, y_hat);
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Err(FitError::UndefinedMetric("R²"));
    }

    Ok(1.0 - ss_res / ss_tot)
}

pub fn r2_from_predictions(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() < 2 {
        return None;
    }
    r2_score(y, y_hat).ok()
}

pub fn adjusted_r2(r2: f64, n: usize, k: usize) -> f64 {
    if n <= k + 1 {
        return r2; // Not enough data to adjust
    }
    1.0 - (1.0 - r2) * (n as f64 - 1.0) / (n as f64 - k as f64 - 1.0)
}
