pub mod fiterror;
pub mod linreg;
pub mod stats;

pub use fiterror::{FitError, FitResult};
pub use linreg::LinReg;
pub use stats::{adjusted_r2, aic_from_rss, mae, mse, r2_from_predictions, r2_score, rmse};
