use polars::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FitError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model is not fitted")]
    NotFitted,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Estimator over polars frames: `x` holds one column per feature, `y` holds the labels.
#[allow(non_snake_case)]
pub trait Estimator: Sized {
    fn fit(&mut self, X: &DataFrame, y: &DataFrame) -> Result<(), FitError> {
        self._fit_impl(X, y)
    }

    fn _fit_impl(&mut self, X: &DataFrame, y: &DataFrame) -> Result<(), FitError> {
        let _ = (X, y);
        // Default implementation can be overridden by specific estimators
        Err(FitError::InvalidInput(
            "Default fit implementation not provided".to_string(),
        ))
    }

    fn predict(&self, X: &DataFrame) -> Result<DataFrame, PredictError> {
        self._predict_impl(X)
    }

    fn _predict_impl(&self, X: &DataFrame) -> Result<DataFrame, PredictError> {
        let _ = X;
        Err(PredictError::NotFitted)
    }
}
