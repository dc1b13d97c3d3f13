//! Error types for rule induction.

use estimator_api::api::{FitError, PredictError};
use polars::prelude::PolarsError;
use thiserror::Error;

/// A specialized `Result` type for rule induction operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration value was rejected while building an engine.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Two inputs that must agree in length do not.
    #[error("Shape mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// The input data cannot be used as categorical examples.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn shape(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Error::ShapeMismatch {
            what: what.into(),
            expected,
            found,
        }
    }
}

impl From<PolarsError> for Error {
    fn from(e: PolarsError) -> Self {
        Error::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Configuration(e.to_string())
    }
}

impl From<Error> for FitError {
    fn from(e: Error) -> Self {
        match e {
            Error::Configuration(msg) => FitError::Configuration(msg),
            other => FitError::InvalidInput(other.to_string()),
        }
    }
}

impl From<Error> for PredictError {
    fn from(e: Error) -> Self {
        PredictError::InvalidInput(e.to_string())
    }
}
