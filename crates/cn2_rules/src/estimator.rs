use crate::cn2::Cn2Unordered;
use crate::conf::PREDICTION_COLUMN;
use crate::dataset::{frame_rows, Dataset};
use estimator_api::api::{Estimator, FitError, PredictError};
use polars::prelude::*;

// The inherent `fit`/`predict` work on row vectors; these go through frames.
#[allow(non_snake_case)]
impl Estimator for Cn2Unordered {
    fn _fit_impl(&mut self, X: &DataFrame, y: &DataFrame) -> Result<(), FitError> {
        let data = Dataset::from_dataframes(X, y)?;
        self.fit_named(&data.feature_names, &data.rows, &data.labels)?;
        self.fitted_columns = Some(data.feature_names);
        Ok(())
    }

    fn _predict_impl(&self, X: &DataFrame) -> Result<DataFrame, PredictError> {
        let columns = match self.fitted_columns {
            Some(ref c) => c,
            None => return Err(PredictError::NotFitted),
        };

        // Align to the training column order; extra columns are ignored
        let aligned = X
            .select(columns.iter().map(|name| name.as_str()))
            .map_err(|e| PredictError::InvalidInput(e.to_string()))?;
        let (_, rows) = frame_rows(&aligned)?;

        let predictions: Vec<Option<String>> = self
            .predict(&rows, None)
            .into_iter()
            .map(|p| p.map(|v| v.to_string()))
            .collect();
        let series = Series::new(PlSmallStr::from_static(PREDICTION_COLUMN), predictions);
        DataFrame::new(vec![series.into()]).map_err(|e| PredictError::InvalidInput(e.to_string()))
    }
}
