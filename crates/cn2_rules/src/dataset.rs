//! Categorical examples: a feature matrix with a parallel label vector, plus
//! the conversion from polars frames.

use crate::error::{Error, Result};
use crate::value::Value;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;

/// Validate that `rows` is rectangular and as long as `labels`.
/// Returns the number of features (0 for an empty matrix).
pub fn check_shape(rows: &[Vec<Value>], labels: &[Value]) -> Result<usize> {
    if rows.len() != labels.len() {
        return Err(Error::shape("label vector", rows.len(), labels.len()));
    }
    let n_features = rows.first().map_or(0, |row| row.len());
    if let Some(row) = rows.iter().find(|row| row.len() != n_features) {
        return Err(Error::shape("feature row", n_features, row.len()));
    }
    Ok(n_features)
}

pub fn distinct_labels(labels: &[Value]) -> Vec<Value> {
    labels
        .iter()
        .cloned()
        .collect::<BTreeSet<Value>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub labels: Vec<Value>,
}

impl Dataset {
    /// Features are named `x0`, `x1`, ... until renamed.
    pub fn new(rows: Vec<Vec<Value>>, labels: Vec<Value>) -> Result<Self> {
        let n_features = check_shape(&rows, &labels)?;
        Ok(Self {
            feature_names: (0..n_features).map(|i| format!("x{}", i)).collect(),
            rows,
            labels,
        })
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.feature_names.len() {
            return Err(Error::shape(
                "feature names",
                self.feature_names.len(),
                names.len(),
            ));
        }
        self.feature_names = names;
        Ok(self)
    }

    /// Build from a frame of feature columns and a frame whose first column
    /// holds the labels.
    pub fn from_dataframes(x: &DataFrame, y: &DataFrame) -> Result<Self> {
        let (feature_names, rows) = frame_rows(x)?;
        let label_column = y
            .get_columns()
            .first()
            .ok_or_else(|| Error::InvalidInput("label frame has no columns".to_string()))?;
        let labels = column_values(label_column)?;
        if rows.len() != labels.len() {
            return Err(Error::shape("label vector", rows.len(), labels.len()));
        }
        // an empty frame still knows its columns
        Ok(Self {
            feature_names,
            rows,
            labels,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Distinct labels in ascending order.
    pub fn classes(&self) -> Vec<Value> {
        distinct_labels(&self.labels)
    }

    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }

    /// Seeded shuffle split into `(train, test)`; the test part gets
    /// `ceil(test_fraction * len)` examples.
    pub fn train_test_split(&self, test_fraction: f64, seed: u64) -> Result<(Self, Self)> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(Error::InvalidInput(format!(
                "test_fraction must lie in (0, 1), got {}",
                test_fraction
            )));
        }
        let mut indices: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let n_test = (test_fraction * self.len() as f64).ceil() as usize;
        let (test, train) = indices.split_at(n_test.min(self.len()));
        Ok((self.subset(train), self.subset(test)))
    }
}

/// Column names and row-major values of a frame of categorical columns.
pub fn frame_rows(df: &DataFrame) -> Result<(Vec<String>, Vec<Vec<Value>>)> {
    let names: Vec<String> = df
        .get_columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();
    let columns = df
        .get_columns()
        .iter()
        .map(column_values)
        .collect::<Result<Vec<Vec<Value>>>>()?;

    let rows = (0..df.height())
        .map(|i| columns.iter().map(|col| col[i].clone()).collect())
        .collect();
    Ok((names, rows))
}

/// Convert one column to categorical values. Boolean and integer columns keep
/// their type; strings, categoricals and enums become string values. Floats
/// must be binned beforehand.
pub fn column_values(column: &Column) -> Result<Vec<Value>> {
    let name = column.name().to_string();
    let series = column.as_materialized_series();
    let dtype = series.dtype().clone();

    let values: Vec<Option<Value>> = if dtype.is_float() {
        return Err(Error::InvalidInput(format!(
            "column '{}' has dtype {}; discretize it into categories first",
            name, dtype
        )));
    } else if matches!(dtype, DataType::Boolean) {
        series.bool()?.into_iter().map(|v| v.map(Value::Bool)).collect()
    } else if dtype.is_integer() {
        let casted = series.cast(&DataType::Int64)?;
        let out: Vec<Option<Value>> = casted.i64()?.into_iter().map(|v| v.map(Value::Int)).collect();
        out
    } else {
        let casted = series.cast(&DataType::String)?;
        let out: Vec<Option<Value>> = casted
            .str()?
            .into_iter()
            .map(|v| v.map(Value::from))
            .collect();
        out
    };

    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| {
                Error::InvalidInput(format!("column '{}' has a null at row {}", name, row))
            })
        })
        .collect()
}
