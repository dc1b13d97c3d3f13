use crate::conf::FeatureType;
use crate::evaluator::ConfusionCount;
use crate::value::{Atom, Value};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A conjunction of `feature == value` atoms predicting one class.
///
/// The body and prediction are fixed at construction. Significance, confusion
/// matrix and recall are filled in once, when the covering loop accepts the
/// rule. Display names and feature types are shared across every rule of a
/// run through `Arc`s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    body: Vec<Atom>,
    prediction: Value,
    #[serde(skip)]
    feature_labels: Option<Arc<Vec<String>>>,
    #[serde(skip)]
    feature_types: Option<Arc<Vec<FeatureType>>>,
    significance: Option<f64>,
    confusion: Option<ConfusionCount>,
    recall: Option<f64>,
}

impl Rule {
    pub fn new(body: Vec<Atom>, prediction: impl Into<Value>) -> Self {
        Self {
            body,
            prediction: prediction.into(),
            feature_labels: None,
            feature_types: None,
            significance: None,
            confusion: None,
            recall: None,
        }
    }

    /// Attach display names and feature types used by the renderings.
    pub fn with_features(
        mut self,
        feature_labels: Option<Arc<Vec<String>>>,
        feature_types: Option<Arc<Vec<FeatureType>>>,
    ) -> Self {
        self.feature_labels = feature_labels;
        self.feature_types = feature_types;
        self
    }

    pub fn body(&self) -> &[Atom] {
        &self.body
    }

    pub fn prediction(&self) -> &Value {
        &self.prediction
    }

    pub fn significance(&self) -> Option<f64> {
        self.significance
    }

    /// Confusion count over the full training set, once accepted.
    pub fn confusion(&self) -> Option<&ConfusionCount> {
        self.confusion.as_ref()
    }

    pub fn recall(&self) -> Option<f64> {
        self.recall
    }

    pub fn is_accepted(&self) -> bool {
        self.significance.is_some()
    }

    pub(crate) fn accept(&mut self, significance: f64, confusion: ConfusionCount, recall: f64) {
        debug_assert!(!self.is_accepted(), "rule statistics are set only once");
        self.significance = Some(significance);
        self.confusion = Some(confusion);
        self.recall = Some(recall);
    }

    /// True iff every atom holds; an empty body matches everything.
    pub fn matches(&self, example: &[Value]) -> bool {
        self.body.iter().all(|atom| atom.holds(example))
    }

    pub fn evaluate(&self, data: &[Vec<Value>]) -> Vec<bool> {
        data.iter().map(|x| self.matches(x)).collect()
    }

    /// A rule covering every example of its class reads as a definition of
    /// that class rather than a typical trait of it.
    pub fn is_defining(&self) -> bool {
        self.recall == Some(1.0)
    }

    fn feature_name(&self, feature: usize) -> String {
        self.feature_labels
            .as_ref()
            .and_then(|labels| labels.get(feature).cloned())
            .unwrap_or_else(|| format!("x[{}]", feature))
    }

    fn is_boolean(&self, feature: usize) -> bool {
        self.feature_types
            .as_ref()
            .and_then(|types| types.get(feature))
            .map_or(false, |t| *t == FeatureType::Boolean)
    }

    fn clause(&self, atom: &Atom) -> String {
        let name = self.feature_name(atom.feature);
        if self.is_boolean(atom.feature) {
            if atom.value.is_falsy() {
                format!("not {}", name)
            } else {
                name
            }
        } else {
            format!("{} == {}", name, atom.value)
        }
    }

    /// The body as `c1 AND c2 ...`, `TRUE` when empty.
    pub fn conditions_string(&self) -> String {
        if self.body.is_empty() {
            return "TRUE".to_string();
        }
        self.body
            .iter()
            .map(|atom| self.clause(atom))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// `target -> conditions` for defining rules, otherwise
    /// `T(target) -> conditions :  recall`.
    pub fn typicality_string(&self) -> String {
        let conditions = self.conditions_string();
        if self.is_defining() {
            format!("{} -> {}", self.prediction, conditions)
        } else {
            format!(
                "T({}) -> {} :  {}",
                self.prediction,
                conditions,
                round_to(self.recall.unwrap_or(0.0), 3)
            )
        }
    }
}

fn round_to(x: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (x * scale).round() / scale
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IF {} THEN y == {}",
            self.conditions_string(),
            self.prediction
        )?;
        if let (Some(confusion), Some(significance)) = (&self.confusion, self.significance) {
            write!(f, " : {} : {}", confusion, significance)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_three_digits() {
        assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
        assert_eq!(round_to(0.5, 3), 0.5);
    }
}
