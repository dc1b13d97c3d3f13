use crate::conf::EPSILON;
use crate::evaluator::{self, ConfusionCount};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Confusion matrix of a rule list (or of a single rule) on labelled data,
/// together with the usual binary-classification scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfusionReport {
    pub confusion: ConfusionCount,
    pub precision: f64,
    /// Unsmoothed: 0 when the data holds no positive example.
    pub recall: f64,
    pub accuracy: f64,
    pub specificity: f64,
    pub f1_score: f64,
    pub auc_roc: f64,
}

impl ConfusionReport {
    pub fn from_count(confusion: ConfusionCount) -> Self {
        let precision = evaluator::precision(&confusion);
        let recall = unsmoothed_recall(&confusion);
        Self {
            confusion,
            precision,
            recall,
            accuracy: evaluator::accuracy(&confusion),
            specificity: evaluator::specificity(&confusion),
            f1_score: 2.0 * (precision * recall) / (precision + recall + EPSILON),
            auc_roc: evaluator::auc_roc(&confusion),
        }
    }

    /// `[[tp, fp], [fn, tn]]`
    pub fn matrix(&self) -> [[usize; 2]; 2] {
        self.confusion.as_matrix()
    }
}

pub(crate) fn unsmoothed_recall(c: &ConfusionCount) -> f64 {
    if c.tp + c.fn_ > 0 {
        c.tp as f64 / (c.tp + c.fn_) as f64
    } else {
        0.0
    }
}

impl fmt::Display for ConfusionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix:\n {}", self.confusion)?;
        writeln!(f, "Precision: {}", self.precision)?;
        writeln!(f, "Recall: {}", self.recall)?;
        writeln!(f, "Accuracy: {}", self.accuracy)?;
        writeln!(f, "Specificity: {}", self.specificity)?;
        writeln!(f, "F1 Score: {}", self.f1_score)?;
        write!(f, "AUC-ROC: {}", self.auc_roc)
    }
}
