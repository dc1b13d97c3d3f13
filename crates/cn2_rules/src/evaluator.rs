//! Confusion-count based significance metrics.
//!
//! Every metric maps a [`ConfusionCount`] to a scalar. Most denominators carry
//! [`EPSILON`] so that empty partitions score 0 instead of dividing by zero;
//! the Laplace estimates and `mcc` are the exceptions and handle the
//! degenerate case themselves.

use crate::conf::EPSILON;
use crate::error::{Error, Result};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Tally of a rule's predictions against the true labels of an example set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ConfusionCount {
    pub tp: usize,
    pub tn: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl ConfusionCount {
    pub fn new(tp: usize, tn: usize, fp: usize, fn_: usize) -> Self {
        Self { tp, tn, fp, fn_ }
    }

    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    /// Count one example given whether it was predicted positive and whether
    /// it actually is positive.
    pub fn record(&mut self, predicted_positive: bool, actual_positive: bool) {
        match (predicted_positive, actual_positive) {
            (true, true) => self.tp += 1,
            (true, false) => self.fp += 1,
            (false, true) => self.fn_ += 1,
            (false, false) => self.tn += 1,
        }
    }

    /// `[[tp, fp], [fn, tn]]`: rows are predictions, columns are true labels.
    pub fn as_matrix(&self) -> [[usize; 2]; 2] {
        [[self.tp, self.fp], [self.fn_, self.tn]]
    }
}

impl fmt::Display for ConfusionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[[{}, {}], [{}, {}]]",
            self.tp, self.fp, self.fn_, self.tn
        )
    }
}

#[inline]
fn f(x: usize) -> f64 {
    x as f64
}

pub fn precision(c: &ConfusionCount) -> f64 {
    f(c.tp) / (f(c.tp) + f(c.fp) + EPSILON)
}

pub fn recall(c: &ConfusionCount) -> f64 {
    f(c.tp) / (f(c.tp) + f(c.fn_) + EPSILON)
}

/// Plain accuracy, 0 over an empty example set.
pub fn accuracy(c: &ConfusionCount) -> f64 {
    let total = c.total();
    if total == 0 {
        return 0.0;
    }
    (f(c.tp) + f(c.tn)) / f(total)
}

pub fn specificity(c: &ConfusionCount) -> f64 {
    f(c.tn) / (f(c.tn) + f(c.fp) + EPSILON)
}

pub fn f1_score(c: &ConfusionCount) -> f64 {
    let p = precision(c);
    let r = recall(c);
    2.0 * (p * r) / (p + r + EPSILON)
}

/// Weighted harmonic mean of precision (weight 1) and recall (weight 9).
pub fn f1_recall(c: &ConfusionCount) -> f64 {
    let p = precision(c);
    let r = recall(c);
    let (w_p, w_r) = (1.0, 9.0);
    (w_p + w_r) / ((w_p / (p + EPSILON)) + (w_r / (r + EPSILON)) + EPSILON)
}

fn blend(a: f64, b: f64) -> f64 {
    2.0 * (a * b) / (a + b + EPSILON)
}

fn harmonic(values: &[f64]) -> f64 {
    let inv: f64 = values.iter().map(|v| 1.0 / (v + EPSILON)).sum();
    values.len() as f64 / (inv + EPSILON)
}

pub fn acc_rec(c: &ConfusionCount) -> f64 {
    blend(accuracy(c), recall(c))
}

pub fn acc_prec(c: &ConfusionCount) -> f64 {
    blend(accuracy(c), precision(c))
}

pub fn spec_rec(c: &ConfusionCount) -> f64 {
    harmonic(&[specificity(c), recall(c)])
}

pub fn spec_acc(c: &ConfusionCount) -> f64 {
    harmonic(&[specificity(c), accuracy(c)])
}

pub fn spec_prec(c: &ConfusionCount) -> f64 {
    harmonic(&[specificity(c), precision(c)])
}

pub fn spec_acc_prec_rec(c: &ConfusionCount) -> f64 {
    harmonic(&[specificity(c), accuracy(c), precision(c), recall(c)])
}

/// Normalized triple product. The denominator counts `a·p` twice and never
/// uses `p·r`; scores computed by earlier runs depend on exactly this form.
pub fn acc_prec_rec(c: &ConfusionCount) -> f64 {
    let a = accuracy(c);
    let p = precision(c);
    let r = recall(c);
    3.0 * (a * p * r) / (a * p + a * r + p * a + EPSILON)
}

/// Single-threshold ROC area: `(tpr + (1 - fpr)) / 2`.
pub fn auc_roc(c: &ConfusionCount) -> f64 {
    let tpr = f(c.tp) / (f(c.tp) + f(c.fn_) + EPSILON);
    let fpr = f(c.fp) / (f(c.fp) + f(c.tn) + EPSILON);
    (tpr + 1.0 - fpr) / 2.0
}

pub fn laplace_gini(c: &ConfusionCount) -> f64 {
    (f(c.tp) + 1.0) / (f(c.tp) + f(c.tn) + 2.0)
}

pub fn laplace_precision(c: &ConfusionCount) -> f64 {
    (f(c.tp) + 1.0) / (f(c.tp) + f(c.fp) + 2.0)
}

pub fn wracc(c: &ConfusionCount) -> f64 {
    let weighted = precision(c) * (f(c.tn) / (f(c.tn) + f(c.fn_) + EPSILON));
    weighted / 2.0
}

pub fn gini_index(c: &ConfusionCount) -> f64 {
    2.0 * auc_roc(c) - 1.0
}

/// Population proportions of predicted-positive and predicted-negative examples.
fn split_proportions(c: &ConfusionCount) -> (f64, f64) {
    let total = f(c.total());
    let p_pos = (f(c.tp) + f(c.fp)) / (total + EPSILON);
    let p_neg = (f(c.tn) + f(c.fn_)) / (total + EPSILON);
    (p_pos, p_neg)
}

fn split_information(p_pos: f64, p_neg: f64) -> f64 {
    -p_pos * (p_pos + EPSILON).log2() - p_neg * (p_neg + EPSILON).log2()
}

/// Base-2 entropy of the predicted-positive / predicted-negative split,
/// 0 when either side is empty.
pub fn entropy(c: &ConfusionCount) -> f64 {
    let (p_pos, p_neg) = split_proportions(c);
    if p_pos == 0.0 || p_neg == 0.0 {
        return 0.0;
    }
    split_information(p_pos, p_neg)
}

pub fn information_gain(c: &ConfusionCount) -> f64 {
    let parent = entropy(c);
    let (p_pos, p_neg) = split_proportions(c);
    let child_pos = entropy(&ConfusionCount::new(c.tp, c.tn, 0, 0));
    let child_neg = entropy(&ConfusionCount::new(0, 0, c.fp, c.fn_));
    parent - (p_pos * child_pos + p_neg * child_neg)
}

pub fn gain_ratio(c: &ConfusionCount) -> f64 {
    let gain = information_gain(c);
    let (p_pos, p_neg) = split_proportions(c);
    let split_info = split_information(p_pos, p_neg);
    if split_info == 0.0 {
        0.0
    } else {
        gain / split_info
    }
}

/// Matthews correlation coefficient, 0 when any marginal is empty.
pub fn mcc(c: &ConfusionCount) -> f64 {
    let (tp, tn, fp, fn_) = (f(c.tp), f(c.tn), f(c.fp), f(c.fn_));
    let numerator = tp * tn - fp * fn_;
    let denominator = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Exact ROC-AUC of the label/score vectors a confusion count expands to.
/// Falls back to 0.5 when one of the two classes is absent.
pub fn auc_roc_sklearn(c: &ConfusionCount) -> f64 {
    let mut y_true = Vec::with_capacity(c.total());
    y_true.extend(std::iter::repeat(true).take(c.tp + c.fn_));
    y_true.extend(std::iter::repeat(false).take(c.tn + c.fp));

    let mut y_score = Vec::with_capacity(c.total());
    y_score.extend(std::iter::repeat(1.0).take(c.tp));
    y_score.extend(std::iter::repeat(0.0).take(c.fn_));
    y_score.extend(std::iter::repeat(1.0).take(c.fp));
    y_score.extend(std::iter::repeat(0.0).take(c.tn));

    roc_auc_score(&y_true, &y_score).unwrap_or(0.5)
}

/// Area under the ROC curve via the rank-sum estimator, tied scores sharing
/// their average rank. `None` when lengths differ or a class is missing.
pub fn roc_auc_score(y_true: &[bool], y_score: &[f64]) -> Option<f64> {
    if y_true.len() != y_score.len() {
        return None;
    }
    let n_pos = y_true.iter().filter(|&&t| t).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..y_score.len()).collect();
    order.sort_by(|&a, &b| {
        y_score[a]
            .partial_cmp(&y_score[b])
            .unwrap_or(Ordering::Equal)
    });

    // 1-based average ranks over runs of equal scores
    let mut positive_rank_sum = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && y_score[order[end]] == y_score[order[start]] {
            end += 1;
        }
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            if y_true[idx] {
                positive_rank_sum += avg_rank;
            }
        }
        start = end;
    }

    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    Some((positive_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg))
}

/// The closed set of significance functions a rule search can rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Precision,
    Recall,
    Accuracy,
    Specificity,
    F1Score,
    F1Recall,
    AccRec,
    AccPrec,
    SpecRec,
    SpecAcc,
    SpecPrec,
    SpecAccPrecRec,
    AccPrecRec,
    AucRoc,
    LaplaceGini,
    #[default]
    LaplacePrecision,
    Wracc,
    GiniIndex,
    InformationGain,
    GainRatio,
    Mcc,
    AucRocSklearn,
}

impl Metric {
    pub const ALL: [Metric; 22] = [
        Metric::Precision,
        Metric::Recall,
        Metric::Accuracy,
        Metric::Specificity,
        Metric::F1Score,
        Metric::F1Recall,
        Metric::AccRec,
        Metric::AccPrec,
        Metric::SpecRec,
        Metric::SpecAcc,
        Metric::SpecPrec,
        Metric::SpecAccPrecRec,
        Metric::AccPrecRec,
        Metric::AucRoc,
        Metric::LaplaceGini,
        Metric::LaplacePrecision,
        Metric::Wracc,
        Metric::GiniIndex,
        Metric::InformationGain,
        Metric::GainRatio,
        Metric::Mcc,
        Metric::AucRocSklearn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::Accuracy => "accuracy",
            Metric::Specificity => "specificity",
            Metric::F1Score => "f1_score",
            Metric::F1Recall => "f1_recall",
            Metric::AccRec => "acc_rec",
            Metric::AccPrec => "acc_prec",
            Metric::SpecRec => "spec_rec",
            Metric::SpecAcc => "spec_acc",
            Metric::SpecPrec => "spec_prec",
            Metric::SpecAccPrecRec => "spec_acc_prec_rec",
            Metric::AccPrecRec => "acc_prec_rec",
            Metric::AucRoc => "auc_roc",
            Metric::LaplaceGini => "laplace_gini",
            Metric::LaplacePrecision => "laplace_precision",
            Metric::Wracc => "wracc",
            Metric::GiniIndex => "gini_index",
            Metric::InformationGain => "information_gain",
            Metric::GainRatio => "gain_ratio",
            Metric::Mcc => "mcc",
            Metric::AucRocSklearn => "auc_roc_sklearn",
        }
    }

    pub fn function(&self) -> fn(&ConfusionCount) -> f64 {
        match self {
            Metric::Precision => precision,
            Metric::Recall => recall,
            Metric::Accuracy => accuracy,
            Metric::Specificity => specificity,
            Metric::F1Score => f1_score,
            Metric::F1Recall => f1_recall,
            Metric::AccRec => acc_rec,
            Metric::AccPrec => acc_prec,
            Metric::SpecRec => spec_rec,
            Metric::SpecAcc => spec_acc,
            Metric::SpecPrec => spec_prec,
            Metric::SpecAccPrecRec => spec_acc_prec_rec,
            Metric::AccPrecRec => acc_prec_rec,
            Metric::AucRoc => auc_roc,
            Metric::LaplaceGini => laplace_gini,
            Metric::LaplacePrecision => laplace_precision,
            Metric::Wracc => wracc,
            Metric::GiniIndex => gini_index,
            Metric::InformationGain => information_gain,
            Metric::GainRatio => gain_ratio,
            Metric::Mcc => mcc,
            Metric::AucRocSklearn => auc_roc_sklearn,
        }
    }

    pub fn evaluate(&self, count: &ConfusionCount) -> f64 {
        (self.function())(count)
    }

    /// Names accepted by [`Metric::from_str`], in menu order.
    pub fn menu() -> Vec<&'static str> {
        Metric::ALL.iter().map(|m| m.name()).collect()
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "unknown evaluation function '{}', expected one of: {}",
                    s,
                    Metric::menu().join(", ")
                ))
            })
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A metric bound once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    metric: Metric,
}

impl Evaluator {
    /// Bind the metric called `name`; unknown names are rejected here rather
    /// than at evaluation time.
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            metric: name.parse()?,
        })
    }

    pub fn from_metric(metric: Metric) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn evaluate(&self, tp: usize, tn: usize, fp: usize, fn_: usize) -> f64 {
        self.metric.evaluate(&ConfusionCount::new(tp, tn, fp, fn_))
    }

    pub fn evaluate_count(&self, count: &ConfusionCount) -> f64 {
        self.metric.evaluate(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_menu() {
        for metric in Metric::ALL {
            let json = serde_json::to_string(&metric).unwrap();
            assert_eq!(json, format!("\"{}\"", metric.name()));
        }
    }

    #[test]
    fn split_information_of_balanced_split_is_one() {
        let (p_pos, p_neg) = split_proportions(&ConfusionCount::new(1, 1, 1, 1));
        assert!((split_information(p_pos, p_neg) - 1.0).abs() < 1e-6);
    }
}
