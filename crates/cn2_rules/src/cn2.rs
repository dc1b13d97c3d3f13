//! Unordered-covering CN2.
//!
//! A run induces rules for a single target class. Each iteration scores every
//! admissible candidate body against the current working examples, accepts the
//! best one and then shrinks the problem according to the coverage policy:
//! covered positives leave the working set, atoms of accepted rules become
//! conflicts, or both.

use crate::conf::{CandidateOrder, CoveragePolicy, FeatureType, InductionConfig};
use crate::dataset::check_shape;
use crate::error::{Error, Result};
use crate::evaluator::{ConfusionCount, Evaluator};
use crate::report::{unsmoothed_recall, ConfusionReport};
use crate::rules::Rule;
use crate::star::StarUniverse;
use crate::value::{Atom, Value};
use log::{debug, info, trace};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    MaxRules(usize),
    CandidatesExhausted,
    /// Every target example of the working set is covered (strict policy).
    TargetCovered,
    /// The best candidate scored below the configured floor.
    BelowMinSignificance(f64),
}

/// What happened in the iteration that accepted one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct InductionRecord {
    pub iteration: usize,
    pub rule_index: usize,
    pub candidates_scored: usize,
    pub significance: f64,
    pub working_set_size: usize,
    pub examples_removed: usize,
    pub conflicts_size: usize,
    /// The working set was reset to the whole dataset after this rule.
    pub restarted: bool,
}

pub struct Cn2Unordered {
    config: InductionConfig,
    evaluator: Evaluator,
    feature_labels: Option<Arc<Vec<String>>>,
    feature_types: Option<Arc<Vec<FeatureType>>>,
    rules: Vec<Rule>,
    history: Vec<InductionRecord>,
    stop_reason: Option<StopReason>,
    // Column order seen at fit time, used to align frames at predict time
    pub(crate) fitted_columns: Option<Vec<String>>,
}

impl Cn2Unordered {
    pub fn new(config: InductionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            evaluator: Evaluator::from_metric(config.evaluation_func),
            feature_labels: config.feature_labels.clone().map(Arc::new),
            feature_types: config.feature_types.clone().map(Arc::new),
            config,
            rules: Vec::new(),
            history: Vec::new(),
            stop_reason: None,
            fitted_columns: None,
        })
    }

    pub fn config(&self) -> &InductionConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn target_class(&self) -> &Value {
        &self.config.target_class
    }

    /// Accepted rules in acceptance order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn history(&self) -> &[InductionRecord] {
        &self.history
    }

    /// `None` until `fit` has run.
    pub fn stop_reason(&self) -> Option<&StopReason> {
        self.stop_reason.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.stop_reason.is_some()
    }

    /// Run the covering loop on `x`/`y`, replacing any previous result.
    ///
    /// Display names come from the config only; names picked up from an
    /// earlier frame fit are dropped. Configured labels and types are
    /// checked against the row width, which an empty `x` does not have, so
    /// empty input skips that check and yields no rules.
    pub fn fit(&mut self, x: &[Vec<Value>], y: &[Value]) -> Result<()> {
        self.feature_labels = self.config.feature_labels.clone().map(Arc::new);
        self.induce(x, y)
    }

    /// Like `fit`, with column names as display names unless the config
    /// supplied its own.
    pub(crate) fn fit_named(
        &mut self,
        names: &[String],
        x: &[Vec<Value>],
        y: &[Value],
    ) -> Result<()> {
        let labels = match &self.config.feature_labels {
            Some(labels) => labels.clone(),
            None => names.to_vec(),
        };
        self.feature_labels = Some(Arc::new(labels));
        self.induce(x, y)
    }

    fn induce(&mut self, x: &[Vec<Value>], y: &[Value]) -> Result<()> {
        let n_features = check_shape(x, y)?;
        if !x.is_empty() {
            self.check_feature_metadata(n_features)?;
        }
        self.fitted_columns = None;

        let mut search = CoveringSearch::new(
            x,
            y,
            &self.config,
            self.evaluator,
            self.feature_labels.clone(),
            self.feature_types.clone(),
        );
        let stop = search.run();
        info!(
            "induced {} rule(s) for class {} ({:?})",
            search.rules.len(),
            self.config.target_class,
            stop
        );

        self.rules = search.rules;
        self.history = search.history;
        self.stop_reason = Some(stop);
        Ok(())
    }

    fn check_feature_metadata(&self, n_features: usize) -> Result<()> {
        if let Some(labels) = &self.feature_labels {
            if labels.len() != n_features {
                return Err(Error::shape("feature labels", n_features, labels.len()));
            }
        }
        if let Some(types) = &self.feature_types {
            if types.len() != n_features {
                return Err(Error::shape("feature types", n_features, types.len()));
            }
        }
        Ok(())
    }

    /// First-match-wins prediction over the rule list, or the verdict of
    /// `rule` alone when given. `None` means no rule matched.
    pub fn predict(&self, x: &[Vec<Value>], rule: Option<&Rule>) -> Vec<Option<Value>> {
        x.iter()
            .map(|example| match rule {
                Some(rule) => rule.matches(example).then(|| rule.prediction().clone()),
                None => self
                    .rules
                    .iter()
                    .find(|r| r.matches(example))
                    .map(|r| r.prediction().clone()),
            })
            .collect()
    }

    pub fn confusion_report(
        &self,
        x: &[Vec<Value>],
        y: &[Value],
        rule: Option<&Rule>,
    ) -> Result<ConfusionReport> {
        check_shape(x, y)?;
        let predictions = self.predict(x, rule);
        Ok(ConfusionReport::from_count(tally(
            &predictions,
            y,
            &self.config.target_class,
        )))
    }

    /// One `Rule k: ...` line per accepted rule.
    pub fn rules_summary(&self) -> String {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("Rule {}: {}", i + 1, rule))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One `Rule k: ...` line per accepted rule, in typicality form.
    pub fn typicality_summary(&self) -> String {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("Rule {}: {}", i + 1, rule.typicality_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn rules_info(&self) -> String {
        let mut info = String::new();

        info.push_str("=== Rule Induction ===\n");
        info.push_str(&format!(
            "Description: max_star_size={}, max_rules={}, target_class={}, evaluation_func={}, coverage_policy={}, candidate_order={:?}\n",
            self.config.max_star_size,
            self.config.max_rules,
            self.config.target_class,
            self.evaluator.metric(),
            self.config.coverage_policy.name(),
            self.config.candidate_order,
        ));
        info.push_str(&format!("Accepted rules: {}\n", self.rules.len()));
        let restarts = self.history.iter().filter(|r| r.restarted).count();
        info.push_str(&format!("Restarts: {}\n", restarts));
        match &self.stop_reason {
            Some(reason) => info.push_str(&format!("Stopped: {:?}\n", reason)),
            None => info.push_str("Stopped: not fitted\n"),
        }

        if !self.history.is_empty() {
            info.push_str("\nIterations:\n");
            for record in &self.history {
                info.push_str(&format!(
                    "  #{} rule {}: {} candidates, significance {:.6}, working set {} (-{}), conflicts {}{}\n",
                    record.iteration,
                    record.rule_index + 1,
                    record.candidates_scored,
                    record.significance,
                    record.working_set_size,
                    record.examples_removed,
                    record.conflicts_size,
                    if record.restarted { ", restarted" } else { "" },
                ));
            }
        }
        info.push_str("======================\n");

        info
    }
}

/// Positive prediction means "predicted the target"; unknown counts as negative.
fn tally(predictions: &[Option<Value>], y: &[Value], target: &Value) -> ConfusionCount {
    let mut count = ConfusionCount::default();
    for (pred, truth) in predictions.iter().zip(y) {
        count.record(pred.as_ref() == Some(target), truth == target);
    }
    count
}

// Current best candidate; its full-dataset score is computed lazily for ties
struct Incumbent {
    body: usize,
    significance: f64,
    full_significance: Option<f64>,
}

/// State of one induction run: the working example set and the conflict set
/// are rewritten in place by each iteration.
struct CoveringSearch<'a> {
    x: &'a [Vec<Value>],
    y: &'a [Value],
    target: Value,
    evaluator: Evaluator,
    policy: CoveragePolicy,
    order: CandidateOrder,
    max_rules: usize,
    min_significance: Option<f64>,
    feature_labels: Option<Arc<Vec<String>>>,
    feature_types: Option<Arc<Vec<FeatureType>>>,
    universe: StarUniverse,
    working: Vec<usize>,
    conflicts: HashSet<Atom>,
    rules: Vec<Rule>,
    history: Vec<InductionRecord>,
}

impl<'a> CoveringSearch<'a> {
    fn new(
        x: &'a [Vec<Value>],
        y: &'a [Value],
        config: &InductionConfig,
        evaluator: Evaluator,
        feature_labels: Option<Arc<Vec<String>>>,
        feature_types: Option<Arc<Vec<FeatureType>>>,
    ) -> Self {
        let universe = StarUniverse::build(x, config.max_star_size);
        debug!(
            "star universe: {} atoms, {} candidate bodies",
            universe.atoms().len(),
            universe.len()
        );
        Self {
            x,
            y,
            target: config.target_class.clone(),
            evaluator,
            policy: config.coverage_policy,
            order: config.candidate_order,
            max_rules: config.max_rules,
            min_significance: config.min_significance,
            feature_labels,
            feature_types,
            universe,
            working: (0..x.len()).collect(),
            conflicts: HashSet::new(),
            rules: Vec::new(),
            history: Vec::new(),
        }
    }

    fn run(&mut self) -> StopReason {
        let mut iteration = 0usize;
        while self.rules.len() < self.max_rules {
            iteration += 1;

            let admissible = self.universe.admissible_atoms(
                self.working.iter().map(|&i| self.x[i].as_slice()),
                &self.conflicts,
            );
            let candidates = self.universe.candidates(&admissible, self.order);
            trace!(
                "iteration {}: {} candidates over {} working examples",
                iteration,
                candidates.len(),
                self.working.len()
            );

            let best = match self.select_best(&candidates) {
                Some(best) => best,
                None => return StopReason::CandidatesExhausted,
            };
            if let Some(floor) = self.min_significance {
                if best.significance < floor {
                    debug!(
                        "best candidate scores {} < min_significance {}",
                        best.significance, floor
                    );
                    return StopReason::BelowMinSignificance(best.significance);
                }
            }

            let working_set_size = self.working.len();
            let rule = self.accept(best.body, best.significance);
            debug!("accepted rule {}: {}", self.rules.len() + 1, rule);

            let examples_removed = self.update_coverage(&rule);
            self.rules.push(rule);

            let covered = !self.target_remaining();
            let restarted = covered && self.policy.restarts();
            if restarted {
                self.restart();
            }
            self.history.push(InductionRecord {
                iteration,
                rule_index: self.rules.len() - 1,
                candidates_scored: candidates.len(),
                significance: best.significance,
                working_set_size,
                examples_removed,
                conflicts_size: self.conflicts.len(),
                restarted,
            });
            if covered && !restarted {
                return StopReason::TargetCovered;
            }
        }
        StopReason::MaxRules(self.max_rules)
    }

    fn select_best(&self, candidates: &[usize]) -> Option<Incumbent> {
        let mut best: Option<Incumbent> = None;
        for &body in candidates {
            let significance = self.significance(body, self.working.iter().copied());
            let incumbent = match best.as_mut() {
                None => {
                    best = Some(Incumbent {
                        body,
                        significance,
                        full_significance: None,
                    });
                    continue;
                }
                Some(incumbent) => incumbent,
            };

            if significance > incumbent.significance {
                *incumbent = Incumbent {
                    body,
                    significance,
                    full_significance: None,
                };
            } else if significance == incumbent.significance {
                // tie: compare on the whole dataset, the earlier candidate wins a second tie
                let incumbent_full = match incumbent.full_significance {
                    Some(full) => full,
                    None => {
                        let full = self.significance(incumbent.body, 0..self.x.len());
                        incumbent.full_significance = Some(full);
                        full
                    }
                };
                let challenger_full = self.significance(body, 0..self.x.len());
                if challenger_full > incumbent_full {
                    *incumbent = Incumbent {
                        body,
                        significance,
                        full_significance: Some(challenger_full),
                    };
                }
            }
        }
        best
    }

    fn body_matches(&self, body: usize, row: usize) -> bool {
        let atoms = self.universe.atoms();
        self.universe
            .body_indices(body)
            .iter()
            .all(|&a| atoms[a].holds(&self.x[row]))
    }

    fn confusion<I>(&self, body: usize, rows: I) -> ConfusionCount
    where
        I: IntoIterator<Item = usize>,
    {
        let mut count = ConfusionCount::default();
        for row in rows {
            count.record(self.body_matches(body, row), self.y[row] == self.target);
        }
        count
    }

    fn significance<I>(&self, body: usize, rows: I) -> f64
    where
        I: IntoIterator<Item = usize>,
    {
        self.evaluator.evaluate_count(&self.confusion(body, rows))
    }

    /// Build the rule for `body` with its statistics over the whole dataset.
    fn accept(&self, body: usize, significance: f64) -> Rule {
        let confusion = self.confusion(body, 0..self.x.len());
        let recall = unsmoothed_recall(&confusion);
        let mut rule = Rule::new(self.universe.body(body), self.target.clone())
            .with_features(self.feature_labels.clone(), self.feature_types.clone());
        rule.accept(significance, confusion, recall);
        rule
    }

    /// Returns how many examples left the working set.
    fn update_coverage(&mut self, rule: &Rule) -> usize {
        let before = self.working.len();
        if self.policy.removes_covered() {
            let (x, y, target) = (self.x, self.y, &self.target);
            self.working
                .retain(|&i| !(rule.matches(&x[i]) && y[i] == *target));
        }
        if self.policy.excludes_atoms() {
            self.conflicts.extend(rule.body().iter().cloned());
        }
        before - self.working.len()
    }

    fn target_remaining(&self) -> bool {
        self.working.iter().any(|&i| self.y[i] == self.target)
    }

    fn restart(&mut self) {
        debug!(
            "target class {} covered after {} rule(s), restarting on the full dataset",
            self.target,
            self.rules.len()
        );
        self.working = (0..self.x.len()).collect();
        for rule in &self.rules {
            self.conflicts.extend(rule.body().iter().cloned());
        }
    }
}
