//! One induction run per class.

use crate::cn2::Cn2Unordered;
use crate::conf::InductionConfig;
use crate::dataset::{check_shape, distinct_labels};
use crate::error::Result;
use crate::report::ConfusionReport;
use crate::value::Value;
use log::debug;
use rayon::prelude::*;

/// Fits an independent `Cn2Unordered` for every distinct label, each one
/// targeting its own class with the shared base configuration.
pub struct OneVsRestRules {
    base: InductionConfig,
    // Ascending by class
    learners: Vec<(Value, Cn2Unordered)>,
}

impl OneVsRestRules {
    /// The base config's `target_class` is overridden per learner.
    pub fn new(base: InductionConfig) -> Result<Self> {
        base.validate()?;
        Ok(Self {
            base,
            learners: Vec::new(),
        })
    }

    pub fn base_config(&self) -> &InductionConfig {
        &self.base
    }

    pub fn fit(&mut self, x: &[Vec<Value>], y: &[Value]) -> Result<()> {
        check_shape(x, y)?;
        let classes = distinct_labels(y);
        debug!("fitting {} one-vs-rest learners", classes.len());

        let learners = classes
            .into_par_iter()
            .map(|class| {
                let mut config = self.base.clone();
                config.target_class = class.clone();
                let mut learner = Cn2Unordered::new(config)?;
                learner.fit(x, y)?;
                Ok((class, learner))
            })
            .collect::<Result<Vec<_>>>()?;

        self.learners = learners;
        Ok(())
    }

    pub fn learner(&self, class: &Value) -> Option<&Cn2Unordered> {
        self.learners
            .iter()
            .find(|(c, _)| c == class)
            .map(|(_, learner)| learner)
    }

    pub fn learners(&self) -> &[(Value, Cn2Unordered)] {
        &self.learners
    }

    pub fn classes(&self) -> Vec<&Value> {
        self.learners.iter().map(|(c, _)| c).collect()
    }

    /// Confusion report of every learner's rule list, in class order.
    pub fn reports(&self, x: &[Vec<Value>], y: &[Value]) -> Result<Vec<(Value, ConfusionReport)>> {
        self.learners
            .iter()
            .map(|(class, learner)| Ok((class.clone(), learner.confusion_report(x, y, None)?)))
            .collect()
    }

    pub fn rules_info(&self) -> String {
        let mut info = String::new();
        for (class, learner) in &self.learners {
            info.push_str(&format!("--- class {} ---\n", class));
            info.push_str(&learner.rules_info());
            let summary = learner.rules_summary();
            if !summary.is_empty() {
                info.push_str(&summary);
                info.push('\n');
            }
        }
        info
    }
}
