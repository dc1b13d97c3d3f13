use crate::error::{Error, Result};
use crate::evaluator::Metric;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Added to metric denominators to keep empty partitions finite.
pub const EPSILON: f64 = 1e-9;
pub const DEFAULT_MAX_STAR_SIZE: usize = 3;
pub const DEFAULT_MAX_RULES: usize = 5;
/// Name of the column returned by `Estimator::predict`.
pub const PREDICTION_COLUMN: &str = "prediction";

/// How the covering loop shrinks the search problem after accepting a rule.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// Remove covered positives; stop once every positive is covered.
    #[default]
    Strict,
    /// Keep every example; exclude the atoms of accepted rules instead.
    Accumulate,
    /// Remove covered positives and exclude atoms; restart once covered.
    Hybrid,
}

impl CoveragePolicy {
    pub fn removes_covered(&self) -> bool {
        matches!(self, CoveragePolicy::Strict | CoveragePolicy::Hybrid)
    }

    pub fn excludes_atoms(&self) -> bool {
        matches!(self, CoveragePolicy::Accumulate | CoveragePolicy::Hybrid)
    }

    /// Whether a fully covered target restarts the search on the whole dataset.
    pub fn restarts(&self) -> bool {
        !matches!(self, CoveragePolicy::Strict)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CoveragePolicy::Strict => "strict",
            CoveragePolicy::Accumulate => "accumulate",
            CoveragePolicy::Hybrid => "hybrid",
        }
    }
}

impl FromStr for CoveragePolicy {
    type Err = Error;

    // "no" / "total" / "yes" are the verbosity switches older scripts used
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" | "no" => Ok(CoveragePolicy::Strict),
            "accumulate" | "total" => Ok(CoveragePolicy::Accumulate),
            "hybrid" | "yes" => Ok(CoveragePolicy::Hybrid),
            other => Err(Error::Configuration(format!(
                "unknown coverage policy '{}', expected strict, accumulate or hybrid",
                other
            ))),
        }
    }
}

/// Order in which candidate bodies are scored. Only affects which candidate
/// an unresolved tie keeps.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for CandidateOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ascending" => Ok(CandidateOrder::Ascending),
            "descending" => Ok(CandidateOrder::Descending),
            other => Err(Error::Configuration(format!(
                "unknown candidate order '{}', expected ascending or descending",
                other
            ))),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    #[default]
    Categorical,
    /// Rendered as a bare, possibly negated, label.
    Boolean,
}

impl FromStr for FeatureType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "categorical" => Ok(FeatureType::Categorical),
            "boolean" => Ok(FeatureType::Boolean),
            other => Err(Error::Configuration(format!(
                "unknown feature type '{}', expected categorical or boolean",
                other
            ))),
        }
    }
}

fn default_max_star_size() -> usize {
    DEFAULT_MAX_STAR_SIZE
}

fn default_max_rules() -> usize {
    DEFAULT_MAX_RULES
}

/// Options of one induction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InductionConfig {
    /// Largest number of atoms in a candidate body.
    #[serde(default = "default_max_star_size")]
    pub max_star_size: usize,
    #[serde(default = "default_max_rules")]
    pub max_rules: usize,
    /// Label the run induces rules for.
    pub target_class: Value,
    #[serde(default)]
    pub evaluation_func: Metric,
    /// Display names, one per feature index.
    #[serde(default)]
    pub feature_labels: Option<Vec<String>>,
    #[serde(default)]
    pub feature_types: Option<Vec<FeatureType>>,
    #[serde(default)]
    pub coverage_policy: CoveragePolicy,
    #[serde(default)]
    pub candidate_order: CandidateOrder,
    /// Stop instead of accepting a best candidate scoring below this.
    #[serde(default)]
    pub min_significance: Option<f64>,
}

impl InductionConfig {
    pub fn new(target_class: impl Into<Value>) -> Self {
        Self {
            max_star_size: DEFAULT_MAX_STAR_SIZE,
            max_rules: DEFAULT_MAX_RULES,
            target_class: target_class.into(),
            evaluation_func: Metric::default(),
            feature_labels: None,
            feature_types: None,
            coverage_policy: CoveragePolicy::default(),
            candidate_order: CandidateOrder::default(),
            min_significance: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: InductionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set one option from its textual form, e.g. as handed over by an
    /// argument parser. The config is left untouched when the value is rejected.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        match key {
            "max_star_size" => next.max_star_size = parse_count(key, value)?,
            "max_rules" => next.max_rules = parse_count(key, value)?,
            "target_class" => next.target_class = Value::parse_text(value),
            "evaluation_func" => next.evaluation_func = value.parse()?,
            "coverage_policy" => next.coverage_policy = value.parse()?,
            "candidate_order" => next.candidate_order = value.parse()?,
            "min_significance" => {
                let floor = value.parse::<f64>().map_err(|_| {
                    Error::Configuration(format!("min_significance '{}' is not a number", value))
                })?;
                next.min_significance = Some(floor);
            }
            "feature_labels" => {
                next.feature_labels = Some(value.split(',').map(|s| s.trim().to_string()).collect())
            }
            "feature_types" => {
                let types = value
                    .split(',')
                    .map(|s| s.trim().parse())
                    .collect::<Result<Vec<FeatureType>>>()?;
                next.feature_types = Some(types);
            }
            other => {
                return Err(Error::Configuration(format!("unknown option '{}'", other)));
            }
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_star_size == 0 {
            return Err(Error::Configuration(
                "max_star_size must be >= 1".to_string(),
            ));
        }
        if self.max_rules == 0 {
            return Err(Error::Configuration("max_rules must be >= 1".to_string()));
        }
        if let Some(floor) = self.min_significance {
            if !floor.is_finite() {
                return Err(Error::Configuration(format!(
                    "min_significance must be finite, got {}",
                    floor
                )));
            }
        }
        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::Configuration(format!("{} '{}' is not a positive integer", key, value)))
}
