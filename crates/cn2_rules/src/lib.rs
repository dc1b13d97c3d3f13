//! # CN2 Rules
//!
//! Unordered CN2 rule induction over categorical data.
//!
//! ## Key Features
//!
//! - **Covering search**: candidate conjunctions of `feature == value` atoms are
//!   scored with one of 22 confusion-count metrics and accepted greedily
//! - **Coverage policies**: strict removal of covered examples, accumulating
//!   atom exclusion, or both
//! - **Readable output**: `IF ... THEN ...` and typicality renderings with
//!   optional feature names
//! - **Polars frames**: `Estimator` implementation and a one-vs-rest driver
//!   fitting one run per class in parallel
//!
//! ## Example
//!
//! ```rust
//! use cn2_rules::{Cn2Unordered, InductionConfig, Metric, Value};
//!
//! let x = vec![
//!     vec![Value::Int(1), Value::Int(0)],
//!     vec![Value::Int(1), Value::Int(1)],
//!     vec![Value::Int(0), Value::Int(0)],
//!     vec![Value::Int(0), Value::Int(1)],
//! ];
//! let y: Vec<Value> = ["A", "A", "B", "B"].into_iter().map(Value::from).collect();
//!
//! let mut config = InductionConfig::new("A");
//! config.evaluation_func = Metric::Precision;
//! let mut model = Cn2Unordered::new(config).unwrap();
//! model.fit(&x, &y).unwrap();
//!
//! let rule = &model.rules()[0];
//! assert_eq!(rule.conditions_string(), "x[0] == 1");
//! assert_eq!(rule.confusion().unwrap().as_matrix(), [[2, 0], [0, 2]]);
//! ```

pub mod cn2;
pub mod conf;
pub mod dataset;
pub mod ensemble;
pub mod error;
pub mod estimator;
pub mod evaluator;
pub mod report;
pub mod rules;
pub mod star;
pub mod value;

pub use cn2::{Cn2Unordered, InductionRecord, StopReason};
pub use conf::{CandidateOrder, CoveragePolicy, FeatureType, InductionConfig};
pub use dataset::Dataset;
pub use ensemble::OneVsRestRules;
pub use error::{Error, Result};
pub use evaluator::{ConfusionCount, Evaluator, Metric};
pub use report::ConfusionReport;
pub use rules::Rule;
pub use value::{Atom, Value};
