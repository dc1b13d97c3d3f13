//! Integration tests for cn2_rules::rules
//!
//! Matching semantics of rule bodies and the two text renderings, with and
//! without display names and boolean feature types.

use std::sync::Arc;

use cn2_rules::{Atom, Cn2Unordered, FeatureType, InductionConfig, Metric, Rule, Value};

fn row(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&v| Value::Int(v)).collect()
}

#[test]
fn empty_body_matches_everything() {
    let rule = Rule::new(Vec::new(), "A");
    assert!(rule.matches(&row(&[0, 1])));
    assert!(rule.matches(&[]));
    assert_eq!(rule.conditions_string(), "TRUE");
    assert_eq!(rule.to_string(), "IF TRUE THEN y == A");
}

#[test]
fn body_is_a_conjunction() {
    let rule = Rule::new(
        vec![Atom::new(0, Value::Int(1)), Atom::new(2, "red")],
        "A",
    );
    let data = vec![
        vec![Value::Int(1), Value::Int(0), Value::from("red")],
        vec![Value::Int(1), Value::Int(0), Value::from("blue")],
        vec![Value::Int(0), Value::Int(0), Value::from("red")],
    ];
    assert_eq!(rule.evaluate(&data), vec![true, false, false]);
}

#[test]
fn atom_on_missing_feature_does_not_hold() {
    let rule = Rule::new(vec![Atom::new(5, Value::Int(1))], "A");
    assert!(!rule.matches(&row(&[1, 1])));
}

#[test]
fn values_of_different_kinds_never_match() {
    let rule = Rule::new(vec![Atom::new(0, Value::Int(1))], "A");
    assert!(!rule.matches(&[Value::from("1")]));
    assert!(!rule.matches(&[Value::Bool(true)]));
}

#[test]
fn conditions_use_feature_labels() {
    let labels = Arc::new(vec!["outlook".to_string(), "windy".to_string()]);
    let rule = Rule::new(
        vec![Atom::new(0, "sunny"), Atom::new(1, Value::Int(0))],
        "play",
    )
    .with_features(Some(labels), None);
    assert_eq!(rule.conditions_string(), "outlook == sunny AND windy == 0");
}

#[test]
fn boolean_features_render_as_bare_or_negated_names() {
    let labels = Arc::new(vec!["hairy".to_string(), "aquatic".to_string()]);
    let types = Arc::new(vec![FeatureType::Boolean, FeatureType::Boolean]);
    let rule = Rule::new(
        vec![Atom::new(0, Value::Int(1)), Atom::new(1, Value::Int(0))],
        "mammal",
    )
    .with_features(Some(labels), Some(types));
    assert_eq!(rule.conditions_string(), "hairy AND not aquatic");
}

#[test]
fn unlabelled_features_fall_back_to_indices() {
    let rule = Rule::new(vec![Atom::new(3, Value::Bool(true))], Value::Int(7));
    assert_eq!(rule.to_string(), "IF x[3] == true THEN y == 7");
}

#[test]
fn unaccepted_rule_has_no_statistics() {
    let rule = Rule::new(vec![Atom::new(0, Value::Int(1))], "A");
    assert!(!rule.is_accepted());
    assert_eq!(rule.significance(), None);
    assert_eq!(rule.confusion(), None);
    assert!(!rule.is_defining());
    assert_eq!(rule.typicality_string(), "T(A) -> x[0] == 1 :  0");
}

fn fitted_rules(metric: Metric) -> Vec<Rule> {
    let x = vec![row(&[1, 0]), row(&[1, 1]), row(&[0, 0]), row(&[0, 1])];
    let y: Vec<Value> = ["A", "A", "B", "B"].into_iter().map(Value::from).collect();
    let mut config = InductionConfig::new("A");
    config.evaluation_func = metric;
    let mut model = Cn2Unordered::new(config).unwrap();
    model.fit(&x, &y).unwrap();
    model.rules().to_vec()
}

#[test]
fn accepted_rule_renders_confusion_and_significance() {
    let rules = fitted_rules(Metric::Accuracy);
    assert_eq!(rules.len(), 1);
    assert_eq!(
        rules[0].to_string(),
        "IF x[0] == 1 THEN y == A : [[2, 0], [0, 2]] : 1"
    );
}

#[test]
fn defining_rule_uses_short_typicality_form() {
    let rules = fitted_rules(Metric::Accuracy);
    assert!(rules[0].is_defining());
    assert_eq!(rules[0].recall(), Some(1.0));
    assert_eq!(rules[0].typicality_string(), "A -> x[0] == 1");
}

#[test]
fn typical_rule_reports_rounded_recall() {
    // x[0] == 1 covers two of the three A examples
    let x = vec![row(&[0, 2]), row(&[1, 0]), row(&[1, 1]), row(&[0, 0])];
    let y: Vec<Value> = ["A", "A", "A", "B"].into_iter().map(Value::from).collect();
    let mut config = InductionConfig::new("A");
    config.max_star_size = 1;
    config.max_rules = 1;
    config.evaluation_func = Metric::Precision;
    let mut model = Cn2Unordered::new(config).unwrap();
    model.fit(&x, &y).unwrap();

    let rule = &model.rules()[0];
    assert_eq!(rule.conditions_string(), "x[0] == 1");
    assert_eq!(rule.typicality_string(), "T(A) -> x[0] == 1 :  0.667");
}
