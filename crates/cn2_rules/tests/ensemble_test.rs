use cn2_rules::{CoveragePolicy, Error, InductionConfig, Metric, OneVsRestRules, Value};

fn row(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&v| Value::Int(v)).collect()
}

fn three_classes() -> (Vec<Vec<Value>>, Vec<Value>) {
    let x = vec![
        row(&[0, 0]),
        row(&[0, 1]),
        row(&[1, 0]),
        row(&[1, 1]),
        row(&[2, 0]),
        row(&[2, 1]),
    ];
    let y = ["a", "a", "b", "b", "c", "c"]
        .into_iter()
        .map(Value::from)
        .collect();
    (x, y)
}

fn base_config() -> InductionConfig {
    let mut config = InductionConfig::new("ignored");
    config.evaluation_func = Metric::Precision;
    config.coverage_policy = CoveragePolicy::Strict;
    config
}

#[test]
fn one_learner_per_class_in_sorted_order() {
    let (x, y) = three_classes();
    let mut ensemble = OneVsRestRules::new(base_config()).unwrap();
    ensemble.fit(&x, &y).unwrap();

    let classes: Vec<String> = ensemble.classes().iter().map(|c| c.to_string()).collect();
    assert_eq!(classes, vec!["a", "b", "c"]);

    for (class, learner) in ensemble.learners() {
        assert_eq!(learner.target_class(), class);
        assert_eq!(learner.rules().len(), 1);
        assert_eq!(learner.rules()[0].prediction(), class);
    }

    let b = ensemble.learner(&Value::from("b")).unwrap();
    assert_eq!(b.rules()[0].conditions_string(), "x[0] == 1");
    assert!(ensemble.learner(&Value::from("z")).is_none());
}

#[test]
fn reports_cover_every_class() {
    let (x, y) = three_classes();
    let mut ensemble = OneVsRestRules::new(base_config()).unwrap();
    ensemble.fit(&x, &y).unwrap();

    let reports = ensemble.reports(&x, &y).unwrap();
    assert_eq!(reports.len(), 3);
    for (_, report) in &reports {
        assert_eq!(report.matrix(), [[2, 0], [0, 4]]);
        assert_eq!(report.accuracy, 1.0);
    }

    let info = ensemble.rules_info();
    assert!(info.contains("--- class a ---"));
    assert!(info.contains("Rule 1: IF x[0] == 2 THEN y == c"));
}

#[test]
fn parallel_fit_matches_sequential_runs() {
    let (x, y) = three_classes();
    let mut ensemble = OneVsRestRules::new(base_config()).unwrap();
    ensemble.fit(&x, &y).unwrap();

    for (class, learner) in ensemble.learners() {
        let mut config = base_config();
        config.target_class = class.clone();
        let mut single = cn2_rules::Cn2Unordered::new(config).unwrap();
        single.fit(&x, &y).unwrap();
        assert_eq!(single.rules(), learner.rules());
    }
}

#[test]
fn invalid_base_config_is_rejected() {
    let mut config = base_config();
    config.max_star_size = 0;
    assert!(matches!(
        OneVsRestRules::new(config),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn shape_errors_surface_from_fit() {
    let (x, y) = three_classes();
    let mut ensemble = OneVsRestRules::new(base_config()).unwrap();
    assert!(matches!(
        ensemble.fit(&x[..2], &y),
        Err(Error::ShapeMismatch { .. })
    ));
    assert!(ensemble.learners().is_empty());
}
