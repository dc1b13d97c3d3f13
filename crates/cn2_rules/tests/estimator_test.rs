use cn2_rules::{Cn2Unordered, InductionConfig, Metric, Value};
use estimator_api::api::{Estimator, FitError, PredictError};
use polars::prelude::*;

fn training_frames() -> (DataFrame, DataFrame) {
    let legs = Series::new(PlSmallStr::from_static("legs"), &[4i64, 4, 2, 0]);
    let fur = Series::new(PlSmallStr::from_static("fur"), &[true, true, false, false]);
    let class = Series::new(
        PlSmallStr::from_static("class"),
        &["mammal", "mammal", "bird", "fish"],
    );
    let x = DataFrame::new(vec![legs.into(), fur.into()]).unwrap();
    let y = DataFrame::new(vec![class.into()]).unwrap();
    (x, y)
}

fn mammal_model() -> Cn2Unordered {
    let mut config = InductionConfig::new("mammal");
    config.evaluation_func = Metric::Precision;
    config.max_star_size = 1;
    Cn2Unordered::new(config).unwrap()
}

#[test]
fn predict_returns_nullable_prediction_column() {
    let (x, y) = training_frames();
    let mut model = mammal_model();
    Estimator::fit(&mut model, &x, &y).unwrap();

    // Column names become display names
    assert_eq!(model.rules()[0].conditions_string(), "legs == 4");

    let out = Estimator::predict(&model, &x).unwrap();
    assert_eq!(out.width(), 1);
    let predictions: Vec<Option<&str>> = out
        .column("prediction")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        predictions,
        vec![Some("mammal"), Some("mammal"), None, None]
    );
}

#[test]
fn predict_aligns_columns_by_name() {
    let (x, y) = training_frames();
    let mut model = mammal_model();
    Estimator::fit(&mut model, &x, &y).unwrap();

    let fur = Series::new(PlSmallStr::from_static("fur"), &[false]);
    let legs = Series::new(PlSmallStr::from_static("legs"), &[4i64]);
    let extra = Series::new(PlSmallStr::from_static("colour"), &["grey"]);
    let x_new = DataFrame::new(vec![fur.into(), extra.into(), legs.into()]).unwrap();

    let out = Estimator::predict(&model, &x_new).unwrap();
    let first = out.column("prediction").unwrap().str().unwrap().get(0);
    assert_eq!(first, Some("mammal"));
}

#[test]
fn predict_before_fit_is_not_fitted() {
    let (x, _) = training_frames();
    let model = mammal_model();
    assert!(matches!(
        Estimator::predict(&model, &x),
        Err(PredictError::NotFitted)
    ));
}

#[test]
fn missing_column_at_predict_time_is_invalid_input() {
    let (x, y) = training_frames();
    let mut model = mammal_model();
    Estimator::fit(&mut model, &x, &y).unwrap();

    let legs = Series::new(PlSmallStr::from_static("legs"), &[4i64]);
    let x_new = DataFrame::new(vec![legs.into()]).unwrap();
    assert!(matches!(
        Estimator::predict(&model, &x_new),
        Err(PredictError::InvalidInput(_))
    ));
}

#[test]
fn float_features_are_rejected_at_fit_time() {
    let (_, y) = training_frames();
    let weight = Series::new(PlSmallStr::from_static("weight"), &[3.5f64, 4.0, 0.2, 1.1]);
    let x = DataFrame::new(vec![weight.into()]).unwrap();

    let mut model = mammal_model();
    match Estimator::fit(&mut model, &x, &y) {
        Err(FitError::InvalidInput(msg)) => assert!(msg.contains("weight")),
        other => panic!("expected invalid input, got {:?}", other),
    }
}

#[test]
fn configured_labels_win_over_column_names() {
    let (x, y) = training_frames();
    let mut config = InductionConfig::new("mammal");
    config.evaluation_func = Metric::Precision;
    config.max_star_size = 1;
    config.feature_labels = Some(vec!["limbs".to_string(), "hairy".to_string()]);
    let mut model = Cn2Unordered::new(config).unwrap();
    Estimator::fit(&mut model, &x, &y).unwrap();

    assert_eq!(model.rules()[0].conditions_string(), "limbs == 4");
}

#[test]
fn mismatched_label_frame_is_rejected() {
    let (x, _) = training_frames();
    let class = Series::new(PlSmallStr::from_static("class"), &["mammal"]);
    let y = DataFrame::new(vec![class.into()]).unwrap();

    let mut model = mammal_model();
    assert!(matches!(
        Estimator::fit(&mut model, &x, &y),
        Err(FitError::InvalidInput(msg)) if msg.contains("Shape mismatch")
    ));
}

#[test]
fn row_fit_after_frame_fit_drops_column_names() {
    let (x, y) = training_frames();
    let mut model = mammal_model();
    Estimator::fit(&mut model, &x, &y).unwrap();
    assert_eq!(model.rules()[0].conditions_string(), "legs == 4");

    let rows: Vec<Vec<Value>> = [4i64, 4, 2, 0].iter().map(|&v| vec![Value::Int(v)]).collect();
    let labels: Vec<Value> = ["mammal", "mammal", "bird", "fish"]
        .iter()
        .map(|&s| Value::from(s))
        .collect();
    model.fit(&rows, &labels).unwrap();

    assert_eq!(model.rules()[0].conditions_string(), "x[0] == 4");
    // The frame columns no longer describe the fitted rules
    assert!(matches!(
        Estimator::predict(&model, &x),
        Err(PredictError::NotFitted)
    ));
}
