use cn2_rules::{
    CoveragePolicy, Dataset, FeatureType, InductionConfig, OneVsRestRules, Value,
};
use polars::prelude::*;
use std::time::Instant;

const FEATURES: [&str; 6] = ["hair", "feathers", "eggs", "aquatic", "fins", "legs"];

fn generate_zoo_dataframe(n_samples: usize) -> (DataFrame, DataFrame) {
    let mut columns: Vec<Vec<i64>> = vec![Vec::with_capacity(n_samples); FEATURES.len()];
    let mut classes: Vec<&str> = Vec::with_capacity(n_samples);

    for i in 0..n_samples {
        // Three archetypes with some noise on the less telling features
        let (row, class) = match i % 3 {
            0 => ([1, 0, (i % 7 == 0) as i64, (i % 5 == 0) as i64, 0, 4], "mammal"),
            1 => ([0, 1, 1, (i % 4 == 0) as i64, 0, 2], "bird"),
            _ => ([0, 0, 1, 1, 1, 0], "fish"),
        };
        for (col, value) in columns.iter_mut().zip(row) {
            col.push(value);
        }
        classes.push(class);
    }

    let x_cols: Vec<Column> = FEATURES
        .iter()
        .zip(columns)
        .map(|(name, values)| Series::new(PlSmallStr::from_str(name), values).into())
        .collect();
    let y = Series::new(PlSmallStr::from_static("class"), classes);
    (
        DataFrame::new(x_cols).unwrap(),
        DataFrame::new(vec![y.into()]).unwrap(),
    )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Simple Rules (Polars) ===");

    let (x_df, y_df) = generate_zoo_dataframe(90);
    println!(
        "DataFrame shape: {{ rows: {}, cols: {} }}",
        x_df.height(),
        x_df.width()
    );
    println!("Columns: {:?}", x_df.get_column_names());

    let data = Dataset::from_dataframes(&x_df, &y_df).expect("categorical frames");
    let (train, test) = data.train_test_split(0.3, 42).expect("valid split");
    println!("Train: {} rows, test: {} rows", train.len(), test.len());

    let mut config = InductionConfig::new(Value::from("mammal"));
    config.max_rules = 4;
    config.coverage_policy = CoveragePolicy::Hybrid;
    config.feature_labels = Some(train.feature_names.clone());
    // Everything but the leg count is a yes/no attribute
    let mut types = vec![FeatureType::Boolean; FEATURES.len()];
    types[FEATURES.len() - 1] = FeatureType::Categorical;
    config.feature_types = Some(types);

    println!("\nFitting one rule list per class...");
    let start_time = Instant::now();
    let mut ensemble = OneVsRestRules::new(config).expect("valid configuration");
    ensemble
        .fit(&train.rows, &train.labels)
        .expect("rows match labels");
    println!("Fitting took: {:?}", start_time.elapsed());

    println!("\n=== Results ===");
    print!("{}", ensemble.rules_info());

    println!("\nTypicality view:");
    for (class, learner) in ensemble.learners() {
        println!("[{}]", class);
        println!("{}", learner.typicality_summary());
    }

    println!("\nHeld-out reports:");
    for (class, report) in ensemble
        .reports(&test.rows, &test.labels)
        .expect("test rows match labels")
    {
        println!("--- {} ---\n{}", class, report);
    }
}
