//! Integration tests for the fit/apply preprocessing transform.

use polars::prelude::*;
use tabprep_model::{Schema, UnknownCategoryPolicy};
use tabprep_transform::{
    FeatureMatrix, PreprocessingBuilder, PreprocessingOptions, Preprocessor, TransformError,
    TransformErrorKind,
};

fn students_train() -> DataFrame {
    df!(
        "gender" => ["female", "male", "female", "male"],
        "race/ethnicity" => ["group B", "group C", "group A", "group B"],
        "parental level of education" => ["bachelor's degree", "some college", "master's degree", "some college"],
        "lunch" => ["standard", "free/reduced", "standard", "standard"],
        "test preparation course" => ["none", "completed", "none", "none"],
        "math score" => [72i64, 69, 90, 47],
        "reading score" => [72i64, 90, 95, 57],
        "writing score" => [74i64, 88, 93, 44],
    )
    .unwrap()
}

fn students_eval() -> DataFrame {
    df!(
        "gender" => ["male", "female"],
        "race/ethnicity" => ["group E", "group C"],
        "parental level of education" => ["some college", "associate's degree"],
        "lunch" => ["standard", "standard"],
        "test preparation course" => ["none", "completed"],
        "math score" => [76i64, 71],
        "reading score" => [78i64, 83],
        "writing score" => [75i64, 78],
    )
    .unwrap()
}

fn fitted(options: PreprocessingOptions) -> Preprocessor {
    let mut preprocessor = PreprocessingBuilder::new(options)
        .build(&Schema::student_performance())
        .unwrap();
    preprocessor.fit(&students_train()).unwrap();
    preprocessor
}

#[test]
fn feature_names_follow_declared_order() {
    let preprocessor = fitted(PreprocessingOptions::default());

    insta::assert_json_snapshot!(preprocessor.feature_names().unwrap(), @r#"
    [
      "num__writing score",
      "num__reading score",
      "cat__gender_female",
      "cat__gender_male",
      "cat__race/ethnicity_group A",
      "cat__race/ethnicity_group B",
      "cat__race/ethnicity_group C",
      "cat__parental level of education_bachelor's degree",
      "cat__parental level of education_master's degree",
      "cat__parental level of education_some college",
      "cat__lunch_free/reduced",
      "cat__lunch_standard",
      "cat__test preparation course_completed",
      "cat__test preparation course_none"
    ]
    "#);
}

#[test]
fn transform_leaves_params_unchanged() {
    let preprocessor = fitted(PreprocessingOptions::default());
    let before = preprocessor.params().unwrap().clone();

    preprocessor.transform(&students_train()).unwrap();
    preprocessor.transform(&students_eval()).unwrap();

    assert_eq!(preprocessor.params().unwrap(), &before);
}

#[test]
fn train_and_eval_share_learned_statistics() {
    let preprocessor = fitted(PreprocessingOptions::default());
    let params = preprocessor.params().unwrap();
    let writing = &params.numeric[0];
    assert_eq!(writing.column, "writing score");
    assert_eq!(writing.scaler.mean, (74.0 + 88.0 + 93.0 + 44.0) / 4.0);

    let eval = preprocessor.transform(&students_eval()).unwrap();
    let scaled = eval.column("num__writing score").unwrap();
    let expected = (75.0 - writing.scaler.mean) / writing.scaler.std_dev;
    assert!((scaled[0] - expected).abs() < 1e-12);
}

#[test]
fn unseen_category_encodes_as_zeros() {
    let preprocessor = fitted(PreprocessingOptions::default());
    let eval = preprocessor.transform(&students_eval()).unwrap();

    // "group E" never appears in training
    let block: Vec<f64> = ["group A", "group B", "group C"]
        .iter()
        .map(|g| eval.column(&format!("cat__race/ethnicity_{g}")).unwrap()[0])
        .collect();
    assert_eq!(block, vec![0.0, 0.0, 0.0]);

    // Known categories still encode normally
    assert_eq!(eval.column("cat__race/ethnicity_group C").unwrap()[1], 1.0);
    assert_eq!(eval.shape(), (2, 14));
}

#[test]
fn unseen_category_errors_when_configured() {
    let preprocessor = fitted(PreprocessingOptions {
        unknown_categories: UnknownCategoryPolicy::Error,
    });
    let err = preprocessor.transform(&students_eval()).unwrap_err();

    assert!(matches!(
        err,
        TransformError::UnknownCategory { ref column, ref value }
            if column == "race/ethnicity" && value == "group E"
    ));
    assert_eq!(err.kind(), TransformErrorKind::Schema);
}

#[test]
fn missing_feature_column_is_schema_error() {
    let preprocessor = fitted(PreprocessingOptions::default());
    let eval = students_eval().drop("lunch").unwrap();

    let err = preprocessor.transform(&eval).unwrap_err();
    assert!(matches!(err, TransformError::MissingColumn { ref column } if column == "lunch"));
    assert_eq!(err.kind(), TransformErrorKind::Schema);
}

#[test]
fn params_serialize_for_inspection() {
    let preprocessor = fitted(PreprocessingOptions::default());
    let json = serde_json::to_value(preprocessor.params().unwrap()).unwrap();

    assert_eq!(json["fitted_rows"], 4);
    assert_eq!(json["numeric"][1]["column"], "reading score");
    assert_eq!(json["categorical"][0]["encoder"]["categories"][1], "male");
}

#[test]
fn target_appended_last() {
    let preprocessor = fitted(PreprocessingOptions::default());
    let train = students_train();
    let target = tabprep_transform::target_values(&train, "math score").unwrap();

    let matrix: FeatureMatrix = preprocessor
        .transform(&train)
        .unwrap()
        .with_column("math score", target)
        .unwrap();

    assert_eq!(matrix.shape(), (4, 15));
    assert_eq!(matrix.row(0).unwrap().last(), Some(&72.0));
}
