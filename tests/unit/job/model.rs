use super::*;

fn count_job() -> RenderJob {
    RenderJob::from_json(
        r#"{
            "screen": {"width": 4, "height": 3},
            "shape": "point",
            "records": [[0, 0, 0, 0], [1, 2, 0, 0]],
            "aggregator": {"kind": "count"}
        }"#,
    )
    .unwrap()
}

#[test]
fn minimal_job_takes_defaults() {
    let job = count_job();
    assert_eq!(job.screen, Screen { width: 4, height: 3 });
    assert_eq!(job.shape, ShapeCode::Point);
    assert!(job.values.is_empty());
    assert!(job.shaders.is_empty());
    assert!(job.view.is_none() && job.fit.is_none());
    assert!(!job.threading.parallel);
    job.validate().unwrap();
}

#[test]
fn values_accept_numbers_and_labels() {
    let vals: Vec<JobValue> = serde_json::from_str(r#"[1.5, "b", 3]"#).unwrap();
    assert_eq!(vals[0].as_f64(), Some(1.5));
    assert_eq!(vals[1].as_f64(), None);
    assert_eq!(vals[1].label(), "b");
    assert_eq!(vals[2].label(), "3");
}

#[test]
fn fit_defaults_to_balanced() {
    let fit: FitSpec = serde_json::from_str("{}").unwrap();
    assert!(fit.balanced);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = RenderJob::from_json(r#"{"screen": 3}"#).unwrap_err();
    assert!(matches!(err, GlyphGridError::Serde(_)));
}

#[test]
fn unknown_aggregator_is_rejected_at_parse() {
    let err = RenderJob::from_json(
        r#"{
            "screen": {"width": 1, "height": 1},
            "shape": "point",
            "records": [],
            "aggregator": {"kind": "mean"}
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, GlyphGridError::Serde(_)));
}

#[test]
fn view_and_fit_are_exclusive() {
    let mut job = count_job();
    job.view = Some(ViewTransform::IDENTITY);
    job.fit = Some(FitSpec { balanced: true });
    let err = job.validate().unwrap_err();
    assert!(err.to_string().contains("not both"));
}

#[test]
fn zero_screen_is_rejected() {
    let mut job = count_job();
    job.screen.width = 0;
    assert!(matches!(job.validate(), Err(GlyphGridError::Validation(_))));
}

#[test]
fn non_finite_records_are_rejected() {
    let mut job = count_job();
    job.records[1][0] = f64::NAN;
    let err = job.validate().unwrap_err();
    assert!(err.to_string().contains("record 1"));
}

#[test]
fn sum_needs_one_number_per_record() {
    let mut job = count_job();
    job.aggregator = AggregatorSpec::Sum;
    assert!(job.validate().is_err());

    job.values = vec![JobValue::Number(1.0), JobValue::Label("x".into())];
    let err = job.validate().unwrap_err();
    assert!(err.to_string().contains("sum value 1"));

    job.values[1] = JobValue::Number(2.0);
    job.validate().unwrap();
}

#[test]
fn count_categories_rejects_an_empty_universe() {
    let mut job = count_job();
    job.values = vec![JobValue::Label("a".into()), JobValue::Label("b".into())];
    job.aggregator = AggregatorSpec::CountCategories {
        categories: Some(Vec::new()),
    };
    assert!(job.validate().is_err());

    job.aggregator = AggregatorSpec::CountCategories { categories: None };
    job.validate().unwrap();
}

#[test]
fn point_histogram_requires_points() {
    let mut job = count_job();
    job.aggregator = AggregatorSpec::PointHistogram;
    job.validate().unwrap();

    job.shape = ShapeCode::Rect;
    let err = job.validate().unwrap_err();
    assert!(err.to_string().contains("point_histogram"));
}

#[test]
fn zero_threads_are_rejected() {
    let mut job = count_job();
    job.threading.threads = Some(0);
    assert!(job.validate().is_err());
}

#[test]
fn blank_shader_kind_is_rejected() {
    let mut job = count_job();
    job.shaders.push(ShaderSpec {
        kind: "  ".into(),
        params: serde_json::Value::Null,
    });
    let err = job.validate().unwrap_err();
    assert!(err.to_string().contains("shader 0"));
}
