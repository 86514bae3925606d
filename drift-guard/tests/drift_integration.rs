//! End-to-end behaviour of the drift detector on synthetic datasets.

mod common;

use common::{single_column, standard_normal};
use drift_guard::dataset::Dataset;
use drift_guard::drift::{
    check_drift, population_stability_index, ColumnDrift, DriftConfig, DriftDetector,
};
use drift_guard::prelude::DriftError;

#[test]
fn test_identical_datasets_never_alert() {
    let dataset = Dataset::builder()
        .numeric("a", standard_normal(120, 1))
        .numeric("b", standard_normal(120, 2).into_iter().map(|v| v * 10.0 + 3.0))
        .integer("c", (0..120i64).map(|i| i % 7))
        .build()
        .unwrap();

    let report = DriftDetector::default().check_drift(&dataset, &dataset).unwrap();

    assert_eq!(report.len(), 3);
    for (name, drift) in report.iter() {
        let stats = drift.statistics().unwrap_or_else(|| panic!("{name} not scored"));
        assert!(stats.psi.unwrap().abs() < 1e-9, "{name}: psi {:?}", stats.psi);
        assert_eq!(stats.ks_statistic, 0.0);
        assert_eq!(stats.ks_pvalue, 1.0);
        assert!(!stats.drifted);
    }
    assert!(report.alerts().is_empty());
}

#[test]
fn test_psi_grows_as_baseline_moves_away() {
    let current: Vec<f64> = (0..100).map(f64::from).collect();
    let mut previous = f64::NEG_INFINITY;

    for shift in [0.0, 5.0, 20.0, 60.0, 150.0, 400.0] {
        let baseline: Vec<f64> = current.iter().map(|v| v + shift).collect();
        let psi = population_stability_index(&baseline, &current, 10).unwrap();
        assert!(
            psi >= previous - 1e-12,
            "psi decreased at shift {shift}: {psi} < {previous}"
        );
        previous = psi;
    }
    assert!(previous > 1.0);
}

#[test]
fn test_psi_threshold_boundary() {
    let baseline = standard_normal(200, 11);
    let current: Vec<f64> = standard_normal(200, 12).iter().map(|v| v + 0.3).collect();
    let psi = population_stability_index(&baseline, &current, 10).unwrap();

    let b = single_column("x", baseline);
    let c = single_column("x", current);

    let at_threshold = check_drift(&b, &c, None, psi, 0.0).unwrap();
    assert!(!at_threshold.get("x").unwrap().is_drifted());
    assert!(at_threshold.alerts().is_empty());

    let above = check_drift(&b, &c, None, psi - 1e-6, 0.0).unwrap();
    assert!(above.get("x").unwrap().is_drifted());
    assert_eq!(above.alerts(), ["x"]);
}

#[test]
fn test_minimum_sample_gate() {
    let nine: Vec<Option<f64>> = (0..12).map(|i| (i < 9).then_some(f64::from(i))).collect();
    let ten: Vec<Option<f64>> = (0..12).map(|i| (i < 10).then_some(f64::from(i))).collect();

    let baseline = Dataset::builder()
        .numeric("nine", nine)
        .numeric("ten", ten.clone())
        .build()
        .unwrap();
    let current = Dataset::builder()
        .numeric("nine", (0..12).map(|i| f64::from(i) + 500.0))
        .numeric("ten", ten)
        .build()
        .unwrap();

    let report = DriftDetector::default().check_drift(&baseline, &current).unwrap();
    assert_eq!(report.get("nine"), Some(&ColumnDrift::not_enough_data()));
    assert!(report.get("ten").unwrap().statistics().is_some());
    assert!(!report.alerts().contains(&"nine".to_string()));
}

#[test]
fn test_alerts_follow_feature_order_without_duplicates() {
    let base = standard_normal(100, 21);
    let shifted: Vec<f64> = base.iter().map(|v| v + 5.0).collect();

    let baseline = Dataset::builder()
        .numeric("a", base.clone())
        .numeric("b", base.clone())
        .numeric("c", base.clone())
        .build()
        .unwrap();
    let current = Dataset::builder()
        .numeric("a", shifted.clone())
        .numeric("b", base.clone())
        .numeric("c", shifted)
        .build()
        .unwrap();

    let features = ["c", "b", "a", "c"];
    let report = DriftDetector::default()
        .check_features(&baseline, &current, &features)
        .unwrap();
    assert_eq!(report.alerts(), ["c", "a"]);
    assert_eq!(
        report.iter().map(|(name, _)| name).collect::<Vec<_>>(),
        vec!["c", "b", "a"]
    );
}

#[test]
fn test_three_sigma_shift_is_flagged() {
    let baseline = standard_normal(200, 42);
    let current: Vec<f64> = baseline.iter().map(|v| v + 3.0).collect();

    let report = DriftDetector::default()
        .check_drift(&single_column("x", baseline), &single_column("x", current))
        .unwrap();

    let stats = report.get("x").unwrap().statistics().copied().unwrap();
    assert!(stats.psi.unwrap() > 0.1, "psi = {:?}", stats.psi);
    assert!(stats.ks_pvalue < 1e-6, "p = {}", stats.ks_pvalue);
    assert!(stats.drifted);
    assert_eq!(report.alerts(), ["x"]);
}

#[test]
fn test_constant_column_has_undefined_psi() {
    let constant = single_column("x", vec![5.0; 50]);

    let report = DriftDetector::default()
        .check_drift(&constant, &constant)
        .unwrap();

    let stats = report.get("x").unwrap().statistics().copied().unwrap();
    assert_eq!(stats.psi, None);
    assert_eq!(stats.ks_pvalue, 1.0);
    assert!(!stats.drifted);
    assert!(report.alerts().is_empty());

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["columns"]["x"]["psi"].is_null());
}

#[test]
fn test_psi_depends_on_direction() {
    let narrow = standard_normal(300, 5);
    let wide: Vec<f64> = standard_normal(300, 6).iter().map(|v| v * 3.0).collect();
    let forward = population_stability_index(&narrow, &wide, 10).unwrap();
    let backward = population_stability_index(&wide, &narrow, 10).unwrap();
    assert!((forward - backward).abs() > 1e-3);
}

#[test]
fn test_non_numeric_columns_excluded_by_default() {
    let baseline = Dataset::builder()
        .numeric("x", standard_normal(30, 8))
        .text("species", vec!["setosa"; 30])
        .build()
        .unwrap();
    let report = DriftDetector::default().check_drift(&baseline, &baseline).unwrap();
    assert_eq!(report.len(), 1);
    assert!(report.get("species").is_none());
}

#[test]
fn test_requested_feature_missing_from_current_is_fatal() {
    let baseline = single_column("x", standard_normal(30, 9)).with_name("baseline");
    let current = single_column("y", standard_normal(30, 10)).with_name("current");

    let err = DriftDetector::default()
        .check_features(&baseline, &current, &["x"])
        .unwrap_err();
    match err {
        DriftError::ColumnNotFound { column, dataset } => {
            assert_eq!(column, "x");
            assert_eq!(dataset, "current");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_requested_text_feature_is_type_mismatch() {
    let baseline = Dataset::builder()
        .text("species", vec!["setosa"; 30])
        .build()
        .unwrap();
    let err = DriftDetector::default()
        .check_features(&baseline, &baseline, &["species"])
        .unwrap_err();
    assert!(err.is_precondition_violation());
}

#[test]
fn test_custom_bucket_count() {
    let baseline = standard_normal(500, 31);
    let current: Vec<f64> = standard_normal(500, 32).iter().map(|v| v + 0.5).collect();
    let detector =
        DriftDetector::new(DriftConfig::default().with_buckets(20).with_min_samples(50)).unwrap();
    let drift = detector.score_column(&baseline, &current).unwrap();
    let stats = drift.statistics().unwrap();
    assert_eq!(
        stats.psi,
        population_stability_index(&baseline, &current, 20)
    );
    assert!(stats.drifted);
}
