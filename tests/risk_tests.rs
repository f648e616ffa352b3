//! Tests for the risk rules.

use vfplanner::models::FinancialResult;
use vfplanner::risk::{
    assess_risk, is_hot_climate, AIRFLOW_TIP, BASELINE_RISK, COOLING_WARNING, MAX_RISK,
    UNPROFITABLE_WARNING,
};

fn with_roi(roi_percent: f64) -> FinancialResult {
    FinancialResult {
        roi_percent,
        ..Default::default()
    }
}

#[test]
fn test_baseline_only_has_airflow_tip() {
    let risk = assess_risk(&with_roi(25.0), "London");
    assert_eq!(risk.score, BASELINE_RISK);
    assert_eq!(risk.recommendations, vec![AIRFLOW_TIP.to_string()]);
}

#[test]
fn test_zero_roi_is_not_penalized() {
    let risk = assess_risk(&with_roi(0.0), "New York");
    assert_eq!(risk.score, 20);
    assert_eq!(risk.recommendations.len(), 1);
}

#[test]
fn test_negative_roi_adds_penalty() {
    let risk = assess_risk(&with_roi(-0.01), "London");
    assert_eq!(risk.score, 70);
    assert_eq!(
        risk.recommendations,
        vec![AIRFLOW_TIP.to_string(), UNPROFITABLE_WARNING.to_string()]
    );
}

#[test]
fn test_hot_climate_adds_cooling_warning() {
    let risk = assess_risk(&with_roi(10.0), "Phoenix");
    assert_eq!(risk.score, 20);
    assert_eq!(
        risk.recommendations,
        vec![AIRFLOW_TIP.to_string(), COOLING_WARNING.to_string()]
    );
}

#[test]
fn test_recommendations_keep_rule_order() {
    let risk = assess_risk(&with_roi(-50.0), "Dubai");
    assert_eq!(
        risk.recommendations,
        vec![
            AIRFLOW_TIP.to_string(),
            UNPROFITABLE_WARNING.to_string(),
            COOLING_WARNING.to_string(),
        ]
    );
}

#[test]
fn test_city_match_ignores_case_and_whitespace() {
    assert!(is_hot_climate("dubai"));
    assert!(is_hot_climate(" DUBAI "));
    assert!(is_hot_climate("PhOeNiX"));
    assert!(!is_hot_climate("Dubai Marina"));
    assert!(!is_hot_climate(""));
}

#[test]
fn test_score_never_exceeds_max() {
    for roi in [-1.0e9, -100.0, -1.0, 0.0, 1.0, 1.0e9] {
        for city in ["Dubai", "London"] {
            let risk = assess_risk(&with_roi(roi), city);
            assert!(risk.score >= BASELINE_RISK && risk.score <= MAX_RISK);
        }
    }
}
