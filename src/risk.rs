//! Risk score and recommendation rules.
//!
//! A short rule chain, not a weighted model. Rules fire in a fixed order and
//! the recommendations keep that order.

use serde::Serialize;

use crate::models::FinancialResult;

/// Score every configuration starts from.
pub const BASELINE_RISK: u32 = 20;
/// Added when the farm loses money.
pub const UNPROFITABLE_PENALTY: u32 = 50;
/// Upper bound of the risk score.
pub const MAX_RISK: u32 = 100;

/// Cities with a high expected cooling load.
pub const HOT_CLIMATE_CITIES: &[&str] = &["dubai", "phoenix"];

pub const AIRFLOW_TIP: &str = "Ensure uniform airflow to prevent tipburn.";
pub const UNPROFITABLE_WARNING: &str =
    "Current configuration is not profitable. Consider increasing area or switching crops.";
pub const COOLING_WARNING: &str = "High cooling load expected. Ensure HVAC redundancy.";

/// Outcome of the risk rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub recommendations: Vec<String>,
}

/// Returns true if `location` is a known high-cooling-load city.
pub fn is_hot_climate(location: &str) -> bool {
    let city = location.trim().to_lowercase();
    HOT_CLIMATE_CITIES.iter().any(|c| *c == city)
}

/// Scores a financial result and collects advisory messages.
///
/// # Example
///
/// ```
/// use vfplanner::models::FinancialResult;
/// use vfplanner::risk::assess_risk;
///
/// let losing = FinancialResult { roi_percent: -12.0, ..Default::default() };
/// let risk = assess_risk(&losing, "Phoenix");
/// assert_eq!(risk.score, 70);
/// assert_eq!(risk.recommendations.len(), 3);
/// ```
pub fn assess_risk(financials: &FinancialResult, location: &str) -> RiskAssessment {
    let mut score = BASELINE_RISK;
    let mut recommendations = vec![AIRFLOW_TIP.to_string()];

    if financials.roi_percent < 0.0 {
        score += UNPROFITABLE_PENALTY;
        recommendations.push(UNPROFITABLE_WARNING.to_string());
    }
    if is_hot_climate(location) {
        recommendations.push(COOLING_WARNING.to_string());
    }

    RiskAssessment {
        score: score.min(MAX_RISK),
        recommendations,
    }
}
