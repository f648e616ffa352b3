//! Option ranking: simulate every crop (or system) under one configuration
//! and order them by return on investment.

use std::cmp::Ordering;

use serde::Serialize;

use crate::data::ReferenceData;
use crate::engine::simulate;
use crate::error::Result;
use crate::models::FarmConfig;

/// One row of a ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOption {
    /// Crop or system id that was varied
    pub id: String,
    pub name: String,
    pub roi_percent: f64,
    pub net_profit_annual: f64,
    pub payback_period_years: f64,
    pub total_yield_annual_kg: f64,
    pub risk_score: u32,
}

fn by_roi_desc(a: &RankedOption, b: &RankedOption) -> Ordering {
    b.roi_percent
        .partial_cmp(&a.roi_percent)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id.cmp(&b.id))
}

/// Ranks every crop in `data`, keeping the config's system and economics.
///
/// Fails if the configured system does not exist.
///
/// # Example
///
/// ```
/// use vfplanner::data::ReferenceData;
/// use vfplanner::models::FarmConfig;
/// use vfplanner::ranking::rank_crops;
///
/// let data = ReferenceData::embedded().unwrap();
/// let config = FarmConfig::new(300.0, "lettuce_iceberg", "hydroponic_nft").unwrap();
/// let ranked = rank_crops(&config, &data).unwrap();
/// assert_eq!(ranked.len(), data.crops.len());
/// assert!(ranked[0].roi_percent >= ranked[ranked.len() - 1].roi_percent);
/// ```
pub fn rank_crops(config: &FarmConfig, data: &ReferenceData) -> Result<Vec<RankedOption>> {
    data.system(&config.selected_system_id)?;

    let mut ranked = Vec::with_capacity(data.crops.len());
    for crop in &data.crops {
        let mut candidate = config.clone();
        candidate.selected_crop_id = crop.id.clone();
        let result = simulate(&candidate, data)?;
        ranked.push(RankedOption {
            id: crop.id.clone(),
            name: crop.name.clone(),
            roi_percent: result.financials.roi_percent,
            net_profit_annual: result.financials.net_profit_annual,
            payback_period_years: result.financials.payback_period_years,
            total_yield_annual_kg: result.total_yield_annual_kg,
            risk_score: result.risk_score,
        });
    }

    ranked.sort_by(by_roi_desc);
    Ok(ranked)
}

/// Ranks every infrastructure system in `data`, keeping the config's crop.
///
/// Fails if the configured crop does not exist.
pub fn rank_systems(config: &FarmConfig, data: &ReferenceData) -> Result<Vec<RankedOption>> {
    data.crop(&config.selected_crop_id)?;

    let mut ranked = Vec::with_capacity(data.systems.len());
    for system in &data.systems {
        let mut candidate = config.clone();
        candidate.selected_system_id = system.system_id.clone();
        let result = simulate(&candidate, data)?;
        ranked.push(RankedOption {
            id: system.system_id.clone(),
            name: system.system_name.clone(),
            roi_percent: result.financials.roi_percent,
            net_profit_annual: result.financials.net_profit_annual,
            payback_period_years: result.financials.payback_period_years,
            total_yield_annual_kg: result.total_yield_annual_kg,
            risk_score: result.risk_score,
        });
    }

    ranked.sort_by(by_roi_desc);
    Ok(ranked)
}
