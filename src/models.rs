//! Data models and structures for vfplanner.
//!
//! This module contains the reference records loaded from the data files,
//! the user-submitted [`FarmConfig`], and the derived result types produced
//! by the engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::profiles::SiteProfile;

/// A crop that can be grown in the farm.
///
/// Reference data: created when the crop table is loaded and never mutated.
///
/// # Example
///
/// ```
/// use vfplanner::models::CropRecord;
///
/// let lettuce = CropRecord {
///     id: "lettuce_iceberg".to_string(),
///     name: "Iceberg Lettuce".to_string(),
///     category: "Leafy Green".to_string(),
///     growth_cycle_days: 35,
///     yield_per_sqm_per_cycle: 4.0,
///     optimal_temp_c: (15.0, 20.0),
///     market_price_per_kg: 4.5,
///     variable_cost_per_sqm_cycle: 2.5,
///     light_hours_per_day: 16,
/// };
/// assert_eq!(lettuce.growth_cycle_days, 35);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    /// Unique key (e.g., "lettuce_iceberg")
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label (e.g., "Leafy Green", "Herb")
    #[serde(rename = "type")]
    pub category: String,
    /// Days from seeding to harvest
    pub growth_cycle_days: u32,
    /// Harvested mass per square meter per cycle, in kg
    pub yield_per_sqm_per_cycle: f64,
    /// Optimal air temperature range (min, max) in Celsius
    pub optimal_temp_c: (f64, f64),
    /// Wholesale price per kg
    pub market_price_per_kg: f64,
    /// Seeds, nutrients and media per square meter per cycle
    pub variable_cost_per_sqm_cycle: f64,
    /// Photoperiod required per day
    pub light_hours_per_day: u32,
}

/// A growing infrastructure system (racks, lighting, climate control).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfraSystemRecord {
    /// Unique key (the map key in the systems table)
    pub system_id: String,
    /// Display name
    pub system_name: String,
    /// Capital cost per square meter of growing area
    pub capex_per_sqm: f64,
    /// Annual maintenance as a fraction of CapEx (0.05 = 5 %)
    pub maintenance_annual_percent: f64,
}

fn default_project_name() -> String {
    "My Vertical Farm".to_string()
}

fn default_location() -> String {
    "New York".to_string()
}

fn default_electricity_cost() -> f64 {
    0.15
}

fn default_labor_cost() -> f64 {
    20.0
}

fn default_yield_modifier() -> f64 {
    1.0
}

/// A user-submitted simulation request.
///
/// Build one with [`FarmConfig::new`] and the `with_*` methods, or
/// deserialize it from JSON and call [`FarmConfig::validate`].
///
/// # Example
///
/// ```
/// use vfplanner::models::FarmConfig;
///
/// let config = FarmConfig::new(500.0, "lettuce_iceberg", "hydroponic_nft")
///     .unwrap()
///     .with_location("London")
///     .with_electricity_cost(0.20)
///     .with_labor_cost(15.0);
///
/// assert_eq!(config.custom_yield_modifier, 1.0);
/// assert!(config.validate().is_ok());
/// assert!(FarmConfig::new(0.0, "lettuce_iceberg", "hydroponic_nft").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmConfig {
    #[serde(default = "default_project_name")]
    pub project_name: String,
    /// Total growing area in square meters (> 0)
    pub total_area_sqm: f64,
    #[serde(default = "default_location")]
    pub location_city: String,
    pub selected_crop_id: String,
    pub selected_system_id: String,
    #[serde(default = "default_electricity_cost")]
    pub electricity_cost_per_kwh: f64,
    #[serde(default = "default_labor_cost")]
    pub labor_cost_per_hour: f64,
    /// Multiplier for grower skill or technology efficiency
    #[serde(default = "default_yield_modifier")]
    pub custom_yield_modifier: f64,
    /// Optional site profile that adjusts the reference data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<SiteProfile>,
}

impl FarmConfig {
    /// Creates a configuration with default economics.
    ///
    /// Fails with [`SimError::Validation`] if the area is not a positive,
    /// finite number.
    pub fn new(
        total_area_sqm: f64,
        crop_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> Result<Self> {
        let config = FarmConfig {
            project_name: default_project_name(),
            total_area_sqm,
            location_city: default_location(),
            selected_crop_id: crop_id.into(),
            selected_system_id: system_id.into(),
            electricity_cost_per_kwh: default_electricity_cost(),
            labor_cost_per_hour: default_labor_cost(),
            custom_yield_modifier: default_yield_modifier(),
            profile: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    pub fn with_location(mut self, city: impl Into<String>) -> Self {
        self.location_city = city.into();
        self
    }

    pub fn with_electricity_cost(mut self, cost_per_kwh: f64) -> Self {
        self.electricity_cost_per_kwh = cost_per_kwh;
        self
    }

    pub fn with_labor_cost(mut self, cost_per_hour: f64) -> Self {
        self.labor_cost_per_hour = cost_per_hour;
        self
    }

    pub fn with_yield_modifier(mut self, modifier: f64) -> Self {
        self.custom_yield_modifier = modifier;
        self
    }

    pub fn with_profile(mut self, profile: SiteProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Checks the constraints the engine relies on.
    ///
    /// The `with_*` setters do not validate, so the engine calls this again
    /// before computing anything.
    pub fn validate(&self) -> Result<()> {
        if !(self.total_area_sqm.is_finite() && self.total_area_sqm > 0.0) {
            return Err(SimError::Validation(format!(
                "total_area_sqm must be greater than 0, got {}",
                self.total_area_sqm
            )));
        }
        check_non_negative("electricity_cost_per_kwh", self.electricity_cost_per_kwh)?;
        check_non_negative("labor_cost_per_hour", self.labor_cost_per_hour)?;
        check_non_negative("custom_yield_modifier", self.custom_yield_modifier)?;
        if self.selected_crop_id.trim().is_empty() {
            return Err(SimError::Validation("selected_crop_id is empty".to_string()));
        }
        if self.selected_system_id.trim().is_empty() {
            return Err(SimError::Validation(
                "selected_system_id is empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::Validation(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )))
    }
}

/// Annual operating cost split by driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpexBreakdown {
    /// Seeds, nutrients and growing media
    pub variable_cost: f64,
    /// Lighting plus climate-control consumption
    pub energy_kwh: f64,
    pub energy_cost: f64,
    pub labor_hours: f64,
    pub labor_cost: f64,
    pub maintenance_cost: f64,
}

/// Annual financial projection for one configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialResult {
    pub capex_total: f64,
    pub opex_annual: f64,
    pub revenue_annual: f64,
    /// Gross margin as a percentage of revenue
    pub gross_margin: f64,
    pub net_profit_annual: f64,
    pub roi_percent: f64,
    /// Years to recover CapEx; [`crate::economics::NO_PAYBACK_YEARS`] when unprofitable
    pub payback_period_years: f64,
    /// Mass (kg) that must be sold per year to cover OpEx
    pub break_even_units: f64,
    pub opex_breakdown: OpexBreakdown,
}

/// The complete outcome of one simulation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub config: FarmConfig,
    pub crop: CropRecord,
    pub infra: InfraSystemRecord,
    pub cycles_per_year: f64,
    pub total_yield_annual_kg: f64,
    pub financials: FinancialResult,
    /// Heuristic risk score in 0..=100
    pub risk_score: u32,
    /// Advisory messages, in the order the rules fired
    pub recommendations: Vec<String>,
    /// Estimated CO2 avoided versus imported produce (only with a site profile)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_saved_kg: Option<f64>,
}

// ============================================================================
// Reference Data File Structures
// ============================================================================

/// CSV row structure for crop tables.
///
/// The JSON table deserializes straight into [`CropRecord`]; CSV cannot hold
/// a pair in one column, so the temperature range is split.
#[derive(Debug, Deserialize)]
pub struct CropCsvRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub growth_cycle_days: u32,
    pub yield_per_sqm_per_cycle: f64,
    pub optimal_temp_min: f64,
    pub optimal_temp_max: f64,
    pub market_price_per_kg: f64,
    pub variable_cost_per_sqm_cycle: f64,
    pub light_hours_per_day: u32,
}

impl From<CropCsvRow> for CropRecord {
    fn from(row: CropCsvRow) -> Self {
        CropRecord {
            id: row.id,
            name: row.name,
            category: row.category,
            growth_cycle_days: row.growth_cycle_days,
            yield_per_sqm_per_cycle: row.yield_per_sqm_per_cycle,
            optimal_temp_c: (row.optimal_temp_min, row.optimal_temp_max),
            market_price_per_kg: row.market_price_per_kg,
            variable_cost_per_sqm_cycle: row.variable_cost_per_sqm_cycle,
            light_hours_per_day: row.light_hours_per_day,
        }
    }
}

/// One entry of the `systems` map in `infra_costs.json`.
#[derive(Debug, Deserialize)]
pub struct InfraSystemEntry {
    pub name: String,
    pub capex_per_sqm: f64,
    pub maintenance_annual_percent: f64,
}

/// Top-level layout of `infra_costs.json`.
///
/// Uses a `BTreeMap` so systems come out in a stable order.
#[derive(Debug, Deserialize)]
pub struct InfraCostsFile {
    pub systems: std::collections::BTreeMap<String, InfraSystemEntry>,
}
