//! Economics model: CapEx, OpEx, revenue and profitability.
//!
//! Every figure is computed at full precision. Rounding happens once, via
//! [`FinancialResult::rounded`], when the engine assembles its result.

use serde::Serialize;

use crate::error::{Result, SimError};
use crate::models::{CropRecord, FarmConfig, FinancialResult, InfraSystemRecord, OpexBreakdown};
use crate::yield_model::DAYS_PER_YEAR;

/// LED draw per square meter per hour of light, in kWh.
pub const LIGHTING_KWH_PER_SQM_HOUR: f64 = 0.04;
/// HVAC and dehumidification load per square meter per day, in kWh.
pub const CLIMATE_KWH_PER_SQM_DAY: f64 = 0.5;
/// Labor heuristic: hours of work per square meter per year.
pub const LABOR_HOURS_PER_SQM_YEAR: f64 = 20.0;
/// Payback reported when the farm never recovers its CapEx.
pub const NO_PAYBACK_YEARS: f64 = 999.0;
/// Longest cash projection accepted from user input.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Computes the annual financial projection.
///
/// # Arguments
///
/// * `config` - The farm being evaluated (area and unit costs)
/// * `crop` - The resolved crop record
/// * `infra` - The resolved infrastructure system
/// * `total_yield_kg` - Annual yield from the yield model
/// * `cycles_per_year` - Growth cycles per year from the yield model
///
/// # Example
///
/// ```
/// use vfplanner::data::ReferenceData;
/// use vfplanner::economics::calculate_economics;
/// use vfplanner::models::FarmConfig;
/// use vfplanner::yield_model::project_yield;
///
/// let data = ReferenceData::embedded().unwrap();
/// let config = FarmConfig::new(200.0, "basil_genovese", "hydroponic_nft").unwrap();
/// let crop = data.crop(&config.selected_crop_id).unwrap();
/// let infra = data.system(&config.selected_system_id).unwrap();
///
/// let projection = project_yield(config.total_area_sqm, crop, 1.0);
/// let fin = calculate_economics(
///     &config,
///     crop,
///     infra,
///     projection.total_annual_yield_kg,
///     projection.cycles_per_year,
/// );
/// assert_eq!(fin.net_profit_annual, fin.revenue_annual - fin.opex_annual);
/// ```
pub fn calculate_economics(
    config: &FarmConfig,
    crop: &CropRecord,
    infra: &InfraSystemRecord,
    total_yield_kg: f64,
    cycles_per_year: f64,
) -> FinancialResult {
    let area = config.total_area_sqm;

    let capex_total = area * infra.capex_per_sqm;
    let revenue_annual = total_yield_kg * crop.market_price_per_kg;

    let variable_cost = area * crop.variable_cost_per_sqm_cycle * cycles_per_year;

    let lighting_kwh =
        f64::from(crop.light_hours_per_day) * LIGHTING_KWH_PER_SQM_HOUR * area * DAYS_PER_YEAR;
    let climate_kwh = CLIMATE_KWH_PER_SQM_DAY * area * DAYS_PER_YEAR;
    let energy_kwh = lighting_kwh + climate_kwh;
    let energy_cost = energy_kwh * config.electricity_cost_per_kwh;

    let labor_hours = LABOR_HOURS_PER_SQM_YEAR * area;
    let labor_cost = labor_hours * config.labor_cost_per_hour;

    let maintenance_cost = capex_total * infra.maintenance_annual_percent;

    let opex_annual = variable_cost + energy_cost + labor_cost + maintenance_cost;

    let net_profit_annual = revenue_annual - opex_annual;
    let gross_margin = if revenue_annual > 0.0 {
        (revenue_annual - opex_annual) / revenue_annual * 100.0
    } else {
        0.0
    };
    let roi_percent = if capex_total > 0.0 {
        net_profit_annual / capex_total * 100.0
    } else {
        0.0
    };
    let payback_period_years = if net_profit_annual > 0.0 {
        capex_total / net_profit_annual
    } else {
        NO_PAYBACK_YEARS
    };
    // Prices are validated at load time; this only guards hand-built records.
    let break_even_units = if crop.market_price_per_kg > 0.0 {
        opex_annual / crop.market_price_per_kg
    } else {
        f64::MAX
    };

    FinancialResult {
        capex_total,
        opex_annual,
        revenue_annual,
        gross_margin,
        net_profit_annual,
        roi_percent,
        payback_period_years,
        break_even_units,
        opex_breakdown: OpexBreakdown {
            variable_cost,
            energy_kwh,
            energy_cost,
            labor_hours,
            labor_cost,
            maintenance_cost,
        },
    }
}

/// Rounds to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() || value.abs() >= f64::MAX / 1e6 {
        return value;
    }
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

impl FinancialResult {
    /// Presentation rounding: money and percentages to 2 places, payback to 1.
    pub fn rounded(&self) -> FinancialResult {
        let b = &self.opex_breakdown;
        FinancialResult {
            capex_total: round_to(self.capex_total, 2),
            opex_annual: round_to(self.opex_annual, 2),
            revenue_annual: round_to(self.revenue_annual, 2),
            gross_margin: round_to(self.gross_margin, 2),
            net_profit_annual: round_to(self.net_profit_annual, 2),
            roi_percent: round_to(self.roi_percent, 2),
            payback_period_years: round_to(self.payback_period_years, 1),
            break_even_units: round_to(self.break_even_units, 2),
            opex_breakdown: OpexBreakdown {
                variable_cost: round_to(b.variable_cost, 2),
                energy_kwh: round_to(b.energy_kwh, 1),
                energy_cost: round_to(b.energy_cost, 2),
                labor_hours: round_to(b.labor_hours, 1),
                labor_cost: round_to(b.labor_cost, 2),
                maintenance_cost: round_to(b.maintenance_cost, 2),
            },
        }
    }

    /// True when the farm recovers its CapEx at some point.
    pub fn has_payback(&self) -> bool {
        self.net_profit_annual > 0.0
    }
}

/// One year of a multi-year cash projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearProjection {
    pub year: u32,
    pub net_profit: f64,
    /// Running total starting from -CapEx at year 0
    pub cumulative_cash: f64,
}

/// Rejects projection horizons above [`MAX_PROJECTION_YEARS`].
pub fn check_projection_years(years: u32) -> Result<()> {
    if years > MAX_PROJECTION_YEARS {
        return Err(SimError::Validation(format!(
            "years must be at most {}, got {}",
            MAX_PROJECTION_YEARS, years
        )));
    }
    Ok(())
}

/// Projects cumulative cash over `years`, growing profit by `annual_growth`
/// each year (0.05 = 5 %).
///
/// Year 1 uses the unmodified annual profit. Callers taking `years` from
/// user input check it with [`check_projection_years`] first.
///
/// # Example
///
/// ```
/// use vfplanner::economics::project_cash_flow;
/// use vfplanner::models::FinancialResult;
///
/// let fin = FinancialResult {
///     capex_total: 1000.0,
///     net_profit_annual: 400.0,
///     ..Default::default()
/// };
/// let years = project_cash_flow(&fin, 3, 0.0);
/// assert_eq!(years[2].cumulative_cash, 200.0);
/// ```
pub fn project_cash_flow(
    financials: &FinancialResult,
    years: u32,
    annual_growth: f64,
) -> Vec<YearProjection> {
    let mut cumulative = -financials.capex_total;
    let mut profit = financials.net_profit_annual;
    let mut out = Vec::with_capacity(years.min(MAX_PROJECTION_YEARS) as usize);

    for year in 1..=years {
        if year > 1 {
            profit *= 1.0 + annual_growth;
        }
        cumulative += profit;
        out.push(YearProjection {
            year,
            net_profit: profit,
            cumulative_cash: cumulative,
        });
    }
    out
}

/// Undiscounted net value over `years`: profit times years minus CapEx.
pub fn npv_simple(financials: &FinancialResult, years: u32) -> f64 {
    financials.net_profit_annual * f64::from(years) - financials.capex_total
}
