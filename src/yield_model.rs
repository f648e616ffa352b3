//! Annual yield projection.

use serde::Serialize;

use crate::models::CropRecord;

/// Days added to every growth cycle for harvest, cleaning and replanting.
pub const CLEANUP_BUFFER_DAYS: u32 = 3;

/// Days per modeled year.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Output of the yield model, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YieldProjection {
    /// Growth cycle plus cleanup buffer
    pub cycle_days: u32,
    pub cycles_per_year: f64,
    pub yield_per_cycle_kg: f64,
    pub total_annual_yield_kg: f64,
}

/// Projects annual yield for `area_sqm` of `crop`.
///
/// Cycles are fractional: a 38-day cycle gives `365 / 38` cycles a year.
///
/// # Example
///
/// ```
/// use vfplanner::data::ReferenceData;
/// use vfplanner::yield_model::project_yield;
///
/// let data = ReferenceData::embedded().unwrap();
/// let lettuce = data.crop("lettuce_iceberg").unwrap();
///
/// let projection = project_yield(100.0, lettuce, 1.0);
/// assert_eq!(projection.cycle_days, lettuce.growth_cycle_days + 3);
/// assert!(projection.total_annual_yield_kg > 0.0);
/// ```
pub fn project_yield(area_sqm: f64, crop: &CropRecord, yield_modifier: f64) -> YieldProjection {
    let cycle_days = crop.growth_cycle_days.saturating_add(CLEANUP_BUFFER_DAYS);
    let cycles_per_year = DAYS_PER_YEAR / f64::from(cycle_days);
    let yield_per_cycle_kg = area_sqm * crop.yield_per_sqm_per_cycle;
    let total_annual_yield_kg = yield_per_cycle_kg * cycles_per_year * yield_modifier;

    YieldProjection {
        cycle_days,
        cycles_per_year,
        yield_per_cycle_kg,
        total_annual_yield_kg,
    }
}
