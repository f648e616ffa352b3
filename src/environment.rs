//! Weather and soil lookups.
//!
//! Lookups are best effort. Any failure resolves to neutral factors so the
//! deterministic economics never depend on an external service being up.

use serde::Serialize;
use tracing::warn;

use crate::error::{Result, SimError};

/// Daily rainfall (mm) above which the weather factor is reduced.
pub const HEAVY_RAIN_MM: f64 = 5.0;
/// Soil moisture (%) above which the soil factor is boosted.
pub const MOIST_SOIL_PERCENT: f64 = 25.0;

/// Raw conditions reported for a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentReading {
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub soil_moisture_percent: f64,
}

/// Multipliers derived from a reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentFactors {
    pub weather_adj: f64,
    pub soil_adj: f64,
}

impl EnvironmentFactors {
    pub fn neutral() -> Self {
        EnvironmentFactors {
            weather_adj: 1.0,
            soil_adj: 1.0,
        }
    }

    pub fn from_reading(reading: &EnvironmentReading) -> Self {
        EnvironmentFactors {
            weather_adj: if reading.rainfall_mm > HEAVY_RAIN_MM { 0.9 } else { 1.0 },
            soil_adj: if reading.soil_moisture_percent > MOIST_SOIL_PERCENT {
                1.2
            } else {
                1.0
            },
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == EnvironmentFactors::neutral()
    }
}

/// A source of environmental readings.
pub trait EnvironmentProvider {
    fn lookup(&self, location: &str) -> Result<EnvironmentReading>;
}

/// Looks up `location`, falling back to neutral factors on any failure.
///
/// # Example
///
/// ```
/// use vfplanner::environment::{resolve_factors, EnvironmentFactors, StaticClimateTable};
///
/// let table = StaticClimateTable::default();
/// let factors = resolve_factors(&table, "Atlantis");
/// assert_eq!(factors, EnvironmentFactors::neutral());
/// ```
pub fn resolve_factors<P: EnvironmentProvider + ?Sized>(provider: &P, location: &str) -> EnvironmentFactors {
    match provider.lookup(location) {
        Ok(reading) => EnvironmentFactors::from_reading(&reading),
        Err(e) => {
            warn!(location, error = %e, "environment lookup failed, using neutral factors");
            EnvironmentFactors::neutral()
        }
    }
}

/// Bundled table of typical conditions for a few cities.
#[derive(Debug, Clone)]
pub struct StaticClimateTable {
    entries: Vec<(String, EnvironmentReading)>,
}

impl StaticClimateTable {
    pub fn new(entries: Vec<(String, EnvironmentReading)>) -> Self {
        StaticClimateTable { entries }
    }
}

impl Default for StaticClimateTable {
    fn default() -> Self {
        let reading = |temperature_c, rainfall_mm, soil_moisture_percent| EnvironmentReading {
            temperature_c,
            rainfall_mm,
            soil_moisture_percent,
        };
        StaticClimateTable::new(vec![
            ("kolkata".to_string(), reading(27.0, 6.5, 32.0)),
            ("mumbai".to_string(), reading(28.0, 7.0, 30.0)),
            ("london".to_string(), reading(11.0, 1.7, 28.0)),
            ("new york".to_string(), reading(13.0, 3.2, 24.0)),
            ("dubai".to_string(), reading(34.0, 0.1, 8.0)),
            ("phoenix".to_string(), reading(31.0, 0.5, 10.0)),
            ("singapore".to_string(), reading(28.0, 6.4, 35.0)),
        ])
    }
}

impl EnvironmentProvider for StaticClimateTable {
    fn lookup(&self, location: &str) -> Result<EnvironmentReading> {
        let key = location.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(city, _)| *city == key)
            .map(|(_, reading)| *reading)
            .ok_or_else(|| SimError::ExternalService(format!("no climate data for '{}'", location)))
    }
}
