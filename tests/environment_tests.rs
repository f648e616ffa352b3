//! Tests for weather and soil lookups.

use vfplanner::environment::{
    resolve_factors, EnvironmentFactors, EnvironmentProvider, EnvironmentReading,
    StaticClimateTable,
};
use vfplanner::error::{Result, SimError};

struct Offline;

impl EnvironmentProvider for Offline {
    fn lookup(&self, _location: &str) -> Result<EnvironmentReading> {
        Err(SimError::ExternalService("connection refused".to_string()))
    }
}

fn reading(rainfall_mm: f64, soil_moisture_percent: f64) -> EnvironmentReading {
    EnvironmentReading {
        temperature_c: 20.0,
        rainfall_mm,
        soil_moisture_percent,
    }
}

#[test]
fn test_thresholds_are_exclusive() {
    let at_limit = EnvironmentFactors::from_reading(&reading(5.0, 25.0));
    assert!(at_limit.is_neutral());

    let wet = EnvironmentFactors::from_reading(&reading(5.1, 25.1));
    assert_eq!(wet.weather_adj, 0.9);
    assert_eq!(wet.soil_adj, 1.2);
}

#[test]
fn test_failed_lookup_is_neutral() {
    let factors = resolve_factors(&Offline, "Kolkata");
    assert_eq!(factors, EnvironmentFactors::neutral());
}

#[test]
fn test_static_table_known_cities() {
    let table = StaticClimateTable::default();

    let kolkata = resolve_factors(&table, "Kolkata");
    assert_eq!(kolkata.weather_adj, 0.9);
    assert_eq!(kolkata.soil_adj, 1.2);

    let london = resolve_factors(&table, " london ");
    assert_eq!(london.weather_adj, 1.0);
    assert_eq!(london.soil_adj, 1.2);

    assert!(resolve_factors(&table, "Dubai").is_neutral());
}

#[test]
fn test_static_table_unknown_city_errors() {
    let table = StaticClimateTable::default();
    assert!(matches!(
        table.lookup("Atlantis"),
        Err(SimError::ExternalService(_))
    ));
}

#[test]
fn test_custom_table() {
    let table = StaticClimateTable::new(vec![("reykjavik".to_string(), reading(8.0, 40.0))]);
    let factors = resolve_factors(&table, "Reykjavik");
    assert_eq!(factors.weather_adj, 0.9);
    assert!(resolve_factors(&table, "London").is_neutral());
}
