//! Tests for the simulation orchestrator.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use vfplanner::data::ReferenceData;
use vfplanner::economics::NO_PAYBACK_YEARS;
use vfplanner::engine::{run_simulation_from, simulate};
use vfplanner::error::{RecordKind, SimError};
use vfplanner::models::FarmConfig;
use vfplanner::profiles::{EnergySource, SiteProfile};
use vfplanner::risk::{COOLING_WARNING, UNPROFITABLE_WARNING};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn scenario_a() -> FarmConfig {
    FarmConfig::new(500.0, "lettuce_iceberg", "hydroponic_nft")
        .unwrap()
        .with_project_name("Test Farm")
        .with_location("London")
        .with_electricity_cost(0.20)
        .with_labor_cost(15.0)
}

fn scenario_b() -> FarmConfig {
    FarmConfig::new(100.0, "lettuce_iceberg", "hydroponic_nft")
        .unwrap()
        .with_project_name("Stress Test")
        .with_location("Dubai")
        .with_electricity_cost(1.0)
        .with_labor_cost(50.0)
}

#[test]
fn test_scenario_a_baseline() {
    let result = run_simulation_from(&data_dir(), &scenario_a()).expect("Simulation should succeed");

    assert!(result.financials.roi_percent.is_finite());
    assert!(result.risk_score >= 20);
    assert_eq!(result.cycles_per_year, 9.6);
    assert_eq!(result.total_yield_annual_kg, 19_210.5);
    assert_eq!(result.financials.capex_total, 400_000.0);
    assert_eq!(result.financials.roi_percent, -34.29);
    assert_eq!(result.crop.id, "lettuce_iceberg");
    assert_eq!(result.infra.system_id, "hydroponic_nft");
    assert_eq!(result.config, scenario_a());
    assert!(!result.recommendations.contains(&COOLING_WARNING.to_string()));
}

#[test]
fn test_scenario_b_stress() {
    let result = run_simulation_from(&data_dir(), &scenario_b()).expect("Simulation should succeed");

    assert!(result.financials.net_profit_annual < 0.0);
    assert!(result.risk_score >= 70);
    assert_eq!(result.financials.payback_period_years, NO_PAYBACK_YEARS);
    assert!(result.recommendations.contains(&UNPROFITABLE_WARNING.to_string()));
    assert!(result.recommendations.contains(&COOLING_WARNING.to_string()));
}

#[test]
fn test_profitable_configuration() {
    let data = ReferenceData::embedded().unwrap();
    let config = FarmConfig::new(100.0, "microgreens_mix", "hydroponic_dwc")
        .unwrap()
        .with_electricity_cost(0.10)
        .with_labor_cost(5.0);
    let result = simulate(&config, &data).unwrap();

    assert!(result.financials.net_profit_annual > 0.0);
    assert_eq!(result.risk_score, 20);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.financials.payback_period_years, 0.6);
}

#[test]
fn test_result_values_are_rounded() {
    let result = simulate(&scenario_a(), &ReferenceData::embedded().unwrap()).unwrap();
    let fin = &result.financials;

    for value in [fin.opex_annual, fin.revenue_annual, fin.net_profit_annual, fin.break_even_units] {
        assert_eq!((value * 100.0).round() / 100.0, value);
    }
    assert_eq!((result.cycles_per_year * 10.0).round() / 10.0, result.cycles_per_year);
}

#[test]
fn test_unknown_crop_is_not_found() {
    let mut config = scenario_a();
    config.selected_crop_id = "dragonfruit".to_string();

    let err = run_simulation_from(&data_dir(), &config).unwrap_err();
    assert_eq!(
        err,
        SimError::NotFound {
            kind: RecordKind::Crop,
            id: "dragonfruit".to_string()
        }
    );
}

#[test]
fn test_unknown_system_is_not_found() {
    let mut config = scenario_a();
    config.selected_system_id = "soil_bed".to_string();

    let err = simulate(&config, &ReferenceData::embedded().unwrap()).unwrap_err();
    assert!(matches!(err, SimError::NotFound { kind: RecordKind::System, .. }));
}

#[test]
fn test_invalid_config_rejected_before_loading() {
    let mut config = scenario_a();
    config.total_area_sqm = 0.0;

    // The data directory does not exist; validation must fail first.
    let err = run_simulation_from(Path::new("/nonexistent"), &config).unwrap_err();
    assert!(matches!(err, SimError::Validation(_)));
}

#[test]
fn test_missing_data_is_data_load_error() {
    let err = run_simulation_from(Path::new("/nonexistent"), &scenario_a()).unwrap_err();
    assert!(matches!(err, SimError::DataLoad { .. }));
}

#[test]
fn test_idempotent() {
    let first = run_simulation_from(&data_dir(), &scenario_b()).unwrap();
    let second = run_simulation_from(&data_dir(), &scenario_b()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_profile_is_folded_into_reference_data() {
    let data = ReferenceData::embedded().unwrap();
    let plain = simulate(&scenario_a(), &data).unwrap();

    let default_profile = simulate(&scenario_a().with_profile(SiteProfile::default()), &data).unwrap();
    assert_eq!(default_profile.financials, plain.financials);
    assert!(plain.carbon_saved_kg.is_none());
    assert!(default_profile.carbon_saved_kg.is_some());

    let solar = SiteProfile {
        energy_source: EnergySource::Solar,
        ..Default::default()
    };
    let solar_result = simulate(&scenario_a().with_profile(solar), &data).unwrap();
    assert!(
        solar_result.financials.opex_breakdown.energy_cost < plain.financials.opex_breakdown.energy_cost
    );
    // The originating config is reported unchanged
    assert_eq!(solar_result.config.electricity_cost_per_kwh, 0.20);
}

proptest! {
    #[test]
    fn prop_risk_score_bounded(
        area in 1.0f64..2_000.0,
        electricity in 0.0f64..2.0,
        labor in 0.0f64..60.0,
    ) {
        let data = ReferenceData::embedded().unwrap();
        let config = FarmConfig::new(area, "basil_genovese", "ebb_flow_rack")
            .unwrap()
            .with_location("Phoenix")
            .with_electricity_cost(electricity)
            .with_labor_cost(labor);
        let result = simulate(&config, &data).unwrap();
        prop_assert!(result.risk_score >= 20 && result.risk_score <= 100);
        prop_assert_eq!(result.recommendations.last().map(String::as_str), Some(COOLING_WARNING));
    }

    #[test]
    fn prop_electricity_monotonic_through_engine(
        area in 10.0f64..2_000.0,
        electricity in 0.0f64..1.0,
    ) {
        let data = ReferenceData::embedded().unwrap();
        let cheap = FarmConfig::new(area, "kale_curly", "aeroponic_tower")
            .unwrap()
            .with_electricity_cost(electricity);
        let dear = cheap.clone().with_electricity_cost(electricity + 0.5);

        let a = simulate(&cheap, &data).unwrap();
        let b = simulate(&dear, &data).unwrap();
        prop_assert!(b.financials.net_profit_annual < a.financials.net_profit_annual);
        prop_assert!(b.financials.roi_percent < a.financials.roi_percent);
    }
}
