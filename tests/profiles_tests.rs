//! Tests for site profiles.

use vfplanner::error::SimError;
use vfplanner::models::{FarmConfig, InfraSystemRecord};
use vfplanner::profiles::{
    AreaTier, BudgetRule, BudgetTier, CropPhase, EnergySource, SiteProfile, SpaceType,
    MEDIUM_SITE_MAX_SQM, SMALL_SITE_MAX_SQM,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0),
        "expected {}, got {}",
        expected,
        actual
    );
}

fn nft() -> InfraSystemRecord {
    InfraSystemRecord {
        system_id: "hydroponic_nft".to_string(),
        system_name: "Hydroponic NFT Racks".to_string(),
        capex_per_sqm: 800.0,
        maintenance_annual_percent: 0.05,
    }
}

#[test]
fn test_parse_keys() {
    assert_eq!("greenhouse".parse::<SpaceType>().unwrap(), SpaceType::Greenhouse);
    assert_eq!(" Warehouse ".parse::<SpaceType>().unwrap(), SpaceType::Warehouse);
    assert_eq!("mid".parse::<BudgetTier>().unwrap(), BudgetTier::Medium);
    assert_eq!("HIGH".parse::<BudgetTier>().unwrap(), BudgetTier::High);
    assert_eq!("hybrid".parse::<EnergySource>().unwrap(), EnergySource::Hybrid);
    assert_eq!("leafy-greens".parse::<CropPhase>().unwrap(), CropPhase::LeafyGreens);
    assert_eq!("phase2_strawberry".parse::<CropPhase>().unwrap(), CropPhase::Fruiting);
}

#[test]
fn test_unknown_key_is_validation_error() {
    let err = "basement".parse::<SpaceType>().unwrap_err();
    assert_eq!(
        err,
        SimError::Validation("invalid space_type key: basement".to_string())
    );
    assert!(matches!("nuclear".parse::<EnergySource>(), Err(SimError::Validation(_))));
    assert!("".parse::<BudgetTier>().is_err());
}

#[test]
fn test_default_profile_is_neutral() {
    let profile = SiteProfile::default();
    assert_eq!(profile.yield_multiplier(), 1.0);
    assert_eq!(profile.electricity_multiplier(), 1.0);
    assert_eq!(profile.capex_multiplier(), 1.0);
}

#[test]
fn test_apply_folds_multipliers_into_copies() {
    let config = FarmConfig::new(200.0, "lettuce_iceberg", "hydroponic_nft")
        .unwrap()
        .with_electricity_cost(0.20);
    let profile = SiteProfile {
        space_type: SpaceType::Greenhouse,
        budget: BudgetTier::High,
        energy_source: EnergySource::Solar,
        crop_phase: CropPhase::LeafyGreens,
    };
    let config = config.with_profile(profile);

    let (adjusted, system) = profile.apply(&config, &nft());

    assert_close(adjusted.custom_yield_modifier, 1.1 * 1.05 * 0.95);
    assert_close(adjusted.electricity_cost_per_kwh, 0.20 * 0.8 * 0.6);
    assert_close(system.capex_per_sqm, 800.0 * 0.9 * 1.25);
    assert!(adjusted.profile.is_none());
    assert_eq!(adjusted.total_area_sqm, 200.0);

    // Inputs untouched
    assert_eq!(config.electricity_cost_per_kwh, 0.20);
    assert_eq!(nft().capex_per_sqm, 800.0);
}

#[test]
fn test_hybrid_is_average_of_solar_and_grid() {
    let hybrid = EnergySource::Hybrid.rule();
    assert_close(hybrid.price_mult, 0.8);
    assert_close(hybrid.yield_mult, 0.975);
    assert_close(hybrid.carbon_intensity, (0.05 + 0.82) / 2.0);
}

#[test]
fn test_budget_rules() {
    assert_eq!(BudgetTier::Low.rule().capex_mult, 0.8);
    assert_eq!(BudgetTier::High.rule().yield_mult, 1.05);
    assert_eq!(BudgetTier::Medium.rule(), BudgetRule { capex_mult: 1.0, yield_mult: 1.0 });
}

#[test]
fn test_fruiting_phase_lowers_yield() {
    let profile = SiteProfile {
        crop_phase: CropPhase::Fruiting,
        ..Default::default()
    };
    assert_close(profile.yield_multiplier(), 0.85);
}

#[test]
fn test_area_tier_boundaries() {
    assert_eq!(AreaTier::from_area(92.9), AreaTier::Small);
    assert_eq!(AreaTier::from_area(SMALL_SITE_MAX_SQM), AreaTier::Medium);
    assert_eq!(AreaTier::from_area(100.0), AreaTier::Medium);
    assert_eq!(AreaTier::from_area(464.5), AreaTier::Medium);
    assert_eq!(AreaTier::from_area(MEDIUM_SITE_MAX_SQM), AreaTier::Large);
    assert_eq!(AreaTier::from_area(500.0), AreaTier::Large);
    assert_eq!(AreaTier::Medium.rack_tiers(), 5);
    assert_eq!(AreaTier::Small.rack_tiers(), 3);
    assert_eq!(AreaTier::Large.rack_tiers(), 8);
}

#[test]
fn test_carbon_saved_favors_solar() {
    let solar = SiteProfile {
        energy_source: EnergySource::Solar,
        ..Default::default()
    };
    let grid = SiteProfile::default();

    assert_close(grid.carbon_saved_kg(1000.0), 1000.0 * 0.5 * (1.0 - 0.82 / 5.6));
    assert!(solar.carbon_saved_kg(1000.0) > grid.carbon_saved_kg(1000.0));
    assert_eq!(grid.carbon_saved_kg(0.0), 0.0);
}

#[test]
fn test_profile_json_keys() {
    let profile: SiteProfile =
        serde_json::from_str(r#"{"space_type": "greenhouse", "crop_phase": "fruiting"}"#).unwrap();
    assert_eq!(profile.space_type, SpaceType::Greenhouse);
    assert_eq!(profile.crop_phase, CropPhase::Fruiting);
    assert_eq!(profile.energy_source, EnergySource::Grid);
}
