//! Simulation orchestrator.
//!
//! Composes lookup, the yield model, the economics model and the risk rules
//! into one [`SimulationResult`] per request.

use std::path::Path;
use tracing::{debug, info};

use crate::data::{default_data_dir, load_data, ReferenceData};
use crate::economics::{calculate_economics, round_to};
use crate::error::Result;
use crate::models::{FarmConfig, SimulationResult};
use crate::risk::assess_risk;
use crate::yield_model::project_yield;

/// Runs a simulation against the reference data in [`default_data_dir`].
///
/// Reference data is read fresh on every call.
///
/// # Errors
///
/// * [`SimError::Validation`](crate::error::SimError::Validation) for a malformed config
/// * [`SimError::DataLoad`](crate::error::SimError::DataLoad) when the tables cannot be read
/// * [`SimError::NotFound`](crate::error::SimError::NotFound) for an unknown crop or system
pub fn run_simulation(config: &FarmConfig) -> Result<SimulationResult> {
    run_simulation_from(&default_data_dir(), config)
}

/// Runs a simulation against the reference data in `data_dir`.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use vfplanner::engine::run_simulation_from;
/// use vfplanner::models::FarmConfig;
///
/// let config = FarmConfig::new(500.0, "lettuce_iceberg", "hydroponic_nft")
///     .unwrap()
///     .with_location("London");
/// let result = run_simulation_from(Path::new("data"), &config).unwrap();
/// println!("ROI: {}%", result.financials.roi_percent);
/// ```
pub fn run_simulation_from(data_dir: &Path, config: &FarmConfig) -> Result<SimulationResult> {
    config.validate()?;
    let data = load_data(data_dir)?;
    simulate(config, &data)
}

/// Runs a simulation against already-loaded reference data.
///
/// This is a pure function of its arguments.
pub fn simulate(config: &FarmConfig, data: &ReferenceData) -> Result<SimulationResult> {
    config.validate()?;

    let crop = data.crop(&config.selected_crop_id)?;
    let infra = data.system(&config.selected_system_id)?;

    let (effective_config, effective_infra) = match &config.profile {
        Some(profile) => profile.apply(config, infra),
        None => (config.clone(), infra.clone()),
    };

    let projection = project_yield(
        effective_config.total_area_sqm,
        crop,
        effective_config.custom_yield_modifier,
    );
    debug!(
        cycle_days = projection.cycle_days,
        cycles_per_year = projection.cycles_per_year,
        yield_kg = projection.total_annual_yield_kg,
        "projected yield"
    );

    let financials = calculate_economics(
        &effective_config,
        crop,
        &effective_infra,
        projection.total_annual_yield_kg,
        projection.cycles_per_year,
    )
    .rounded();

    let risk = assess_risk(&financials, &config.location_city);

    let carbon_saved_kg = config
        .profile
        .map(|p| round_to(p.carbon_saved_kg(projection.total_annual_yield_kg), 1));

    info!(
        project = %config.project_name,
        crop = %crop.id,
        system = %infra.system_id,
        roi_percent = financials.roi_percent,
        risk_score = risk.score,
        "simulation complete"
    );

    Ok(SimulationResult {
        config: config.clone(),
        crop: crop.clone(),
        infra: effective_infra,
        cycles_per_year: round_to(projection.cycles_per_year, 1),
        total_yield_annual_kg: round_to(projection.total_annual_yield_kg, 1),
        financials,
        risk_score: risk.score,
        recommendations: risk.recommendations,
        carbon_saved_kg,
    })
}
