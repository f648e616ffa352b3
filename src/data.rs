//! Reference data loading and lookup for vfplanner.
//!
//! The crop table and the infrastructure cost table live in the `data/`
//! directory. Both are read and validated up front so that a bad record
//! fails the load instead of leaking NaNs into the economics.

use csv::ReaderBuilder;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{RecordKind, Result, SimError};
use crate::models::{CropCsvRow, CropRecord, InfraCostsFile, InfraSystemRecord};

/// File name of the JSON crop table.
pub const CROPS_JSON: &str = "crops.json";
/// File name of the CSV crop table, used when no JSON table exists.
pub const CROPS_CSV: &str = "crops.csv";
/// File name of the infrastructure cost table.
pub const INFRA_JSON: &str = "infra_costs.json";
/// Longest growth cycle accepted in a crop table (five years).
pub const MAX_GROWTH_CYCLE_DAYS: u32 = 365 * 5;
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "VFPLANNER_DATA_DIR";

/// The two reference tables every simulation runs against.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub crops: Vec<CropRecord>,
    pub systems: Vec<InfraSystemRecord>,
}

impl ReferenceData {
    /// Reference tables compiled into the binary.
    ///
    /// These are the same files shipped in `data/`, so they always parse.
    pub fn embedded() -> Result<Self> {
        let crops = parse_crops_json(include_str!("../data/crops.json"), CROPS_JSON)?;
        let systems = parse_systems_json(include_str!("../data/infra_costs.json"), INFRA_JSON)?;
        Ok(ReferenceData { crops, systems })
    }

    pub fn crop(&self, id: &str) -> Result<&CropRecord> {
        get_crop_by_id(id, &self.crops)
    }

    pub fn system(&self, id: &str) -> Result<&InfraSystemRecord> {
        get_system_by_id(id, &self.systems)
    }
}

/// Returns the directory reference data is read from.
///
/// `VFPLANNER_DATA_DIR` wins; otherwise `data` relative to the working directory.
pub fn default_data_dir() -> PathBuf {
    env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Loads and validates both reference tables from `data_dir`.
///
/// The crop table is read from `crops.json`, or from `crops.csv` when only
/// the CSV variant is present.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use vfplanner::data::load_data;
///
/// let data = load_data(Path::new("data")).unwrap();
/// println!("Loaded {} crops and {} systems", data.crops.len(), data.systems.len());
/// ```
pub fn load_data(data_dir: &Path) -> Result<ReferenceData> {
    let json_path = data_dir.join(CROPS_JSON);
    let crops = if json_path.exists() {
        load_crops(&json_path)?
    } else {
        load_crops(&data_dir.join(CROPS_CSV))?
    };
    let systems = load_systems(&data_dir.join(INFRA_JSON))?;

    debug!(
        crops = crops.len(),
        systems = systems.len(),
        dir = %data_dir.display(),
        "loaded reference data"
    );
    Ok(ReferenceData { crops, systems })
}

/// Loads a crop table, choosing the parser from the file extension.
pub fn load_crops(path: &Path) -> Result<Vec<CropRecord>> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| SimError::data_load(&name, e))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => parse_crops_csv(&text, &name),
        _ => parse_crops_json(&text, &name),
    }
}

/// Loads the infrastructure systems table.
pub fn load_systems(path: &Path) -> Result<Vec<InfraSystemRecord>> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| SimError::data_load(&name, e))?;
    parse_systems_json(&text, &name)
}

/// Parses a JSON array of crop records.
pub fn parse_crops_json(text: &str, source_name: &str) -> Result<Vec<CropRecord>> {
    let crops: Vec<CropRecord> =
        serde_json::from_str(text).map_err(|e| SimError::data_load(source_name, e))?;
    validate_crops(&crops, source_name)?;
    Ok(crops)
}

/// Parses a CSV crop table.
///
/// # CSV Format
///
/// Expected columns: `id, name, type, growth_cycle_days, yield_per_sqm_per_cycle,
/// optimal_temp_min, optimal_temp_max, market_price_per_kg,
/// variable_cost_per_sqm_cycle, light_hours_per_day`
pub fn parse_crops_csv(text: &str, source_name: &str) -> Result<Vec<CropRecord>> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut crops = Vec::new();
    for result in rdr.deserialize() {
        let row: CropCsvRow = result.map_err(|e| SimError::data_load(source_name, e))?;
        crops.push(CropRecord::from(row));
    }
    validate_crops(&crops, source_name)?;
    Ok(crops)
}

/// Parses `infra_costs.json`: the record id comes from the map key.
pub fn parse_systems_json(text: &str, source_name: &str) -> Result<Vec<InfraSystemRecord>> {
    let file: InfraCostsFile =
        serde_json::from_str(text).map_err(|e| SimError::data_load(source_name, e))?;

    let systems: Vec<InfraSystemRecord> = file
        .systems
        .into_iter()
        .map(|(id, entry)| InfraSystemRecord {
            system_id: id,
            system_name: entry.name,
            capex_per_sqm: entry.capex_per_sqm,
            maintenance_annual_percent: entry.maintenance_annual_percent,
        })
        .collect();
    validate_systems(&systems, source_name)?;
    Ok(systems)
}

fn validate_crops(crops: &[CropRecord], source_name: &str) -> Result<()> {
    if crops.is_empty() {
        return Err(SimError::data_load(source_name, "crop table is empty"));
    }

    let mut seen = HashSet::new();
    for crop in crops {
        let fail = |msg: &str| SimError::data_load(source_name, format!("crop '{}': {}", crop.id, msg));

        if crop.id.trim().is_empty() {
            return Err(SimError::data_load(source_name, "crop with empty id"));
        }
        if !seen.insert(crop.id.as_str()) {
            return Err(fail("duplicate id"));
        }
        if crop.growth_cycle_days == 0 {
            return Err(fail("growth_cycle_days must be greater than 0"));
        }
        if crop.growth_cycle_days > MAX_GROWTH_CYCLE_DAYS {
            return Err(fail(&format!(
                "growth_cycle_days cannot exceed {}",
                MAX_GROWTH_CYCLE_DAYS
            )));
        }
        if !(crop.yield_per_sqm_per_cycle.is_finite() && crop.yield_per_sqm_per_cycle >= 0.0) {
            return Err(fail("yield_per_sqm_per_cycle must be a non-negative number"));
        }
        if !(crop.market_price_per_kg.is_finite() && crop.market_price_per_kg > 0.0) {
            return Err(fail("market_price_per_kg must be greater than 0"));
        }
        if !(crop.variable_cost_per_sqm_cycle.is_finite() && crop.variable_cost_per_sqm_cycle >= 0.0) {
            return Err(fail("variable_cost_per_sqm_cycle must be a non-negative number"));
        }
        let (min, max) = crop.optimal_temp_c;
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(fail("optimal_temp_c must be an ordered [min, max] pair"));
        }
        if crop.light_hours_per_day > 24 {
            return Err(fail("light_hours_per_day cannot exceed 24"));
        }
    }
    Ok(())
}

fn validate_systems(systems: &[InfraSystemRecord], source_name: &str) -> Result<()> {
    if systems.is_empty() {
        return Err(SimError::data_load(source_name, "systems table is empty"));
    }

    for system in systems {
        let fail =
            |msg: &str| SimError::data_load(source_name, format!("system '{}': {}", system.system_id, msg));

        if !(system.capex_per_sqm.is_finite() && system.capex_per_sqm >= 0.0) {
            return Err(fail("capex_per_sqm must be a non-negative number"));
        }
        if !(0.0..=1.0).contains(&system.maintenance_annual_percent) {
            return Err(fail("maintenance_annual_percent must be a fraction between 0 and 1"));
        }
    }
    Ok(())
}

/// Finds a crop by id.
///
/// # Example
///
/// ```
/// use vfplanner::data::{get_crop_by_id, ReferenceData};
///
/// let data = ReferenceData::embedded().unwrap();
/// assert!(get_crop_by_id("lettuce_iceberg", &data.crops).is_ok());
/// assert!(get_crop_by_id("durian", &data.crops).is_err());
/// ```
pub fn get_crop_by_id<'a>(crop_id: &str, crops: &'a [CropRecord]) -> Result<&'a CropRecord> {
    crops
        .iter()
        .find(|c| c.id == crop_id)
        .ok_or_else(|| SimError::not_found(RecordKind::Crop, crop_id))
}

/// Finds an infrastructure system by id.
pub fn get_system_by_id<'a>(
    system_id: &str,
    systems: &'a [InfraSystemRecord],
) -> Result<&'a InfraSystemRecord> {
    systems
        .iter()
        .find(|s| s.system_id == system_id)
        .ok_or_else(|| SimError::not_found(RecordKind::System, system_id))
}
