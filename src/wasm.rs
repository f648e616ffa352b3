//! WebAssembly bindings for vfplanner.
//!
//! This module provides JavaScript-accessible functions over the reference
//! data embedded in the binary. Inputs and outputs are JSON strings.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::data::ReferenceData;
use crate::economics::{check_projection_years, npv_simple, project_cash_flow, YearProjection};
use crate::engine::simulate;
use crate::models::{FarmConfig, SimulationResult};
use crate::ranking::{rank_crops, RankedOption};

fn default_years() -> u32 {
    5
}

fn default_growth() -> f64 {
    0.05
}

/// JavaScript-friendly input for a simulation.
#[derive(Debug, Clone, Deserialize)]
pub struct JsSimulateInput {
    pub config: FarmConfig,
    /// Years of cash projection to include
    #[serde(default = "default_years")]
    pub years: u32,
    /// Annual profit growth for the projection
    #[serde(default = "default_growth")]
    pub growth: f64,
    /// Also rank every crop under the same system
    #[serde(default)]
    pub rank_crops: bool,
}

/// JavaScript-friendly simulation output.
#[derive(Debug, Clone, Serialize, Default)]
pub struct JsSimulateOutput {
    pub success: bool,
    pub error: Option<String>,
    pub result: Option<SimulationResult>,
    pub cash_flow: Vec<YearProjection>,
    pub npv: Option<f64>,
    pub ranking: Vec<RankedOption>,
}

impl JsSimulateOutput {
    fn failure(message: String) -> Self {
        JsSimulateOutput {
            success: false,
            error: Some(message),
            ..Default::default()
        }
    }
}

/// Runs a simulation from parsed input against the embedded tables.
pub fn simulate_input(input: &JsSimulateInput) -> JsSimulateOutput {
    if let Err(e) = check_projection_years(input.years) {
        return JsSimulateOutput::failure(e.to_string());
    }

    let data = match ReferenceData::embedded() {
        Ok(d) => d,
        Err(e) => return JsSimulateOutput::failure(e.to_string()),
    };

    let result = match simulate(&input.config, &data) {
        Ok(r) => r,
        Err(e) => return JsSimulateOutput::failure(e.to_string()),
    };

    let ranking = if input.rank_crops {
        match rank_crops(&input.config, &data) {
            Ok(r) => r,
            Err(e) => return JsSimulateOutput::failure(e.to_string()),
        }
    } else {
        Vec::new()
    };

    JsSimulateOutput {
        success: true,
        error: None,
        cash_flow: project_cash_flow(&result.financials, input.years, input.growth),
        npv: Some(npv_simple(&result.financials, input.years)),
        ranking,
        result: Some(result),
    }
}

/// Runs a simulation from a JSON string. Never panics; failures are
/// reported through `success` and `error`.
pub fn simulate_json(input_json: &str) -> JsSimulateOutput {
    match serde_json::from_str::<JsSimulateInput>(input_json) {
        Ok(input) => simulate_input(&input),
        Err(e) => JsSimulateOutput::failure(format!("Invalid input: {}", e)),
    }
}

/// Serializes `value`, falling back to a failure object so the caller
/// always receives `success` and `error`.
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        serde_json::json!({
            "success": false,
            "error": format!("failed to serialize output: {}", e),
        })
        .to_string()
    })
}

/// Run the simulation with the given configuration.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn simulate_farm(input_json: &str) -> String {
    let output = simulate_json(input_json);
    if let Some(err) = &output.error {
        web_sys::console::warn_1(&JsValue::from_str(err));
    }
    to_json(&output)
}

/// Get the version of the planner.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// List the crops and systems available for selection as JSON.
#[wasm_bindgen]
pub fn list_reference_data() -> String {
    #[derive(Serialize)]
    struct Entry {
        id: String,
        name: String,
    }

    #[derive(Serialize)]
    struct Catalogue {
        crops: Vec<Entry>,
        systems: Vec<Entry>,
    }

    let catalogue = match ReferenceData::embedded() {
        Ok(data) => Catalogue {
            crops: data
                .crops
                .into_iter()
                .map(|c| Entry { id: c.id, name: c.name })
                .collect(),
            systems: data
                .systems
                .into_iter()
                .map(|s| Entry {
                    id: s.system_id,
                    name: s.system_name,
                })
                .collect(),
        },
        Err(_) => Catalogue {
            crops: vec![],
            systems: vec![],
        },
    };

    to_json(&catalogue)
}
