//! # vfplanner
//!
//! A command-line tool and library for estimating the yield, cost and return
//! on investment of a proposed vertical farm.
//!
//! Given a crop, a growing system, a location and a few economic assumptions,
//! the engine projects:
//!
//! - Growth cycles per year and annual yield
//! - Capital expenditure and an annual operating cost breakdown
//! - Revenue, net profit, gross margin and ROI
//! - Payback period and break-even volume
//! - A risk score with ordered recommendations
//!
//! ## Modules
//!
//! - [`models`] - Reference records, farm configuration and result types
//! - [`data`] - Reference data loading, validation and lookup
//! - [`yield_model`] - Annual yield projection
//! - [`economics`] - CapEx, OpEx, profitability and cash projections
//! - [`risk`] - Risk score and recommendation rules
//! - [`profiles`] - Typed site profiles that adjust the reference data
//! - [`engine`] - The simulation entry point
//! - [`ranking`] - Compare crops or systems under one configuration
//! - [`environment`] - Best-effort weather and soil factors
//! - [`advisor`] - Narrative advice with a guaranteed fallback
//! - [`report`] - Paginated blueprint reports
//! - [`display`] - Output formatting and display utilities
//! - [`error`] - Error taxonomy
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use vfplanner::{
//!     display::display_results,
//!     engine::run_simulation_from,
//!     models::FarmConfig,
//! };
//!
//! let config = FarmConfig::new(500.0, "lettuce_iceberg", "hydroponic_nft")
//!     .unwrap()
//!     .with_project_name("Test Farm")
//!     .with_location("London")
//!     .with_electricity_cost(0.20)
//!     .with_labor_cost(15.0);
//!
//! let result = run_simulation_from(Path::new("data"), &config).unwrap();
//! display_results(&result);
//! ```
//!
//! The formulas are simple linear heuristics, not a validated crop-growth
//! model.

pub mod advisor;
pub mod data;
pub mod display;
pub mod economics;
pub mod engine;
pub mod environment;
pub mod error;
pub mod models;
pub mod profiles;
pub mod ranking;
pub mod report;
pub mod risk;
pub mod wasm;
pub mod yield_model;

pub use engine::{run_simulation, run_simulation_from, simulate};
pub use error::{Result, SimError};
