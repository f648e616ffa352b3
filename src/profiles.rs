//! Site profiles: typed rules tables that adjust the reference data.
//!
//! Each category is a closed enum with an exhaustive `match` returning its
//! multipliers, so an unknown key can only fail while parsing user input.
//! A [`SiteProfile`] does not have its own economics: [`SiteProfile::apply`]
//! produces an adjusted config and system record, and the engine runs its
//! single code path on those.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;
use crate::models::{FarmConfig, InfraSystemRecord};

/// Grid carbon intensity the savings estimate is normalized against (kg CO2 per kWh scale).
pub const CARBON_BASELINE: f64 = 5.6;
/// Fraction of yield mass credited as avoided transport emissions.
pub const CARBON_CREDIT_PER_KG: f64 = 0.5;

/// The kind of building housing the farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceType {
    Greenhouse,
    #[default]
    Warehouse,
}

/// Multipliers attached to a [`SpaceType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceRule {
    pub yield_mult: f64,
    pub energy_mult: f64,
    pub cost_mult: f64,
}

impl SpaceType {
    pub fn rule(self) -> SpaceRule {
        match self {
            // Daylight offsets part of the lighting bill
            SpaceType::Greenhouse => SpaceRule {
                yield_mult: 1.1,
                energy_mult: 0.8,
                cost_mult: 0.9,
            },
            SpaceType::Warehouse => SpaceRule {
                yield_mult: 1.0,
                energy_mult: 1.0,
                cost_mult: 1.0,
            },
        }
    }
}

/// How much the grower is prepared to spend on fit-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRule {
    pub capex_mult: f64,
    pub yield_mult: f64,
}

impl BudgetTier {
    pub fn rule(self) -> BudgetRule {
        match self {
            BudgetTier::Low => BudgetRule {
                capex_mult: 0.8,
                yield_mult: 0.95,
            },
            BudgetTier::Medium => BudgetRule {
                capex_mult: 1.0,
                yield_mult: 1.0,
            },
            BudgetTier::High => BudgetRule {
                capex_mult: 1.25,
                yield_mult: 1.05,
            },
        }
    }
}

/// Where the farm's electricity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    Solar,
    #[default]
    Grid,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRule {
    /// Multiplier on the configured electricity price
    pub price_mult: f64,
    pub yield_mult: f64,
    /// kg CO2 per kWh
    pub carbon_intensity: f64,
}

impl EnergySource {
    pub fn rule(self) -> EnergyRule {
        match self {
            EnergySource::Solar => EnergyRule {
                price_mult: 0.6,
                yield_mult: 0.95,
                carbon_intensity: 0.05,
            },
            EnergySource::Grid => EnergyRule {
                price_mult: 1.0,
                yield_mult: 1.0,
                carbon_intensity: 0.82,
            },
            EnergySource::Hybrid => {
                let solar = EnergySource::Solar.rule();
                let grid = EnergySource::Grid.rule();
                EnergyRule {
                    price_mult: (solar.price_mult + grid.price_mult) / 2.0,
                    yield_mult: (solar.yield_mult + grid.yield_mult) / 2.0,
                    carbon_intensity: (solar.carbon_intensity + grid.carbon_intensity) / 2.0,
                }
            }
        }
    }
}

/// Rollout phase of the crop plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropPhase {
    #[default]
    LeafyGreens,
    /// Strawberries and dwarf tomatoes
    Fruiting,
}

impl CropPhase {
    pub fn yield_mult(self) -> f64 {
        match self {
            CropPhase::LeafyGreens => 1.0,
            // Pollination and longer ripening lose some of the rated yield
            CropPhase::Fruiting => 0.85,
        }
    }
}

const SQM_PER_SQFT: f64 = 0.092_903_04;
/// Upper bound (exclusive) of a small site: 1,000 sq ft.
pub const SMALL_SITE_MAX_SQM: f64 = 1_000.0 * SQM_PER_SQFT;
/// Upper bound (exclusive) of a medium site: 5,000 sq ft.
pub const MEDIUM_SITE_MAX_SQM: f64 = 5_000.0 * SQM_PER_SQFT;

/// Size band of the farm, derived from its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaTier {
    Small,
    Medium,
    Large,
}

impl AreaTier {
    /// Small below 1,000 sq ft (about 92.9 m²), medium below 5,000 sq ft
    /// (about 464.5 m²), large otherwise.
    pub fn from_area(area_sqm: f64) -> Self {
        if area_sqm < SMALL_SITE_MAX_SQM {
            AreaTier::Small
        } else if area_sqm < MEDIUM_SITE_MAX_SQM {
            AreaTier::Medium
        } else {
            AreaTier::Large
        }
    }

    /// Rack levels typically installed at this size.
    pub fn rack_tiers(self) -> u32 {
        match self {
            AreaTier::Small => 3,
            AreaTier::Medium => 5,
            AreaTier::Large => 8,
        }
    }
}

macro_rules! impl_key_parsing {
    ($ty:ty, $section:literal, { $($($key:literal)|+ => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = SimError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
                    $($($key)|+ => Ok($variant),)+
                    _ => Err(SimError::Validation(format!(
                        "invalid {} key: {}",
                        $section, s
                    ))),
                }
            }
        }
    };
}

impl_key_parsing!(SpaceType, "space_type", {
    "greenhouse" => SpaceType::Greenhouse,
    "warehouse" => SpaceType::Warehouse,
});

impl_key_parsing!(BudgetTier, "budget", {
    "low" => BudgetTier::Low,
    "medium" | "mid" => BudgetTier::Medium,
    "high" => BudgetTier::High,
});

impl_key_parsing!(EnergySource, "energy_source", {
    "solar" => EnergySource::Solar,
    "grid" => EnergySource::Grid,
    "hybrid" => EnergySource::Hybrid,
});

impl_key_parsing!(CropPhase, "crop_phase", {
    "leafy_greens" | "leafy" | "phase1_leafy" => CropPhase::LeafyGreens,
    "fruiting" | "strawberry" | "phase2_strawberry" => CropPhase::Fruiting,
});

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpaceType::Greenhouse => write!(f, "Greenhouse"),
            SpaceType::Warehouse => write!(f, "Warehouse"),
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetTier::Low => write!(f, "Low"),
            BudgetTier::Medium => write!(f, "Medium"),
            BudgetTier::High => write!(f, "High"),
        }
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergySource::Solar => write!(f, "Solar"),
            EnergySource::Grid => write!(f, "Grid"),
            EnergySource::Hybrid => write!(f, "Hybrid"),
        }
    }
}

impl fmt::Display for CropPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropPhase::LeafyGreens => write!(f, "Leafy Greens"),
            CropPhase::Fruiting => write!(f, "Strawberries/Dwarf Tomatoes"),
        }
    }
}

/// A full set of site choices.
///
/// The default profile (warehouse, medium budget, grid power, leafy greens)
/// leaves every multiplier at 1.0.
///
/// # Example
///
/// ```
/// use vfplanner::profiles::{EnergySource, SiteProfile, SpaceType};
///
/// let profile = SiteProfile {
///     space_type: SpaceType::Greenhouse,
///     energy_source: EnergySource::Solar,
///     ..Default::default()
/// };
/// assert!(profile.yield_multiplier() > 1.0);
/// assert!(profile.electricity_multiplier() < 1.0);
/// assert_eq!(SiteProfile::default().yield_multiplier(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SiteProfile {
    #[serde(default)]
    pub space_type: SpaceType,
    #[serde(default)]
    pub budget: BudgetTier,
    #[serde(default)]
    pub energy_source: EnergySource,
    #[serde(default)]
    pub crop_phase: CropPhase,
}

impl SiteProfile {
    pub fn yield_multiplier(&self) -> f64 {
        self.space_type.rule().yield_mult
            * self.budget.rule().yield_mult
            * self.energy_source.rule().yield_mult
            * self.crop_phase.yield_mult()
    }

    pub fn electricity_multiplier(&self) -> f64 {
        self.space_type.rule().energy_mult * self.energy_source.rule().price_mult
    }

    pub fn capex_multiplier(&self) -> f64 {
        self.space_type.rule().cost_mult * self.budget.rule().capex_mult
    }

    /// Returns copies of `config` and `system` with this profile folded in.
    pub fn apply(
        &self,
        config: &FarmConfig,
        system: &InfraSystemRecord,
    ) -> (FarmConfig, InfraSystemRecord) {
        let mut adjusted_config = config.clone();
        adjusted_config.custom_yield_modifier *= self.yield_multiplier();
        adjusted_config.electricity_cost_per_kwh *= self.electricity_multiplier();
        adjusted_config.profile = None;

        let mut adjusted_system = system.clone();
        adjusted_system.capex_per_sqm *= self.capex_multiplier();

        (adjusted_config, adjusted_system)
    }

    /// Estimated CO2 avoided per year for `annual_yield_kg` of local produce.
    pub fn carbon_saved_kg(&self, annual_yield_kg: f64) -> f64 {
        let intensity = self.energy_source.rule().carbon_intensity;
        annual_yield_kg * CARBON_CREDIT_PER_KG * (1.0 - intensity / CARBON_BASELINE)
    }
}
