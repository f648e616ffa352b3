//! vfplanner - Command Line Interface
//!
//! This is the main entry point for the vertical farm planner.
//! Run with `--help` to see all available options.

use clap::Parser;
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vfplanner::{
    advisor::{Advisor, CommandGenerator, DEFAULT_TIMEOUT},
    data::{default_data_dir, load_data},
    display::{display_cash_flow, display_environment, display_ranking, display_reference_data, display_results},
    economics::{npv_simple, project_cash_flow, MAX_PROJECTION_YEARS},
    engine::simulate,
    environment::{resolve_factors, StaticClimateTable},
    models::FarmConfig,
    profiles::{BudgetTier, CropPhase, EnergySource, SiteProfile, SpaceType},
    ranking::{rank_crops, rank_systems},
    report::generate_report,
    SimError,
};

const ADVISOR_CMD_ENV: &str = "VFPLANNER_ADVISOR_CMD";
const ADVISOR_TIMEOUT_ENV: &str = "VFPLANNER_ADVISOR_TIMEOUT_SECS";

/// Command-line arguments for vfplanner.
#[derive(Parser, Debug)]
#[command(name = "vfplanner")]
#[command(author, version, about = "Estimate yield, cost and ROI for a vertical farm", long_about = None)]
struct Args {
    /// Load the farm configuration from a JSON file (flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding crops.json and infra_costs.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// List available crops and systems and exit
    #[arg(long, default_value = "false")]
    list: bool,

    // ========== Farm ==========
    /// Project name
    #[arg(short, long)]
    project: Option<String>,

    /// Total growing area in square meters
    #[arg(short, long)]
    area: Option<f64>,

    /// Crop id (see --list)
    #[arg(short, long)]
    crop: Option<String>,

    /// Infrastructure system id (see --list)
    #[arg(short, long)]
    system: Option<String>,

    /// City the farm is located in
    #[arg(short, long)]
    location: Option<String>,

    // ========== Economics ==========
    /// Electricity cost per kWh
    #[arg(short, long)]
    electricity: Option<f64>,

    /// Labor cost per hour
    #[arg(long)]
    labor: Option<f64>,

    /// Yield multiplier for grower skill or technology
    #[arg(long)]
    yield_modifier: Option<f64>,

    // ========== Site Profile ==========
    /// Space type: greenhouse or warehouse
    #[arg(long)]
    space_type: Option<SpaceType>,

    /// Budget tier: low, medium or high
    #[arg(long)]
    budget: Option<BudgetTier>,

    /// Energy source: solar, grid or hybrid
    #[arg(long)]
    energy_source: Option<EnergySource>,

    /// Crop phase: leafy_greens or fruiting
    #[arg(long)]
    crop_phase: Option<CropPhase>,

    /// Adjust yield using typical local weather
    #[arg(long, default_value = "false")]
    climate_adjust: bool,

    // ========== Output ==========
    /// Rank every crop (or system with --rank-systems) under this config
    #[arg(long, default_value = "false")]
    rank: bool,

    /// Rank systems instead of crops
    #[arg(long, default_value = "false")]
    rank_systems: bool,

    /// Years of cash flow to project
    #[arg(
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PROJECTION_YEARS))
    )]
    years: u32,

    /// Annual profit growth used in the projection
    #[arg(long, default_value = "0.05")]
    growth: f64,

    /// Write a blueprint report into this directory
    #[arg(long)]
    report: Option<PathBuf>,

    /// Ask the advisor for an executive summary
    #[arg(long, default_value = "false")]
    advise: bool,

    /// Ask the advisor a specific question
    #[arg(short, long)]
    question: Option<String>,

    /// Print the result as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

fn build_config(args: &Args) -> Result<FarmConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str::<FarmConfig>(&text)?
        }
        None => {
            let area = args
                .area
                .ok_or_else(|| SimError::Validation("--area is required without --config".to_string()))?;
            let crop = args
                .crop
                .clone()
                .ok_or_else(|| SimError::Validation("--crop is required without --config".to_string()))?;
            let system = args
                .system
                .clone()
                .ok_or_else(|| SimError::Validation("--system is required without --config".to_string()))?;
            FarmConfig::new(area, crop, system)?
        }
    };

    if let Some(v) = &args.project {
        config.project_name = v.clone();
    }
    if let Some(v) = args.area {
        config.total_area_sqm = v;
    }
    if let Some(v) = &args.crop {
        config.selected_crop_id = v.clone();
    }
    if let Some(v) = &args.system {
        config.selected_system_id = v.clone();
    }
    if let Some(v) = &args.location {
        config.location_city = v.clone();
    }
    if let Some(v) = args.electricity {
        config.electricity_cost_per_kwh = v;
    }
    if let Some(v) = args.labor {
        config.labor_cost_per_hour = v;
    }
    if let Some(v) = args.yield_modifier {
        config.custom_yield_modifier = v;
    }

    let wants_profile = args.space_type.is_some()
        || args.budget.is_some()
        || args.energy_source.is_some()
        || args.crop_phase.is_some();
    if wants_profile {
        let base = config.profile.unwrap_or_default();
        config.profile = Some(SiteProfile {
            space_type: args.space_type.unwrap_or(base.space_type),
            budget: args.budget.unwrap_or(base.budget),
            energy_source: args.energy_source.unwrap_or(base.energy_source),
            crop_phase: args.crop_phase.unwrap_or(base.crop_phase),
        });
    }

    config.validate()?;
    Ok(config)
}

fn build_advisor() -> Advisor {
    let timeout = env::var(ADVISOR_TIMEOUT_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);

    match env::var(ADVISOR_CMD_ENV)
        .ok()
        .and_then(|line| CommandGenerator::from_command_line(&line))
    {
        Some(generator) => Advisor::new(Arc::new(generator)).with_timeout(timeout),
        None => Advisor::unconfigured(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so --json output stays parseable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Determine data directory
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
    if !data_dir.exists() {
        eprintln!(
            "Error: data directory '{}' not found. Run from the project root or pass --data-dir.",
            data_dir.display()
        );
        std::process::exit(1);
    }

    let data = load_data(&data_dir)?;
    info!(crops = data.crops.len(), systems = data.systems.len(), "reference data loaded");

    if args.list {
        display_reference_data(&data);
        return Ok(());
    }

    let mut config = build_config(&args)?;

    let factors = if args.climate_adjust {
        let factors = resolve_factors(&StaticClimateTable::default(), &config.location_city);
        config.custom_yield_modifier *= factors.weather_adj;
        Some(factors)
    } else {
        None
    };

    let result = simulate(&config, &data)?;
    let cash_flow = project_cash_flow(&result.financials, args.years, args.growth);

    let ranking = if args.rank || args.rank_systems {
        let ranked = if args.rank_systems {
            rank_systems(&config, &data)?
        } else {
            rank_crops(&config, &data)?
        };
        Some(ranked)
    } else {
        None
    };

    if args.json {
        let output = serde_json::json!({
            "result": &result,
            "cash_flow": &cash_flow,
            "npv": npv_simple(&result.financials, args.years),
            "ranking": &ranking,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("vfplanner - Vertical Farm Planner");
        println!("================================================================");
        if let Some(factors) = &factors {
            display_environment(&config.location_city, factors);
        }
        display_results(&result);
        display_cash_flow(&cash_flow);
        println!(
            "  {}-year net value: {}",
            args.years,
            vfplanner::display::format_currency(npv_simple(&result.financials, args.years))
        );
        if let Some(ranked) = &ranking {
            display_ranking(ranked, if args.rank_systems { "system" } else { "crop" });
        }
    }

    if let Some(dir) = &args.report {
        let today = chrono::Local::now().date_naive();
        let report = generate_report(&config, &result, today);
        let path = report.write_to(dir, chrono::Utc::now().timestamp())?;
        eprintln!("Report written to {}", path.display());
    }

    if args.advise || args.question.is_some() {
        let advisor = build_advisor();
        let advice = advisor.advise(&result, args.question.as_deref());
        println!();
        println!("[ADVISOR]");
        println!("----------------------------------------------------------------");
        println!("{}", advice);
    }

    Ok(())
}
