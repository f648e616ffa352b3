//! Display and formatting utilities for vfplanner.
//!
//! This module provides functions for formatting numbers and printing
//! simulation results to the terminal in a readable format.

use crate::data::ReferenceData;
use crate::economics::YearProjection;
use crate::environment::EnvironmentFactors;
use crate::models::SimulationResult;
use crate::profiles::AreaTier;
use crate::ranking::RankedOption;

/// Formats a number with thousands separators and a fixed number of decimals.
///
/// # Example
///
/// ```
/// use vfplanner::display::format_number;
///
/// assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
/// assert_eq!(format_number(-950.0, 0), "-950");
/// assert_eq!(format_number(0.5, 1), "0.5");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formats a money amount as dollars with cents.
///
/// # Example
///
/// ```
/// use vfplanner::display::format_currency;
///
/// assert_eq!(format_currency(86446.05), "$86,446.05");
/// assert_eq!(format_currency(-1500.0), "-$1,500.00");
/// ```
pub fn format_currency(value: f64) -> String {
    let number = format_number(value, 2);
    match number.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", number),
    }
}

/// Formats a payback period, spelling out the no-payback sentinel.
pub fn format_payback(years: f64, has_payback: bool) -> String {
    if has_payback {
        format!("{} years", years)
    } else {
        "never (unprofitable)".to_string()
    }
}

/// Displays a complete simulation result to stdout.
///
/// This function prints:
/// - The configuration that was simulated
/// - Yield and operating metrics
/// - The financial projection with an OpEx breakdown
/// - The risk score and recommendations
pub fn display_results(result: &SimulationResult) {
    let cfg = &result.config;
    let fin = &result.financials;
    let opex = &fin.opex_breakdown;

    println!();
    println!("+================================================================+");
    println!("|            VERTICAL FARM SIMULATION RESULTS                    |");
    println!("+================================================================+");
    println!();

    println!("[CONFIGURATION]");
    println!("----------------------------------------------------------------");
    println!("  Project:          {}", cfg.project_name);
    println!("  Location:         {}", cfg.location_city);
    println!(
        "  Area:             {} sqm ({:?} site, {} rack tiers)",
        format_number(cfg.total_area_sqm, 0),
        AreaTier::from_area(cfg.total_area_sqm),
        AreaTier::from_area(cfg.total_area_sqm).rack_tiers()
    );
    println!("  Crop:             {} ({})", result.crop.name, result.crop.category);
    println!("  System:           {}", result.infra.system_name);
    println!("  Electricity:      {}/kWh", format_currency(cfg.electricity_cost_per_kwh));
    println!("  Labor:            {}/hr", format_currency(cfg.labor_cost_per_hour));
    if let Some(profile) = &cfg.profile {
        println!(
            "  Site Profile:     {} / {} budget / {} power / {}",
            profile.space_type, profile.budget, profile.energy_source, profile.crop_phase
        );
    }

    println!();
    println!("[OPERATIONS]");
    println!("----------------------------------------------------------------");
    println!("  Cycles per Year:  {}", result.cycles_per_year);
    println!("  Annual Yield:     {} kg", format_number(result.total_yield_annual_kg, 1));
    println!("  Energy Use:       {} kWh", format_number(opex.energy_kwh, 0));
    println!("  Labor:            {} hours", format_number(opex.labor_hours, 0));
    if let Some(carbon) = result.carbon_saved_kg {
        println!("  CO2 Avoided:      {} kg", format_number(carbon, 0));
    }

    println!();
    println!("[FINANCIALS]");
    println!("----------------------------------------------------------------");
    println!("  Total CapEx:      {:>16}", format_currency(fin.capex_total));
    println!("  Annual Revenue:   {:>16}", format_currency(fin.revenue_annual));
    println!("  Annual OpEx:      {:>16}", format_currency(fin.opex_annual));
    println!("    - Variable:     {:>16}", format_currency(opex.variable_cost));
    println!("    - Energy:       {:>16}", format_currency(opex.energy_cost));
    println!("    - Labor:        {:>16}", format_currency(opex.labor_cost));
    println!("    - Maintenance:  {:>16}", format_currency(opex.maintenance_cost));
    println!("  Net Profit:       {:>16}", format_currency(fin.net_profit_annual));
    println!("  Gross Margin:     {:>15}%", fin.gross_margin);
    println!("  ROI:              {:>15}%", fin.roi_percent);
    println!(
        "  Payback Period:   {:>16}",
        format_payback(fin.payback_period_years, fin.has_payback())
    );
    println!("  Break-even:       {:>13} kg", format_number(fin.break_even_units, 0));

    println!();
    println!("[RISK] Score: {}/100", result.risk_score);
    println!("----------------------------------------------------------------");
    for rec in &result.recommendations {
        println!("  - {}", rec);
    }
    println!();
}

/// Displays a ranking table, best ROI first.
///
/// # Arguments
///
/// * `ranked` - Options sorted by ROI
/// * `dimension` - What was varied ("crop" or "system")
pub fn display_ranking(ranked: &[RankedOption], dimension: &str) {
    println!();
    println!("[ALL {}S RANKED] (by ROI)", dimension.to_uppercase());
    println!("----------------------------------------------------------------");
    println!(
        "{:<26} {:>10} {:>16} {:>10}",
        "Option", "ROI %", "Net Profit", "Payback"
    );
    println!("----------------------------------------------------------------");
    for option in ranked {
        let payback = if option.net_profit_annual > 0.0 {
            format!("{:.1}y", option.payback_period_years)
        } else {
            "N/A".to_string()
        };
        println!(
            "{:<26} {:>10.2} {:>16} {:>10}",
            option.name,
            option.roi_percent,
            format_currency(option.net_profit_annual),
            payback
        );
    }
    println!();
}

/// Displays a multi-year cash projection.
pub fn display_cash_flow(years: &[YearProjection]) {
    println!("[CASH FLOW PROJECTION]");
    println!("----------------------------------------------------------------");
    println!("{:<6} {:>20} {:>20}", "Year", "Net Profit", "Cumulative Cash");
    for y in years {
        println!(
            "{:<6} {:>20} {:>20}",
            y.year,
            format_currency(y.net_profit),
            format_currency(y.cumulative_cash)
        );
    }
    println!();
}

/// Displays the environment factors applied to a run.
pub fn display_environment(location: &str, factors: &EnvironmentFactors) {
    if factors.is_neutral() {
        println!("  Climate adjustment for {}: none", location);
    } else {
        println!(
            "  Climate adjustment for {}: weather x{:.2}, soil x{:.2}",
            location, factors.weather_adj, factors.soil_adj
        );
    }
}

/// Lists the crops and systems available in the reference data.
pub fn display_reference_data(data: &ReferenceData) {
    println!();
    println!("[CROPS]");
    println!("----------------------------------------------------------------");
    println!(
        "{:<24} {:<14} {:>6} {:>10} {:>10}",
        "ID", "Type", "Days", "kg/m2", "$/kg"
    );
    for crop in &data.crops {
        println!(
            "{:<24} {:<14} {:>6} {:>10.2} {:>10.2}",
            crop.id,
            crop.category,
            crop.growth_cycle_days,
            crop.yield_per_sqm_per_cycle,
            crop.market_price_per_kg
        );
    }

    println!();
    println!("[SYSTEMS]");
    println!("----------------------------------------------------------------");
    println!("{:<24} {:<28} {:>10} {:>8}", "ID", "Name", "$/m2", "Maint.");
    for system in &data.systems {
        println!(
            "{:<24} {:<28} {:>10.2} {:>7.1}%",
            system.system_id,
            system.system_name,
            system.capex_per_sqm,
            system.maintenance_annual_percent * 100.0
        );
    }
    println!();
}
