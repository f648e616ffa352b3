//! Blueprint report generation.
//!
//! Formats an already-computed [`SimulationResult`] as a paginated plain-text
//! document. No numbers are computed here.

use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::display::{format_currency, format_number};
use crate::models::{FarmConfig, SimulationResult};

/// Maximum body lines per page, excluding the footer.
pub const LINES_PER_PAGE: usize = 40;

pub const REPORT_TITLE: &str = "Vertical Farming Strategic Blueprint";

const LABEL_WIDTH: usize = 26;
const PAGE_WIDTH: usize = 72;

/// A paginated report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub project_name: String,
    pub pages: Vec<Vec<String>>,
}

impl Report {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Renders all pages, separated by form feeds, each with a footer.
    pub fn render(&self) -> String {
        let total = self.pages.len();
        self.pages
            .iter()
            .enumerate()
            .map(|(i, lines)| {
                let mut page = lines.join("\n");
                page.push_str("\n\n");
                page.push_str(&center(&format!("Page {} of {}", i + 1, total)));
                page.push('\n');
                page
            })
            .collect::<Vec<_>>()
            .join("\u{000C}\n")
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }

    /// File name for this report, e.g. `VF_Blueprint_Test_Farm_1700000000.txt`.
    pub fn file_name(&self, unix_timestamp: i64) -> String {
        format!(
            "VF_Blueprint_{}_{}.txt",
            self.project_name.replace(' ', "_"),
            unix_timestamp
        )
    }

    /// Writes the report into `dir` and returns the file path.
    pub fn write_to(&self, dir: &Path, unix_timestamp: i64) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name(unix_timestamp));
        fs::write(&path, self.to_bytes())?;
        Ok(path)
    }
}

fn center(text: &str) -> String {
    let pad = PAGE_WIDTH.saturating_sub(text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn row(label: &str, value: impl AsRef<str>) -> String {
    format!("  {:<width$}{}", label, value.as_ref(), width = LABEL_WIDTH)
}

fn heading(text: &str) -> Vec<String> {
    vec![
        String::new(),
        text.to_string(),
        "-".repeat(text.chars().count()),
    ]
}

/// Wraps `text` to `width` columns, breaking on whitespace.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Builds the blueprint for `result`.
///
/// Sections, in order: configuration, annual financial projections,
/// operational metrics, recommendations.
pub fn generate_report(
    config: &FarmConfig,
    result: &SimulationResult,
    generated_on: NaiveDate,
) -> Report {
    let fin = &result.financials;
    let mut body = vec![
        center(REPORT_TITLE),
        center(&format!(
            "Generated for {} on {}",
            config.project_name,
            generated_on.format("%Y-%m-%d")
        )),
    ];

    body.extend(heading("1. Farm Configuration"));
    body.push(row("Location:", &config.location_city));
    body.push(row("Total Area:", format!("{} sqm", config.total_area_sqm)));
    body.push(row("Selected Crop:", &result.crop.name));
    body.push(row("Infrastructure:", &result.infra.system_name));
    if let Some(profile) = &config.profile {
        body.push(row("Space Type:", profile.space_type.to_string()));
        body.push(row("Budget:", profile.budget.to_string()));
        body.push(row("Energy Source:", profile.energy_source.to_string()));
        body.push(row("Crop Phase:", profile.crop_phase.to_string()));
    }

    body.extend(heading("2. Financial Projections (Annual)"));
    body.push(row("Total CapEx:", format_currency(fin.capex_total)));
    body.push(row("Annual Revenue:", format_currency(fin.revenue_annual)));
    body.push(row("Annual OpEx:", format_currency(fin.opex_annual)));
    body.push(row("Net Profit:", format_currency(fin.net_profit_annual)));
    body.push(row("Gross Margin:", format!("{}%", fin.gross_margin)));
    body.push(row("ROI:", format!("{}%", fin.roi_percent)));
    if fin.has_payback() {
        body.push(row("Payback Period:", format!("{} years", fin.payback_period_years)));
    } else {
        body.push(row("Payback Period:", "not reached"));
    }
    body.push(row(
        "Break-even Volume:",
        format!("{} kg", format_number(fin.break_even_units, 0)),
    ));

    body.extend(heading("3. Operational Metrics"));
    body.push(row(
        "Annual Yield:",
        format!("{} kg", format_number(result.total_yield_annual_kg, 0)),
    ));
    body.push(row("Grow Cycles per Year:", result.cycles_per_year.to_string()));
    body.push(row(
        "Daily Light Requirement:",
        format!("{} hours", result.crop.light_hours_per_day),
    ));
    body.push(row(
        "Annual Energy Use:",
        format!("{} kWh", format_number(fin.opex_breakdown.energy_kwh, 0)),
    ));
    body.push(row(
        "Annual Labor:",
        format!("{} hours", format_number(fin.opex_breakdown.labor_hours, 0)),
    ));
    if let Some(carbon) = result.carbon_saved_kg {
        body.push(row("CO2 Avoided:", format!("{} kg", format_number(carbon, 0))));
    }
    body.push(row("Risk Score:", format!("{}/100", result.risk_score)));

    body.extend(heading("4. Strategic Recommendations"));
    if result.recommendations.is_empty() {
        body.push("  No specific warnings. The configuration looks solid.".to_string());
    }
    for rec in &result.recommendations {
        for (i, line) in wrap(rec, PAGE_WIDTH - 4).into_iter().enumerate() {
            let bullet = if i == 0 { "- " } else { "  " };
            body.push(format!("  {}{}", bullet, line));
        }
    }

    let pages = body
        .chunks(LINES_PER_PAGE)
        .map(|chunk| chunk.to_vec())
        .collect();

    Report {
        title: REPORT_TITLE.to_string(),
        project_name: config.project_name.clone(),
        pages,
    }
}
