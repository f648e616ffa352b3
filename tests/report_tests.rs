//! Tests for blueprint report generation.

use chrono::NaiveDate;

use vfplanner::data::ReferenceData;
use vfplanner::engine::simulate;
use vfplanner::models::FarmConfig;
use vfplanner::profiles::{EnergySource, SiteProfile};
use vfplanner::report::{generate_report, LINES_PER_PAGE, REPORT_TITLE};
use vfplanner::risk::COOLING_WARNING;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn config() -> FarmConfig {
    FarmConfig::new(100.0, "lettuce_iceberg", "hydroponic_nft")
        .unwrap()
        .with_project_name("Stress Test")
        .with_location("Dubai")
        .with_electricity_cost(1.0)
        .with_labor_cost(50.0)
}

#[test]
fn test_report_has_all_sections_in_order() {
    let config = config();
    let result = simulate(&config, &ReferenceData::embedded().unwrap()).unwrap();
    let text = generate_report(&config, &result, date()).render();

    let positions: Vec<usize> = [
        REPORT_TITLE,
        "1. Farm Configuration",
        "2. Financial Projections (Annual)",
        "3. Operational Metrics",
        "4. Strategic Recommendations",
    ]
    .iter()
    .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {}", needle)))
    .collect();

    for pair in positions.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn test_report_contains_figures_and_date() {
    let config = config();
    let result = simulate(&config, &ReferenceData::embedded().unwrap()).unwrap();
    let text = generate_report(&config, &result, date()).render();

    assert!(text.contains("Generated for Stress Test on 2024-03-15"));
    assert!(text.contains("$80,000.00"));
    assert!(text.contains("-$130,721.84"));
    assert!(text.contains("not reached"));
    assert!(text.contains("Risk Score:"));
    assert!(text.contains("70/100"));
    assert!(text.contains(COOLING_WARNING));
    assert!(text.contains("Page 1 of 1"));
}

#[test]
fn test_profile_details_are_listed() {
    let config = config().with_profile(SiteProfile {
        energy_source: EnergySource::Solar,
        ..Default::default()
    });
    let result = simulate(&config, &ReferenceData::embedded().unwrap()).unwrap();
    let text = generate_report(&config, &result, date()).render();

    assert!(text.contains("Energy Source:"));
    assert!(text.contains("Solar"));
    assert!(text.contains("CO2 Avoided:"));
}

#[test]
fn test_empty_recommendations_fallback() {
    let config = config();
    let mut result = simulate(&config, &ReferenceData::embedded().unwrap()).unwrap();
    result.recommendations.clear();

    let text = generate_report(&config, &result, date()).render();
    assert!(text.contains("No specific warnings. The configuration looks solid."));
}

#[test]
fn test_long_reports_paginate() {
    let config = config();
    let mut result = simulate(&config, &ReferenceData::embedded().unwrap()).unwrap();
    for i in 0..60 {
        result.recommendations.push(format!("Extra note number {}.", i));
    }

    let report = generate_report(&config, &result, date());
    assert!(report.page_count() >= 2);
    assert!(report.pages.iter().all(|p| p.len() <= LINES_PER_PAGE));

    let text = report.render();
    let total = report.page_count();
    assert!(text.contains(&format!("Page 1 of {}", total)));
    assert!(text.contains(&format!("Page {} of {}", total, total)));
    assert_eq!(text.matches('\u{000C}').count(), total - 1);
}

#[test]
fn test_file_name_uses_project_and_timestamp() {
    let config = config();
    let result = simulate(&config, &ReferenceData::embedded().unwrap()).unwrap();
    let report = generate_report(&config, &result, date());

    assert_eq!(report.file_name(1_700_000_000), "VF_Blueprint_Stress_Test_1700000000.txt");
    assert_eq!(report.to_bytes(), report.render().into_bytes());
}

#[test]
fn test_write_to_creates_file() {
    let config = config();
    let result = simulate(&config, &ReferenceData::embedded().unwrap()).unwrap();
    let report = generate_report(&config, &result, date());

    let dir = std::env::temp_dir().join(format!("vfplanner-report-{}", std::process::id()));
    let path = report.write_to(&dir, 42).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, report.render());
    let _ = std::fs::remove_dir_all(&dir);
}
