//! Integration tests for scenario projections and sectoral analysis
//!
//! - Horizon-year comparisons cover all four scenarios
//! - Growth coefficients order the trajectories
//! - Regional conflicts come from the sector table

use nss_spatial::scenario::{gdp_per_capita, ScenarioModeler, ScenarioType, HORIZON_YEARS};
use nss_spatial::sectoral::{ConflictLevel, LandUse, SectoralAnalyzer};

#[test]
fn test_comparison_covers_every_scenario_at_horizons() {
    let modeler = ScenarioModeler::new();
    for year in HORIZON_YEARS {
        let rows = modeler.compare_scenarios(year);
        assert_eq!(rows.len(), 4, "{} should compare all scenarios", year);
        for row in &rows {
            assert!(
                (row.gdp_per_capita_usd - gdp_per_capita(row.gdp_billion_usd, row.population_m)).abs()
                    < 1e-6,
                "{} per-capita GDP not derived from totals",
                row.name
            );
        }
    }
    assert!(modeler.compare_scenarios(2031).is_empty());
}

#[test]
fn test_baseline_per_capita_near_reference() {
    let rows = ScenarioModeler::new().compare_scenarios(2030);
    let baseline = rows
        .iter()
        .find(|r| r.scenario == ScenarioType::Baseline)
        .expect("baseline row");
    assert!((baseline.population_m - 40.5).abs() < 0.1);
    assert!((baseline.gdp_billion_usd - 1323.0).abs() < 1.0);
    assert!((baseline.gdp_per_capita_usd - 32_600.0).abs() < 100.0);
}

#[test]
fn test_growth_orders_scenarios() {
    let modeler = ScenarioModeler::new();
    let population_2050 = |t: ScenarioType| {
        modeler
            .scenario(t)
            .demographic_at(2050)
            .expect("2050 projection")
            .total_population
    };

    assert!(population_2050(ScenarioType::Accelerated) > population_2050(ScenarioType::TargetAchievement));
    assert!(population_2050(ScenarioType::TargetAchievement) > population_2050(ScenarioType::Baseline));
    assert!(population_2050(ScenarioType::Baseline) > population_2050(ScenarioType::Conservative));

    let total: f64 = modeler.scenarios().map(|s| s.probability).sum();
    assert!((total - 1.0).abs() < 1e-9, "probabilities sum to {}", total);
}

#[test]
fn test_scenario_keys_parse() {
    assert_eq!("vision2030".parse::<ScenarioType>().unwrap(), ScenarioType::TargetAchievement);
    assert_eq!("Conservative".parse::<ScenarioType>().unwrap(), ScenarioType::Conservative);
    assert!("utopia".parse::<ScenarioType>().is_err());
}

#[test]
fn test_region_projection_scales_national_path() {
    let modeler = ScenarioModeler::new();
    let tabuk = modeler.project_region("Tabuk Region", ScenarioType::Accelerated);
    let baseline_region = modeler.project_region("Unknown", ScenarioType::Accelerated);

    assert_eq!(tabuk.projections.len(), HORIZON_YEARS.len());
    assert_eq!(tabuk.characteristics.characteristic.as_deref(), Some("neom_effect"));
    assert_eq!(baseline_region.characteristics.characteristic, None);

    for (a, b) in tabuk.projections.iter().zip(&baseline_region.projections) {
        assert_eq!(a.year, b.year);
        assert!((a.population_m / b.population_m - 1.5).abs() < 1e-9);
    }
}

#[test]
fn test_report_fills_ranges_and_summaries() {
    let report = ScenarioModeler::new().generate_scenario_report();
    assert_eq!(report.scenarios_analyzed, 4);
    assert_eq!(report.scenario_summaries.len(), 4);
    assert_eq!(report.comparison_2030.len(), 4);
    assert_eq!(report.comparison_2050.len(), 4);
    assert!(report.key_findings.population_range_2030.ends_with('M'));
    assert!(report.key_findings.gdp_range_2050.starts_with('$'));
    for summary in report.scenario_summaries.values() {
        assert!(summary.key_assumptions.len() <= 3);
    }
}

#[test]
fn test_conflict_matrix_is_symmetric_with_neutral_diagonal() {
    let analyzer = SectoralAnalyzer::new();
    let matrix = analyzer.conflict_matrix();
    assert!(matrix.is_symmetric());
    for use_ in LandUse::ALL {
        assert_eq!(matrix.level(use_, use_), ConflictLevel::Neutral);
    }
}

#[test]
fn test_regional_conflicts_are_conflicts_only() {
    let analyzer = SectoralAnalyzer::new();
    let conflicts = analyzer.identify_regional_conflicts("Eastern Province");
    assert!(!conflicts.is_empty());
    for assessment in &conflicts {
        assert!(assessment.conflict_level.is_conflict());
        assert!(!assessment.mitigation_strategies.is_empty());
    }
    assert!(analyzer.identify_regional_conflicts("Atlantis").is_empty());
}

#[test]
fn test_assessment_by_key_rejects_unknown_use() {
    let analyzer = SectoralAnalyzer::new();
    let assessment = analyzer
        .assess_conflict_by_key("industrial", "residential")
        .unwrap();
    assert_eq!(assessment.conflict_level, ConflictLevel::HighConflict);
    assert!(analyzer.assess_conflict_by_key("industrial", "spaceport").is_err());
}
