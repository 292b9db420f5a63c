//! Aggregate report over one provider run

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::error::Result;
use crate::core::types::LEVEL_REGION;
use crate::diagnostics::{DiagnosticsReport, SpatialDiagnostics};
use crate::provider::{DataProvider, HealthReport};
use crate::scenario::{ScenarioComparison, ScenarioModeler, ScenarioReport};
use crate::sectoral::{SectoralAnalyzer, SectoralReport};
use crate::validation::{DataQualityReport, SpatialDataValidator};

/// Everything the CLI prints: diagnostics, data quality and scenarios
#[derive(Clone, Debug, Serialize)]
pub struct NssReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub is_simulated: bool,
    pub year: i32,
    pub health: HealthReport,
    pub diagnostics: DiagnosticsReport,
    pub data_quality: Vec<DataQualityReport>,
    pub scenario_comparison: Vec<ScenarioComparison>,
    pub scenarios: ScenarioReport,
    pub sectoral: SectoralReport,
}

impl NssReport {
    /// Query `provider` and run every analysis; `year` selects the comparison
    pub fn build(provider: &dyn DataProvider, year: i32) -> Result<Self> {
        let health = provider.health_check();
        let regions = provider.get_spatial_units(LEVEL_REGION)?;
        let settlements = provider.get_settlements(None, None)?;
        let populations = provider.get_population(LEVEL_REGION, year, None)?;
        let projects = provider.get_projects(None, None)?;

        let diagnostics = SpatialDiagnostics::new(&regions.data, &settlements.data)
            .with_population(&populations.data)
            .run();

        let data_quality = vec![
            SpatialDataValidator::new("regions", &regions.data)
                .with_expected_types(&["MultiPolygon"])
                .validate_all(),
            SpatialDataValidator::new("settlements", &settlements.data)
                .with_expected_types(&["Point"])
                .validate_all(),
            SpatialDataValidator::new("projects", &projects.data)
                .with_expected_types(&["Point"])
                .validate_all(),
        ];

        let modeler = ScenarioModeler::new();
        let scenario_comparison = modeler.compare_scenarios(year);
        if scenario_comparison.is_empty() {
            tracing::warn!("No scenario projections for {}", year);
        }

        Ok(Self {
            generated_at: Utc::now(),
            source: regions.source,
            is_simulated: regions.is_simulated,
            year,
            health,
            diagnostics,
            data_quality,
            scenario_comparison,
            scenarios: modeler.generate_scenario_report(),
            sectoral: SectoralAnalyzer::new().sectoral_report(),
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!(
                "Source: {} ({})",
                self.source,
                if self.is_simulated { "simulated" } else { "observed" }
            ),
            format!(
                "{} regions, {} settlements",
                self.diagnostics.region_count, self.diagnostics.settlement_count
            ),
            format!(
                "Primacy {:.2}, Gini {:.4}, HHI {:.4} (normalized {:.4})",
                self.diagnostics.primacy_index,
                self.diagnostics.gini_coefficient,
                self.diagnostics.concentration.hhi,
                self.diagnostics.concentration.normalized
            ),
        ];

        for report in &self.data_quality {
            lines.push(format!(
                "Data quality [{}]: {}/{} checks passed ({:.0}%)",
                report.dataset_name,
                report.passed_checks,
                report.total_checks,
                report.quality_score * 100.0
            ));
        }

        lines.push(format!("Scenarios at {}:", self.year));
        if self.scenario_comparison.is_empty() {
            lines.push("  no projections for this year".to_string());
        }
        for row in &self.scenario_comparison {
            lines.push(format!(
                "  {:<34} pop {:>5.1}M  GDP ${:>6.0}B  ${:>7.0}/capita  p={:.2}",
                row.name, row.population_m, row.gdp_billion_usd, row.gdp_per_capita_usd, row.probability
            ));
        }

        lines.push(format!(
            "Land-use conflicts: {} high, {} moderate, {} synergies",
            self.sectoral.conflict_summary.high_conflicts,
            self.sectoral.conflict_summary.moderate_conflicts,
            self.sectoral.conflict_summary.synergies_identified
        ));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CountryProfile;
    use crate::provider::SimulationProvider;

    #[test]
    fn test_report_from_simulation() {
        let provider = SimulationProvider::new(CountryProfile::small_country(), 11).unwrap();
        let report = NssReport::build(&provider, 2030).unwrap();

        assert!(report.is_simulated);
        assert_eq!(report.scenario_comparison.len(), 4);
        assert_eq!(report.data_quality.len(), 3);
        assert!(report.summary().contains("Scenarios at 2030"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["year"], 2030);
    }

    #[test]
    fn test_off_horizon_year_still_reports() {
        let provider = SimulationProvider::new(CountryProfile::small_country(), 11).unwrap();
        let report = NssReport::build(&provider, 2033).unwrap();
        assert!(report.scenario_comparison.is_empty());
        assert!(report.summary().contains("no projections"));
    }
}
