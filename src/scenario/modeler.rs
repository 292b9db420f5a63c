//! Scenario projections, comparison and reporting

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{region_key, BASE_YEAR};
use crate::scenario::coefficients::{ScenarioCoefficients, ScenarioType};

/// Fixed projection checkpoints
pub const HORIZON_YEARS: [i32; 4] = [2025, 2030, 2040, 2050];

/// Years compared in the scenario report
pub const REPORT_YEARS: [i32; 2] = [2030, 2050];

/// Share of the national trajectory given to one region before its multiplier
const REGIONAL_BASE_SHARE: f64 = 0.1;

/// (region, growth multiplier, characteristic)
const REGIONAL_FACTORS: [(&str, f64, &str); 6] = [
    ("Riyadh", 1.2, "diversification_leader"),
    ("Eastern Province", 0.9, "oil_dependent"),
    ("Makkah", 1.1, "tourism_focus"),
    ("Madinah", 1.0, "tourism_focus"),
    ("Tabuk", 1.5, "neom_effect"),
    ("Al-Qassim", 0.8, "agricultural_focus"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicProjection {
    pub year: i32,
    /// Millions
    pub total_population: f64,
    pub saudi_population: f64,
    pub expat_population: f64,
    pub urban_population_pct: f64,
    pub riyadh_share_pct: f64,
    pub youth_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicProjection {
    pub year: i32,
    pub gdp_billion_usd: f64,
    pub gdp_per_capita_usd: f64,
    pub oil_gdp_share_pct: f64,
    pub tourism_gdp_share_pct: f64,
    pub tech_gdp_share_pct: f64,
    pub unemployment_rate_pct: f64,
    pub female_labor_participation_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialProjection {
    pub year: i32,
    pub urbanized_area_sqkm: f64,
    pub new_cities_completed: u32,
    pub protected_area_pct: f64,
    pub renewable_capacity_gw: f64,
    pub rail_network_km: f64,
    pub desalination_capacity_mcm: f64,
}

/// One development trajectory over the horizon years
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_type: ScenarioType,
    pub name: String,
    pub description: String,
    pub key_assumptions: Vec<String>,
    pub key_risks: Vec<String>,
    pub key_opportunities: Vec<String>,
    pub demographic_path: Vec<DemographicProjection>,
    pub economic_path: Vec<EconomicProjection>,
    pub spatial_path: Vec<SpatialProjection>,
    pub probability: f64,
}

impl Scenario {
    /// Project every field of `scenario_type` at each horizon year
    pub fn build(scenario_type: ScenarioType, base_year: i32) -> Self {
        let coefficients = scenario_type.coefficients();
        let narrative = scenario_type.narrative();

        let mut demographic_path = Vec::with_capacity(HORIZON_YEARS.len());
        let mut economic_path = Vec::with_capacity(HORIZON_YEARS.len());
        let mut spatial_path = Vec::with_capacity(HORIZON_YEARS.len());
        for year in HORIZON_YEARS {
            let (demographic, economic, spatial) = project(coefficients, year, year - base_year);
            demographic_path.push(demographic);
            economic_path.push(economic);
            spatial_path.push(spatial);
        }

        Self {
            scenario_type,
            name: narrative.name.to_string(),
            description: narrative.description.to_string(),
            key_assumptions: owned(narrative.assumptions),
            key_risks: owned(narrative.risks),
            key_opportunities: owned(narrative.opportunities),
            demographic_path,
            economic_path,
            spatial_path,
            probability: coefficients.probability,
        }
    }

    pub fn demographic_at(&self, year: i32) -> Option<&DemographicProjection> {
        self.demographic_path.iter().find(|d| d.year == year)
    }

    pub fn economic_at(&self, year: i32) -> Option<&EconomicProjection> {
        self.economic_path.iter().find(|e| e.year == year)
    }

    pub fn spatial_at(&self, year: i32) -> Option<&SpatialProjection> {
        self.spatial_path.iter().find(|s| s.year == year)
    }
}

/// Shared projection formula; scenarios only differ in `c`
fn project(
    c: &ScenarioCoefficients,
    year: i32,
    years: i32,
) -> (DemographicProjection, EconomicProjection, SpatialProjection) {
    let population = c.population.at(years);
    let gdp = c.gdp.at(years);

    let demographic = DemographicProjection {
        year,
        total_population: population,
        saudi_population: population * c.national_share,
        expat_population: population * (1.0 - c.national_share),
        urban_population_pct: c.urbanization_pct.at(years),
        riyadh_share_pct: c.primary_city_share_pct.at(years),
        youth_share_pct: c.youth_share_pct.at(years),
    };

    let economic = EconomicProjection {
        year,
        gdp_billion_usd: gdp,
        gdp_per_capita_usd: gdp_per_capita(gdp, population),
        oil_gdp_share_pct: c.oil_share_pct.at(years),
        tourism_gdp_share_pct: c.tourism_share_pct.at(years),
        tech_gdp_share_pct: c.tech_share_pct.at(years),
        unemployment_rate_pct: c.unemployment_pct.at(years),
        female_labor_participation_pct: c.female_participation_pct.at(years),
    };

    let spatial = SpatialProjection {
        year,
        urbanized_area_sqkm: c.urbanized_area_sqkm.at(years),
        new_cities_completed: c.new_cities.at(years).max(0.0) as u32,
        protected_area_pct: c.protected_area_pct.at(years),
        renewable_capacity_gw: c.renewable_capacity_gw.at(years),
        rail_network_km: c.rail_network_km.at(years),
        desalination_capacity_mcm: c.desalination_capacity_mcm.at(years),
    };

    (demographic, economic, spatial)
}

/// USD per person from billions of USD over millions of people
pub fn gdp_per_capita(gdp_billion_usd: f64, population_millions: f64) -> f64 {
    if population_millions > 0.0 {
        (gdp_billion_usd * 1e9) / (population_millions * 1e6)
    } else {
        0.0
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// One row of a cross-scenario comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenario: ScenarioType,
    pub name: String,
    pub population_m: f64,
    pub gdp_billion_usd: f64,
    pub gdp_per_capita_usd: f64,
    pub oil_share_pct: f64,
    pub tourism_share_pct: f64,
    pub urban_pct: f64,
    pub renewable_gw: f64,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalFactor {
    pub growth_multiplier: f64,
    pub characteristic: Option<String>,
}

impl RegionalFactor {
    /// Lookup by region name; " Region" and " Province" suffixes are ignored
    pub fn for_region(region_name: &str) -> Self {
        let key = region_key(region_name);
        REGIONAL_FACTORS
            .iter()
            .find(|(name, _, _)| region_key(name) == key)
            .map(|(_, multiplier, characteristic)| Self {
                growth_multiplier: *multiplier,
                characteristic: Some(characteristic.to_string()),
            })
            .unwrap_or(Self {
                growth_multiplier: 1.0,
                characteristic: None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalPoint {
    pub year: i32,
    pub population_m: f64,
    pub gdp_billion_usd: f64,
}

/// Coarse regional allocation of a national trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalProjection {
    pub region: String,
    pub scenario: String,
    pub projections: Vec<RegionalPoint>,
    pub characteristics: RegionalFactor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub description: String,
    pub probability: f64,
    pub key_assumptions: Vec<String>,
    pub key_risks: Vec<String>,
    pub key_opportunities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFindings {
    pub population_range_2030: String,
    pub gdp_range_2030: String,
    pub population_range_2050: String,
    pub gdp_range_2050: String,
    pub diversification_success: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub title: String,
    pub base_year: i32,
    pub target_years: Vec<i32>,
    pub scenarios_analyzed: usize,
    pub scenario_summaries: BTreeMap<String, ScenarioSummary>,
    pub comparison_2030: Vec<ScenarioComparison>,
    pub comparison_2050: Vec<ScenarioComparison>,
    pub key_findings: KeyFindings,
    pub recommendations: BTreeMap<String, Vec<String>>,
    pub data_sources: Vec<String>,
}

/// Holds the four fixed scenarios, built once
#[derive(Debug, Clone)]
pub struct ScenarioModeler {
    base_year: i32,
    scenarios: BTreeMap<ScenarioType, Scenario>,
}

impl Default for ScenarioModeler {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioModeler {
    pub fn new() -> Self {
        let scenarios = ScenarioType::ALL
            .iter()
            .map(|t| (*t, Scenario::build(*t, BASE_YEAR)))
            .collect();
        Self {
            base_year: BASE_YEAR,
            scenarios,
        }
    }

    pub fn base_year(&self) -> i32 {
        self.base_year
    }

    pub fn scenario(&self, scenario_type: ScenarioType) -> &Scenario {
        // Every variant is inserted in new()
        &self.scenarios[&scenario_type]
    }

    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    pub fn population_growth_rate(&self, scenario_type: ScenarioType) -> f64 {
        scenario_type.coefficients().population_growth()
    }

    /// Compare scenarios at `year`
    ///
    /// Only exact horizon years match; a scenario without a record at `year`
    /// is left out, so other years give an empty table.
    pub fn compare_scenarios(&self, year: i32) -> Vec<ScenarioComparison> {
        let rows: Vec<ScenarioComparison> = self
            .scenarios
            .values()
            .filter_map(|s| {
                let demographic = s.demographic_at(year)?;
                let economic = s.economic_at(year)?;
                let spatial = s.spatial_at(year)?;
                Some(ScenarioComparison {
                    scenario: s.scenario_type,
                    name: s.name.clone(),
                    population_m: demographic.total_population,
                    gdp_billion_usd: economic.gdp_billion_usd,
                    gdp_per_capita_usd: gdp_per_capita(
                        economic.gdp_billion_usd,
                        demographic.total_population,
                    ),
                    oil_share_pct: economic.oil_gdp_share_pct,
                    tourism_share_pct: economic.tourism_gdp_share_pct,
                    urban_pct: demographic.urban_population_pct,
                    renewable_gw: spatial.renewable_capacity_gw,
                    probability: s.probability,
                })
            })
            .collect();

        if rows.is_empty() {
            tracing::debug!("No scenario projections for year {}", year);
        }
        rows
    }

    /// Scale the national trajectory by the region's growth multiplier
    pub fn project_region(&self, region_name: &str, scenario_type: ScenarioType) -> RegionalProjection {
        let scenario = self.scenario(scenario_type);
        let factor = RegionalFactor::for_region(region_name);
        let share = REGIONAL_BASE_SHARE * factor.growth_multiplier;

        let projections = HORIZON_YEARS
            .iter()
            .filter_map(|&year| {
                let demographic = scenario.demographic_at(year)?;
                let economic = scenario.economic_at(year)?;
                Some(RegionalPoint {
                    year,
                    population_m: demographic.total_population * share,
                    gdp_billion_usd: economic.gdp_billion_usd * share,
                })
            })
            .collect();

        RegionalProjection {
            region: region_name.to_string(),
            scenario: scenario.name.clone(),
            projections,
            characteristics: factor,
        }
    }

    pub fn generate_scenario_report(&self) -> ScenarioReport {
        let comparison_2030 = self.compare_scenarios(REPORT_YEARS[0]);
        let comparison_2050 = self.compare_scenarios(REPORT_YEARS[1]);

        let scenario_summaries = self
            .scenarios
            .values()
            .map(|s| {
                (
                    s.scenario_type.key().to_string(),
                    ScenarioSummary {
                        name: s.name.clone(),
                        description: s.description.clone(),
                        probability: s.probability,
                        key_assumptions: first_three(&s.key_assumptions),
                        key_risks: first_three(&s.key_risks),
                        key_opportunities: first_three(&s.key_opportunities),
                    },
                )
            })
            .collect();

        let key_findings = KeyFindings {
            population_range_2030: population_range(&comparison_2030),
            gdp_range_2030: gdp_range(&comparison_2030),
            population_range_2050: population_range(&comparison_2050),
            gdp_range_2050: gdp_range(&comparison_2050),
            diversification_success: "Vision 2030 scenario achieves <20% oil dependence by 2030"
                .to_string(),
        };

        let mut recommendations = BTreeMap::new();
        recommendations.insert(
            "planning".to_string(),
            owned(&[
                "Adopt flexible spatial planning accommodating multiple scenarios",
                "Prioritize infrastructure investments robust across scenarios",
                "Develop adaptive management frameworks",
            ]),
        );
        recommendations.insert(
            "monitoring".to_string(),
            owned(&[
                "Establish scenario tracking indicators",
                "Create early warning system for trajectory deviation",
                "Regular scenario updates (bi-annual)",
            ]),
        );
        recommendations.insert(
            "resilience".to_string(),
            owned(&[
                "Build redundancy in critical systems",
                "Diversify economic corridors",
                "Protect natural capital as insurance",
            ]),
        );

        tracing::info!(
            "Scenario report: {} scenarios, {} rows for {}, {} rows for {}",
            self.scenarios.len(),
            comparison_2030.len(),
            REPORT_YEARS[0],
            comparison_2050.len(),
            REPORT_YEARS[1]
        );

        ScenarioReport {
            title: "Scenario Analysis: Saudi Arabia 2030/2050".to_string(),
            base_year: self.base_year,
            target_years: REPORT_YEARS.to_vec(),
            scenarios_analyzed: self.scenarios.len(),
            scenario_summaries,
            comparison_2030,
            comparison_2050,
            key_findings,
            recommendations,
            data_sources: owned(&[
                "GASTAT demographic projections",
                "Vision 2030 official targets",
                "IMF economic forecasts",
                "SAMA annual reports",
                "Academic research on KSA development",
            ]),
        }
    }
}

fn first_three(items: &[String]) -> Vec<String> {
    items.iter().take(3).cloned().collect()
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn population_range(rows: &[ScenarioComparison]) -> String {
    match min_max(rows.iter().map(|r| r.population_m)) {
        Some((lo, hi)) => format!("{:.1}M - {:.1}M", lo, hi),
        None => "n/a".to_string(),
    }
}

fn gdp_range(rows: &[ScenarioComparison]) -> String {
    match min_max(rows.iter().map(|r| r.gdp_billion_usd)) {
        Some((lo, hi)) => format!("${:.0}B - ${:.0}B", lo, hi),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_2030_by_hand() {
        let modeler = ScenarioModeler::new();
        let rows = modeler.compare_scenarios(2030);
        let baseline = rows
            .iter()
            .find(|r| r.scenario == ScenarioType::Baseline)
            .unwrap();

        let population = 36.4 * 1.018f64.powi(6);
        let gdp = 1108.0 * 1.03f64.powi(6);
        assert!((baseline.population_m - population).abs() < 1e-9);
        assert!((baseline.gdp_billion_usd - gdp).abs() < 1e-9);
        assert!((baseline.gdp_per_capita_usd - gdp * 1e9 / (population * 1e6)).abs() < 1e-6);
        assert!((baseline.gdp_per_capita_usd - 32_600.0).abs() < 100.0);
    }

    #[test]
    fn test_off_horizon_year_is_empty() {
        let modeler = ScenarioModeler::new();
        assert!(modeler.compare_scenarios(2035).is_empty());
        assert_eq!(modeler.compare_scenarios(2050).len(), 4);
    }

    #[test]
    fn test_population_split_sums_to_total() {
        let modeler = ScenarioModeler::new();
        for scenario in modeler.scenarios() {
            for d in &scenario.demographic_path {
                let sum = d.saudi_population + d.expat_population;
                assert!((sum - d.total_population).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_new_cities_stepped() {
        let scenario = Scenario::build(ScenarioType::Baseline, BASE_YEAR);
        let cities: Vec<u32> = scenario
            .spatial_path
            .iter()
            .map(|s| s.new_cities_completed)
            .collect();
        assert_eq!(cities, vec![1, 2, 3, 3]);
    }

    #[test]
    fn test_project_region_applies_multiplier() {
        let modeler = ScenarioModeler::new();
        let tabuk = modeler.project_region("Tabuk Region", ScenarioType::Baseline);
        let unknown = modeler.project_region("Nowhere", ScenarioType::Baseline);

        assert_eq!(tabuk.characteristics.growth_multiplier, 1.5);
        assert_eq!(tabuk.characteristics.characteristic.as_deref(), Some("neom_effect"));
        assert_eq!(unknown.characteristics.growth_multiplier, 1.0);
        assert_eq!(tabuk.projections.len(), HORIZON_YEARS.len());

        let ratio = tabuk.projections[1].population_m / unknown.projections[1].population_m;
        assert!((ratio - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_generated_region_names_find_their_factor() {
        let profile = crate::core::config::CountryProfile::saudi_arabia();
        for name in ["Eastern Region", "Eastern Province"] {
            let factor = RegionalFactor::for_region(name);
            assert_eq!(factor.growth_multiplier, 0.9, "{}", name);
            assert_eq!(factor.characteristic.as_deref(), Some("oil_dependent"));
        }
        let matched = profile
            .region_names
            .iter()
            .filter(|n| RegionalFactor::for_region(n).characteristic.is_some())
            .count();
        assert_eq!(matched, REGIONAL_FACTORS.len());
    }

    #[test]
    fn test_report_ranges() {
        let report = ScenarioModeler::new().generate_scenario_report();
        assert_eq!(report.scenarios_analyzed, 4);
        assert_eq!(report.scenario_summaries["baseline"].key_assumptions.len(), 3);
        assert!(report.key_findings.population_range_2030.ends_with('M'));
        assert!(report.key_findings.gdp_range_2050.starts_with('$'));
        assert_eq!(report.recommendations.len(), 3);
    }
}
