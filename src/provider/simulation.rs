//! Provider backed by the synthetic geography generator

use crate::core::config::CountryProfile;
use crate::core::error::Result;
use crate::core::types::{RegionId, SpatialLevel};
use crate::geography::model::{
    DevelopmentStatus, EnvironmentFeature, EnvironmentLayer, InfrastructureKind, Project, Region,
    RegionEconomy, RegionPopulation, RoadSegment, Settlement,
};
use crate::geography::SyntheticGeographyGenerator;
use crate::provider::{DataProvider, DataResponse, Dataset, HealthReport, HealthStatus};

const PROVIDER_NAME: &str = "SimulationProvider";

/// Every answer comes from one eager generator run
pub struct SimulationProvider {
    dataset: Dataset,
}

impl SimulationProvider {
    pub fn new(profile: CountryProfile, seed: u64) -> Result<Self> {
        let generator = SyntheticGeographyGenerator::new(profile, seed)?;
        let country = generator.country_unit();
        let dataset = Dataset::new(PROVIDER_NAME, true, country, generator.into_bundle());
        Ok(Self { dataset })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl DataProvider for SimulationProvider {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_simulation(&self) -> bool {
        true
    }

    fn get_spatial_units(&self, level: SpatialLevel) -> Result<DataResponse<Vec<Region>>> {
        self.dataset.spatial_units(level)
    }

    fn get_settlements(
        &self,
        min_population: Option<u64>,
        region_id: Option<RegionId>,
    ) -> Result<DataResponse<Vec<Settlement>>> {
        Ok(self.dataset.settlements(min_population, region_id))
    }

    fn get_population(
        &self,
        level: SpatialLevel,
        year: i32,
        scenario_id: Option<&str>,
    ) -> Result<DataResponse<Vec<RegionPopulation>>> {
        self.dataset.population(level, year, scenario_id)
    }

    fn get_economic_data(
        &self,
        indicator: &str,
        level: SpatialLevel,
        year: i32,
    ) -> Result<DataResponse<Vec<RegionEconomy>>> {
        self.dataset.economy(indicator, level, year)
    }

    fn get_infrastructure(
        &self,
        kind: InfrastructureKind,
        region_id: Option<RegionId>,
    ) -> Result<DataResponse<Vec<RoadSegment>>> {
        Ok(self.dataset.infrastructure(kind, region_id))
    }

    fn get_environment(
        &self,
        layer: EnvironmentLayer,
        region_id: Option<RegionId>,
    ) -> Result<DataResponse<Vec<EnvironmentFeature>>> {
        Ok(self.dataset.environment(layer, region_id))
    }

    fn get_projects(
        &self,
        status: Option<DevelopmentStatus>,
        sector: Option<&str>,
    ) -> Result<DataResponse<Vec<Project>>> {
        Ok(self.dataset.projects(status, sector))
    }

    fn health_check(&self) -> HealthReport {
        let bundle = self.dataset.bundle();
        HealthReport::new(PROVIDER_NAME, true, HealthStatus::Ok)
            .with_detail("profile", bundle.profile_name.clone())
            .with_detail("seed", bundle.seed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::NssError;
    use crate::core::types::{COUNTRY_ID, LEVEL_COUNTRY, LEVEL_REGION};

    fn provider() -> SimulationProvider {
        SimulationProvider::new(CountryProfile::small_country(), 3).unwrap()
    }

    #[test]
    fn test_country_level_is_single_unit() {
        let provider = provider();
        let units = provider.get_spatial_units(LEVEL_COUNTRY).unwrap();
        assert_eq!(units.data.len(), 1);
        assert_eq!(units.data[0].id, COUNTRY_ID);
        assert_eq!(units.data[0].area_sqkm, CountryProfile::small_country().total_area_sqkm);
        assert!(units.is_simulated);
    }

    #[test]
    fn test_deeper_levels_relabel_regions() {
        let provider = provider();
        let regions = provider.get_spatial_units(LEVEL_REGION).unwrap().data;
        let level_four = provider.get_spatial_units(4).unwrap().data;
        assert_eq!(regions.len(), level_four.len());
        assert!(level_four.iter().all(|r| r.level == 4));
        assert!(matches!(provider.get_spatial_units(6), Err(NssError::InvalidLevel(6))));
        assert!(matches!(provider.get_spatial_units(0), Err(NssError::InvalidLevel(0))));
    }

    #[test]
    fn test_per_capita_gdp_follows_gdp_factor() {
        let provider = provider();
        let base = provider.get_economic_data("gdp", LEVEL_REGION, 2024).unwrap().data;
        let later = provider.get_economic_data("gdp", LEVEL_REGION, 2034).unwrap().data;
        let factor = 1.03f64.powi(10);
        for (b, l) in base.iter().zip(&later) {
            assert!((l.gdp_billion_usd - b.gdp_billion_usd * factor).abs() < 1e-9);
            // Population is not grown, so per capita moves with GDP
            let expected = b.gdp_per_capita_usd * factor;
            assert!((l.gdp_per_capita_usd - expected).abs() <= 1e-9 * expected.max(1.0));
        }
    }

    #[test]
    fn test_population_growth_default_baseline() {
        let provider = provider();
        let base = provider.get_population(LEVEL_REGION, 2024, None).unwrap().data;
        let later = provider.get_population(LEVEL_REGION, 2030, None).unwrap().data;
        let factor = 1.018f64.powi(6);
        for (b, l) in base.iter().zip(&later) {
            assert_eq!(l.population, (b.population as f64 * factor) as u64);
            assert_eq!(l.year, 2030);
        }
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        let provider = provider();
        let result = provider.get_population(LEVEL_REGION, 2030, Some("utopia"));
        assert!(matches!(result, Err(NssError::UnknownScenario(_))));
        let ok = provider
            .get_population(LEVEL_REGION, 2030, Some("accelerated"))
            .unwrap();
        assert_eq!(ok.data[0].scenario_id.as_deref(), Some("accelerated"));
    }

    #[test]
    fn test_other_infrastructure_is_empty_with_note() {
        let provider = provider();
        let rail = provider.get_infrastructure(InfrastructureKind::Rail, None).unwrap();
        assert!(rail.data.is_empty());
        assert!(rail.metadata.contains_key("note"));
    }

    #[test]
    fn test_health_ok() {
        let health = provider().health_check();
        assert_eq!(health.status, HealthStatus::Ok);
        assert!(health.is_simulation);
    }
}
