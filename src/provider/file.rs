//! Provider reading generator-shaped JSON tables from a directory

use std::fs;
use std::path::{Path, PathBuf};

use geo_types::Point;
use serde::de::DeserializeOwned;

use crate::core::error::{NssError, Result};
use crate::core::types::{RegionId, SpatialLevel, BASE_YEAR, COUNTRY_ID, LEVEL_REGION};
use crate::diagnostics::HierarchyThresholds;
use crate::geography::generation::{derive_settlement_tiers, merge_regions};
use crate::geography::model::{
    DevelopmentStatus, EnvironmentFeature, EnvironmentLayer, GeographyBundle, InfrastructureKind,
    Project, Region, RegionEconomy, RegionPopulation, RoadSegment, Settlement,
};
use crate::provider::{DataProvider, DataResponse, Dataset, HealthReport, HealthStatus};

const PROVIDER_NAME: &str = "FileProvider";

pub const REQUIRED_FILES: [&str; 5] = [
    "regions.json",
    "settlements.json",
    "population.json",
    "economy.json",
    "projects.json",
];

pub const OPTIONAL_FILES: [&str; 2] = ["roads.json", "environment.json"];

/// Tables loaded once at construction; optional ones may be absent
pub struct FileProvider {
    data_dir: PathBuf,
    missing_optional: Vec<&'static str>,
    dataset: Dataset,
}

impl FileProvider {
    /// Fails with `MissingData` when a required table is absent
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        for name in REQUIRED_FILES {
            let path = data_dir.join(name);
            if !path.is_file() {
                return Err(NssError::MissingData(path));
            }
        }

        let regions: Vec<Region> = read_table(&data_dir, "regions.json")?;
        let mut settlements: Vec<Settlement> = read_table(&data_dir, "settlements.json")?;
        derive_settlement_tiers(&mut settlements, &HierarchyThresholds::default());
        let populations: Vec<RegionPopulation> = read_table(&data_dir, "population.json")?;
        let economy: Vec<RegionEconomy> = read_table(&data_dir, "economy.json")?;
        let projects: Vec<Project> = read_table(&data_dir, "projects.json")?;

        let mut missing_optional = Vec::new();
        let roads: Vec<RoadSegment> = read_optional(&data_dir, "roads.json", &mut missing_optional)?;
        let environment: Vec<EnvironmentFeature> =
            read_optional(&data_dir, "environment.json", &mut missing_optional)?;

        let name = data_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        let capital_region = settlements
            .iter()
            .find(|s| s.is_capital)
            .map(|s| s.region_id)
            .or_else(|| regions.first().map(|r| r.id))
            .unwrap_or(COUNTRY_ID);
        let base_year = populations.first().map_or(BASE_YEAR, |p| p.year);

        let area_sqkm: f64 = regions
            .iter()
            .filter(|r| r.level == LEVEL_REGION)
            .map(|r| r.area_sqkm)
            .sum();
        let country = merge_regions(&name, area_sqkm, Point::new(0.0, 0.0), &regions);

        tracing::info!(
            "Loaded {} regions, {} settlements, {} projects from {}",
            regions.len(),
            settlements.len(),
            projects.len(),
            data_dir.display()
        );
        if !missing_optional.is_empty() {
            tracing::warn!("Optional tables missing: {}", missing_optional.join(", "));
        }

        let bundle = GeographyBundle {
            profile_name: name,
            seed: 0,
            base_year,
            capital_region,
            regions,
            populations,
            economy,
            settlements,
            roads,
            projects,
            environment,
        };

        Ok(Self {
            dataset: Dataset::new(PROVIDER_NAME, false, country, bundle),
            data_dir,
            missing_optional,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

/// Rows that fail to deserialize (missing column, wrong type) are `InvalidTable`
fn read_table<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = dir.join(name);
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| NssError::InvalidTable {
        path,
        reason: e.to_string(),
    })
}

fn read_optional<T: DeserializeOwned>(
    dir: &Path,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Result<Vec<T>> {
    if dir.join(name).is_file() {
        read_table(dir, name)
    } else {
        missing.push(name);
        Ok(Vec::new())
    }
}

impl DataProvider for FileProvider {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_simulation(&self) -> bool {
        false
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
        let status = if !self.data_dir.is_dir() {
            HealthStatus::Error
        } else if self.missing_optional.is_empty() {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        };

        let report = HealthReport::new(PROVIDER_NAME, false, status)
            .with_detail("data_dir", self.data_dir.display().to_string());
        if self.missing_optional.is_empty() {
            report
        } else {
            report.with_detail("missing", self.missing_optional.join(", "))
        }
    }
}
