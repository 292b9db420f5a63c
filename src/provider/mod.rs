//! Data providers: one interface over simulated and file-backed datasets
//!
//! Diagnostics and scenario code only see `DataProvider`, so they never
//! know whether the records came from the generator or from disk.

mod dataset;
mod factory;
mod file;
mod simulation;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::{NssError, Result};
use crate::core::types::{RegionId, SpatialLevel};
use crate::geography::model::{
    DevelopmentStatus, EnvironmentFeature, EnvironmentLayer, InfrastructureKind, Project, Region,
    RegionEconomy, RegionPopulation, RoadSegment, Settlement,
};

pub use dataset::Dataset;
pub use factory::create_provider;
pub use file::{FileProvider, OPTIONAL_FILES, REQUIRED_FILES};
pub use simulation::SimulationProvider;

/// Uniform envelope around every provider result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub source: String,
    pub retrieved_at: DateTime<Utc>,
    pub is_simulated: bool,
}

impl<T> DataResponse<T> {
    pub fn new(data: T, source: impl Into<String>, is_simulated: bool) -> Self {
        Self {
            data,
            metadata: BTreeMap::new(),
            source: source.into(),
            retrieved_at: Utc::now(),
            is_simulated,
        }
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DataResponse<U> {
        DataResponse {
            data: f(self.data),
            metadata: self.metadata,
            source: self.source,
            retrieved_at: self.retrieved_at,
            is_simulated: self.is_simulated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    Degraded,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub provider: String,
    pub is_simulation: bool,
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl HealthReport {
    pub fn new(provider: impl Into<String>, is_simulation: bool, status: HealthStatus) -> Self {
        Self {
            provider: provider.into(),
            is_simulation,
            status,
            timestamp: Utc::now(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// The seven queries every data source answers
pub trait DataProvider {
    fn provider_name(&self) -> &str;

    fn is_simulation(&self) -> bool;

    /// Units at `level`: 1 = country, 2 = regions, 3..=5 relabelled regions
    fn get_spatial_units(&self, level: SpatialLevel) -> Result<DataResponse<Vec<Region>>>;

    fn get_settlements(
        &self,
        min_population: Option<u64>,
        region_id: Option<RegionId>,
    ) -> Result<DataResponse<Vec<Settlement>>>;

    /// Population at `year`, grown by the scenario's rate (baseline when `None`)
    fn get_population(
        &self,
        level: SpatialLevel,
        year: i32,
        scenario_id: Option<&str>,
    ) -> Result<DataResponse<Vec<RegionPopulation>>>;

    fn get_economic_data(
        &self,
        indicator: &str,
        level: SpatialLevel,
        year: i32,
    ) -> Result<DataResponse<Vec<RegionEconomy>>>;

    fn get_infrastructure(
        &self,
        kind: InfrastructureKind,
        region_id: Option<RegionId>,
    ) -> Result<DataResponse<Vec<RoadSegment>>>;

    fn get_environment(
        &self,
        layer: EnvironmentLayer,
        region_id: Option<RegionId>,
    ) -> Result<DataResponse<Vec<EnvironmentFeature>>>;

    fn get_projects(
        &self,
        status: Option<DevelopmentStatus>,
        sector: Option<&str>,
    ) -> Result<DataResponse<Vec<Project>>>;

    fn health_check(&self) -> HealthReport {
        HealthReport::new(self.provider_name(), self.is_simulation(), HealthStatus::Ok)
    }
}

/// Closed set of provider implementations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Simulation,
    File,
    /// File provider when configured and healthy, simulation otherwise
    #[default]
    Auto,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::Simulation, ProviderKind::File, ProviderKind::Auto];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Simulation => "simulation",
            ProviderKind::File => "file",
            ProviderKind::Auto => "auto",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = NssError;

    fn from_str(s: &str) -> Result<Self> {
        ProviderKind::ALL
            .iter()
            .find(|kind| kind.as_str() == s.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| NssError::UnknownProvider(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("Simulation".parse::<ProviderKind>().unwrap(), ProviderKind::Simulation);
        assert_eq!("auto".parse::<ProviderKind>().unwrap(), ProviderKind::Auto);
        let err = "postgres".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, NssError::UnknownProvider(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_response_metadata() {
        let response = DataResponse::new(vec![1, 2, 3], "test", true)
            .with_meta("count", 3)
            .map(|v| v.len());
        assert_eq!(response.data, 3);
        assert_eq!(response.metadata["count"], serde_json::json!(3));
        assert!(response.is_simulated);
    }
}
