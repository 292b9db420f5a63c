//! Tabular records shared by the generator, the file loader and the diagnostics
//!
//! Every provider emits these exact types, so diagnostics never care where
//! the data came from.

use std::fmt;
use std::str::FromStr;

use geo_types::{LineString, MultiPolygon, Point};
use serde::{Deserialize, Serialize};

use crate::core::error::NssError;
use crate::core::types::{
    BilingualName, ProjectId, RegionId, RoadId, SettlementId, SpatialLevel,
};

/// Coordinate reference system for all geometries (WGS84 lon/lat degrees)
pub const CRS_WGS84: &str = "EPSG:4326";

/// Administrative unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub code: String,
    pub name: BilingualName,
    pub level: SpatialLevel,
    /// Parent unit; `None` only for the country itself
    pub parent_id: Option<RegionId>,
    pub geometry: MultiPolygon<f64>,
    pub area_sqkm: f64,
    pub centroid: Point<f64>,
}

/// Settlement tier by population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HierarchyClass {
    // Declared smallest first so `Ord` follows tier
    Village,
    Town,
    #[serde(rename = "Small City")]
    SmallCity,
    #[serde(rename = "Medium City")]
    MediumCity,
    #[serde(rename = "Large City")]
    LargeCity,
    Metropolis,
}

impl HierarchyClass {
    /// Largest tier first
    pub const ALL: [HierarchyClass; 6] = [
        HierarchyClass::Metropolis,
        HierarchyClass::LargeCity,
        HierarchyClass::MediumCity,
        HierarchyClass::SmallCity,
        HierarchyClass::Town,
        HierarchyClass::Village,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HierarchyClass::Metropolis => "Metropolis",
            HierarchyClass::LargeCity => "Large City",
            HierarchyClass::MediumCity => "Medium City",
            HierarchyClass::SmallCity => "Small City",
            HierarchyClass::Town => "Town",
            HierarchyClass::Village => "Village",
        }
    }

    /// Default minimum population for this tier
    pub fn default_threshold(&self) -> u64 {
        match self {
            HierarchyClass::Metropolis => 1_000_000,
            HierarchyClass::LargeCity => 500_000,
            HierarchyClass::MediumCity => 100_000,
            HierarchyClass::SmallCity => 50_000,
            HierarchyClass::Town => 10_000,
            HierarchyClass::Village => 0,
        }
    }

    /// Classify with the default thresholds
    pub fn from_population(population: u64) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|class| population >= class.default_threshold())
            .unwrap_or(HierarchyClass::Village)
    }
}

impl fmt::Display for HierarchyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Settlement point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    pub name: BilingualName,
    pub region_id: RegionId,
    pub population: u64,
    pub hierarchy_class: HierarchyClass,
    #[serde(default)]
    pub is_capital: bool,
    pub location: Point<f64>,
    /// 1 = most populous; ties keep input order
    #[serde(default)]
    pub rank: u32,
}

/// Regional population record for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPopulation {
    pub region_id: RegionId,
    pub name: String,
    pub year: i32,
    pub population: u64,
    pub pop_density: f64,
    pub urban_pop_pct: f64,
    #[serde(default)]
    pub scenario_id: Option<String>,
}

/// Regional economic record for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEconomy {
    pub region_id: RegionId,
    pub name: String,
    pub year: i32,
    pub gdp_billion_usd: f64,
    pub gdp_per_capita_usd: f64,
    pub employment_rate: f64,
    pub unemployment_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentStatus {
    Announced,
    Planned,
    UnderConstruction,
    Operational,
}

impl DevelopmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DevelopmentStatus::Announced => "announced",
            DevelopmentStatus::Planned => "planned",
            DevelopmentStatus::UnderConstruction => "under_construction",
            DevelopmentStatus::Operational => "operational",
        }
    }
}

impl FromStr for DevelopmentStatus {
    type Err = NssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "announced" => Ok(DevelopmentStatus::Announced),
            "planned" => Ok(DevelopmentStatus::Planned),
            "under_construction" => Ok(DevelopmentStatus::UnderConstruction),
            "operational" => Ok(DevelopmentStatus::Operational),
            other => Err(NssError::InvalidValue(format!(
                "unknown development status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadClass {
    Highway,
    Primary,
}

/// Road segment between two settlements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub id: RoadId,
    pub name: String,
    pub road_class: RoadClass,
    pub lanes: u8,
    /// Planar length x 111 km/degree; not geodesic
    pub length_km: f64,
    pub status: DevelopmentStatus,
    pub from: SettlementId,
    pub to: SettlementId,
    pub from_region: RegionId,
    pub to_region: RegionId,
    pub geometry: LineString<f64>,
}

impl RoadSegment {
    pub fn touches_region(&self, region_id: RegionId) -> bool {
        self.from_region == region_id || self.to_region == region_id
    }
}

/// Development project point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub project_type: String,
    pub sector: String,
    #[serde(default)]
    pub region_id: Option<RegionId>,
    #[serde(default)]
    pub region_name: Option<String>,
    pub status: DevelopmentStatus,
    pub start_year: i32,
    pub completion_year: i32,
    pub budget_billion_usd: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub jobs_created: u64,
    pub location: Point<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfrastructureKind {
    Roads,
    Rail,
    Airports,
    Ports,
    Power,
    Water,
}

impl InfrastructureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfrastructureKind::Roads => "roads",
            InfrastructureKind::Rail => "rail",
            InfrastructureKind::Airports => "airports",
            InfrastructureKind::Ports => "ports",
            InfrastructureKind::Power => "power",
            InfrastructureKind::Water => "water",
        }
    }
}

impl FromStr for InfrastructureKind {
    type Err = NssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "roads" => Ok(InfrastructureKind::Roads),
            "rail" => Ok(InfrastructureKind::Rail),
            "airports" => Ok(InfrastructureKind::Airports),
            "ports" => Ok(InfrastructureKind::Ports),
            "power" => Ok(InfrastructureKind::Power),
            "water" => Ok(InfrastructureKind::Water),
            other => Err(NssError::InvalidValue(format!(
                "unknown infrastructure type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentLayer {
    LandCover,
    ProtectedAreas,
    WaterBodies,
    Climate,
}

impl EnvironmentLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentLayer::LandCover => "land_cover",
            EnvironmentLayer::ProtectedAreas => "protected_areas",
            EnvironmentLayer::WaterBodies => "water_bodies",
            EnvironmentLayer::Climate => "climate",
        }
    }
}

impl FromStr for EnvironmentLayer {
    type Err = NssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "land_cover" => Ok(EnvironmentLayer::LandCover),
            "protected_areas" => Ok(EnvironmentLayer::ProtectedAreas),
            "water_bodies" => Ok(EnvironmentLayer::WaterBodies),
            "climate" => Ok(EnvironmentLayer::Climate),
            other => Err(NssError::InvalidValue(format!(
                "unknown environment layer '{}'",
                other
            ))),
        }
    }
}

/// Environmental polygon (protected area, water body, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentFeature {
    pub id: u32,
    pub region_id: RegionId,
    pub layer: EnvironmentLayer,
    pub name: String,
    pub geometry: MultiPolygon<f64>,
    pub area_sqkm: f64,
}

/// Everything one generator run produces, built eagerly and never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeographyBundle {
    pub profile_name: String,
    pub seed: u64,
    pub base_year: i32,
    pub capital_region: RegionId,
    pub regions: Vec<Region>,
    pub populations: Vec<RegionPopulation>,
    pub economy: Vec<RegionEconomy>,
    pub settlements: Vec<Settlement>,
    pub roads: Vec<RoadSegment>,
    pub projects: Vec<Project>,
    pub environment: Vec<EnvironmentFeature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_thresholds() {
        assert_eq!(HierarchyClass::from_population(1_000_000), HierarchyClass::Metropolis);
        assert_eq!(HierarchyClass::from_population(999_999), HierarchyClass::LargeCity);
        assert_eq!(HierarchyClass::from_population(100_000), HierarchyClass::MediumCity);
        assert_eq!(HierarchyClass::from_population(50_000), HierarchyClass::SmallCity);
        assert_eq!(HierarchyClass::from_population(10_000), HierarchyClass::Town);
        assert_eq!(HierarchyClass::from_population(0), HierarchyClass::Village);
    }

    #[test]
    fn test_hierarchy_ordering_follows_tier() {
        assert!(HierarchyClass::Metropolis > HierarchyClass::LargeCity);
        assert!(HierarchyClass::Town > HierarchyClass::Village);
    }

    #[test]
    fn test_hierarchy_serializes_with_label() {
        let json = serde_json::to_string(&HierarchyClass::LargeCity).unwrap();
        assert_eq!(json, "\"Large City\"");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "Under_Construction".parse::<DevelopmentStatus>().unwrap(),
            DevelopmentStatus::UnderConstruction
        );
        assert!("finished".parse::<DevelopmentStatus>().is_err());
    }
}
