//! Geography: data model, samplers and the synthetic generator

pub mod catalog;
pub mod generation;
pub mod model;
pub mod sampling;

pub use generation::SyntheticGeographyGenerator;
pub use model::{
    DevelopmentStatus, EnvironmentFeature, EnvironmentLayer, GeographyBundle, HierarchyClass,
    InfrastructureKind, Project, Region, RegionEconomy, RegionPopulation, RoadClass, RoadSegment,
    Settlement, CRS_WGS84,
};
