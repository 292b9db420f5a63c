//! Data-quality validation for spatial datasets
//!
//! Nothing here returns an error: every problem is recorded in a
//! `DataQualityReport` and the caller decides whether to proceed.

mod geometry;
mod quality;

pub use geometry::{polygon_is_valid, GeometricValidator};
pub use quality::{
    CheckResult, DataQualityReport, SpatialDataValidator, SpatialRecord, DEFAULT_RANGES,
    REQUIRED_COLUMNS,
};

/// Geometry error types
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    InsufficientVertices { count: usize, minimum: usize },
    UnclosedRing { ring: usize },
    SelfIntersecting { ring: usize },
    ZeroArea,
    NonFiniteCoordinate,
}
