//! Core type definitions used throughout the codebase

use std::fmt;

use geo_types::{coord, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// Administrative unit identifier (1-based, contiguous after generation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u32);

/// Settlement identifier (1-based, global across regions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SettlementId(pub u32);

/// Road segment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoadId(pub u32);

/// Development project identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub u32);

/// Identifier of the country-level unit that parents every region
pub const COUNTRY_ID: RegionId = RegionId(0);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RG-{:02}", self.0)
    }
}

impl fmt::Display for SettlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Administrative hierarchy level: 1=country, 2=region, 3=province, 4=district, 5=locality
pub type SpatialLevel = u8;

pub const LEVEL_COUNTRY: SpatialLevel = 1;
pub const LEVEL_REGION: SpatialLevel = 2;
pub const MAX_LEVEL: SpatialLevel = 5;

/// Year the generated tables describe; projections compound from here
pub const BASE_YEAR: i32 = 2024;

/// Lookup key for a region name: "Eastern Region" and "Eastern Province" both give "Eastern"
pub fn region_key(name: &str) -> &str {
    let name = name.trim();
    let name = name.strip_suffix(" Region").unwrap_or(name);
    name.strip_suffix(" Province").unwrap_or(name)
}

/// Names carried in both English and Arabic
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BilingualName {
    pub en: String,
    pub ar: String,
}

impl BilingualName {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }
}

/// Geographic bounding box in degrees (lon = x, lat = y)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Corners are finite and inside lon [-180, 180], lat [-90, 90]
    pub fn is_geographic(&self) -> bool {
        let lon = -180.0..=180.0;
        let lat = -90.0..=90.0;
        lon.contains(&self.min_x)
            && lon.contains(&self.max_x)
            && lat.contains(&self.min_y)
            && lat.contains(&self.max_y)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        Rect::new(
            coord! { x: self.min_x, y: self.min_y },
            coord! { x: self.max_x, y: self.max_y },
        )
        .to_polygon()
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}
