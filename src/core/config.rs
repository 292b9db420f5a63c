//! Country profiles and run configuration
//!
//! Profiles are plain values: construct one from a preset, a TOML file, or by
//! hand, and pass it into the generator. There is no process-wide registry.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{NssError, Result};
use crate::core::types::BoundingBox;
use crate::provider::ProviderKind;

/// Environment variable naming the directory served by the file provider
pub const DATA_DIR_ENV: &str = "NSS_DATA_DIR";

/// Static description of a country's scale and inequality targets
///
/// Consumed once by the geography generator; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub name: String,
    pub total_population: u64,
    pub total_area_sqkm: f64,

    /// Requested number of level-2 regions
    ///
    /// Clipping against the bounding box may discard degenerate polygons,
    /// so the generated count can be lower.
    pub num_regions: u32,

    pub gdp_billion_usd: f64,
    pub urban_population_pct: f64,
    pub center_lat: f64,
    pub center_lon: f64,
    pub bbox: BoundingBox,

    // === DISTRIBUTION TARGETS ===
    /// Target spatial inequality (Gini, 0-1)
    #[serde(default = "default_population_gini")]
    pub population_gini: f64,

    /// Largest settlement / sum of the next three
    ///
    /// Realised through the capital region's population share, which is
    /// forced to `max(shares) * primacy_ratio / 2` before renormalising.
    #[serde(default = "default_primacy_ratio")]
    pub primacy_ratio: f64,

    /// Target HHI for GDP
    #[serde(default = "default_economic_concentration")]
    pub economic_concentration: f64,

    /// Index (into generated regions) of the designated capital region
    #[serde(default)]
    pub capital_region: usize,

    /// Names for generated regions, in generation order
    ///
    /// Regions past the end of the list are named `Region N`.
    #[serde(default)]
    pub region_names: Vec<String>,
}

fn default_population_gini() -> f64 {
    0.45
}

fn default_primacy_ratio() -> f64 {
    3.5
}

fn default_economic_concentration() -> f64 {
    0.6
}

impl CountryProfile {
    /// Saudi Arabia, calibrated to 2024 figures
    pub fn saudi_arabia() -> Self {
        Self {
            name: "Kingdom of Saudi Arabia".into(),
            total_population: 36_400_000,
            total_area_sqkm: 2_149_690.0,
            num_regions: 13,
            gdp_billion_usd: 1_108.0,
            urban_population_pct: 84.3,
            center_lat: 23.8859,
            center_lon: 45.0792,
            bbox: BoundingBox::new(34.5, 16.4, 55.7, 32.2),
            population_gini: 0.55,
            primacy_ratio: 4.5,
            economic_concentration: 0.68,
            capital_region: 0,
            region_names: [
                "Riyadh Region",
                "Makkah Region",
                "Eastern Region",
                "Madinah Region",
                "Al-Qassim Region",
                "Asir Region",
                "Tabuk Region",
                "Hail Region",
                "Northern Borders",
                "Jazan Region",
                "Najran Region",
                "Al-Baha Region",
                "Al-Jouf Region",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    pub fn medium_country() -> Self {
        Self {
            name: "Medium Country".into(),
            total_population: 15_000_000,
            total_area_sqkm: 500_000.0,
            num_regions: 8,
            gdp_billion_usd: 200.0,
            urban_population_pct: 70.0,
            center_lat: 35.0,
            center_lon: 10.0,
            bbox: BoundingBox::new(5.0, 30.0, 15.0, 40.0),
            population_gini: 0.40,
            primacy_ratio: 2.8,
            economic_concentration: 0.50,
            capital_region: 0,
            region_names: Vec::new(),
        }
    }

    pub fn small_country() -> Self {
        Self {
            name: "Small Country".into(),
            total_population: 5_000_000,
            total_area_sqkm: 100_000.0,
            num_regions: 5,
            gdp_billion_usd: 50.0,
            urban_population_pct: 60.0,
            center_lat: 40.0,
            center_lon: 20.0,
            bbox: BoundingBox::new(18.0, 38.0, 22.0, 42.0),
            population_gini: 0.35,
            primacy_ratio: 2.0,
            economic_concentration: 0.40,
            capital_region: 0,
            region_names: Vec::new(),
        }
    }

    /// Resolve a preset by name
    pub fn preset(name: &str) -> Result<Self> {
        match name {
            "country_x" | "saudi_arabia" => Ok(Self::saudi_arabia()),
            "medium_country" => Ok(Self::medium_country()),
            "small_country" => Ok(Self::small_country()),
            other => Err(NssError::UnknownProfile(other.to_string())),
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &["country_x", "saudi_arabia", "medium_country", "small_country"]
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let profile: Self = toml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check every ratio is in its natural range
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(NssError::InvalidProfile(msg));

        if self.total_population == 0 {
            return invalid("total_population must be positive".into());
        }
        if !(self.total_area_sqkm > 0.0 && self.total_area_sqkm.is_finite()) {
            return invalid(format!(
                "total_area_sqkm ({}) must be positive and finite",
                self.total_area_sqkm
            ));
        }
        for (field, value) in [
            ("gdp_billion_usd", self.gdp_billion_usd),
            ("center_lat", self.center_lat),
            ("center_lon", self.center_lon),
            ("primacy_ratio", self.primacy_ratio),
        ] {
            if !value.is_finite() {
                return invalid(format!("{} ({}) must be finite", field, value));
            }
        }
        if self.num_regions == 0 {
            return invalid("num_regions must be at least 1".into());
        }
        if !self.bbox.is_geographic() {
            return invalid(format!(
                "bounding box {:?} must lie within lon [-180, 180], lat [-90, 90]",
                self.bbox
            ));
        }
        if self.bbox.is_degenerate() {
            return invalid(format!("bounding box {:?} has no extent", self.bbox));
        }
        if !(0.0..=100.0).contains(&self.urban_population_pct) {
            return invalid(format!(
                "urban_population_pct ({}) must be within [0, 100]",
                self.urban_population_pct
            ));
        }
        if !(0.0..=1.0).contains(&self.population_gini) {
            return invalid(format!(
                "population_gini ({}) must be within [0, 1]",
                self.population_gini
            ));
        }
        if !(0.0..=1.0).contains(&self.economic_concentration) {
            return invalid(format!(
                "economic_concentration ({}) must be within [0, 1]",
                self.economic_concentration
            ));
        }
        if !(self.primacy_ratio > 0.0) {
            return invalid(format!(
                "primacy_ratio ({}) must be positive",
                self.primacy_ratio
            ));
        }
        if self.gdp_billion_usd < 0.0 {
            return invalid("gdp_billion_usd must not be negative".into());
        }

        Ok(())
    }

    /// Name for the region generated at `index` (0-based)
    pub fn region_name(&self, index: usize) -> String {
        self.region_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Region {}", index + 1))
    }
}

impl Default for CountryProfile {
    fn default() -> Self {
        Self::saudi_arabia()
    }
}

/// Which provider to build and how to seed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Preset name, ignored when `profile_file` is set
    #[serde(default = "default_profile_name")]
    pub profile: String,

    #[serde(default)]
    pub profile_file: Option<PathBuf>,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Directory for the file provider; falls back to `NSS_DATA_DIR`
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_profile_name() -> String {
    "saudi_arabia".into()
}

fn default_seed() -> u64 {
    42
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            profile: default_profile_name(),
            profile_file: None,
            seed: default_seed(),
            data_dir: None,
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build the country profile this run refers to
    pub fn country_profile(&self) -> Result<CountryProfile> {
        match &self.profile_file {
            Some(path) => CountryProfile::load(path),
            None => {
                let profile = CountryProfile::preset(&self.profile)?;
                profile.validate()?;
                Ok(profile)
            }
        }
    }

    /// Configured data directory, or `NSS_DATA_DIR` when unset
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }
}
