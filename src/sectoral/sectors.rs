//! Economic sector reference profiles

use serde::Serialize;

use crate::core::types::region_key;
use crate::sectoral::matrix::LandUse;

/// Marker in `key_regions` for sectors active everywhere
pub const ALL_REGIONS: &str = "All regions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterIntensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectorProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub name_ar: &'static str,
    pub gdp_contribution_pct: f64,
    pub employment_share_pct: f64,
    pub growth_rate_pct: f64,
    pub vision2030_priority: bool,
    pub land_requirements: &'static [&'static str],
    pub water_intensity: WaterIntensity,
    pub key_regions: &'static [&'static str],
    /// Land use the sector occupies in conflict analysis
    pub land_use: LandUse,
}

impl SectorProfile {
    /// Region names match with or without a " Region" or " Province" suffix
    pub fn is_active_in(&self, region: &str) -> bool {
        let region = region_key(region);
        self.key_regions == [ALL_REGIONS]
            || self.key_regions.iter().any(|r| region_key(r) == region)
    }
}

pub static SECTOR_PROFILES: [SectorProfile; 10] = [
    SectorProfile {
        key: "oil_gas",
        name: "Oil & Gas",
        name_ar: "النفط والغاز",
        gdp_contribution_pct: 38.0,
        employment_share_pct: 3.5,
        growth_rate_pct: 2.5,
        vision2030_priority: false,
        land_requirements: &["industrial_zones", "coastal_terminals", "pipeline_corridors"],
        water_intensity: WaterIntensity::High,
        key_regions: &["Eastern Province", "Riyadh"],
        land_use: LandUse::Industrial,
    },
    SectorProfile {
        key: "manufacturing",
        name: "Manufacturing",
        name_ar: "الصناعة التحويلية",
        gdp_contribution_pct: 13.0,
        employment_share_pct: 8.5,
        growth_rate_pct: 5.2,
        vision2030_priority: true,
        land_requirements: &["industrial_zones", "logistics_parks", "utilities"],
        water_intensity: WaterIntensity::High,
        key_regions: &["Riyadh", "Eastern Province", "Makkah"],
        land_use: LandUse::Industrial,
    },
    SectorProfile {
        key: "tourism",
        name: "Tourism & Entertainment",
        name_ar: "السياحة والترفيه",
        gdp_contribution_pct: 5.0,
        employment_share_pct: 6.0,
        growth_rate_pct: 15.0,
        vision2030_priority: true,
        land_requirements: &["coastal_zones", "heritage_sites", "entertainment_districts"],
        water_intensity: WaterIntensity::Medium,
        key_regions: &["Makkah", "Madinah", "Riyadh", "Tabuk", "Asir"],
        land_use: LandUse::Tourism,
    },
    SectorProfile {
        key: "real_estate",
        name: "Real Estate & Construction",
        name_ar: "العقارات والإنشاءات",
        gdp_contribution_pct: 7.5,
        employment_share_pct: 15.0,
        growth_rate_pct: 8.0,
        vision2030_priority: true,
        land_requirements: &["residential_zones", "commercial_zones", "mixed_use"],
        water_intensity: WaterIntensity::Medium,
        key_regions: &["Riyadh", "Makkah", "Eastern Province"],
        land_use: LandUse::Residential,
    },
    SectorProfile {
        key: "agriculture",
        name: "Agriculture",
        name_ar: "الزراعة",
        gdp_contribution_pct: 2.5,
        employment_share_pct: 6.5,
        growth_rate_pct: 3.0,
        vision2030_priority: true,
        land_requirements: &["agricultural_land", "water_sources", "rural_zones"],
        water_intensity: WaterIntensity::High,
        key_regions: &["Al-Qassim", "Riyadh", "Hail", "Al-Jouf"],
        land_use: LandUse::Agricultural,
    },
    SectorProfile {
        key: "mining",
        name: "Mining",
        name_ar: "التعدين",
        gdp_contribution_pct: 3.5,
        employment_share_pct: 1.5,
        growth_rate_pct: 12.0,
        vision2030_priority: true,
        land_requirements: &["mining_zones", "processing_plants", "transport_corridors"],
        water_intensity: WaterIntensity::Medium,
        key_regions: &["Northern Borders", "Madinah", "Tabuk"],
        land_use: LandUse::Mining,
    },
    SectorProfile {
        key: "logistics",
        name: "Logistics & Transport",
        name_ar: "اللوجستيات والنقل",
        gdp_contribution_pct: 6.0,
        employment_share_pct: 7.0,
        growth_rate_pct: 9.0,
        vision2030_priority: true,
        land_requirements: &["ports", "airports", "logistics_parks", "transport_corridors"],
        water_intensity: WaterIntensity::Low,
        key_regions: &["Riyadh", "Eastern Province", "Makkah"],
        land_use: LandUse::Infrastructure,
    },
    SectorProfile {
        key: "technology",
        name: "Technology & Digital",
        name_ar: "التقنية والرقمنة",
        gdp_contribution_pct: 4.0,
        employment_share_pct: 3.0,
        growth_rate_pct: 18.0,
        vision2030_priority: true,
        land_requirements: &["tech_parks", "data_centers", "commercial_zones"],
        water_intensity: WaterIntensity::Low,
        key_regions: &["Riyadh", "NEOM"],
        land_use: LandUse::Industrial,
    },
    SectorProfile {
        key: "renewable_energy",
        name: "Renewable Energy",
        name_ar: "الطاقة المتجددة",
        gdp_contribution_pct: 1.0,
        employment_share_pct: 0.5,
        growth_rate_pct: 25.0,
        vision2030_priority: true,
        land_requirements: &["solar_farms", "wind_farms", "transmission_corridors"],
        water_intensity: WaterIntensity::Low,
        key_regions: &["Tabuk", "Al-Jouf", "Northern Borders", "NEOM"],
        land_use: LandUse::RenewableEnergy,
    },
    SectorProfile {
        key: "environmental_protection",
        name: "Environmental Protection",
        name_ar: "حماية البيئة",
        gdp_contribution_pct: 0.5,
        employment_share_pct: 0.5,
        growth_rate_pct: 20.0,
        vision2030_priority: true,
        land_requirements: &["protected_areas", "marine_reserves", "green_corridors"],
        water_intensity: WaterIntensity::Low,
        key_regions: &[ALL_REGIONS],
        land_use: LandUse::EnvironmentalProtection,
    },
];

pub fn sector_profile(key: &str) -> Option<&'static SectorProfile> {
    SECTOR_PROFILES.iter().find(|s| s.key == key)
}
