//! Fixed reference tables for synthetic geography

use crate::geography::model::DevelopmentStatus;
use crate::geography::model::DevelopmentStatus::{Announced, Operational, Planned, UnderConstruction};

pub const SETTLEMENT_PREFIXES: [&str; 12] = [
    "Al", "El", "New", "Port", "North", "South", "East", "West", "Central", "Upper", "Lower",
    "Greater",
];

pub const SETTLEMENT_SUFFIXES: [&str; 11] = [
    "City", "Town", "Village", "Port", "Springs", "Valley", "Hills", "Plains", "Oasis", "Harbor",
    "Junction",
];

pub const FLAGSHIP_PROJECT_TYPE: &str = "Vision 2030 Flagship";

/// Curated giga-project with literal location and budget
#[derive(Debug, Clone, Copy)]
pub struct FlagshipProject {
    pub name: &'static str,
    pub sector: &'static str,
    pub budget_billion_usd: f64,
    pub lat: f64,
    pub lon: f64,
    pub region: &'static str,
    pub status: DevelopmentStatus,
    pub start_year: i32,
    pub completion_year: i32,
    pub description: &'static str,
}

const fn flagship(
    name: &'static str,
    sector: &'static str,
    budget_billion_usd: f64,
    location: (f64, f64),
    region: &'static str,
    status: DevelopmentStatus,
    timeline: (i32, i32),
    description: &'static str,
) -> FlagshipProject {
    FlagshipProject {
        name,
        sector,
        budget_billion_usd,
        lat: location.0,
        lon: location.1,
        region,
        status,
        start_year: timeline.0,
        completion_year: timeline.1,
        description,
    }
}

pub const FLAGSHIP_PROJECTS: [FlagshipProject; 20] = [
    // NEOM and sub-projects
    flagship("NEOM", "giga_city", 500.0, (28.0, 35.0), "Tabuk Region", UnderConstruction, (2017, 2039),
        "Smart city megaproject on Red Sea coast"),
    flagship("THE LINE", "urban", 200.0, (28.1, 34.8), "Tabuk Region", UnderConstruction, (2021, 2030),
        "170km linear city with zero cars, zero emissions"),
    flagship("OXAGON", "industrial", 50.0, (27.8, 35.2), "Tabuk Region", UnderConstruction, (2021, 2030),
        "Floating industrial complex and port"),
    flagship("TROJENA", "tourism", 30.0, (28.2, 35.5), "Tabuk Region", UnderConstruction, (2022, 2026),
        "Mountain destination with year-round skiing"),
    flagship("SINDALAH", "tourism", 5.0, (27.5, 35.8), "Tabuk Region", UnderConstruction, (2022, 2024),
        "Luxury island destination"),
    // Red Sea coast
    flagship("Red Sea Project", "tourism", 15.0, (25.5, 37.0), "Madinah Region", UnderConstruction, (2019, 2030),
        "Luxury tourism across 90+ islands"),
    flagship("AMAALA", "tourism", 8.0, (26.0, 36.5), "Tabuk Region", UnderConstruction, (2020, 2028),
        "Ultra-luxury wellness and arts destination"),
    // Riyadh
    flagship("Qiddiya", "entertainment", 8.0, (24.4, 46.2), "Riyadh Region", UnderConstruction, (2019, 2030),
        "Entertainment, sports and culture mega-city"),
    flagship("Diriyah Gate", "heritage", 20.0, (24.7, 46.6), "Riyadh Region", UnderConstruction, (2018, 2027),
        "Historic district restoration and development"),
    flagship("King Salman Park", "urban", 23.0, (24.7, 46.7), "Riyadh Region", UnderConstruction, (2019, 2027),
        "13 sq km urban park, largest in the world"),
    flagship("Riyadh Metro", "transport", 22.5, (24.7, 46.7), "Riyadh Region", Operational, (2014, 2024),
        "176km metro network with 6 lines"),
    flagship("New Murabba", "urban", 50.0, (24.8, 46.6), "Riyadh Region", Announced, (2024, 2030),
        "Downtown district with Mukaab iconic cube"),
    flagship("AlUla Development", "heritage", 15.0, (26.6, 37.9), "Madinah Region", UnderConstruction, (2018, 2035),
        "UNESCO heritage and tourism destination"),
    // Jeddah
    flagship("Jeddah Tower", "urban", 2.0, (21.5, 39.2), "Makkah Region", UnderConstruction, (2013, 2028),
        "1km tall skyscraper, world's tallest"),
    flagship("Jeddah Central", "urban", 20.0, (21.5, 39.1), "Makkah Region", Planned, (2025, 2035),
        "5.7 million sqm mixed-use waterfront development"),
    // Energy
    flagship("NEOM Green Hydrogen", "energy", 8.5, (28.3, 35.3), "Tabuk Region", UnderConstruction, (2021, 2026),
        "World's largest green hydrogen plant"),
    flagship("Sudair Solar PV", "energy", 1.5, (25.5, 45.7), "Riyadh Region", Operational, (2021, 2024),
        "1.5 GW solar power plant"),
    flagship("Dumat Al Jandal Wind", "energy", 0.5, (29.8, 39.9), "Al-Jouf Region", Operational, (2019, 2022),
        "400 MW wind farm, Middle East's largest"),
    // Economic cities
    flagship("King Abdullah Economic City", "industrial", 100.0, (22.4, 39.1), "Makkah Region", Operational, (2006, 2035),
        "Industrial city and port on Red Sea"),
    flagship("SPARK (King Salman Energy Park)", "industrial", 2.0, (25.5, 49.2), "Eastern Region", UnderConstruction, (2018, 2035),
        "50 sq km energy city near Dammam"),
];

/// Template for randomly placed projects
#[derive(Debug, Clone, Copy)]
pub struct ProjectTemplate {
    pub project_type: &'static str,
    pub sector: &'static str,
    pub min_budget: f64,
    pub max_budget: f64,
}

pub const PROJECT_TEMPLATES: [ProjectTemplate; 7] = [
    ProjectTemplate { project_type: "Hospital Complex", sector: "healthcare", min_budget: 0.5, max_budget: 2.0 },
    ProjectTemplate { project_type: "University Campus", sector: "education", min_budget: 0.3, max_budget: 1.5 },
    ProjectTemplate { project_type: "Industrial Zone", sector: "industrial", min_budget: 0.5, max_budget: 5.0 },
    ProjectTemplate { project_type: "Residential Development", sector: "housing", min_budget: 0.2, max_budget: 3.0 },
    ProjectTemplate { project_type: "Airport Expansion", sector: "transport", min_budget: 1.0, max_budget: 10.0 },
    ProjectTemplate { project_type: "Desalination Plant", sector: "water", min_budget: 0.5, max_budget: 3.0 },
    ProjectTemplate { project_type: "Agricultural Project", sector: "agriculture", min_budget: 0.1, max_budget: 1.0 },
];

/// Status draw for random projects, paired with `PROJECT_STATUS_WEIGHTS`
pub const PROJECT_STATUSES: [DevelopmentStatus; 4] = [Announced, Planned, UnderConstruction, Operational];
pub const PROJECT_STATUS_WEIGHTS: [f64; 4] = [0.15, 0.25, 0.35, 0.25];

pub const HIGHWAY_LANES: [u8; 3] = [4, 6, 8];
pub const PRIMARY_LANES: [u8; 2] = [2, 4];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_weights_sum_to_one() {
        let total: f64 = PROJECT_STATUS_WEIGHTS.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flagship_timelines_are_ordered() {
        for project in FLAGSHIP_PROJECTS.iter() {
            assert!(project.start_year < project.completion_year, "{}", project.name);
            assert!(project.budget_billion_usd > 0.0);
        }
    }

    #[test]
    fn test_templates_have_budget_range() {
        assert!(PROJECT_TEMPLATES.iter().all(|t| t.min_budget < t.max_budget));
    }
}
