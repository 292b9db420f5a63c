//! Per-scenario coefficient tables and narratives

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::NssError;
use crate::scenario::trend::Trend;

/// Base-year population, millions
pub const BASE_POPULATION_M: f64 = 36.4;
/// Base-year GDP, billion USD
pub const BASE_GDP_B: f64 = 1108.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioType {
    Baseline,
    #[serde(alias = "vision2030")]
    TargetAchievement,
    Accelerated,
    Conservative,
}

impl ScenarioType {
    pub const ALL: [ScenarioType; 4] = [
        ScenarioType::Baseline,
        ScenarioType::TargetAchievement,
        ScenarioType::Accelerated,
        ScenarioType::Conservative,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ScenarioType::Baseline => "baseline",
            ScenarioType::TargetAchievement => "target_achievement",
            ScenarioType::Accelerated => "accelerated",
            ScenarioType::Conservative => "conservative",
        }
    }

    pub fn coefficients(&self) -> &'static ScenarioCoefficients {
        match self {
            ScenarioType::Baseline => &BASELINE,
            ScenarioType::TargetAchievement => &TARGET_ACHIEVEMENT,
            ScenarioType::Accelerated => &ACCELERATED,
            ScenarioType::Conservative => &CONSERVATIVE,
        }
    }

    pub fn narrative(&self) -> &'static ScenarioNarrative {
        match self {
            ScenarioType::Baseline => &BASELINE_NARRATIVE,
            ScenarioType::TargetAchievement => &TARGET_ACHIEVEMENT_NARRATIVE,
            ScenarioType::Accelerated => &ACCELERATED_NARRATIVE,
            ScenarioType::Conservative => &CONSERVATIVE_NARRATIVE,
        }
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScenarioType {
    type Err = NssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "baseline" => Ok(ScenarioType::Baseline),
            "target_achievement" | "vision2030" => Ok(ScenarioType::TargetAchievement),
            "accelerated" => Ok(ScenarioType::Accelerated),
            "conservative" => Ok(ScenarioType::Conservative),
            _ => Err(NssError::UnknownScenario(s.to_string())),
        }
    }
}

/// Constants fed into the shared projection formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCoefficients {
    // === DEMOGRAPHIC ===
    /// Total population, millions
    pub population: Trend,
    /// Citizen share of the total; the rest is expatriate
    pub national_share: f64,
    pub urbanization_pct: Trend,
    pub primary_city_share_pct: Trend,
    /// Population under 30
    pub youth_share_pct: Trend,

    // === ECONOMIC ===
    /// GDP, billion USD
    pub gdp: Trend,
    pub oil_share_pct: Trend,
    pub tourism_share_pct: Trend,
    pub tech_share_pct: Trend,
    pub unemployment_pct: Trend,
    pub female_participation_pct: Trend,

    // === SPATIAL ===
    pub urbanized_area_sqkm: Trend,
    pub new_cities: Trend,
    pub protected_area_pct: Trend,
    pub renewable_capacity_gw: Trend,
    pub rail_network_km: Trend,
    /// Million cubic metres
    pub desalination_capacity_mcm: Trend,

    /// Subjective likelihood; the four need not sum to 1
    pub probability: f64,
}

impl ScenarioCoefficients {
    /// Annual population growth rate
    pub fn population_growth(&self) -> f64 {
        self.population.annual_rate().unwrap_or(0.0)
    }
}

pub static BASELINE: ScenarioCoefficients = ScenarioCoefficients {
    population: Trend::compound(BASE_POPULATION_M, 0.018),
    national_share: 0.66,
    urbanization_pct: Trend::rising(86.0, 0.3, 92.0),
    primary_city_share_pct: Trend::rising(25.0, 0.15, 32.0),
    youth_share_pct: Trend::falling(63.0, 0.4, 45.0),
    gdp: Trend::compound(BASE_GDP_B, 0.03),
    oil_share_pct: Trend::falling(38.0, 0.8, 20.0),
    tourism_share_pct: Trend::rising(5.0, 0.5, 15.0),
    tech_share_pct: Trend::rising(4.0, 0.4, 12.0),
    unemployment_pct: Trend::falling(11.0, 0.2, 6.0),
    female_participation_pct: Trend::rising(33.0, 0.8, 45.0),
    urbanized_area_sqkm: Trend::linear(5000.0, 150.0),
    new_cities: Trend::stepped(1, 5, 3),
    protected_area_pct: Trend::linear(4.0, 0.1),
    renewable_capacity_gw: Trend::linear(5.0, 1.5),
    rail_network_km: Trend::linear(1200.0, 80.0),
    desalination_capacity_mcm: Trend::linear(2500.0, 100.0),
    probability: 0.30,
};

pub static TARGET_ACHIEVEMENT: ScenarioCoefficients = ScenarioCoefficients {
    population: Trend::compound(BASE_POPULATION_M, 0.022),
    // More expatriates for mega-projects
    national_share: 0.62,
    urbanization_pct: Trend::rising(86.0, 0.4, 95.0),
    primary_city_share_pct: Trend::rising(25.0, 0.2, 35.0),
    youth_share_pct: Trend::falling(63.0, 0.35, 48.0),
    gdp: Trend::compound(BASE_GDP_B, 0.05),
    oil_share_pct: Trend::falling(38.0, 1.5, 12.0),
    tourism_share_pct: Trend::rising(5.0, 1.0, 20.0),
    tech_share_pct: Trend::rising(4.0, 0.8, 18.0),
    unemployment_pct: Trend::falling(11.0, 0.5, 4.0),
    female_participation_pct: Trend::rising(33.0, 1.5, 55.0),
    urbanized_area_sqkm: Trend::linear(5000.0, 250.0),
    new_cities: Trend::stepped(2, 3, 8),
    protected_area_pct: Trend::linear(4.0, 0.25),
    renewable_capacity_gw: Trend::linear(5.0, 4.0),
    rail_network_km: Trend::linear(1200.0, 150.0),
    desalination_capacity_mcm: Trend::linear(2500.0, 200.0),
    probability: 0.35,
};

pub static ACCELERATED: ScenarioCoefficients = ScenarioCoefficients {
    population: Trend::compound(BASE_POPULATION_M, 0.025),
    national_share: 0.58,
    urbanization_pct: Trend::rising(86.0, 0.5, 98.0),
    // Growth spreads beyond the capital
    primary_city_share_pct: Trend::rising(25.0, 0.1, 30.0),
    youth_share_pct: Trend::falling(63.0, 0.3, 50.0),
    gdp: Trend::compound(BASE_GDP_B, 0.07),
    oil_share_pct: Trend::falling(38.0, 2.0, 8.0),
    tourism_share_pct: Trend::rising(5.0, 1.2, 25.0),
    tech_share_pct: Trend::rising(4.0, 1.2, 25.0),
    unemployment_pct: Trend::falling(11.0, 0.6, 3.0),
    female_participation_pct: Trend::rising(33.0, 2.0, 65.0),
    urbanized_area_sqkm: Trend::linear(5000.0, 350.0),
    new_cities: Trend::stepped(3, 2, 15),
    protected_area_pct: Trend::linear(4.0, 0.4),
    renewable_capacity_gw: Trend::linear(5.0, 6.0),
    rail_network_km: Trend::linear(1200.0, 200.0),
    desalination_capacity_mcm: Trend::linear(2500.0, 300.0),
    probability: 0.15,
};

pub static CONSERVATIVE: ScenarioCoefficients = ScenarioCoefficients {
    population: Trend::compound(BASE_POPULATION_M, 0.012),
    national_share: 0.70,
    urbanization_pct: Trend::rising(86.0, 0.2, 90.0),
    // Growth concentrates in the capital
    primary_city_share_pct: Trend::rising(25.0, 0.25, 38.0),
    youth_share_pct: Trend::falling(63.0, 0.5, 42.0),
    gdp: Trend::compound(BASE_GDP_B, 0.02),
    oil_share_pct: Trend::falling(38.0, 0.5, 28.0),
    tourism_share_pct: Trend::rising(5.0, 0.3, 10.0),
    tech_share_pct: Trend::rising(4.0, 0.2, 8.0),
    unemployment_pct: Trend::falling(11.0, 0.1, 8.0),
    female_participation_pct: Trend::rising(33.0, 0.5, 40.0),
    urbanized_area_sqkm: Trend::linear(5000.0, 100.0),
    new_cities: Trend::stepped(1, 8, 2),
    protected_area_pct: Trend::linear(4.0, 0.05),
    renewable_capacity_gw: Trend::linear(5.0, 0.8),
    rail_network_km: Trend::linear(1200.0, 50.0),
    desalination_capacity_mcm: Trend::linear(2500.0, 80.0),
    probability: 0.20,
};

/// Human-readable framing of a scenario
#[derive(Debug)]
pub struct ScenarioNarrative {
    pub name: &'static str,
    pub description: &'static str,
    pub assumptions: &'static [&'static str],
    pub risks: &'static [&'static str],
    pub opportunities: &'static [&'static str],
}

pub static BASELINE_NARRATIVE: ScenarioNarrative = ScenarioNarrative {
    name: "Baseline (Current Trends)",
    description: "Continuation of current development trends without major policy shifts.",
    assumptions: &[
        "Oil prices remain moderate ($70-80/barrel)",
        "Vision 2030 targets partially achieved",
        "Regional stability maintained",
        "Gradual economic diversification",
        "Climate policies implemented slowly",
    ],
    risks: &[
        "Insufficient diversification",
        "Youth unemployment persistence",
        "Water stress intensification",
        "Climate change impacts",
    ],
    opportunities: &[
        "Incremental progress on transformation",
        "Lower financial risk",
        "Social stability",
    ],
};

pub static TARGET_ACHIEVEMENT_NARRATIVE: ScenarioNarrative = ScenarioNarrative {
    name: "Vision 2030 Achievement",
    description: "Full achievement of Vision 2030 targets and continued progress to 2050.",
    assumptions: &[
        "Strong oil prices support transition ($80-100/barrel)",
        "Mega-projects delivered on schedule",
        "Tourism reaches 100M visitors by 2030",
        "Non-oil GDP dominates by 2040",
        "Significant social reforms continue",
    ],
    risks: &[
        "Mega-project cost overruns",
        "Global economic downturn",
        "Execution capacity constraints",
        "Labor market imbalances",
    ],
    opportunities: &[
        "Global tourism hub",
        "Regional technology leader",
        "Clean energy pioneer",
        "Entertainment capital",
    ],
};

pub static ACCELERATED_NARRATIVE: ScenarioNarrative = ScenarioNarrative {
    name: "Accelerated Transformation",
    description: "Beyond Vision 2030 - rapid diversification and global leadership.",
    assumptions: &[
        "Green hydrogen becomes major export",
        "NEOM becomes global innovation hub",
        "KSA leads G20 in growth rates",
        "Full energy transition by 2045",
        "Regional economic integration (GCC+)",
    ],
    risks: &[
        "Social disruption from rapid change",
        "Infrastructure capacity limits",
        "Environmental carrying capacity",
        "Geopolitical instability",
    ],
    opportunities: &[
        "Global economic power",
        "Technology leadership",
        "Sustainable development model",
        "Polycentric urban network",
    ],
};

pub static CONSERVATIVE_NARRATIVE: ScenarioNarrative = ScenarioNarrative {
    name: "Conservative (Slower Transition)",
    description: "Slower transformation due to external or internal constraints.",
    assumptions: &[
        "Oil prices decline ($50-60/barrel)",
        "Global recession impacts investment",
        "Mega-projects scaled back",
        "Gradual social reforms",
        "Regional tensions increase",
    ],
    risks: &[
        "Economic stagnation",
        "Youth frustration",
        "Continued oil dependence",
        "Brain drain",
    ],
    opportunities: &[
        "Lower risk exposure",
        "More sustainable pace",
        "Consolidation of gains",
    ],
};
