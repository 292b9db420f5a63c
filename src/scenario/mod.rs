//! Development scenarios to 2030/2050
//!
//! Four fixed trajectories evaluated by one projection formula under four
//! coefficient tables.

mod coefficients;
mod modeler;
mod trend;

pub use coefficients::{
    ScenarioCoefficients, ScenarioNarrative, ScenarioType, BASE_GDP_B, BASE_POPULATION_M,
};
pub use modeler::{
    gdp_per_capita, DemographicProjection, EconomicProjection, KeyFindings, RegionalFactor,
    RegionalPoint, RegionalProjection, Scenario, ScenarioComparison, ScenarioModeler,
    ScenarioReport, ScenarioSummary, SpatialProjection, HORIZON_YEARS, REPORT_YEARS,
};
pub use trend::Trend;
