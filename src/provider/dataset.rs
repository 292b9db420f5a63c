//! In-memory tables answering provider queries

use crate::core::error::{NssError, Result};
use crate::core::types::{RegionId, SpatialLevel, COUNTRY_ID, LEVEL_COUNTRY, MAX_LEVEL};
use crate::geography::model::{
    DevelopmentStatus, EnvironmentFeature, EnvironmentLayer, GeographyBundle, InfrastructureKind,
    Project, Region, RegionEconomy, RegionPopulation, RoadSegment, Settlement,
};
use crate::provider::DataResponse;
use crate::scenario::ScenarioType;

/// Annual GDP growth applied when economic data is requested for another year
pub const GDP_GROWTH_RATE: f64 = 0.03;

/// A complete set of records plus the level-1 unit covering them
#[derive(Debug, Clone)]
pub struct Dataset {
    source: String,
    is_simulated: bool,
    country: Region,
    bundle: GeographyBundle,
}

impl Dataset {
    pub fn new(source: impl Into<String>, is_simulated: bool, country: Region, bundle: GeographyBundle) -> Self {
        Self {
            source: source.into(),
            is_simulated,
            country,
            bundle,
        }
    }

    pub fn bundle(&self) -> &GeographyBundle {
        &self.bundle
    }

    pub fn country(&self) -> &Region {
        &self.country
    }

    fn respond<T>(&self, data: T) -> DataResponse<T> {
        DataResponse::new(data, self.source.clone(), self.is_simulated)
    }

    pub fn spatial_units(&self, level: SpatialLevel) -> Result<DataResponse<Vec<Region>>> {
        check_level(level)?;
        let units = if level == LEVEL_COUNTRY {
            vec![self.country.clone()]
        } else {
            self.bundle
                .regions
                .iter()
                .map(|region| Region {
                    level,
                    ..region.clone()
                })
                .collect()
        };
        let count = units.len();
        Ok(self
            .respond(units)
            .with_meta("level", level)
            .with_meta("count", count))
    }

    pub fn settlements(
        &self,
        min_population: Option<u64>,
        region_id: Option<RegionId>,
    ) -> DataResponse<Vec<Settlement>> {
        let settlements: Vec<Settlement> = self
            .bundle
            .settlements
            .iter()
            .filter(|s| min_population.map_or(true, |min| s.population >= min))
            .filter(|s| region_id.map_or(true, |id| s.region_id == id))
            .cloned()
            .collect();
        let count = settlements.len();
        self.respond(settlements).with_meta("count", count)
    }

    pub fn population(
        &self,
        level: SpatialLevel,
        year: i32,
        scenario_id: Option<&str>,
    ) -> Result<DataResponse<Vec<RegionPopulation>>> {
        check_level(level)?;
        let scenario = match scenario_id {
            Some(id) => id.parse::<ScenarioType>()?,
            None => ScenarioType::Baseline,
        };
        let rate = scenario.coefficients().population_growth();

        let rows: Vec<RegionPopulation> = self
            .bundle
            .populations
            .iter()
            .map(|row| {
                let factor = (1.0 + rate).powi(year - row.year);
                RegionPopulation {
                    year,
                    population: (row.population as f64 * factor) as u64,
                    pop_density: row.pop_density * factor,
                    scenario_id: scenario_id.map(String::from),
                    ..row.clone()
                }
            })
            .collect();

        let rows = if level == LEVEL_COUNTRY {
            vec![self.national_population(&rows, year, scenario_id)]
        } else {
            rows
        };

        Ok(self
            .respond(rows)
            .with_meta("level", level)
            .with_meta("year", year)
            .with_meta("scenario", scenario_id)
            .with_meta("growth_rate", rate))
    }

    fn national_population(
        &self,
        rows: &[RegionPopulation],
        year: i32,
        scenario_id: Option<&str>,
    ) -> RegionPopulation {
        let population: u64 = rows.iter().map(|r| r.population).sum();
        let urban: f64 = rows
            .iter()
            .map(|r| r.population as f64 * r.urban_pop_pct)
            .sum();
        RegionPopulation {
            region_id: COUNTRY_ID,
            name: self.country.name.en.clone(),
            year,
            population,
            pop_density: ratio(population as f64, self.country.area_sqkm),
            urban_pop_pct: ratio(urban, population as f64),
            scenario_id: scenario_id.map(String::from),
        }
    }

    /// Economic rows at `year`, compounded at `GDP_GROWTH_RATE` from each row's year
    ///
    /// GDP per capita is scaled by the same GDP factor with population held at
    /// its base-year value. This is a GDP growth extrapolation, not a
    /// per-capita model; use `population` for scenario-grown headcounts.
    pub fn economy(
        &self,
        indicator: &str,
        level: SpatialLevel,
        year: i32,
    ) -> Result<DataResponse<Vec<RegionEconomy>>> {
        check_level(level)?;
        let rows: Vec<RegionEconomy> = self
            .bundle
            .economy
            .iter()
            .map(|row| {
                let factor = (1.0 + GDP_GROWTH_RATE).powi(year - row.year);
                RegionEconomy {
                    year,
                    gdp_billion_usd: row.gdp_billion_usd * factor,
                    gdp_per_capita_usd: row.gdp_per_capita_usd * factor,
                    ..row.clone()
                }
            })
            .collect();

        let rows = if level == LEVEL_COUNTRY {
            vec![self.national_economy(&rows, year)]
        } else {
            rows
        };

        Ok(self
            .respond(rows)
            .with_meta("indicator", indicator)
            .with_meta("level", level)
            .with_meta("year", year))
    }

    fn national_economy(&self, rows: &[RegionEconomy], year: i32) -> RegionEconomy {
        let population_of = |id: RegionId| {
            self.bundle
                .populations
                .iter()
                .find(|p| p.region_id == id)
                .map_or(0.0, |p| p.population as f64)
        };
        let gdp: f64 = rows.iter().map(|r| r.gdp_billion_usd).sum();
        let population: f64 = rows.iter().map(|r| population_of(r.region_id)).sum();
        let employed: f64 = rows
            .iter()
            .map(|r| r.employment_rate * population_of(r.region_id))
            .sum();
        let employment_rate = ratio(employed, population);

        RegionEconomy {
            region_id: COUNTRY_ID,
            name: self.country.name.en.clone(),
            year,
            gdp_billion_usd: gdp,
            gdp_per_capita_usd: ratio(gdp * 1e9, population),
            employment_rate,
            unemployment_rate: 100.0 - employment_rate,
        }
    }

    pub fn infrastructure(
        &self,
        kind: InfrastructureKind,
        region_id: Option<RegionId>,
    ) -> DataResponse<Vec<RoadSegment>> {
        let segments: Vec<RoadSegment> = match kind {
            InfrastructureKind::Roads => self
                .bundle
                .roads
                .iter()
                .filter(|r| region_id.map_or(true, |id| r.touches_region(id)))
                .cloned()
                .collect(),
            _ => Vec::new(),
        };
        let count = segments.len();
        let response = self
            .respond(segments)
            .with_meta("type", kind.as_str())
            .with_meta("count", count);
        if kind == InfrastructureKind::Roads {
            response
        } else {
            response.with_meta("note", format!("no {} data available", kind.as_str()))
        }
    }

    pub fn environment(
        &self,
        layer: EnvironmentLayer,
        region_id: Option<RegionId>,
    ) -> DataResponse<Vec<EnvironmentFeature>> {
        let features: Vec<EnvironmentFeature> = self
            .bundle
            .environment
            .iter()
            .filter(|f| f.layer == layer)
            .filter(|f| region_id.map_or(true, |id| f.region_id == id))
            .cloned()
            .collect();
        let layer_known = self.bundle.environment.iter().any(|f| f.layer == layer);
        let count = features.len();
        let response = self
            .respond(features)
            .with_meta("type", layer.as_str())
            .with_meta("count", count);
        if layer_known {
            response
        } else {
            response.with_meta("note", format!("no {} layer available", layer.as_str()))
        }
    }

    pub fn projects(
        &self,
        status: Option<DevelopmentStatus>,
        sector: Option<&str>,
    ) -> DataResponse<Vec<Project>> {
        let projects: Vec<Project> = self
            .bundle
            .projects
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .filter(|p| sector.map_or(true, |s| p.sector == s))
            .cloned()
            .collect();
        let count = projects.len();
        self.respond(projects).with_meta("count", count)
    }
}

fn check_level(level: SpatialLevel) -> Result<()> {
    if (LEVEL_COUNTRY..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(NssError::InvalidLevel(level))
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
