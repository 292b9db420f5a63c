//! Synthetic geography generation
//!
//! Builds regions, populations, settlements, roads, projects, economic tables
//! and protected areas from a `CountryProfile`. Everything is drawn eagerly
//! from one `ChaCha8Rng` in a fixed order, so the same profile and seed
//! reproduce the same bundle bit for bit.

use std::f64::consts::PI;
use std::ops::Range;

use geo::{
    BooleanOps, BoundingRect, Centroid, ChamberlainDuquetteArea, Contains, EuclideanDistance,
    EuclideanLength,
};
use geo_types::{coord, Coord, LineString, MultiPolygon, Point, Polygon};
use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::CountryProfile;
use crate::core::error::{NssError, Result};
use crate::core::types::{
    BilingualName, ProjectId, RegionId, RoadId, SettlementId, BASE_YEAR, COUNTRY_ID,
    LEVEL_COUNTRY, LEVEL_REGION,
};
use crate::diagnostics::{ordinal_ranks, HierarchyThresholds};
use crate::geography::catalog::{
    FLAGSHIP_PROJECTS, FLAGSHIP_PROJECT_TYPE, HIGHWAY_LANES, PRIMARY_LANES, PROJECT_STATUSES,
    PROJECT_STATUS_WEIGHTS, PROJECT_TEMPLATES, SETTLEMENT_PREFIXES, SETTLEMENT_SUFFIXES,
};
use crate::geography::model::{
    DevelopmentStatus, EnvironmentFeature, EnvironmentLayer, GeographyBundle, HierarchyClass,
    Project, Region, RegionEconomy, RegionPopulation, RoadClass, RoadSegment, Settlement,
};
use crate::geography::sampling;
use crate::validation::polygon_is_valid;

/// Share of a region's population living in discrete settlements
pub const SETTLEMENT_ALLOCATION: f64 = 0.85;

/// Planar degrees to kilometres at the equator
pub const KM_PER_DEGREE: f64 = 111.0;

const PARETO_SHAPE: f64 = 1.5;
const ZIPF_EXPONENT: f64 = 1.8;
const PLACEMENT_ATTEMPTS: usize = 100;
const HIGHWAY_HUBS: usize = 20;
const HIGHWAY_NEIGHBOURS: usize = 3;
const PRIMARY_NEIGHBOURS: usize = 2;
const PRIMARY_ROAD_POPULATION: Range<u64> = 50_000..500_000;

/// Deterministic generator; all artifacts are built in `new`
#[derive(Debug, Clone)]
pub struct SyntheticGeographyGenerator {
    profile: CountryProfile,
    bundle: GeographyBundle,
}

impl SyntheticGeographyGenerator {
    /// Generate every artifact for `profile` from `seed`
    ///
    /// Fails with `EmptyGeography` when clipping leaves no region standing.
    pub fn new(profile: CountryProfile, seed: u64) -> Result<Self> {
        profile.validate()?;
        tracing::info!(
            "Generating geography for {} (seed {}): population {}, area {} sq km, {} regions",
            profile.name,
            seed,
            profile.total_population,
            profile.total_area_sqkm,
            profile.num_regions
        );

        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let regions = require_regions(generate_regions(&profile, &mut rng), profile.num_regions)?;

        let capital = capital_index(&profile, regions.len());
        let populations = generate_population_distribution(&regions, &profile, &mut rng);
        let settlements = generate_settlements(&regions, &populations, capital, &mut rng);
        let roads = generate_roads(&regions, &settlements, &mut rng);
        let projects = generate_projects(&regions, &settlements, &mut rng);
        let economy = generate_economic_data(&regions, &populations, &profile, &mut rng);
        let environment = generate_environment(&regions, &mut rng);

        tracing::debug!(
            "Generated {} settlements, {} road segments, {} projects",
            settlements.len(),
            roads.len(),
            projects.len()
        );

        let bundle = GeographyBundle {
            profile_name: profile.name.clone(),
            seed,
            base_year: BASE_YEAR,
            capital_region: regions[capital].id,
            regions,
            populations,
            economy,
            settlements,
            roads,
            projects,
            environment,
        };

        Ok(Self { profile, bundle })
    }

    pub fn profile(&self) -> &CountryProfile {
        &self.profile
    }

    pub fn bundle(&self) -> &GeographyBundle {
        &self.bundle
    }

    pub fn into_bundle(self) -> GeographyBundle {
        self.bundle
    }

    /// Level-1 unit covering all regions
    pub fn country_unit(&self) -> Region {
        country_unit(&self.profile, &self.bundle.regions)
    }
}

/// Pass surviving regions through; none at all is `EmptyGeography`
pub fn require_regions(regions: Vec<Region>, requested: u32) -> Result<Vec<Region>> {
    if regions.is_empty() {
        return Err(NssError::EmptyGeography { requested });
    }
    if regions.len() < requested as usize {
        tracing::warn!("{} of {} regions survived clipping", regions.len(), requested);
    }
    Ok(regions)
}

/// Index of the designated capital region, clamped to the generated count
pub fn capital_index(profile: &CountryProfile, region_count: usize) -> usize {
    profile.capital_region.min(region_count.saturating_sub(1))
}

/// Place, draw and clip one star-shaped polygon per requested region
pub fn generate_regions(profile: &CountryProfile, rng: &mut ChaCha8Rng) -> Vec<Region> {
    let bbox = profile.bbox;
    let n = profile.num_regions as usize;
    let (mid_x, mid_y) = bbox.center();

    // All x draws precede all y draws
    let xs: Vec<f64> = (0..n)
        .map(|_| sampling::normal(rng, mid_x, bbox.width() / 4.0))
        .collect();
    let ys: Vec<f64> = (0..n)
        .map(|_| sampling::normal(rng, mid_y, bbox.height() / 4.0))
        .collect();

    let bounds = MultiPolygon::new(vec![bbox.to_polygon()]);
    let mut pieces = Vec::new();

    for (x, y) in xs.into_iter().zip(ys) {
        let center = (
            clamp_inset(x, bbox.min_x, bbox.max_x),
            clamp_inset(y, bbox.min_y, bbox.max_y),
        );
        let star = star_polygon(rng, center, 6..12, (1.5, 3.5));
        let clipped = MultiPolygon::new(vec![star]).intersection(&bounds);

        if clipped.0.is_empty() || !clipped.0.iter().all(polygon_is_valid) {
            continue;
        }
        let area = clipped.chamberlain_duquette_unsigned_area() / 1e6;
        if area > 0.0 {
            pieces.push((clipped, area));
        }
    }

    let raw_total: f64 = pieces.iter().map(|(_, area)| area).sum();
    let factor = if raw_total > 0.0 {
        profile.total_area_sqkm / raw_total
    } else {
        0.0
    };

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, (geometry, area))| {
            let id = RegionId(i as u32 + 1);
            let centroid = geometry.centroid().unwrap_or_else(|| {
                let (x, y) = bbox.center();
                Point::new(x, y)
            });
            Region {
                id,
                code: id.to_string(),
                name: BilingualName::new(profile.region_name(i), format!("منطقة {}", id.0)),
                level: LEVEL_REGION,
                parent_id: Some(COUNTRY_ID),
                geometry,
                area_sqkm: area * factor,
                centroid,
            }
        })
        .collect()
}

/// Pareto shares with the capital forced up to realise the primacy target
pub fn generate_population_distribution(
    regions: &[Region],
    profile: &CountryProfile,
    rng: &mut ChaCha8Rng,
) -> Vec<RegionPopulation> {
    if regions.is_empty() {
        return Vec::new();
    }

    let raw: Vec<f64> = regions
        .iter()
        .map(|_| sampling::pareto(rng, PARETO_SHAPE))
        .collect();
    let mut shares = normalize(&raw);

    let capital = capital_index(profile, regions.len());
    let largest = shares.iter().copied().fold(0.0, f64::max);
    shares[capital] = largest * profile.primacy_ratio / 2.0;
    let shares = normalize(&shares);

    let urban_low = profile.urban_population_pct - 20.0;
    let urban_high = (profile.urban_population_pct + 15.0).min(95.0);

    regions
        .iter()
        .zip(shares)
        .map(|(region, share)| {
            let population = (share * profile.total_population as f64) as u64;
            RegionPopulation {
                region_id: region.id,
                name: region.name.en.clone(),
                year: BASE_YEAR,
                population,
                pop_density: density(population, region.area_sqkm),
                urban_pop_pct: sampling::uniform(rng, urban_low, urban_high),
                scenario_id: None,
            }
        })
        .collect()
}

/// Zipf-sized settlements placed inside each region
pub fn generate_settlements(
    regions: &[Region],
    populations: &[RegionPopulation],
    capital: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Settlement> {
    let mut settlements = Vec::new();
    let mut next_id = 1u32;

    for (index, (region, regional)) in regions.iter().zip(populations).enumerate() {
        let total = regional.population;
        let count: usize = match total {
            p if p > 5_000_000 => rng.gen_range(15..25),
            p if p > 1_000_000 => rng.gen_range(8..15),
            p if p > 500_000 => rng.gen_range(5..10),
            _ => rng.gen_range(3..7),
        };

        let raw: Vec<f64> = (0..count)
            .map(|_| sampling::zipf(rng, ZIPF_EXPONENT) as f64)
            .collect();
        let raw_total: f64 = raw.iter().sum();
        let mut sizes: Vec<u64> = raw
            .iter()
            .map(|r| (r / raw_total * total as f64 * SETTLEMENT_ALLOCATION) as u64)
            .collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));

        for (i, population) in sizes.into_iter().enumerate() {
            let location = place_point(region, rng);
            let prefix = sampling::choose(rng, &SETTLEMENT_PREFIXES);
            let suffix = sampling::choose(rng, &SETTLEMENT_SUFFIXES);

            settlements.push(Settlement {
                id: SettlementId(next_id),
                name: BilingualName::new(
                    format!("{} {} {}", prefix, suffix, next_id),
                    format!("مدينة {}", next_id),
                ),
                region_id: region.id,
                population,
                hierarchy_class: HierarchyClass::from_population(population),
                is_capital: index == capital && i == 0,
                location,
                rank: 0,
            });
            next_id += 1;
        }
    }

    derive_settlement_tiers(&mut settlements, &HierarchyThresholds::default());
    settlements
}

/// Recompute `hierarchy_class` and `rank` from population
///
/// Both fields are derived; loaded tables get them rebuilt here rather than
/// trusted.
pub fn derive_settlement_tiers(settlements: &mut [Settlement], thresholds: &HierarchyThresholds) {
    let populations: Vec<u64> = settlements.iter().map(|s| s.population).collect();
    for (settlement, rank) in settlements.iter_mut().zip(ordinal_ranks(&populations)) {
        settlement.hierarchy_class = thresholds.classify(settlement.population);
        settlement.rank = rank;
    }
}

/// Highways between the largest settlements, primary roads inside regions
pub fn generate_roads(
    regions: &[Region],
    settlements: &[Settlement],
    rng: &mut ChaCha8Rng,
) -> Vec<RoadSegment> {
    let mut roads = Vec::new();

    let mut by_population: Vec<&Settlement> = settlements.iter().collect();
    by_population.sort_by(|a, b| b.population.cmp(&a.population));
    let hubs: Vec<&Settlement> = by_population.into_iter().take(HIGHWAY_HUBS).collect();

    for (i, from) in hubs.iter().enumerate() {
        for j in nearest(&hubs, i, HIGHWAY_NEIGHBOURS) {
            let to = hubs[j];
            let (a, b) = (from.location, to.location);
            let mid = coord! {
                x: (a.x() + b.x()) / 2.0 + sampling::uniform(rng, -0.2, 0.2),
                y: (a.y() + b.y()) / 2.0 + sampling::uniform(rng, -0.2, 0.2),
            };
            let line = LineString::new(vec![a.0, mid, b.0]);
            let lanes = *sampling::choose(rng, &HIGHWAY_LANES);
            let id = RoadId(roads.len() as u32 + 1);
            roads.push(road_segment(id, RoadClass::Highway, lanes, from, to, line));
        }
    }

    for region in regions {
        let cities: Vec<&Settlement> = settlements
            .iter()
            .filter(|s| s.region_id == region.id && PRIMARY_ROAD_POPULATION.contains(&s.population))
            .collect();

        for (i, from) in cities.iter().enumerate() {
            for j in nearest(&cities, i, PRIMARY_NEIGHBOURS) {
                let to = cities[j];
                let line = LineString::new(vec![from.location.0, to.location.0]);
                let lanes = *sampling::choose(rng, &PRIMARY_LANES);
                let id = RoadId(roads.len() as u32 + 1);
                roads.push(road_segment(id, RoadClass::Primary, lanes, from, to, line));
            }
        }
    }

    roads
}

/// Flagship projects followed by randomly placed smaller ones
pub fn generate_projects(
    regions: &[Region],
    settlements: &[Settlement],
    rng: &mut ChaCha8Rng,
) -> Vec<Project> {
    let mut projects = Vec::new();

    for flagship in FLAGSHIP_PROJECTS.iter() {
        let region_id = regions
            .iter()
            .find(|r| r.name.en == flagship.region)
            .map(|r| r.id);
        projects.push(Project {
            id: ProjectId(projects.len() as u32 + 1),
            name: flagship.name.to_string(),
            project_type: FLAGSHIP_PROJECT_TYPE.to_string(),
            sector: flagship.sector.to_string(),
            region_id,
            region_name: Some(flagship.region.to_string()),
            status: flagship.status,
            start_year: flagship.start_year,
            completion_year: flagship.completion_year,
            budget_billion_usd: flagship.budget_billion_usd,
            description: Some(flagship.description.to_string()),
            jobs_created: (flagship.budget_billion_usd * sampling::uniform(rng, 2000.0, 8000.0))
                as u64,
            location: Point::new(flagship.lon, flagship.lat),
        });
    }

    if settlements.is_empty() {
        return projects;
    }

    let count: usize = rng.gen_range(15..25);
    for _ in 0..count {
        let template = sampling::choose(rng, &PROJECT_TEMPLATES);
        let anchor = sampling::choose(rng, settlements);
        let location = Point::new(
            anchor.location.x() + sampling::uniform(rng, -0.1, 0.1),
            anchor.location.y() + sampling::uniform(rng, -0.1, 0.1),
        );
        let budget = sampling::uniform(rng, template.min_budget, template.max_budget);
        let status = PROJECT_STATUSES[sampling::weighted_index(rng, &PROJECT_STATUS_WEIGHTS)];

        let (start_year, completion_year) = match status {
            DevelopmentStatus::Operational => {
                let start = rng.gen_range(2018..2024);
                (start, rng.gen_range(start + 1..2026))
            }
            DevelopmentStatus::UnderConstruction => {
                (rng.gen_range(2022..2026), rng.gen_range(2026..2030))
            }
            _ => (rng.gen_range(2025..2028), rng.gen_range(2028..2035)),
        };

        let id = ProjectId(projects.len() as u32 + 1);
        projects.push(Project {
            id,
            name: format!("{} {}", template.project_type, id.0),
            project_type: template.project_type.to_string(),
            sector: template.sector.to_string(),
            region_id: Some(anchor.region_id),
            region_name: regions
                .iter()
                .find(|r| r.id == anchor.region_id)
                .map(|r| r.name.en.clone()),
            status,
            start_year,
            completion_year,
            budget_billion_usd: (budget * 100.0).round() / 100.0,
            description: None,
            jobs_created: (budget * sampling::uniform(rng, 1000.0, 5000.0)) as u64,
            location,
        });
    }

    projects
}

/// GDP follows population share with +/-20% noise
pub fn generate_economic_data(
    regions: &[Region],
    populations: &[RegionPopulation],
    profile: &CountryProfile,
    rng: &mut ChaCha8Rng,
) -> Vec<RegionEconomy> {
    let total_population: f64 = populations.iter().map(|p| p.population as f64).sum();

    let weights: Vec<f64> = populations
        .iter()
        .map(|p| {
            let share = if total_population > 0.0 {
                p.population as f64 / total_population
            } else {
                0.0
            };
            share * sampling::uniform(rng, 0.8, 1.2)
        })
        .collect();
    let gdp: Vec<f64> = normalize(&weights)
        .into_iter()
        .map(|share| share * profile.gdp_billion_usd)
        .collect();

    let per_capita: Vec<f64> = gdp
        .iter()
        .zip(populations)
        .map(|(g, p)| {
            if p.population > 0 {
                g * 1e9 / p.population as f64
            } else {
                0.0
            }
        })
        .collect();
    let richest = per_capita.iter().copied().fold(0.0, f64::max);

    regions
        .iter()
        .zip(gdp.iter().zip(&per_capita))
        .map(|(region, (&gdp_billion_usd, &gdp_per_capita_usd))| {
            let relative = if richest > 0.0 {
                gdp_per_capita_usd / richest
            } else {
                0.0
            };
            let employment_rate = 95.0 - relative * 5.0 + sampling::uniform(rng, -2.0, 2.0);
            RegionEconomy {
                region_id: region.id,
                name: region.name.en.clone(),
                year: BASE_YEAR,
                gdp_billion_usd,
                gdp_per_capita_usd,
                employment_rate,
                unemployment_rate: 100.0 - employment_rate,
            }
        })
        .collect()
}

/// One protected area per region, clipped to the region outline
pub fn generate_environment(regions: &[Region], rng: &mut ChaCha8Rng) -> Vec<EnvironmentFeature> {
    let mut features = Vec::new();

    for region in regions {
        let center = place_point(region, rng);
        let star = star_polygon(rng, (center.x(), center.y()), 6..10, (0.1, 0.3));
        let geometry = MultiPolygon::new(vec![star]).intersection(&region.geometry);
        if geometry.0.is_empty() {
            continue;
        }
        let area_sqkm = geometry.chamberlain_duquette_unsigned_area() / 1e6;
        features.push(EnvironmentFeature {
            id: features.len() as u32 + 1,
            region_id: region.id,
            layer: EnvironmentLayer::ProtectedAreas,
            name: format!("{} Protected Area", region.name.en),
            geometry,
            area_sqkm,
        });
    }

    features
}

/// Union of all regions as a single level-1 unit
pub fn country_unit(profile: &CountryProfile, regions: &[Region]) -> Region {
    merge_regions(
        &profile.name,
        profile.total_area_sqkm,
        Point::new(profile.center_lon, profile.center_lat),
        regions,
    )
}

/// Level-1 unit named `name`; `fallback` is the centroid of an empty union
pub fn merge_regions(name: &str, area_sqkm: f64, fallback: Point<f64>, regions: &[Region]) -> Region {
    let geometry = regions
        .iter()
        .fold(MultiPolygon::new(Vec::new()), |acc, region| {
            acc.union(&region.geometry)
        });
    let centroid = geometry.centroid().unwrap_or(fallback);

    Region {
        id: COUNTRY_ID,
        code: "XX".into(),
        name: BilingualName::new(name, ""),
        level: LEVEL_COUNTRY,
        parent_id: None,
        geometry,
        area_sqkm,
        centroid,
    }
}

fn clamp_inset(value: f64, min: f64, max: f64) -> f64 {
    let (low, high) = (min + 0.5, max - 0.5);
    if low > high {
        (min + max) / 2.0
    } else {
        value.clamp(low, high)
    }
}

/// Irregular polygon around `center`; sorted angles keep it simple
fn star_polygon(
    rng: &mut ChaCha8Rng,
    (cx, cy): (f64, f64),
    vertices: Range<usize>,
    (min_radius, max_radius): (f64, f64),
) -> Polygon<f64> {
    let n = rng.gen_range(vertices);
    let mut angles: Vec<f64> = (0..n).map(|_| sampling::uniform(rng, 0.0, 2.0 * PI)).collect();
    angles.sort_by(|a, b| a.total_cmp(b));
    let radii: Vec<f64> = (0..n)
        .map(|_| sampling::uniform(rng, min_radius, max_radius))
        .collect();

    let ring: Vec<Coord<f64>> = angles
        .iter()
        .zip(&radii)
        .map(|(a, r)| coord! { x: cx + r * a.cos(), y: cy + r * a.sin() })
        .collect();

    // Polygon::new closes the ring
    Polygon::new(LineString::new(ring), Vec::new())
}

/// Rejection-sample a point inside the region, else its centroid
fn place_point(region: &Region, rng: &mut ChaCha8Rng) -> Point<f64> {
    if let Some(rect) = region.geometry.bounding_rect() {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = Point::new(
                sampling::uniform(rng, rect.min().x, rect.max().x),
                sampling::uniform(rng, rect.min().y, rect.max().y),
            );
            if region.geometry.contains(&candidate) {
                return candidate;
            }
        }
    }
    region.centroid
}

/// Indices of the `k` closest other cities; ties go to the earlier index
fn nearest(cities: &[&Settlement], index: usize, k: usize) -> Vec<usize> {
    let origin = cities[index].location;
    let mut others: Vec<(OrderedFloat<f64>, usize)> = cities
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(j, city)| (OrderedFloat(origin.euclidean_distance(&city.location)), j))
        .collect();
    others.sort();
    others.into_iter().take(k).map(|(_, j)| j).collect()
}

fn road_segment(
    id: RoadId,
    road_class: RoadClass,
    lanes: u8,
    from: &Settlement,
    to: &Settlement,
    geometry: LineString<f64>,
) -> RoadSegment {
    let name = match road_class {
        RoadClass::Highway => format!("Highway {}", id.0),
        RoadClass::Primary => format!("Road {}", id.0),
    };
    RoadSegment {
        id,
        name,
        road_class,
        lanes,
        length_km: geometry.euclidean_length() * KM_PER_DEGREE,
        status: DevelopmentStatus::Operational,
        from: from.id,
        to: to.id,
        from_region: from.region_id,
        to_region: to.region_id,
        geometry,
    }
}

fn normalize(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total > 0.0 && total.is_finite() {
        values.iter().map(|v| v / total).collect()
    } else {
        vec![1.0 / values.len().max(1) as f64; values.len()]
    }
}

fn density(population: u64, area_sqkm: f64) -> f64 {
    if area_sqkm > 0.0 {
        population as f64 / area_sqkm
    } else {
        0.0
    }
}
