//! Regional balance: population share against area share

use serde::{Deserialize, Serialize};

use crate::core::types::{RegionId, LEVEL_REGION};
use crate::geography::model::{Region, Settlement};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalBalance {
    pub region_id: RegionId,
    pub name: String,
    pub area_sqkm: f64,
    /// Settlement population summed over the region
    pub total_population: u64,
    pub settlement_count: usize,
    pub avg_settlement_pop: f64,
    pub population_share: f64,
    pub area_share: f64,
    /// Above 1 means denser than the national average
    pub pop_area_ratio: f64,
}

/// Join level-2 regions with settlement aggregates
pub fn regional_balance(regions: &[Region], settlements: &[Settlement]) -> Vec<RegionalBalance> {
    let level_two: Vec<&Region> = regions.iter().filter(|r| r.level == LEVEL_REGION).collect();

    let aggregates: Vec<(u64, usize)> = level_two
        .iter()
        .map(|region| {
            settlements
                .iter()
                .filter(|s| s.region_id == region.id)
                .fold((0u64, 0usize), |(sum, count), s| (sum + s.population, count + 1))
        })
        .collect();

    let total_population: u64 = aggregates.iter().map(|(sum, _)| sum).sum();
    let total_area: f64 = level_two.iter().map(|r| r.area_sqkm).sum();

    level_two
        .into_iter()
        .zip(aggregates)
        .map(|(region, (population, count))| {
            let population_share = ratio(population as f64, total_population as f64);
            let area_share = ratio(region.area_sqkm, total_area);
            RegionalBalance {
                region_id: region.id,
                name: region.name.en.clone(),
                area_sqkm: region.area_sqkm,
                total_population: population,
                settlement_count: count,
                avg_settlement_pop: ratio(population as f64, count as f64),
                population_share,
                area_share,
                pop_area_ratio: ratio(population_share, area_share),
            }
        })
        .collect()
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BilingualName, SettlementId, COUNTRY_ID};
    use crate::geography::model::HierarchyClass;
    use geo_types::{MultiPolygon, Point};

    fn region(id: u32, area_sqkm: f64) -> Region {
        Region {
            id: RegionId(id),
            code: RegionId(id).to_string(),
            name: BilingualName::new(format!("Region {}", id), ""),
            level: LEVEL_REGION,
            parent_id: Some(COUNTRY_ID),
            geometry: MultiPolygon::new(Vec::new()),
            area_sqkm,
            centroid: Point::new(0.0, 0.0),
        }
    }

    fn settlement(id: u32, region: u32, population: u64) -> Settlement {
        Settlement {
            id: SettlementId(id),
            name: BilingualName::new(format!("S{}", id), ""),
            region_id: RegionId(region),
            population,
            hierarchy_class: HierarchyClass::from_population(population),
            is_capital: false,
            location: Point::new(0.0, 0.0),
            rank: 0,
        }
    }

    #[test]
    fn test_dense_region_ratio_above_one() {
        let regions = vec![region(1, 100.0), region(2, 300.0)];
        let settlements = vec![settlement(1, 1, 600), settlement(2, 1, 200), settlement(3, 2, 200)];
        let balance = regional_balance(&regions, &settlements);

        assert_eq!(balance[0].total_population, 800);
        assert_eq!(balance[0].settlement_count, 2);
        assert_eq!(balance[0].avg_settlement_pop, 400.0);
        assert!((balance[0].population_share - 0.8).abs() < 1e-12);
        assert!((balance[0].area_share - 0.25).abs() < 1e-12);
        assert!((balance[0].pop_area_ratio - 3.2).abs() < 1e-12);
        assert!(balance[1].pop_area_ratio < 1.0);
    }

    #[test]
    fn test_region_without_settlements() {
        let regions = vec![region(1, 100.0), region(2, 100.0)];
        let settlements = vec![settlement(1, 1, 50)];
        let balance = regional_balance(&regions, &settlements);
        assert_eq!(balance[1].settlement_count, 0);
        assert_eq!(balance[1].avg_settlement_pop, 0.0);
        assert_eq!(balance[1].pop_area_ratio, 0.0);
    }

    #[test]
    fn test_other_levels_skipped() {
        let mut country = region(0, 200.0);
        country.level = 1;
        let balance = regional_balance(&[country, region(1, 100.0)], &[]);
        assert_eq!(balance.len(), 1);
    }
}
