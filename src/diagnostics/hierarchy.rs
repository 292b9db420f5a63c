//! Urban primacy and settlement hierarchy

use serde::{Deserialize, Serialize};

use crate::core::types::{RegionId, SettlementId};
use crate::diagnostics::indices::ordinal_ranks;
use crate::geography::model::{HierarchyClass, Settlement};

/// Settlements considered for the primacy table
pub const PRIMACY_TABLE_SIZE: usize = 10;

/// Minimum population per class, evaluated largest threshold first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyThresholds {
    thresholds: Vec<(HierarchyClass, u64)>,
}

impl HierarchyThresholds {
    pub fn new(mut thresholds: Vec<(HierarchyClass, u64)>) -> Self {
        thresholds.sort_by(|a, b| b.1.cmp(&a.1));
        Self { thresholds }
    }

    /// Replace one class's threshold
    pub fn with_threshold(mut self, class: HierarchyClass, min_population: u64) -> Self {
        self.thresholds.retain(|(c, _)| *c != class);
        self.thresholds.push((class, min_population));
        Self::new(self.thresholds)
    }

    /// First class whose threshold the population meets; Village otherwise
    pub fn classify(&self, population: u64) -> HierarchyClass {
        self.thresholds
            .iter()
            .find(|(_, min)| population >= *min)
            .map(|(class, _)| *class)
            .unwrap_or(HierarchyClass::Village)
    }
}

impl Default for HierarchyThresholds {
    fn default() -> Self {
        Self::new(
            HierarchyClass::ALL
                .iter()
                .map(|class| (*class, class.default_threshold()))
                .collect(),
        )
    }
}

/// Settlement with its derived tier and rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSettlement {
    pub id: SettlementId,
    pub name: String,
    pub region_id: RegionId,
    pub population: u64,
    pub hierarchy_class: HierarchyClass,
    pub rank: u32,
}

pub fn classify_hierarchy(
    settlements: &[Settlement],
    thresholds: &HierarchyThresholds,
) -> Vec<ClassifiedSettlement> {
    let populations: Vec<u64> = settlements.iter().map(|s| s.population).collect();
    settlements
        .iter()
        .zip(ordinal_ranks(&populations))
        .map(|(s, rank)| ClassifiedSettlement {
            id: s.id,
            name: s.name.en.clone(),
            region_id: s.region_id,
            population: s.population,
            hierarchy_class: thresholds.classify(s.population),
            rank,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCity {
    pub id: SettlementId,
    pub name: String,
    pub population: u64,
    pub rank: u32,
    /// Running share of the top-table population
    pub cumulative_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primacy {
    /// Largest / sum of next three; `INFINITY` when they are all empty
    pub index: f64,
    pub top_cities: Vec<RankedCity>,
}

/// Largest settlement over the sum of the next three
///
/// Fewer than two settlements give an index of 0.
pub fn primacy_index(settlements: &[Settlement]) -> Primacy {
    let mut sorted: Vec<&Settlement> = settlements.iter().collect();
    sorted.sort_by(|a, b| b.population.cmp(&a.population));
    sorted.truncate(PRIMACY_TABLE_SIZE);

    let index = if sorted.len() < 2 {
        0.0
    } else {
        let next_three: u64 = sorted[1..sorted.len().min(4)]
            .iter()
            .map(|s| s.population)
            .sum();
        if next_three > 0 {
            sorted[0].population as f64 / next_three as f64
        } else {
            f64::INFINITY
        }
    };

    let table_total: u64 = sorted.iter().map(|s| s.population).sum();
    let mut running = 0u64;
    let top_cities = sorted
        .iter()
        .enumerate()
        .map(|(i, s)| {
            running += s.population;
            RankedCity {
                id: s.id,
                name: s.name.en.clone(),
                population: s.population,
                rank: i as u32 + 1,
                cumulative_share: if table_total > 0 {
                    running as f64 / table_total as f64
                } else {
                    0.0
                },
            }
        })
        .collect();

    Primacy { index, top_cities }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::BilingualName;
    use geo_types::Point;

    fn settlements(populations: &[u64]) -> Vec<Settlement> {
        populations
            .iter()
            .enumerate()
            .map(|(i, &population)| Settlement {
                id: SettlementId(i as u32 + 1),
                name: BilingualName::new(format!("S{}", i + 1), ""),
                region_id: RegionId(1),
                population,
                hierarchy_class: HierarchyClass::from_population(population),
                is_capital: false,
                location: Point::new(0.0, 0.0),
                rank: 0,
            })
            .collect()
    }

    #[test]
    fn test_primacy_top_four() {
        let result = primacy_index(&settlements(&[150_000, 1_000_000, 200_000, 150_000]));
        assert!((result.index - 2.0).abs() < 1e-12);
        assert_eq!(result.top_cities[0].population, 1_000_000);
        assert_eq!(result.top_cities.last().unwrap().cumulative_share, 1.0);
    }

    #[test]
    fn test_primacy_sentinels() {
        assert_eq!(primacy_index(&settlements(&[500])).index, 0.0);
        assert_eq!(primacy_index(&[]).index, 0.0);
        assert!(primacy_index(&settlements(&[500, 0, 0])).index.is_infinite());
    }

    #[test]
    fn test_primacy_table_capped_at_ten() {
        let result = primacy_index(&settlements(&[1000; 15]));
        assert_eq!(result.top_cities.len(), PRIMACY_TABLE_SIZE);
        assert!((result.index - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_custom_threshold_changes_class() {
        let thresholds = HierarchyThresholds::default().with_threshold(HierarchyClass::Metropolis, 2_000_000);
        assert_eq!(thresholds.classify(1_500_000), HierarchyClass::LargeCity);
        assert_eq!(thresholds.classify(2_000_000), HierarchyClass::Metropolis);
    }

    #[test]
    fn test_classify_ranks_ties_in_order() {
        let classified = classify_hierarchy(&settlements(&[100, 300, 100]), &HierarchyThresholds::default());
        let ranks: Vec<u32> = classified.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![2, 1, 3]);
        assert!(classified.iter().all(|c| c.hierarchy_class == HierarchyClass::Village));
    }
}
