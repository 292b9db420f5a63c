//! Property and fixture tests for the spatial diagnostics indices

use geo_types::Point;
use nss_spatial::core::types::{BilingualName, RegionId, SettlementId};
use nss_spatial::diagnostics::{
    classify_hierarchy, gini_coefficient, primacy_index, Concentration, HierarchyThresholds,
};
use nss_spatial::geography::model::{HierarchyClass, Settlement};
use proptest::prelude::*;

fn settlements(populations: &[u64]) -> Vec<Settlement> {
    populations
        .iter()
        .enumerate()
        .map(|(i, &population)| Settlement {
            id: SettlementId(i as u32 + 1),
            name: BilingualName::new(format!("City {}", i + 1), ""),
            region_id: RegionId(i as u32 % 3 + 1),
            population,
            hierarchy_class: HierarchyClass::from_population(population),
            is_capital: false,
            location: Point::new(0.0, 0.0),
            rank: 0,
        })
        .collect()
}

#[test]
fn test_primacy_reference_case() {
    let result = primacy_index(&settlements(&[1_000_000, 200_000, 150_000, 150_000]));
    assert!((result.index - 2.0).abs() < 1e-12);
}

#[test]
fn test_hhi_reference_cases() {
    let two = Concentration::from_totals(&[50.0, 50.0]);
    assert_eq!(two.hhi, 0.5);
    assert_eq!(two.normalized, 0.0);

    let one = Concentration::from_totals(&[100.0]);
    assert_eq!(one.hhi, 1.0);
    assert_eq!(one.normalized, 1.0);

    let empty = Concentration::from_totals(&[0.0, 0.0]);
    assert_eq!(empty.hhi, 0.0);
}

#[test]
fn test_gini_uniform_and_concentrated() {
    assert!(gini_coefficient(&[5.0; 10]).abs() < 1e-12);
    assert_eq!(gini_coefficient(&[]), 0.0);
    assert_eq!(gini_coefficient(&[0.0, 0.0]), 0.0);

    let mut concentrated = vec![0.0; 99];
    concentrated.push(1.0);
    assert!(gini_coefficient(&concentrated) > 0.98);
}

proptest! {
    #[test]
    fn gini_is_order_invariant(values in prop::collection::vec(0.0f64..1e7, 1..60)) {
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let a = gini_coefficient(&values);
        let b = gini_coefficient(&sorted);
        prop_assert!((a - b).abs() < 1e-9);
        prop_assert!(a > -1e-9 && a < 1.0);
    }

    #[test]
    fn classification_is_total_and_monotonic(populations in prop::collection::vec(0u64..5_000_000, 1..80)) {
        let classified = classify_hierarchy(&settlements(&populations), &HierarchyThresholds::default());
        prop_assert_eq!(classified.len(), populations.len());

        for a in &classified {
            prop_assert!(HierarchyClass::ALL.contains(&a.hierarchy_class));
            for b in &classified {
                if a.population >= b.population {
                    prop_assert!(a.hierarchy_class >= b.hierarchy_class);
                }
            }
        }
    }

    #[test]
    fn hhi_within_bounds(totals in prop::collection::vec(1.0f64..1e6, 1..30)) {
        let concentration = Concentration::from_totals(&totals);
        let n = totals.len() as f64;
        prop_assert!(concentration.hhi >= 1.0 / n - 1e-12);
        prop_assert!(concentration.hhi <= 1.0 + 1e-12);
        prop_assert!(concentration.normalized >= -1e-9 && concentration.normalized <= 1.0 + 1e-9);
    }

    #[test]
    fn ranks_are_a_permutation(populations in prop::collection::vec(0u64..1_000, 1..50)) {
        let classified = classify_hierarchy(&settlements(&populations), &HierarchyThresholds::default());
        let mut ranks: Vec<u32> = classified.iter().map(|c| c.rank).collect();
        ranks.sort_unstable();
        let expected: Vec<u32> = (1..=populations.len() as u32).collect();
        prop_assert_eq!(ranks, expected);
    }
}
