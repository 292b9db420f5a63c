//! Inequality and concentration indices

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::RegionId;

/// Discrete Gini over ascending values, 1-indexed:
/// `2 * sum(i * v_i) / (n * sum(v)) - (n + 1) / n`
///
/// Returns 0 for empty or all-zero input.
pub fn gini_coefficient(values: &[f64]) -> f64 {
    let n = values.len();
    let total: f64 = values.iter().sum();
    if n == 0 || total == 0.0 {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, v)| (i + 1) as f64 * v)
        .sum();
    let n = n as f64;
    2.0 * weighted / (n * total) - (n + 1.0) / n
}

/// Herfindahl-Hirschman index over spatial units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    /// Sum of squared shares, in `[1/n, 1]`
    pub hhi: f64,
    /// `(hhi - 1/n) / (1 - 1/n)`; 1.0 for a single unit
    pub normalized: f64,
    pub units: usize,
}

impl Concentration {
    /// HHI from per-unit totals; all zeros when the grand total is zero
    pub fn from_totals(totals: &[f64]) -> Self {
        let total: f64 = totals.iter().sum();
        let units = totals.len();
        if total == 0.0 {
            return Self {
                hhi: 0.0,
                normalized: 0.0,
                units,
            };
        }

        let hhi: f64 = totals.iter().map(|t| (t / total).powi(2)).sum();
        let normalized = if units > 1 {
            let floor = 1.0 / units as f64;
            (hhi - floor) / (1.0 - floor)
        } else {
            1.0
        };

        Self {
            hhi,
            normalized,
            units,
        }
    }

    /// Group `(unit, value)` pairs by unit, sum, then compute HHI
    pub fn by_unit(pairs: impl IntoIterator<Item = (RegionId, f64)>) -> Self {
        let mut totals: BTreeMap<RegionId, f64> = BTreeMap::new();
        for (unit, value) in pairs {
            *totals.entry(unit).or_insert(0.0) += value;
        }
        let totals: Vec<f64> = totals.into_values().collect();
        Self::from_totals(&totals)
    }
}

/// 1-based rank by value, largest first; ties keep input order
pub fn ordinal_ranks(values: &[u64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].cmp(&values[a]));

    let mut ranks = vec![0u32; values.len()];
    for (position, index) in order.into_iter().enumerate() {
        ranks[index] = position as u32 + 1;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gini_uniform_is_zero() {
        assert!(gini_coefficient(&[5.0, 5.0, 5.0, 5.0]).abs() < 1e-12);
    }

    #[test]
    fn test_gini_single_holder_approaches_one() {
        let mut values = vec![0.0; 99];
        values.push(100.0);
        let gini = gini_coefficient(&values);
        assert!((gini - 0.99).abs() < 1e-9, "gini {}", gini);
    }

    #[test]
    fn test_gini_degenerate_inputs() {
        assert_eq!(gini_coefficient(&[]), 0.0);
        assert_eq!(gini_coefficient(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_hhi_two_equal_units() {
        let c = Concentration::from_totals(&[10.0, 10.0]);
        assert!((c.hhi - 0.5).abs() < 1e-12);
        assert!(c.normalized.abs() < 1e-12);
    }

    #[test]
    fn test_hhi_single_unit() {
        let c = Concentration::from_totals(&[42.0]);
        assert_eq!(c.hhi, 1.0);
        assert_eq!(c.normalized, 1.0);
    }

    #[test]
    fn test_hhi_zero_total() {
        let c = Concentration::from_totals(&[0.0, 0.0, 0.0]);
        assert_eq!(c.hhi, 0.0);
        assert_eq!(c.units, 3);
    }

    #[test]
    fn test_hhi_groups_by_unit() {
        let c = Concentration::by_unit(vec![
            (RegionId(1), 5.0),
            (RegionId(2), 10.0),
            (RegionId(1), 5.0),
        ]);
        assert_eq!(c.units, 2);
        assert!((c.hhi - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ordinal_ranks_break_ties_by_position() {
        assert_eq!(ordinal_ranks(&[10, 30, 10, 20]), vec![3, 1, 4, 2]);
    }
}
