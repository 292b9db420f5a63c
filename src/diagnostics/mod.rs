//! Spatial diagnostics: primacy, hierarchy, concentration, inequality, balance
//!
//! Pure functions over already-assembled tables. Degenerate inputs return
//! sentinels (0.0 or `f64::INFINITY`) instead of errors.

mod balance;
mod hierarchy;
mod indices;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::LEVEL_REGION;
use crate::geography::model::{HierarchyClass, Region, RegionPopulation, Settlement};

pub use balance::{regional_balance, RegionalBalance};
pub use hierarchy::{
    classify_hierarchy, primacy_index, ClassifiedSettlement, HierarchyThresholds, Primacy,
    RankedCity, PRIMACY_TABLE_SIZE,
};
pub use indices::{gini_coefficient, ordinal_ranks, Concentration};

/// Everything `SpatialDiagnostics::run` computes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub region_count: usize,
    pub settlement_count: usize,
    /// Serialized as `null` when infinite
    pub primacy_index: f64,
    pub top_cities: Vec<RankedCity>,
    pub concentration: Concentration,
    pub gini_coefficient: f64,
    /// Settlements per hierarchy class label
    pub hierarchy_counts: BTreeMap<String, usize>,
    pub regional_balance: Vec<RegionalBalance>,
}

/// Diagnostics over one region set and its settlements
pub struct SpatialDiagnostics<'a> {
    regions: &'a [Region],
    settlements: &'a [Settlement],
    populations: Option<&'a [RegionPopulation]>,
    thresholds: HierarchyThresholds,
}

impl<'a> SpatialDiagnostics<'a> {
    pub fn new(regions: &'a [Region], settlements: &'a [Settlement]) -> Self {
        Self {
            regions,
            settlements,
            populations: None,
            thresholds: HierarchyThresholds::default(),
        }
    }

    /// Use regional population totals for the Gini instead of settlement sums
    pub fn with_population(mut self, populations: &'a [RegionPopulation]) -> Self {
        self.populations = Some(populations);
        self
    }

    pub fn with_thresholds(mut self, thresholds: HierarchyThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn primacy_index(&self) -> Primacy {
        let primacy = primacy_index(self.settlements);
        tracing::info!("Urban Primacy Index: {:.2}", primacy.index);
        primacy
    }

    pub fn classify_hierarchy(&self) -> Vec<ClassifiedSettlement> {
        let classified = classify_hierarchy(self.settlements, &self.thresholds);
        for (class, count) in count_classes(&classified) {
            tracing::info!("  {}: {}", class, count);
        }
        classified
    }

    /// Settlement population HHI across regions
    pub fn concentration_index(&self) -> Concentration {
        let concentration = Concentration::by_unit(
            self.settlements
                .iter()
                .map(|s| (s.region_id, s.population as f64)),
        );
        tracing::info!("Concentration Index (HHI): {:.4}", concentration.hhi);
        tracing::info!("Normalized HHI: {:.4}", concentration.normalized);
        concentration
    }

    /// Gini across level-2 regional populations
    pub fn gini_coefficient(&self) -> f64 {
        let values: Vec<f64> = match self.populations {
            Some(populations) => populations.iter().map(|p| p.population as f64).collect(),
            None => regional_balance(self.regions, self.settlements)
                .iter()
                .map(|b| b.total_population as f64)
                .collect(),
        };
        let gini = gini_coefficient(&values);
        tracing::info!("Gini Coefficient: {:.4}", gini);
        gini
    }

    pub fn regional_balance(&self) -> Vec<RegionalBalance> {
        regional_balance(self.regions, self.settlements)
    }

    pub fn run(&self) -> DiagnosticsReport {
        tracing::info!("Running spatial diagnostics...");

        let primacy = self.primacy_index();
        let classified = self.classify_hierarchy();
        let concentration = self.concentration_index();
        let gini = self.gini_coefficient();
        let balance = self.regional_balance();

        DiagnosticsReport {
            region_count: self
                .regions
                .iter()
                .filter(|r| r.level == LEVEL_REGION)
                .count(),
            settlement_count: self.settlements.len(),
            primacy_index: primacy.index,
            top_cities: primacy.top_cities,
            concentration,
            gini_coefficient: gini,
            hierarchy_counts: count_classes(&classified)
                .into_iter()
                .map(|(class, count)| (class.to_string(), count))
                .collect(),
            regional_balance: balance,
        }
    }
}

fn count_classes(classified: &[ClassifiedSettlement]) -> BTreeMap<HierarchyClass, usize> {
    let mut counts = BTreeMap::new();
    for settlement in classified {
        *counts.entry(settlement.hierarchy_class).or_insert(0) += 1;
    }
    counts
}
