//! Sector profiles and land-use conflict analysis

mod matrix;
mod sectors;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

pub use matrix::{
    mitigation_strategies, ConflictAssessment, ConflictLevel, ConflictMatrix, LandUse,
    MAX_MITIGATION_STRATEGIES,
};
pub use sectors::{sector_profile, SectorProfile, WaterIntensity, ALL_REGIONS, SECTOR_PROFILES};

/// Sectors listed in the report's growth ranking
const HIGH_GROWTH_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SectorGrowth {
    pub name: String,
    pub growth_rate_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConflictSummary {
    pub high_conflicts: usize,
    pub moderate_conflicts: usize,
    pub synergies_identified: usize,
    pub key_conflicts: Vec<String>,
    pub key_synergies: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectoralReport {
    pub title: String,
    pub sectors_analyzed: usize,
    pub priority_sectors: Vec<String>,
    pub high_growth_sectors: Vec<SectorGrowth>,
    pub water_critical_sectors: Vec<String>,
    pub conflict_summary: ConflictSummary,
    pub regional_hotspots: BTreeMap<String, String>,
    pub recommendations: Vec<String>,
}

/// Assesses land-use interactions across the sector table
#[derive(Debug, Clone, Default)]
pub struct SectoralAnalyzer {
    matrix: ConflictMatrix,
}

impl SectoralAnalyzer {
    pub fn new() -> Self {
        let analyzer = Self {
            matrix: ConflictMatrix::new(),
        };
        tracing::debug!(
            "Sectoral analyzer: {} sectors, {} land uses",
            SECTOR_PROFILES.len(),
            LandUse::ALL.len()
        );
        analyzer
    }

    pub fn sectors(&self) -> &'static [SectorProfile] {
        &SECTOR_PROFILES
    }

    pub fn sector(&self, key: &str) -> Option<&'static SectorProfile> {
        sector_profile(key)
    }

    pub fn conflict_matrix(&self) -> &ConflictMatrix {
        &self.matrix
    }

    pub fn assess_conflict(&self, a: LandUse, b: LandUse) -> ConflictAssessment {
        ConflictAssessment::assess(&self.matrix, a, b)
    }

    /// Parse both land-use keys, then assess
    pub fn assess_conflict_by_key(&self, a: &str, b: &str) -> crate::core::error::Result<ConflictAssessment> {
        Ok(self.assess_conflict(a.parse()?, b.parse()?))
    }

    /// Conflicting land-use pairs among the sectors active in `region`
    pub fn identify_regional_conflicts(&self, region: &str) -> Vec<ConflictAssessment> {
        let uses: BTreeSet<LandUse> = SECTOR_PROFILES
            .iter()
            .filter(|s| s.is_active_in(region))
            .map(|s| s.land_use)
            .collect();
        let uses: Vec<LandUse> = uses.into_iter().collect();

        let mut conflicts = Vec::new();
        for (i, &a) in uses.iter().enumerate() {
            for &b in &uses[i + 1..] {
                let assessment = self.assess_conflict(a, b);
                if assessment.conflict_level.is_conflict() {
                    conflicts.push(assessment);
                }
            }
        }

        tracing::debug!(
            "{}: {} land uses, {} conflicts",
            region,
            uses.len(),
            conflicts.len()
        );
        conflicts
    }

    pub fn sectoral_report(&self) -> SectoralReport {
        let mut by_growth: Vec<&SectorProfile> = SECTOR_PROFILES.iter().collect();
        by_growth.sort_by(|a, b| b.growth_rate_pct.total_cmp(&a.growth_rate_pct));

        let conflict_summary = ConflictSummary {
            high_conflicts: self
                .matrix
                .count_pairs(|l| l == ConflictLevel::HighConflict),
            moderate_conflicts: self
                .matrix
                .count_pairs(|l| l == ConflictLevel::ModerateConflict),
            synergies_identified: self.matrix.count_pairs(|l| l.score() > 0),
            key_conflicts: strings(&[
                "Industrial vs Residential (pollution, noise)",
                "Mining vs Environmental Protection (habitat loss)",
                "Agriculture vs Mining (water competition)",
            ]),
            key_synergies: strings(&[
                "Tourism + Environmental Protection (eco-tourism)",
                "Infrastructure + Industrial (logistics)",
                "Renewable Energy + Agriculture (agrivoltaics)",
            ]),
        };

        let regional_hotspots = [
            ("Riyadh", "Industrial-residential conflicts, water stress"),
            ("Eastern Province", "Oil industry vs environmental protection"),
            ("Tabuk/NEOM", "Tourism vs renewable energy land competition"),
            ("Al-Qassim", "Agricultural water depletion"),
        ]
        .iter()
        .map(|(region, note)| (region.to_string(), note.to_string()))
        .collect();

        tracing::info!(
            "Sectoral report: {} high conflicts, {} moderate, {} synergies",
            conflict_summary.high_conflicts,
            conflict_summary.moderate_conflicts,
            conflict_summary.synergies_identified
        );

        SectoralReport {
            title: "Sectoral Analysis: Saudi Arabia".to_string(),
            sectors_analyzed: SECTOR_PROFILES.len(),
            priority_sectors: SECTOR_PROFILES
                .iter()
                .filter(|s| s.vision2030_priority)
                .map(|s| s.name.to_string())
                .collect(),
            high_growth_sectors: by_growth
                .iter()
                .take(HIGH_GROWTH_COUNT)
                .map(|s| SectorGrowth {
                    name: s.name.to_string(),
                    growth_rate_pct: s.growth_rate_pct,
                })
                .collect(),
            water_critical_sectors: SECTOR_PROFILES
                .iter()
                .filter(|s| s.water_intensity == WaterIntensity::High)
                .map(|s| s.name.to_string())
                .collect(),
            conflict_summary,
            regional_hotspots,
            recommendations: strings(&[
                "Establish integrated spatial planning framework",
                "Create sector-specific land use guidelines",
                "Implement water budgeting by sector",
                "Develop buffer zone standards",
                "Create economic incentives for compatible co-location",
            ]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eastern_province_conflicts() {
        let analyzer = SectoralAnalyzer::new();
        let conflicts = analyzer.identify_regional_conflicts("Eastern Province");
        // industrial, residential, infrastructure, environmental protection
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.iter().all(|c| c.conflict_level.is_conflict()));
        assert!(conflicts
            .iter()
            .any(|c| c.use_a == LandUse::Residential && c.use_b == LandUse::Industrial));
    }

    #[test]
    fn test_unknown_region_only_has_environment() {
        let analyzer = SectoralAnalyzer::new();
        assert!(analyzer.identify_regional_conflicts("Atlantis").is_empty());
    }

    #[test]
    fn test_report_counts() {
        let report = SectoralAnalyzer::new().sectoral_report();
        assert_eq!(report.sectors_analyzed, 10);
        assert_eq!(report.priority_sectors.len(), 9);
        assert_eq!(report.high_growth_sectors[0].name, "Renewable Energy");
        assert_eq!(report.high_growth_sectors.len(), HIGH_GROWTH_COUNT);
        assert_eq!(report.water_critical_sectors.len(), 3);
        assert_eq!(report.conflict_summary.high_conflicts, 6);
        assert_eq!(report.conflict_summary.moderate_conflicts, 3);
        assert_eq!(report.conflict_summary.synergies_identified, 8);
    }

    #[test]
    fn test_assess_by_key() {
        let analyzer = SectoralAnalyzer::new();
        let assessment = analyzer.assess_conflict_by_key("mining", "agricultural").unwrap();
        assert_eq!(assessment.conflict_level, ConflictLevel::HighConflict);
        assert!(analyzer.assess_conflict_by_key("mining", "lava").is_err());
    }
}
