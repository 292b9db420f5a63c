//! Land-use conflict and synergy matrix

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::NssError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandUse {
    Residential,
    Industrial,
    Agricultural,
    Tourism,
    EnvironmentalProtection,
    Mining,
    Infrastructure,
    RenewableEnergy,
}

impl LandUse {
    pub const ALL: [LandUse; 8] = [
        LandUse::Residential,
        LandUse::Industrial,
        LandUse::Agricultural,
        LandUse::Tourism,
        LandUse::EnvironmentalProtection,
        LandUse::Mining,
        LandUse::Infrastructure,
        LandUse::RenewableEnergy,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LandUse::Residential => "residential",
            LandUse::Industrial => "industrial",
            LandUse::Agricultural => "agricultural",
            LandUse::Tourism => "tourism",
            LandUse::EnvironmentalProtection => "environmental_protection",
            LandUse::Mining => "mining",
            LandUse::Infrastructure => "infrastructure",
            LandUse::RenewableEnergy => "renewable_energy",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LandUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LandUse {
    type Err = NssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LandUse::ALL
            .iter()
            .find(|use_| use_.key() == s)
            .copied()
            .ok_or_else(|| NssError::UnknownLandUse(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictLevel {
    HighConflict,
    ModerateConflict,
    Neutral,
    ModerateSynergy,
    HighSynergy,
}

impl ConflictLevel {
    /// Scores beyond +/-2 saturate
    pub fn from_score(score: i8) -> Self {
        match score {
            i8::MIN..=-2 => ConflictLevel::HighConflict,
            -1 => ConflictLevel::ModerateConflict,
            0 => ConflictLevel::Neutral,
            1 => ConflictLevel::ModerateSynergy,
            _ => ConflictLevel::HighSynergy,
        }
    }

    pub fn score(&self) -> i8 {
        match self {
            ConflictLevel::HighConflict => -2,
            ConflictLevel::ModerateConflict => -1,
            ConflictLevel::Neutral => 0,
            ConflictLevel::ModerateSynergy => 1,
            ConflictLevel::HighSynergy => 2,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.score() < 0
    }
}

/// (use, use, score, reason); both orders share one entry
const INTERACTIONS: [(LandUse, LandUse, i8, &str); 17] = [
    // Conflicts
    (LandUse::Residential, LandUse::Industrial, -2, "Air/noise pollution, traffic"),
    (LandUse::Residential, LandUse::Mining, -2, "Environmental degradation"),
    (LandUse::Agricultural, LandUse::Industrial, -1, "Water competition, pollution"),
    (LandUse::Agricultural, LandUse::Mining, -2, "Land degradation, water depletion"),
    (LandUse::Tourism, LandUse::Industrial, -1, "Visual/environmental impact"),
    (LandUse::Tourism, LandUse::Mining, -2, "Landscape degradation"),
    (LandUse::EnvironmentalProtection, LandUse::Industrial, -2, "Habitat destruction"),
    (LandUse::EnvironmentalProtection, LandUse::Mining, -2, "Ecosystem disruption"),
    (LandUse::EnvironmentalProtection, LandUse::Agricultural, -1, "Water use, land conversion"),
    // Synergies
    (LandUse::Residential, LandUse::Infrastructure, 2, "Accessibility, services"),
    (LandUse::Residential, LandUse::Tourism, 1, "Employment, services"),
    (LandUse::Tourism, LandUse::EnvironmentalProtection, 2, "Eco-tourism potential"),
    (LandUse::Tourism, LandUse::Infrastructure, 2, "Accessibility"),
    (LandUse::RenewableEnergy, LandUse::EnvironmentalProtection, 1, "Clean energy"),
    (LandUse::RenewableEnergy, LandUse::Agricultural, 1, "Agrivoltaics potential"),
    (LandUse::Infrastructure, LandUse::Industrial, 2, "Logistics efficiency"),
    (LandUse::Infrastructure, LandUse::Mining, 1, "Resource transport"),
];

const NO_INTERACTION: &str = "No specific interaction";

/// Symmetric score matrix over land uses with a zero diagonal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictMatrix {
    scores: [[i8; 8]; 8],
}

impl Default for ConflictMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl ConflictMatrix {
    pub fn new() -> Self {
        let mut scores = [[0i8; 8]; 8];
        for (a, b, score, _) in INTERACTIONS {
            scores[a.index()][b.index()] = score;
            scores[b.index()][a.index()] = score;
        }
        Self { scores }
    }

    /// Same in either order
    pub fn score(&self, a: LandUse, b: LandUse) -> i8 {
        self.scores[a.index()][b.index()]
    }

    pub fn level(&self, a: LandUse, b: LandUse) -> ConflictLevel {
        ConflictLevel::from_score(self.score(a, b))
    }

    pub fn description(&self, a: LandUse, b: LandUse) -> &'static str {
        INTERACTIONS
            .iter()
            .find(|(x, y, _, _)| (*x == a && *y == b) || (*x == b && *y == a))
            .map(|(_, _, _, reason)| *reason)
            .unwrap_or(NO_INTERACTION)
    }

    pub fn is_symmetric(&self) -> bool {
        LandUse::ALL.iter().all(|&a| {
            self.score(a, a) == 0 && LandUse::ALL.iter().all(|&b| self.score(a, b) == self.score(b, a))
        })
    }

    /// Unordered off-diagonal pairs whose level satisfies `predicate`
    pub fn count_pairs(&self, predicate: impl Fn(ConflictLevel) -> bool) -> usize {
        let mut count = 0;
        for (i, &a) in LandUse::ALL.iter().enumerate() {
            for &b in &LandUse::ALL[i + 1..] {
                if predicate(self.level(a, b)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Row-major scores in `LandUse::ALL` order
    pub fn rows(&self) -> &[[i8; 8]; 8] {
        &self.scores
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictAssessment {
    pub use_a: LandUse,
    pub use_b: LandUse,
    pub conflict_level: ConflictLevel,
    /// "Conflict", "Synergy", "Neutral" or "Same use"
    pub conflict_type: String,
    pub description: String,
    pub mitigation_strategies: Vec<String>,
}

impl ConflictAssessment {
    pub fn assess(matrix: &ConflictMatrix, a: LandUse, b: LandUse) -> Self {
        if a == b {
            return Self {
                use_a: a,
                use_b: b,
                conflict_level: ConflictLevel::Neutral,
                conflict_type: "Same use".to_string(),
                description: "Same land use type".to_string(),
                mitigation_strategies: Vec::new(),
            };
        }

        let score = matrix.score(a, b);
        let level = ConflictLevel::from_score(score);
        let conflict_type = match score {
            s if s < 0 => "Conflict",
            s if s > 0 => "Synergy",
            _ => "Neutral",
        };

        Self {
            use_a: a,
            use_b: b,
            conflict_level: level,
            conflict_type: conflict_type.to_string(),
            description: matrix.description(a, b).to_string(),
            mitigation_strategies: mitigation_strategies(a, b, level),
        }
    }
}

pub const MAX_MITIGATION_STRATEGIES: usize = 5;

/// Generic measures first, then measures for each involved use
pub fn mitigation_strategies(a: LandUse, b: LandUse, level: ConflictLevel) -> Vec<String> {
    if !level.is_conflict() {
        return Vec::new();
    }
    let involves = |use_: LandUse| a == use_ || b == use_;

    let mut strategies = vec![
        "Establish buffer zones between incompatible uses",
        "Implement environmental impact assessments (EIA)",
    ];
    if involves(LandUse::Industrial) && involves(LandUse::Residential) {
        strategies.extend([
            "Relocate heavy industries to designated industrial cities",
            "Implement strict air quality monitoring",
            "Establish green buffer corridors",
            "Enforce noise regulations",
        ]);
    }
    if involves(LandUse::Mining) {
        strategies.extend([
            "Require rehabilitation bonds for mining operations",
            "Implement progressive land reclamation",
            "Establish exclusion zones around sensitive areas",
        ]);
    }
    if involves(LandUse::Agricultural) {
        strategies.extend([
            "Protect prime agricultural land through zoning",
            "Implement water allocation quotas",
            "Promote water-efficient irrigation technologies",
        ]);
    }
    if involves(LandUse::EnvironmentalProtection) {
        strategies.extend([
            "Expand protected area network",
            "Implement wildlife corridors",
            "Require biodiversity offsets for development",
        ]);
    }

    strategies
        .into_iter()
        .take(MAX_MITIGATION_STRATEGIES)
        .map(String::from)
        .collect()
}
