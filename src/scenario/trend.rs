//! Closed-form trajectories evaluated at `years` after the base year

use serde::{Deserialize, Serialize};

/// One projected quantity
///
/// Every scenario field is one of these shapes; scenarios differ only in
/// the constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trend {
    /// `base * (1 + rate)^years`
    Compound { base: f64, rate: f64 },
    /// `base + step * years`, capped above when `cap` is set
    Rising { base: f64, step: f64, cap: Option<f64> },
    /// `max(base - step * years, floor)`
    Falling { base: f64, step: f64, floor: f64 },
    /// `min(base + years / every, cap)` in whole steps
    Stepped { base: u32, every: u32, cap: u32 },
}

impl Trend {
    pub const fn compound(base: f64, rate: f64) -> Self {
        Trend::Compound { base, rate }
    }

    pub const fn rising(base: f64, step: f64, cap: f64) -> Self {
        Trend::Rising {
            base,
            step,
            cap: Some(cap),
        }
    }

    pub const fn linear(base: f64, step: f64) -> Self {
        Trend::Rising {
            base,
            step,
            cap: None,
        }
    }

    pub const fn falling(base: f64, step: f64, floor: f64) -> Self {
        Trend::Falling { base, step, floor }
    }

    pub const fn stepped(base: u32, every: u32, cap: u32) -> Self {
        Trend::Stepped { base, every, cap }
    }

    /// Value `years` after the base year; `years` may be negative
    pub fn at(&self, years: i32) -> f64 {
        let y = years as f64;
        match *self {
            Trend::Compound { base, rate } => base * (1.0 + rate).powi(years),
            Trend::Rising { base, step, cap } => {
                let value = base + y * step;
                cap.map_or(value, |cap| value.min(cap))
            }
            Trend::Falling { base, step, floor } => (base - y * step).max(floor),
            Trend::Stepped { base, every, cap } => {
                let steps = years.div_euclid(every.max(1) as i32);
                (base as i32 + steps).min(cap as i32) as f64
            }
        }
    }

    /// Annual growth rate of a compounding trend
    pub fn annual_rate(&self) -> Option<f64> {
        match *self {
            Trend::Compound { rate, .. } => Some(rate),
            _ => None,
        }
    }
}
