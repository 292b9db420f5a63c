//! Seeded samplers for the distributions the generator draws from
//!
//! All randomness flows through the caller's RNG, so two generators built
//! with the same seed draw identical sequences.

use rand::Rng;

/// Uniform draw in `[low, high)`; returns `low` for an empty interval
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// Normal draw via Box-Muller
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

/// Lomax (Pareto II) draw with unit scale, support `[0, inf)`
pub fn pareto<R: Rng + ?Sized>(rng: &mut R, shape: f64) -> f64 {
    let u: f64 = rng.gen();
    (1.0 - u).powf(-1.0 / shape) - 1.0
}

/// Largest value `zipf` will return
pub const ZIPF_MAX: f64 = 1.0e12;

/// Unbounded Zipf draw (`P(k) ~ k^-a`, `k >= 1`), rejection method
///
/// Requires `a > 1`.
pub fn zipf<R: Rng + ?Sized>(rng: &mut R, a: f64) -> u64 {
    let am1 = a - 1.0;
    let b = 2f64.powf(am1);
    loop {
        let u = 1.0 - rng.gen::<f64>();
        let v: f64 = rng.gen();
        let x = u.powf(-1.0 / am1).floor();
        if !(1.0..=ZIPF_MAX).contains(&x) {
            continue;
        }
        let t = (1.0 + 1.0 / x).powf(am1);
        if v * x * (t - 1.0) / (b - 1.0) <= t / b {
            return x as u64;
        }
    }
}

/// Index drawn proportionally to `weights`; 0 when all weights are zero
pub fn weighted_index<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> usize {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return 0;
    }
    let mut target = rng.gen::<f64>() * total;
    for (i, w) in weights.iter().enumerate() {
        if target < *w {
            return i;
        }
        target -= w;
    }
    weights.len() - 1
}

/// Uniform pick from a non-empty slice
pub fn choose<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}
