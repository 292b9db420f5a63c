//! NSS Spatial - national spatial strategy toolkit
//!
//! Synthetic country geography, spatial diagnostics, development scenarios
//! and data providers that feed them.

pub mod core;
pub mod diagnostics;
pub mod geography;
pub mod output;
pub mod provider;
pub mod scenario;
pub mod sectoral;
pub mod validation;
