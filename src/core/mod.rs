pub mod config;
pub mod error;
pub mod types;

pub use config::{CountryProfile, RunConfig};
pub use error::{NssError, Result};
