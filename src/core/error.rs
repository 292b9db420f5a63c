use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NssError {
    #[error("Unknown country profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid country profile: {0}")]
    InvalidProfile(String),

    #[error("Generation produced no valid regions ({requested} requested)")]
    EmptyGeography { requested: u32 },

    #[error("Missing required data file: {0}")]
    MissingData(PathBuf),

    #[error("Invalid data table {path}: {reason}")]
    InvalidTable { path: PathBuf, reason: String },

    #[error("Invalid spatial level: {0} (expected 1-5)")]
    InvalidLevel(u8),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown land use: {0}")]
    UnknownLandUse(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl NssError {
    /// Configuration errors are never retried or masked by fallbacks.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            NssError::UnknownProfile(_)
                | NssError::InvalidProfile(_)
                | NssError::EmptyGeography { .. }
                | NssError::MissingData(_)
                | NssError::InvalidTable { .. }
                | NssError::UnknownProvider(_)
                | NssError::Toml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NssError>;
