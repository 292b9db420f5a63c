//! Provider construction from a `RunConfig`

use crate::core::config::{RunConfig, DATA_DIR_ENV};
use crate::core::error::{NssError, Result};
use crate::provider::{
    DataProvider, FileProvider, HealthStatus, ProviderKind, SimulationProvider,
};

/// Build the provider `config.provider` names
///
/// Explicit kinds surface their errors. `Auto` prefers a healthy file
/// provider and falls back to simulation on any failure.
pub fn create_provider(config: &RunConfig) -> Result<Box<dyn DataProvider>> {
    match config.provider {
        ProviderKind::Simulation => simulation(config),
        ProviderKind::File => {
            let dir = config.resolved_data_dir().ok_or_else(|| {
                NssError::ProviderUnavailable(format!(
                    "file provider needs data_dir or {}",
                    DATA_DIR_ENV
                ))
            })?;
            Ok(Box::new(FileProvider::open(dir)?))
        }
        ProviderKind::Auto => auto(config),
    }
}

fn simulation(config: &RunConfig) -> Result<Box<dyn DataProvider>> {
    let profile = config.country_profile()?;
    Ok(Box::new(SimulationProvider::new(profile, config.seed)?))
}

fn auto(config: &RunConfig) -> Result<Box<dyn DataProvider>> {
    let Some(dir) = config.resolved_data_dir() else {
        tracing::info!("No data directory configured, using simulation");
        return simulation(config);
    };

    match FileProvider::open(&dir) {
        Ok(provider) => {
            let health = provider.health_check();
            if health.status == HealthStatus::Ok {
                tracing::info!("Using file provider at {}", dir.display());
                return Ok(Box::new(provider));
            }
            tracing::warn!(
                "File provider at {} is {:?}, falling back to simulation",
                dir.display(),
                health.status
            );
        }
        Err(e) => {
            tracing::warn!(
                "File provider at {} failed ({}), falling back to simulation",
                dir.display(),
                e
            );
        }
    }
    simulation(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(provider: ProviderKind, data_dir: Option<PathBuf>) -> RunConfig {
        RunConfig {
            provider,
            profile: "small_country".into(),
            data_dir,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_explicit_simulation() {
        let provider = create_provider(&config(ProviderKind::Simulation, None)).unwrap();
        assert!(provider.is_simulation());
    }

    #[test]
    fn test_auto_falls_back_on_broken_dir() {
        let missing = PathBuf::from("/nonexistent/nss-data");
        let provider = create_provider(&config(ProviderKind::Auto, Some(missing))).unwrap();
        assert!(provider.is_simulation());
    }

    #[test]
    fn test_explicit_file_surfaces_missing_data() {
        let missing = PathBuf::from("/nonexistent/nss-data");
        let result = create_provider(&config(ProviderKind::File, Some(missing)));
        assert!(matches!(result, Err(NssError::MissingData(_))));
    }

    #[test]
    fn test_unknown_profile_not_masked() {
        let mut config = config(ProviderKind::Auto, None);
        config.profile = "atlantis".into();
        assert!(matches!(
            create_provider(&config),
            Err(NssError::UnknownProfile(_))
        ));
    }
}
