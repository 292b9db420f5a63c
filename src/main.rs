//! NSS Spatial - command line report
//!
//! Builds a provider from the run configuration, runs diagnostics, data
//! quality checks and scenario comparisons, and prints the report.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use nss_spatial::core::config::RunConfig;
use nss_spatial::core::error::Result;
use nss_spatial::output::NssReport;
use nss_spatial::provider::{create_provider, ProviderKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// National spatial strategy report
#[derive(Parser, Debug)]
#[command(name = "nss-spatial")]
#[command(about = "Generate spatial diagnostics and scenario projections for a country profile")]
struct Args {
    /// Run configuration (TOML); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Country profile preset
    #[arg(long)]
    profile: Option<String>,

    /// Country profile file (TOML), takes precedence over --profile
    #[arg(long)]
    profile_file: Option<PathBuf>,

    /// Data provider: simulation, file or auto
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// Directory of JSON tables for the file provider
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Random seed for the simulation provider
    #[arg(long)]
    seed: Option<u64>,

    /// Scenario comparison year
    #[arg(long, default_value_t = 2030)]
    year: i32,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if let Some(profile) = &self.profile {
            config.profile = profile.clone();
        }
        if let Some(path) = &self.profile_file {
            config.profile_file = Some(path.clone());
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.run_config()?;
    tracing::info!(
        "nss-spatial: provider {}, profile {}, seed {}",
        config.provider,
        config.profile,
        config.seed
    );

    let provider = create_provider(&config)?;
    let report = NssReport::build(provider.as_ref(), args.year)?;

    let rendered = match args.format {
        OutputFormat::Json => report.to_json(),
        OutputFormat::Text => report.summary(),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
