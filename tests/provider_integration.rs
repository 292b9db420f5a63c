//! Integration tests for the file provider and provider selection
//!
//! Tables are written from a generated bundle into a temp directory, then
//! read back through `FileProvider` and `create_provider`.

use std::fs;
use std::path::Path;

use nss_spatial::core::config::{CountryProfile, RunConfig};
use nss_spatial::core::error::NssError;
use nss_spatial::core::types::{RegionId, LEVEL_COUNTRY, LEVEL_REGION};
use nss_spatial::geography::model::{GeographyBundle, HierarchyClass, Region, RegionPopulation};
use nss_spatial::geography::SyntheticGeographyGenerator;
use nss_spatial::provider::{
    create_provider, DataProvider, FileProvider, HealthStatus, ProviderKind, SimulationProvider,
    REQUIRED_FILES,
};
use serde::Serialize;
use serde_json::{json, Value};
use tempfile::TempDir;

fn write_table<T: Serialize>(dir: &Path, name: &str, rows: &[T]) {
    let json = serde_json::to_string(rows).expect("serialize table");
    fs::write(dir.join(name), json).expect("write table");
}

fn write_bundle(dir: &Path, bundle: &GeographyBundle) {
    write_table(dir, "regions.json", &bundle.regions);
    write_table(dir, "settlements.json", &bundle.settlements);
    write_table(dir, "population.json", &bundle.populations);
    write_table(dir, "economy.json", &bundle.economy);
    write_table(dir, "projects.json", &bundle.projects);
    write_table(dir, "roads.json", &bundle.roads);
    write_table(dir, "environment.json", &bundle.environment);
}

fn exported_dataset() -> (TempDir, GeographyBundle) {
    let generator = SyntheticGeographyGenerator::new(CountryProfile::small_country(), 21).unwrap();
    let bundle = generator.into_bundle();
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path(), &bundle);
    (dir, bundle)
}

fn run_config(provider: ProviderKind, dir: &Path) -> RunConfig {
    RunConfig {
        provider,
        profile: "small_country".into(),
        data_dir: Some(dir.to_path_buf()),
        ..RunConfig::default()
    }
}

#[test]
fn test_file_provider_reads_exported_tables() {
    let (dir, bundle) = exported_dataset();
    let provider = FileProvider::open(dir.path()).unwrap();

    assert!(!provider.is_simulation());
    assert_eq!(provider.health_check().status, HealthStatus::Ok);

    let regions = provider.get_spatial_units(LEVEL_REGION).unwrap();
    assert!(!regions.is_simulated);
    let ids = |rs: &[Region]| -> Vec<_> { rs.iter().map(|r| r.id).collect() };
    assert_eq!(ids(&regions.data), ids(&bundle.regions));

    let settlements = provider.get_settlements(None, None).unwrap();
    assert_eq!(settlements.data.len(), bundle.settlements.len());

    let country = provider.get_spatial_units(LEVEL_COUNTRY).unwrap();
    assert_eq!(country.data.len(), 1);
    let area: f64 = bundle.regions.iter().map(|r| r.area_sqkm).sum();
    assert!((country.data[0].area_sqkm - area).abs() < 1e-6);
}

#[test]
fn test_file_and_simulation_agree_on_same_bundle() {
    let (dir, _) = exported_dataset();
    let file = FileProvider::open(dir.path()).unwrap();
    let simulation = SimulationProvider::new(CountryProfile::small_country(), 21).unwrap();

    let from_file = file.get_population(LEVEL_REGION, 2030, None).unwrap();
    let simulated = simulation.get_population(LEVEL_REGION, 2030, None).unwrap();
    let counts = |rows: &[RegionPopulation]| -> Vec<(RegionId, u64)> {
        rows.iter().map(|r| (r.region_id, r.population)).collect()
    };
    assert_eq!(counts(&from_file.data), counts(&simulated.data));
    assert_eq!(from_file.metadata["scenario"], simulated.metadata["scenario"]);
}

#[test]
fn test_missing_optional_table_degrades_health() {
    let (dir, _) = exported_dataset();
    fs::remove_file(dir.path().join("roads.json")).unwrap();

    let provider = FileProvider::open(dir.path()).unwrap();
    let health = provider.health_check();
    assert_eq!(health.status, HealthStatus::Degraded);
    assert_eq!(health.details["missing"], "roads.json");
}

#[test]
fn test_missing_required_table_is_an_error() {
    for name in REQUIRED_FILES {
        let (dir, _) = exported_dataset();
        fs::remove_file(dir.path().join(name)).unwrap();
        match FileProvider::open(dir.path()) {
            Err(NssError::MissingData(path)) => assert!(path.ends_with(name)),
            Err(other) => panic!("{}: unexpected error {}", name, other),
            Ok(_) => panic!("{}: opened without a required table", name),
        }
    }
}

#[test]
fn test_malformed_table_is_a_config_error() {
    let (dir, _) = exported_dataset();
    fs::write(dir.path().join("regions.json"), "{ not json").unwrap();
    let err = FileProvider::open(dir.path()).err().expect("malformed table rejected");
    assert!(matches!(err, NssError::InvalidTable { .. }));
    assert!(err.is_configuration());
}

#[test]
fn test_missing_column_names_table_and_field() {
    let (dir, _) = exported_dataset();
    let path = dir.path().join("regions.json");
    let mut rows: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for row in rows.iter_mut() {
        row.as_object_mut().unwrap().remove("area_sqkm");
    }
    fs::write(&path, serde_json::to_string(&rows).unwrap()).unwrap();

    match FileProvider::open(dir.path()) {
        Err(err @ NssError::InvalidTable { .. }) => {
            assert!(err.is_configuration());
            let message = err.to_string();
            assert!(message.contains("regions.json"), "{}", message);
            assert!(message.contains("area_sqkm"), "{}", message);
        }
        Err(other) => panic!("unexpected error {}", other),
        Ok(_) => panic!("opened a table without area_sqkm"),
    }
}

#[test]
fn test_settlement_tiers_recomputed_on_load() {
    let (dir, bundle) = exported_dataset();
    let path = dir.path().join("settlements.json");
    let mut rows: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for row in rows.iter_mut() {
        let row = row.as_object_mut().unwrap();
        row.remove("rank");
        row.insert("hierarchy_class".into(), json!("Village"));
    }
    fs::write(&path, serde_json::to_string(&rows).unwrap()).unwrap();

    let provider = FileProvider::open(dir.path()).unwrap();
    let settlements = provider.get_settlements(None, None).unwrap().data;
    assert_eq!(settlements.len(), bundle.settlements.len());

    for (loaded, generated) in settlements.iter().zip(&bundle.settlements) {
        assert_eq!(loaded.id, generated.id);
        assert_eq!(loaded.rank, generated.rank, "{} rank not rebuilt", loaded.name.en);
        assert_eq!(
            loaded.hierarchy_class,
            HierarchyClass::from_population(loaded.population),
            "{} class taken from file",
            loaded.name.en
        );
    }
}

#[test]
fn test_auto_prefers_healthy_file_provider() {
    let (dir, _) = exported_dataset();
    let provider = create_provider(&run_config(ProviderKind::Auto, dir.path())).unwrap();
    assert!(!provider.is_simulation());
    assert_eq!(provider.provider_name(), "FileProvider");
}

#[test]
fn test_auto_falls_back_when_degraded() {
    let (dir, _) = exported_dataset();
    fs::remove_file(dir.path().join("environment.json")).unwrap();

    let provider = create_provider(&run_config(ProviderKind::Auto, dir.path())).unwrap();
    assert!(provider.is_simulation());

    let explicit = create_provider(&run_config(ProviderKind::File, dir.path())).unwrap();
    assert!(!explicit.is_simulation(), "explicit file provider accepts a degraded directory");
}
