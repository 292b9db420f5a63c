//! Integration tests for synthetic geography generation
//!
//! - Region areas sum to the profile total
//! - Settlements sit inside their region (or on its centroid)
//! - Same profile and seed reproduce identical output

use geo::Contains;
use nss_spatial::core::config::CountryProfile;
use nss_spatial::core::types::{COUNTRY_ID, LEVEL_REGION};
use nss_spatial::geography::catalog::FLAGSHIP_PROJECTS;
use nss_spatial::geography::SyntheticGeographyGenerator;

#[test]
fn test_region_area_matches_profile_total() {
    for name in CountryProfile::preset_names() {
        let profile = CountryProfile::preset(name).unwrap();
        let total = profile.total_area_sqkm;
        let generator = SyntheticGeographyGenerator::new(profile, 42).unwrap();

        let area: f64 = generator.bundle().regions.iter().map(|r| r.area_sqkm).sum();
        assert!(
            ((area - total) / total).abs() < 1e-9,
            "{}: region areas sum to {} instead of {}",
            name,
            area,
            total
        );
    }
}

#[test]
fn test_settlements_inside_owning_region() {
    let generator = SyntheticGeographyGenerator::new(CountryProfile::saudi_arabia(), 42).unwrap();
    let bundle = generator.bundle();

    for settlement in &bundle.settlements {
        let region = bundle
            .regions
            .iter()
            .find(|r| r.id == settlement.region_id)
            .expect("settlement region exists");
        assert!(
            region.geometry.contains(&settlement.location) || settlement.location == region.centroid,
            "{} lies outside {}",
            settlement.name.en,
            region.code
        );
    }
}

#[test]
fn test_same_seed_is_bit_identical() {
    let a = SyntheticGeographyGenerator::new(CountryProfile::medium_country(), 99).unwrap();
    let b = SyntheticGeographyGenerator::new(CountryProfile::medium_country(), 99).unwrap();

    let vertices = |g: &SyntheticGeographyGenerator| -> Vec<(f64, f64)> {
        g.bundle()
            .regions
            .iter()
            .flat_map(|r| r.geometry.0.iter())
            .flat_map(|p| p.exterior().coords().map(|c| (c.x, c.y)))
            .collect()
    };
    let populations = |g: &SyntheticGeographyGenerator| -> Vec<u64> {
        g.bundle().settlements.iter().map(|s| s.population).collect()
    };

    assert_eq!(vertices(&a), vertices(&b));
    assert_eq!(populations(&a), populations(&b));
    assert_eq!(a.bundle().roads, b.bundle().roads);
    assert_eq!(a.bundle().projects, b.bundle().projects);
}

#[test]
fn test_different_seed_differs() {
    let a = SyntheticGeographyGenerator::new(CountryProfile::medium_country(), 1).unwrap();
    let b = SyntheticGeographyGenerator::new(CountryProfile::medium_country(), 2).unwrap();
    assert_ne!(a.bundle().regions, b.bundle().regions);
}

#[test]
fn test_single_capital_is_largest_in_capital_region() {
    let generator = SyntheticGeographyGenerator::new(CountryProfile::saudi_arabia(), 7).unwrap();
    let bundle = generator.bundle();

    let capitals: Vec<_> = bundle.settlements.iter().filter(|s| s.is_capital).collect();
    assert_eq!(capitals.len(), 1, "exactly one capital");
    let capital = capitals[0];
    assert_eq!(capital.region_id, bundle.capital_region);

    let largest = bundle
        .settlements
        .iter()
        .filter(|s| s.region_id == bundle.capital_region)
        .map(|s| s.population)
        .max()
        .unwrap();
    assert_eq!(capital.population, largest);
}

#[test]
fn test_regions_hang_off_country() {
    let generator = SyntheticGeographyGenerator::new(CountryProfile::small_country(), 5).unwrap();
    for region in &generator.bundle().regions {
        assert_eq!(region.level, LEVEL_REGION);
        assert_eq!(region.parent_id, Some(COUNTRY_ID));
    }

    let country = generator.country_unit();
    assert_eq!(country.id, COUNTRY_ID);
    assert_eq!(country.parent_id, None);
    assert!(!country.geometry.0.is_empty());
}

#[test]
fn test_flagships_lead_project_list() {
    let generator = SyntheticGeographyGenerator::new(CountryProfile::saudi_arabia(), 42).unwrap();
    let projects = &generator.bundle().projects;

    for (project, flagship) in projects.iter().zip(FLAGSHIP_PROJECTS.iter()) {
        assert_eq!(project.name, flagship.name);
        assert_eq!(project.budget_billion_usd, flagship.budget_billion_usd);
        let low = (flagship.budget_billion_usd * 2000.0) as u64;
        let high = (flagship.budget_billion_usd * 8000.0) as u64;
        assert!(
            (low..=high).contains(&project.jobs_created),
            "{} jobs outside budget band",
            project.name
        );
    }
    assert!(projects.len() >= FLAGSHIP_PROJECTS.len() + 15);
}

#[test]
fn test_economy_shares_sum_to_profile_gdp() {
    let profile = CountryProfile::saudi_arabia();
    let gdp = profile.gdp_billion_usd;
    let generator = SyntheticGeographyGenerator::new(profile, 42).unwrap();
    let economy = &generator.bundle().economy;

    let total: f64 = economy.iter().map(|e| e.gdp_billion_usd).sum();
    assert!((total - gdp).abs() < 1e-6);
    for row in economy {
        assert!((row.employment_rate + row.unemployment_rate - 100.0).abs() < 1e-9);
        assert!(row.employment_rate > 85.0 && row.employment_rate < 98.0);
    }
}
