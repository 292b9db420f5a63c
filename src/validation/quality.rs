//! Dataset quality checks reported as a pass/fail checklist

use ahash::AHashSet;
use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::GeometricValidator;
use crate::geography::model::{
    EnvironmentFeature, Project, Region, RegionPopulation, RoadSegment, Settlement, CRS_WGS84,
};

/// Columns every dataset must carry
pub const REQUIRED_COLUMNS: [&str; 2] = ["id", "name_en"];

/// Default `(column, min, max)` bounds, checked only where the column exists
pub const DEFAULT_RANGES: [(&str, f64, f64); 3] = [
    ("area_sqkm", 0.0, 1_000_000.0),
    ("population", 0.0, 50_000_000.0),
    ("pop_density", 0.0, 50_000.0),
];

/// A row the validator can inspect
pub trait SpatialRecord {
    fn record_id(&self) -> u32;
    fn record_name(&self) -> &str;
    fn geometry(&self) -> Geometry<f64>;

    /// Named numeric columns subject to range checks
    fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        Vec::new()
    }
}

impl SpatialRecord for Region {
    fn record_id(&self) -> u32 {
        self.id.0
    }
    fn record_name(&self) -> &str {
        &self.name.en
    }
    fn geometry(&self) -> Geometry<f64> {
        Geometry::MultiPolygon(self.geometry.clone())
    }
    fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        vec![("area_sqkm", self.area_sqkm)]
    }
}

/// Region joined with its population row
impl SpatialRecord for (Region, RegionPopulation) {
    fn record_id(&self) -> u32 {
        self.0.id.0
    }
    fn record_name(&self) -> &str {
        &self.0.name.en
    }
    fn geometry(&self) -> Geometry<f64> {
        Geometry::MultiPolygon(self.0.geometry.clone())
    }
    fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("area_sqkm", self.0.area_sqkm),
            ("population", self.1.population as f64),
            ("pop_density", self.1.pop_density),
        ]
    }
}

impl SpatialRecord for Settlement {
    fn record_id(&self) -> u32 {
        self.id.0
    }
    fn record_name(&self) -> &str {
        &self.name.en
    }
    fn geometry(&self) -> Geometry<f64> {
        Geometry::Point(self.location)
    }
    fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        vec![("population", self.population as f64)]
    }
}

impl SpatialRecord for RoadSegment {
    fn record_id(&self) -> u32 {
        self.id.0
    }
    fn record_name(&self) -> &str {
        &self.name
    }
    fn geometry(&self) -> Geometry<f64> {
        Geometry::LineString(self.geometry.clone())
    }
}

impl SpatialRecord for Project {
    fn record_id(&self) -> u32 {
        self.id.0
    }
    fn record_name(&self) -> &str {
        &self.name
    }
    fn geometry(&self) -> Geometry<f64> {
        Geometry::Point(self.location)
    }
}

impl SpatialRecord for EnvironmentFeature {
    fn record_id(&self) -> u32 {
        self.id
    }
    fn record_name(&self) -> &str {
        &self.name
    }
    fn geometry(&self) -> Geometry<f64> {
        Geometry::MultiPolygon(self.geometry.clone())
    }
    fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        vec![("area_sqkm", self.area_sqkm)]
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_name: String,
    pub passed: bool,
    pub message: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

/// All check outcomes for one dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub dataset_name: String,
    pub total_checks: usize,
    pub passed_checks: usize,
    pub failed_checks: usize,
    pub results: Vec<CheckResult>,
    /// passed / total, 0 when no checks ran
    pub quality_score: f64,
}

impl DataQualityReport {
    pub fn new(dataset_name: impl Into<String>, results: Vec<CheckResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        let total = results.len();
        Self {
            dataset_name: dataset_name.into(),
            total_checks: total,
            passed_checks: passed,
            failed_checks: total - passed,
            results,
            quality_score: if total > 0 {
                passed as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failed_checks == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.check_name == name)
    }
}

/// Runs the completeness, accuracy, consistency and uniqueness checks
pub struct SpatialDataValidator<'a, R: SpatialRecord> {
    dataset_name: String,
    records: &'a [R],
    crs: Option<String>,
    expected_crs: String,
    expected_types: Option<Vec<String>>,
    ranges: Vec<(String, f64, f64)>,
}

impl<'a, R: SpatialRecord> SpatialDataValidator<'a, R> {
    /// Records are assumed to be in WGS84 unless `with_crs` says otherwise
    pub fn new(dataset_name: impl Into<String>, records: &'a [R]) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            records,
            crs: Some(CRS_WGS84.to_string()),
            expected_crs: CRS_WGS84.to_string(),
            expected_types: None,
            ranges: DEFAULT_RANGES
                .iter()
                .map(|(column, min, max)| (column.to_string(), *min, *max))
                .collect(),
        }
    }

    pub fn with_crs(mut self, crs: Option<String>) -> Self {
        self.crs = crs;
        self
    }

    pub fn with_expected_types(mut self, types: &[&str]) -> Self {
        self.expected_types = Some(types.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_ranges(mut self, ranges: Vec<(String, f64, f64)>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn validate_all(&self) -> DataQualityReport {
        let mut results = vec![self.check_geometry_not_null(), self.check_required_columns()];
        results.push(self.check_geometry_valid());
        results.push(self.check_crs());
        results.extend(self.check_numeric_ranges());
        results.push(self.check_geometry_type());
        results.push(self.check_unique_ids());

        let report = DataQualityReport::new(self.dataset_name.clone(), results);

        if report.is_valid() {
            tracing::info!(
                "{}: all {} checks passed (score: {:.2})",
                report.dataset_name,
                report.total_checks,
                report.quality_score
            );
        } else {
            tracing::warn!(
                "{}: {}/{} checks failed (score: {:.2})",
                report.dataset_name,
                report.failed_checks,
                report.total_checks,
                report.quality_score
            );
            for failure in report.failures() {
                tracing::warn!("  - {}: {}", failure.check_name, failure.message);
            }
        }

        report
    }

    fn check_geometry_not_null(&self) -> CheckResult {
        let null_count = self
            .records
            .iter()
            .filter(|r| is_empty_geometry(&r.geometry()))
            .count();
        CheckResult {
            check_name: "geometry_not_null".into(),
            passed: null_count == 0,
            message: format!("Null geometries: {}", null_count),
            details: json!({ "null_count": null_count }),
        }
    }

    fn check_required_columns(&self) -> CheckResult {
        // Typed records always carry an id; a blank name counts as missing
        let missing: Vec<&str> = if self.records.iter().any(|r| r.record_name().trim().is_empty()) {
            vec![REQUIRED_COLUMNS[1]]
        } else {
            Vec::new()
        };
        CheckResult {
            check_name: "required_columns".into(),
            passed: missing.is_empty(),
            message: if missing.is_empty() {
                "All required columns present".into()
            } else {
                format!("Missing columns: {:?}", missing)
            },
            details: json!({ "missing_columns": missing }),
        }
    }

    fn check_geometry_valid(&self) -> CheckResult {
        let invalid_count = self
            .records
            .iter()
            .filter(|r| {
                let geometry = r.geometry();
                !is_empty_geometry(&geometry)
                    && !GeometricValidator::validate_geometry(&geometry).is_empty()
            })
            .count();
        CheckResult {
            check_name: "geometry_valid".into(),
            passed: invalid_count == 0,
            message: format!("Invalid geometries: {}", invalid_count),
            details: json!({ "invalid_count": invalid_count }),
        }
    }

    fn check_crs(&self) -> CheckResult {
        let passed = self.crs.as_deref() == Some(self.expected_crs.as_str());
        let actual = self.crs.clone().unwrap_or_else(|| "None".into());
        CheckResult {
            check_name: "crs_check".into(),
            passed,
            message: format!("CRS: {} (expected {})", actual, self.expected_crs),
            details: json!({ "actual_crs": actual, "expected_crs": self.expected_crs }),
        }
    }

    fn check_numeric_ranges(&self) -> Vec<CheckResult> {
        let rows: Vec<Vec<(&'static str, f64)>> =
            self.records.iter().map(|r| r.numeric_fields()).collect();

        let mut results = Vec::new();
        for (column, min, max) in &self.ranges {
            let values: Vec<f64> = rows
                .iter()
                .filter_map(|fields| {
                    fields
                        .iter()
                        .find(|(name, _)| name == column)
                        .map(|(_, value)| *value)
                })
                .collect();
            if values.is_empty() {
                continue;
            }
            let out_of_range = values.iter().filter(|v| **v < *min || **v > *max).count();
            results.push(CheckResult {
                check_name: format!("range_check_{}", column),
                passed: out_of_range == 0,
                message: format!(
                    "{}: {} values out of range [{}, {}]",
                    column, out_of_range, min, max
                ),
                details: json!({ "column": column, "out_of_range_count": out_of_range }),
            });
        }
        results
    }

    fn check_geometry_type(&self) -> CheckResult {
        let mut types_found: Vec<&'static str> = Vec::new();
        for record in self.records {
            let name = geometry_type(&record.geometry());
            if !types_found.contains(&name) {
                types_found.push(name);
            }
        }
        let passed = match &self.expected_types {
            Some(expected) => types_found.iter().all(|t| expected.iter().any(|e| e == t)),
            None => types_found.len() == 1,
        };
        CheckResult {
            check_name: "geometry_type_consistent".into(),
            passed,
            message: format!("Geometry types: {:?}", types_found),
            details: json!({ "types_found": types_found }),
        }
    }

    fn check_unique_ids(&self) -> CheckResult {
        let mut seen = AHashSet::new();
        let duplicates = self
            .records
            .iter()
            .filter(|r| !seen.insert(r.record_id()))
            .count();
        CheckResult {
            check_name: "unique_ids".into(),
            passed: duplicates == 0,
            message: format!("Duplicate IDs: {}", duplicates),
            details: json!({ "duplicate_count": duplicates }),
        }
    }
}

fn is_empty_geometry(geometry: &Geometry<f64>) -> bool {
    match geometry {
        Geometry::MultiPolygon(multi) => multi.0.is_empty(),
        Geometry::Polygon(polygon) => polygon.exterior().0.is_empty(),
        Geometry::LineString(line) => line.0.is_empty(),
        _ => false,
    }
}

fn geometry_type(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BilingualName, RegionId, SettlementId};
    use crate::geography::model::HierarchyClass;
    use geo_types::Point;

    fn settlement(id: u32, name: &str, population: u64) -> Settlement {
        Settlement {
            id: SettlementId(id),
            name: BilingualName::new(name, ""),
            region_id: RegionId(1),
            population,
            hierarchy_class: HierarchyClass::from_population(population),
            is_capital: false,
            location: Point::new(45.0, 24.0),
            rank: id,
        }
    }

    #[test]
    fn test_clean_dataset_scores_one() {
        let records = vec![settlement(1, "A", 1000), settlement(2, "B", 2000)];
        let report = SpatialDataValidator::new("settlements", &records).validate_all();
        assert!(report.is_valid());
        assert_eq!(report.quality_score, 1.0);
        assert!(report.check("range_check_population").is_some());
        assert!(report.check("range_check_area_sqkm").is_none());
    }

    #[test]
    fn test_duplicates_and_blank_names_fail() {
        let records = vec![settlement(1, "A", 1000), settlement(1, " ", 2000)];
        let report = SpatialDataValidator::new("settlements", &records).validate_all();
        assert!(!report.check("unique_ids").unwrap().passed);
        assert!(!report.check("required_columns").unwrap().passed);
        assert_eq!(report.failed_checks, 2);
    }

    #[test]
    fn test_crs_mismatch_fails() {
        let records = vec![settlement(1, "A", 1000)];
        let report = SpatialDataValidator::new("settlements", &records)
            .with_crs(Some("EPSG:32638".into()))
            .validate_all();
        assert!(!report.check("crs_check").unwrap().passed);
    }

    #[test]
    fn test_out_of_range_population() {
        let records = vec![settlement(1, "A", 60_000_000)];
        let report = SpatialDataValidator::new("settlements", &records).validate_all();
        let check = report.check("range_check_population").unwrap();
        assert!(!check.passed);
        assert_eq!(check.details["out_of_range_count"], 1);
    }

    #[test]
    fn test_empty_report_scores_zero() {
        let report = DataQualityReport::new("empty", Vec::new());
        assert_eq!(report.quality_score, 0.0);
        assert!(report.is_valid());
    }
}
