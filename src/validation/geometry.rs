//! Geometric validation: vertex count, ring closure, self-intersection, area

use geo::Area;
use geo_types::{Coord, Geometry, LineString, Polygon};

use super::GeometryError;

pub struct GeometricValidator;

impl GeometricValidator {
    /// Validate a polygon's exterior and every interior ring
    pub fn validate_polygon(polygon: &Polygon<f64>) -> Vec<GeometryError> {
        let mut errors = Self::validate_ring(polygon.exterior(), 0);
        for (i, interior) in polygon.interiors().iter().enumerate() {
            errors.extend(Self::validate_ring(interior, i + 1));
        }

        if errors.is_empty() && polygon.unsigned_area() <= 0.0 {
            errors.push(GeometryError::ZeroArea);
        }

        errors
    }

    /// Validate one closed ring; `ring` is 0 for the exterior
    pub fn validate_ring(line: &LineString<f64>, ring: usize) -> Vec<GeometryError> {
        let mut errors = Vec::new();

        if line.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            errors.push(GeometryError::NonFiniteCoordinate);
            return errors;
        }

        // Closed ring of a triangle has 4 coordinates
        if line.0.len() < 4 {
            errors.push(GeometryError::InsufficientVertices {
                count: line.0.len(),
                minimum: 4,
            });
            return errors; // Can't do further checks
        }

        if !line.is_closed() {
            errors.push(GeometryError::UnclosedRing { ring });
        }

        // Drop the closing coordinate; edges wrap around
        let coords = &line.0[..line.0.len() - 1];
        if Self::is_self_intersecting(coords) {
            errors.push(GeometryError::SelfIntersecting { ring });
        }

        errors
    }

    /// Validate any geometry the providers emit
    pub fn validate_geometry(geometry: &Geometry<f64>) -> Vec<GeometryError> {
        match geometry {
            Geometry::Point(p) => {
                if p.x().is_finite() && p.y().is_finite() {
                    Vec::new()
                } else {
                    vec![GeometryError::NonFiniteCoordinate]
                }
            }
            Geometry::LineString(line) => {
                if line.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
                    vec![GeometryError::NonFiniteCoordinate]
                } else if line.0.len() < 2 {
                    vec![GeometryError::InsufficientVertices {
                        count: line.0.len(),
                        minimum: 2,
                    }]
                } else {
                    Vec::new()
                }
            }
            Geometry::Polygon(polygon) => Self::validate_polygon(polygon),
            Geometry::MultiPolygon(multi) => multi
                .0
                .iter()
                .flat_map(Self::validate_polygon)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Check if ring edges intersect each other (excluding adjacent edges)
    fn is_self_intersecting(coords: &[Coord<f64>]) -> bool {
        let n = coords.len();
        if n < 4 {
            return false; // Triangle can't self-intersect
        }

        for i in 0..n {
            let a1 = coords[i];
            let a2 = coords[(i + 1) % n];

            for j in (i + 2)..n {
                // Skip adjacent edges
                if j == (i + n - 1) % n {
                    continue;
                }

                let b1 = coords[j];
                let b2 = coords[(j + 1) % n];

                if Self::segments_intersect(a1, a2, b1, b2) {
                    return true;
                }
            }
        }
        false
    }

    /// Proper crossing only; touching endpoints do not count
    fn segments_intersect(a1: Coord<f64>, a2: Coord<f64>, b1: Coord<f64>, b2: Coord<f64>) -> bool {
        let d1 = Self::cross_product_sign(b1, b2, a1);
        let d2 = Self::cross_product_sign(b1, b2, a2);
        let d3 = Self::cross_product_sign(a1, a2, b1);
        let d4 = Self::cross_product_sign(a1, a2, b2);

        ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    }

    fn cross_product_sign(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> f64 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }
}

/// True when the polygon has no geometric errors
pub fn polygon_is_valid(polygon: &Polygon<f64>) -> bool {
    GeometricValidator::validate_polygon(polygon).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn test_square_is_valid() {
        let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
        assert!(polygon_is_valid(&square));
    }

    #[test]
    fn test_bowtie_self_intersects() {
        let bowtie = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0), (x: 2.0, y: 0.0), (x: 0.0, y: 2.0)];
        let errors = GeometricValidator::validate_polygon(&bowtie);
        assert!(errors.contains(&GeometryError::SelfIntersecting { ring: 0 }));
    }

    #[test]
    fn test_collapsed_ring_has_zero_area() {
        let flat = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)];
        assert_eq!(
            GeometricValidator::validate_polygon(&flat),
            vec![GeometryError::ZeroArea]
        );
    }

    #[test]
    fn test_nan_point_rejected() {
        let point = Geometry::Point(geo_types::Point::new(f64::NAN, 1.0));
        assert_eq!(
            GeometricValidator::validate_geometry(&point),
            vec![GeometryError::NonFiniteCoordinate]
        );
    }
}
