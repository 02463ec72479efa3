//! Geometry Kernel
//!
//! Pure functions over [`GeoPoint`] polygons: containment, bounds,
//! great-circle distance, and the plot dimension estimate. No state,
//! no I/O — everything here is exercised synchronously on the UI
//! thread during gesture validation.

use crate::error::{EditError, EditResult};
use crate::models::GeoPoint;

/// Feet per degree of latitude, the rough constant the plot dimension
/// estimate has always used. Longitude is deliberately NOT corrected
/// for latitude here — the backend stores and displays the same
/// uncorrected numbers, so parity matters more than accuracy.
const FEET_PER_DEGREE: f64 = 364_000.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Axis-aligned bounding box of a boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

/// Approximate linear plot dimensions, in whole feet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotDimensions {
    pub width_feet: f64,
    pub height_feet: f64,
}

/// Ray-casting point-in-polygon test over an ordered vertex list.
///
/// Fewer than 3 vertices is degenerate and always returns false.
/// Points exactly on a right-hand or top edge test outside (strict
/// inequality form of the crossing test); the choice is arbitrary but
/// consistent.
pub fn point_in_polygon(point: GeoPoint, boundary: &[GeoPoint]) -> bool {
    if boundary.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = boundary.len();

    let mut j = n - 1;
    for i in 0..n {
        let pi = &boundary[i];
        let pj = &boundary[j];

        if ((pi.lat > point.lat) != (pj.lat > point.lat))
            && (point.lng < (pj.lng - pi.lng) * (point.lat - pi.lat) / (pj.lat - pi.lat) + pi.lng)
        {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Bounding box of a boundary; empty input is an error.
pub fn bounding_box(boundary: &[GeoPoint]) -> EditResult<BoundingBox> {
    let first = boundary
        .first()
        .ok_or_else(|| EditError::InvalidGeometry("empty boundary".to_string()))?;

    let mut bounds = BoundingBox {
        min_lat: first.lat,
        min_lng: first.lng,
        max_lat: first.lat,
        max_lng: first.lng,
    };

    for p in &boundary[1..] {
        bounds.min_lat = bounds.min_lat.min(p.lat);
        bounds.min_lng = bounds.min_lng.min(p.lng);
        bounds.max_lat = bounds.max_lat.max(p.lat);
        bounds.max_lng = bounds.max_lng.max(p.lng);
    }

    Ok(bounds)
}

/// Midpoint of the bounding box. Plot centers are bounds-derived, not
/// true polygon centroids.
pub fn bounding_box_center(bounds: &BoundingBox) -> GeoPoint {
    GeoPoint::new(
        (bounds.min_lat + bounds.max_lat) / 2.0,
        (bounds.min_lng + bounds.max_lng) / 2.0,
    )
}

/// Great-circle distance in meters between two WGS84 points using the
/// Haversine formula. Symmetric, zero for identical points.
pub fn great_circle_distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_M * c
}

/// Rough plot dimensions from a bounding box, rounded to whole feet.
/// Uses the flat 364,000 ft/degree constant on both axes — see
/// [`FEET_PER_DEGREE`].
pub fn estimate_dimensions_feet(bounds: &BoundingBox) -> PlotDimensions {
    PlotDimensions {
        width_feet: ((bounds.max_lng - bounds.min_lng) * FEET_PER_DEGREE).round(),
        height_feet: ((bounds.max_lat - bounds.min_lat) * FEET_PER_DEGREE).round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_point_inside_square() {
        assert!(point_in_polygon(GeoPoint::new(0.5, 0.5), &square()));
        assert!(point_in_polygon(GeoPoint::new(0.01, 0.99), &square()));
    }

    #[test]
    fn test_point_outside_square() {
        assert!(!point_in_polygon(GeoPoint::new(1.5, 0.5), &square()));
        assert!(!point_in_polygon(GeoPoint::new(-0.1, 0.5), &square()));
        assert!(!point_in_polygon(GeoPoint::new(0.5, 2.0), &square()));
    }

    #[test]
    fn test_point_on_boundary_is_consistent() {
        // Strict-inequality crossing test: east/north edges (and the
        // NE corner) are outside, west/south edges (and the SW
        // corner) are inside
        assert!(!point_in_polygon(GeoPoint::new(0.5, 1.0), &square()));
        assert!(!point_in_polygon(GeoPoint::new(1.0, 0.5), &square()));
        assert!(!point_in_polygon(GeoPoint::new(1.0, 1.0), &square()));
        assert!(point_in_polygon(GeoPoint::new(0.5, 0.0), &square()));
        assert!(point_in_polygon(GeoPoint::new(0.0, 0.5), &square()));
        assert!(point_in_polygon(GeoPoint::new(0.0, 0.0), &square()));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // L-shape: notch cut out of the top right
        let poly = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 2.0),
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 1.0),
            GeoPoint::new(2.0, 0.0),
        ];
        assert!(point_in_polygon(GeoPoint::new(0.5, 0.5), &poly));
        assert!(point_in_polygon(GeoPoint::new(1.5, 0.5), &poly));
        // Inside the notch
        assert!(!point_in_polygon(GeoPoint::new(1.5, 1.5), &poly));
    }

    #[test]
    fn test_degenerate_polygon_is_never_hit() {
        let two = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert!(!point_in_polygon(GeoPoint::new(0.5, 0.5), &two));
        assert!(!point_in_polygon(GeoPoint::new(0.5, 0.5), &[]));
    }

    #[test]
    fn test_bounding_box_and_center() {
        let bounds = bounding_box(&square()).unwrap();
        assert_eq!(bounds.min_lat, 0.0);
        assert_eq!(bounds.max_lng, 1.0);

        let center = bounding_box_center(&bounds);
        assert_eq!(center, GeoPoint::new(0.5, 0.5));
    }

    #[test]
    fn test_bounding_box_empty_is_invalid() {
        assert!(matches!(
            bounding_box(&[]),
            Err(EditError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let p = GeoPoint::new(45.1234, -122.5678);
        assert_eq!(great_circle_distance_meters(p, p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let london = GeoPoint::new(51.5074, -0.1278);
        let paris = GeoPoint::new(48.8566, 2.3522);
        let ab = great_circle_distance_meters(london, paris);
        let ba = great_circle_distance_meters(paris, london);
        assert_eq!(ab, ba);
        // ~344 km, accurate within ~0.5%
        assert!((ab - 344_000.0).abs() < 3_000.0);
    }

    #[test]
    fn test_distance_over_garden_scale() {
        // Two points ~1.1m apart at mid latitude
        let a = GeoPoint::new(45.0, -122.0);
        let b = GeoPoint::new(45.00001, -122.0);
        let d = great_circle_distance_meters(a, b);
        assert!(d > 1.0 && d < 1.3, "got {}", d);
    }

    #[test]
    fn test_dimension_estimate_uses_flat_constant() {
        let bounds = BoundingBox {
            min_lat: 45.0,
            min_lng: -122.0001,
            max_lat: 45.0002,
            max_lng: -122.0,
        };
        let dims = estimate_dimensions_feet(&bounds);
        // 0.0001 deg * 364000 = 36.4 -> 36; 0.0002 deg -> 73
        assert_eq!(dims.width_feet, 36.0);
        assert_eq!(dims.height_feet, 73.0);
    }
}
