//! Spatial Index
//!
//! Brute-force containment and nearest-placement queries over the
//! canonical collections. Garden-sized data (tens of plots, hundreds
//! of placements) makes a borrowed linear scan the right tool; an
//! R-tree would only pay off several orders of magnitude later.

use crate::geometry::{great_circle_distance_meters, point_in_polygon};
use crate::models::{GeoPoint, Placement, Plot};

/// Read-only spatial view over the canonical plot/placement arrays
pub struct SpatialIndex<'a> {
    plots: &'a [Plot],
    placements: &'a [Placement],
}

impl<'a> SpatialIndex<'a> {
    pub fn new(plots: &'a [Plot], placements: &'a [Placement]) -> Self {
        Self { plots, placements }
    }

    /// Which plot contains this point?
    ///
    /// When plots overlap (legacy data — validated plots should not),
    /// the first plot in insertion order wins. Deterministic, not
    /// smallest-by-area or z-order.
    pub fn find_containing(&self, point: GeoPoint) -> Option<&'a Plot> {
        self.plots
            .iter()
            .find(|plot| point_in_polygon(point, &plot.boundary))
    }

    /// Nearest placement to a point, with its distance in meters.
    ///
    /// `exclude_local_id` lets a moving placement skip its own
    /// spacing comparison.
    pub fn nearest_placement(
        &self,
        point: GeoPoint,
        exclude_local_id: Option<u32>,
    ) -> Option<(&'a Placement, f64)> {
        self.placements
            .iter()
            .filter(|p| Some(p.local_id) != exclude_local_id)
            .map(|p| (p, great_circle_distance_meters(point, p.position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// How many placements reference this plot (the protected-plot
    /// invariant counts these)
    pub fn placement_count(&self, plot_local_id: u32) -> usize {
        self.placements
            .iter()
            .filter(|p| p.plot_local_id == plot_local_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_placement, make_plot, unit_square};

    #[test]
    fn test_find_containing_hits_the_right_plot() {
        let plots = vec![
            make_plot(1, unit_square(0.0, 0.0)),
            make_plot(2, unit_square(10.0, 10.0)),
        ];
        let index = SpatialIndex::new(&plots, &[]);

        let hit = index.find_containing(GeoPoint::new(10.5, 10.5)).unwrap();
        assert_eq!(hit.local_id, 2);
        assert!(index.find_containing(GeoPoint::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_overlapping_plots_resolve_by_insertion_order() {
        // Same square twice; the first one wins
        let plots = vec![
            make_plot(1, unit_square(0.0, 0.0)),
            make_plot(2, unit_square(0.0, 0.0)),
        ];
        let index = SpatialIndex::new(&plots, &[]);

        let hit = index.find_containing(GeoPoint::new(0.5, 0.5)).unwrap();
        assert_eq!(hit.local_id, 1);
    }

    #[test]
    fn test_nearest_placement_with_exclusion() {
        let placements = vec![
            make_placement(1, 1, GeoPoint::new(45.0, -122.0)),
            make_placement(2, 1, GeoPoint::new(45.001, -122.0)),
        ];
        let index = SpatialIndex::new(&[], &placements);

        let (nearest, d) = index
            .nearest_placement(GeoPoint::new(45.0, -122.0), None)
            .unwrap();
        assert_eq!(nearest.local_id, 1);
        assert_eq!(d, 0.0);

        // Excluding itself, placement 2 becomes nearest
        let (nearest, d) = index
            .nearest_placement(GeoPoint::new(45.0, -122.0), Some(1))
            .unwrap();
        assert_eq!(nearest.local_id, 2);
        assert!(d > 100.0);
    }

    #[test]
    fn test_placement_count_per_plot() {
        let placements = vec![
            make_placement(1, 1, GeoPoint::new(0.5, 0.5)),
            make_placement(2, 1, GeoPoint::new(0.6, 0.6)),
            make_placement(3, 2, GeoPoint::new(10.5, 10.5)),
        ];
        let index = SpatialIndex::new(&[], &placements);

        assert_eq!(index.placement_count(1), 2);
        assert_eq!(index.placement_count(2), 1);
        assert_eq!(index.placement_count(9), 0);
    }
}
