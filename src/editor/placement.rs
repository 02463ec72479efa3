//! Placement Editor
//!
//! Validates plant drops and marker moves: the drop point must fall
//! inside a plot, and must clear the plant's minimum spacing against
//! every existing placement. Each gesture is a single call — there is
//! no state carried between gestures beyond the in-flight drag, which
//! lives with the drag signals.

use crate::error::{EditError, EditResult};
use crate::intent::{Intent, PlacementDraft};
use crate::models::{GeoPoint, Placement, PlantType};
use crate::spatial::SpatialIndex;

const METERS_PER_INCH: f64 = 0.0254;

#[derive(Debug, Default)]
pub struct PlacementEditor;

impl PlacementEditor {
    pub fn new() -> Self {
        Self
    }

    /// Validate a plant drop and produce a placement-create intent.
    ///
    /// The draft snapshots the catalog entry's fields — placements
    /// keep the data they were created with even if the catalog
    /// changes later.
    pub fn propose_drop(
        &self,
        index: &SpatialIndex,
        plant: &PlantType,
        point: GeoPoint,
        planted_date: String,
    ) -> EditResult<Intent> {
        let plot = index.find_containing(point).ok_or(EditError::OutsideAnyPlot)?;

        self.check_spacing(index, plant.spacing_inches, point, None)?;

        Ok(Intent::PlacementCreate(PlacementDraft {
            plot_local_id: plot.local_id,
            position: point,
            plant_type_id: plant.id,
            plant_name: plant.name.clone(),
            plant_icon: plant.icon.clone(),
            plant_color: plant.color.clone(),
            spacing_inches: plant.spacing_inches,
            sun_requirement: plant.sun_requirement.clone(),
            water_requirement: plant.water_requirement.clone(),
            days_to_harvest: plant.days_to_harvest,
            scientific_name: plant.scientific_name.clone(),
            category: plant.category.clone(),
            planted_date,
        }))
    }

    /// Validate a marker drag to a new point.
    ///
    /// Same checks as a drop, except the placement skips its own
    /// spacing comparison. On failure the caller reverts the marker —
    /// there is no partial move. The new point must land inside some
    /// plot; which one does not rebind ownership.
    pub fn propose_move(
        &self,
        index: &SpatialIndex,
        placement: &Placement,
        new_point: GeoPoint,
    ) -> EditResult<Intent> {
        if index.find_containing(new_point).is_none() {
            return Err(EditError::OutsideAnyPlot);
        }

        self.check_spacing(
            index,
            placement.spacing_inches,
            new_point,
            Some(placement.local_id),
        )?;

        Ok(Intent::PlacementMove {
            placement_local_id: placement.local_id,
            position: new_point,
        })
    }

    /// Removing a placement is always allowed.
    pub fn remove(&self, placement: &Placement) -> Intent {
        Intent::PlacementDelete {
            placement_local_id: placement.local_id,
        }
    }

    fn check_spacing(
        &self,
        index: &SpatialIndex,
        spacing_inches: u32,
        point: GeoPoint,
        exclude_local_id: Option<u32>,
    ) -> EditResult<()> {
        let min_meters = spacing_inches as f64 * METERS_PER_INCH;

        if let Some((conflict, distance)) = index.nearest_placement(point, exclude_local_id) {
            if distance < min_meters {
                return Err(EditError::TooClose {
                    min_inches: spacing_inches,
                    conflicting_local_id: conflict.local_id,
                    distance_meters: distance,
                });
            }
        }

        Ok(())
    }
}
