//! Plot Editor
//!
//! Draw/select/edit/delete state machine for plot polygons. The
//! protected-plot rule lives here and only here: once a plot has a
//! placement, its boundary is frozen and it cannot be deleted, though
//! non-geometric attributes stay editable.

use crate::error::{EditError, EditResult};
use crate::geometry;
use crate::intent::{Intent, PlotAttributesPatch, PlotDraft, PlotGeometryPatch};
use crate::models::{GeoPoint, IrrigationType, Plot, SoilQuality, SunExposure};
use crate::spatial::SpatialIndex;

/// Informational notice shown when a protected plot is selected —
/// not an error, the selection still happens.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectedPlotNotice {
    pub name: String,
    pub placement_count: usize,
}

/// Polygon draw state
#[derive(Debug, Clone, PartialEq)]
enum DrawState {
    Idle,
    Drawing(Vec<GeoPoint>),
}

/// State machine for drawing and editing plot polygons
#[derive(Debug)]
pub struct PlotEditor {
    draw: DrawState,
    selected: Option<u32>,
}

impl PlotEditor {
    pub fn new() -> Self {
        Self {
            draw: DrawState::Idle,
            selected: None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.draw, DrawState::Drawing(_))
    }

    pub fn selected_plot(&self) -> Option<u32> {
        self.selected
    }

    /// The one place the protected invariant is derived
    pub fn is_protected(plot: &Plot, index: &SpatialIndex) -> bool {
        index.placement_count(plot.local_id) > 0
    }

    /// Enter drawing mode with an empty draft. Only legal from Idle;
    /// a second call mid-draw is ignored.
    pub fn begin_draw(&mut self) {
        if matches!(self.draw, DrawState::Idle) {
            self.draw = DrawState::Drawing(Vec::new());
            self.selected = None;
        }
    }

    /// Append a vertex to the in-progress draft. Ignored outside
    /// drawing mode.
    pub fn add_vertex(&mut self, point: GeoPoint) {
        if let DrawState::Drawing(draft) = &mut self.draw {
            draft.push(point);
        }
    }

    /// Abandon the in-progress draft without emitting anything.
    pub fn cancel_draw(&mut self) {
        self.draw = DrawState::Idle;
    }

    /// Finish the draw gesture.
    ///
    /// With at least 3 vertices this emits a plot-create intent with
    /// default attributes and a generated `"Garden Plot N"` name.
    /// With fewer, the draft is discarded and nothing is emitted — a
    /// silent no-op the map UI has always had.
    pub fn complete_draw(
        &mut self,
        existing_plot_count: usize,
        garden_location_id: u32,
    ) -> Option<Intent> {
        let draft = match std::mem::replace(&mut self.draw, DrawState::Idle) {
            DrawState::Drawing(draft) => draft,
            DrawState::Idle => return None,
        };

        if draft.len() < 3 {
            return None;
        }

        // The draft is non-empty here, so bounds cannot fail
        let bounds = geometry::bounding_box(&draft).ok()?;
        let center = geometry::bounding_box_center(&bounds);
        let dims = geometry::estimate_dimensions_feet(&bounds);

        Some(Intent::PlotCreate(PlotDraft {
            name: format!("Garden Plot {}", existing_plot_count + 1),
            boundary: draft,
            center,
            width_feet: dims.width_feet,
            height_feet: dims.height_feet,
            soil_quality: SoilQuality::Good,
            sun_exposure: SunExposure::FullSun,
            irrigation_type: IrrigationType::Manual,
            garden_location_id,
        }))
    }

    /// Select a plot. Protected plots select fine but surface a
    /// notice instead of edit handles.
    pub fn select(&mut self, plot: &Plot, index: &SpatialIndex) -> Option<ProtectedPlotNotice> {
        self.selected = Some(plot.local_id);
        if Self::is_protected(plot, index) {
            Some(ProtectedPlotNotice {
                name: plot.name.clone(),
                placement_count: index.placement_count(plot.local_id),
            })
        } else {
            None
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Apply a drag move or vertex edit to a plot's boundary.
    ///
    /// Rejected on protected plots — the caller must restore the
    /// rendered polygon, never leave stale geometry looking accepted.
    pub fn boundary_edit(
        &self,
        plot: &Plot,
        index: &SpatialIndex,
        new_boundary: Vec<GeoPoint>,
    ) -> EditResult<Intent> {
        if Self::is_protected(plot, index) {
            return Err(EditError::ProtectedPlotEdit {
                name: plot.name.clone(),
                placement_count: index.placement_count(plot.local_id),
            });
        }

        let bounds = geometry::bounding_box(&new_boundary)?;
        let center = geometry::bounding_box_center(&bounds);
        let dims = geometry::estimate_dimensions_feet(&bounds);

        Ok(Intent::PlotGeometryUpdate {
            plot_local_id: plot.local_id,
            patch: PlotGeometryPatch {
                boundary: new_boundary,
                center,
                width_feet: dims.width_feet,
                height_feet: dims.height_feet,
            },
        })
    }

    /// Change name/soil/sun/irrigation. Allowed on any plot,
    /// protected or not — the invariant only freezes geometry.
    pub fn update_attributes(&self, plot: &Plot, patch: PlotAttributesPatch) -> Intent {
        Intent::PlotAttributesUpdate {
            plot_local_id: plot.local_id,
            patch,
        }
    }

    /// Delete a plot. Protected plots are rejected with a message
    /// naming the blocking placement count.
    pub fn delete_plot(&self, plot: &Plot, index: &SpatialIndex) -> EditResult<Intent> {
        if Self::is_protected(plot, index) {
            return Err(EditError::ProtectedPlotEdit {
                name: plot.name.clone(),
                placement_count: index.placement_count(plot.local_id),
            });
        }

        Ok(Intent::PlotDelete {
            plot_local_id: plot.local_id,
        })
    }
}

impl Default for PlotEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_placement, make_plot, unit_square};

    #[test]
    fn test_draw_three_vertices_emits_create() {
        let mut editor = PlotEditor::new();
        editor.begin_draw();
        editor.add_vertex(GeoPoint::new(0.0, 0.0));
        editor.add_vertex(GeoPoint::new(0.0, 1.0));
        editor.add_vertex(GeoPoint::new(1.0, 0.5));

        let intent = editor.complete_draw(2, 7).expect("create intent");
        assert!(!editor.is_drawing());

        match intent {
            Intent::PlotCreate(draft) => {
                assert_eq!(draft.name, "Garden Plot 3");
                assert_eq!(draft.boundary.len(), 3);
                assert_eq!(draft.garden_location_id, 7);
                assert_eq!(draft.soil_quality, SoilQuality::Good);
                assert_eq!(draft.sun_exposure, SunExposure::FullSun);
                assert_eq!(draft.irrigation_type, IrrigationType::Manual);
                assert_eq!(draft.center, GeoPoint::new(0.5, 0.5));
            }
            other => panic!("unexpected intent: {:?}", other),
        }
    }

    #[test]
    fn test_draw_two_vertices_is_silent_noop() {
        let mut editor = PlotEditor::new();
        editor.begin_draw();
        editor.add_vertex(GeoPoint::new(0.0, 0.0));
        editor.add_vertex(GeoPoint::new(0.0, 1.0));

        assert!(editor.complete_draw(0, 1).is_none());
        assert!(!editor.is_drawing());
    }

    #[test]
    fn test_vertices_ignored_outside_drawing_mode() {
        let mut editor = PlotEditor::new();
        editor.add_vertex(GeoPoint::new(0.0, 0.0));
        assert!(editor.complete_draw(0, 1).is_none());
    }

    #[test]
    fn test_begin_draw_mid_draw_keeps_draft() {
        let mut editor = PlotEditor::new();
        editor.begin_draw();
        editor.add_vertex(GeoPoint::new(0.0, 0.0));
        editor.add_vertex(GeoPoint::new(0.0, 1.0));
        editor.begin_draw();
        editor.add_vertex(GeoPoint::new(1.0, 0.5));

        assert!(editor.complete_draw(0, 1).is_some());
    }

    #[test]
    fn test_select_protected_plot_surfaces_notice() {
        let plots = vec![make_plot(1, unit_square(0.0, 0.0))];
        let placements = vec![make_placement(1, 1, GeoPoint::new(0.5, 0.5))];
        let index = SpatialIndex::new(&plots, &placements);

        let mut editor = PlotEditor::new();
        let notice = editor.select(&plots[0], &index).expect("notice");
        assert_eq!(notice.placement_count, 1);
        assert_eq!(editor.selected_plot(), Some(1));
    }

    #[test]
    fn test_select_editable_plot_is_quiet() {
        let plots = vec![make_plot(1, unit_square(0.0, 0.0))];
        let index = SpatialIndex::new(&plots, &[]);

        let mut editor = PlotEditor::new();
        assert!(editor.select(&plots[0], &index).is_none());
    }

    #[test]
    fn test_boundary_edit_on_editable_plot() {
        let plots = vec![make_plot(1, unit_square(0.0, 0.0))];
        let index = SpatialIndex::new(&plots, &[]);
        let editor = PlotEditor::new();

        let moved = unit_square(2.0, 2.0);
        let intent = editor
            .boundary_edit(&plots[0], &index, moved.clone())
            .expect("update intent");

        match intent {
            Intent::PlotGeometryUpdate { plot_local_id, patch } => {
                assert_eq!(plot_local_id, 1);
                assert_eq!(patch.boundary, moved);
                assert_eq!(patch.center, GeoPoint::new(2.5, 2.5));
            }
            other => panic!("unexpected intent: {:?}", other),
        }
    }

    #[test]
    fn test_boundary_edit_on_protected_plot_is_rejected() {
        let plots = vec![make_plot(1, unit_square(0.0, 0.0))];
        let placements = vec![make_placement(1, 1, GeoPoint::new(0.5, 0.5))];
        let index = SpatialIndex::new(&plots, &placements);
        let editor = PlotEditor::new();

        let result = editor.boundary_edit(&plots[0], &index, unit_square(2.0, 2.0));
        assert!(matches!(
            result,
            Err(EditError::ProtectedPlotEdit { placement_count: 1, .. })
        ));
    }

    #[test]
    fn test_delete_protected_plot_is_rejected() {
        let plots = vec![make_plot(1, unit_square(0.0, 0.0))];
        let placements = vec![
            make_placement(1, 1, GeoPoint::new(0.5, 0.5)),
            make_placement(2, 1, GeoPoint::new(0.6, 0.6)),
        ];
        let index = SpatialIndex::new(&plots, &placements);
        let editor = PlotEditor::new();

        match editor.delete_plot(&plots[0], &index) {
            Err(EditError::ProtectedPlotEdit { placement_count, .. }) => {
                assert_eq!(placement_count, 2)
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_attribute_update_allowed_on_protected_plot() {
        let plots = vec![make_plot(1, unit_square(0.0, 0.0))];
        let editor = PlotEditor::new();

        let intent = editor.update_attributes(
            &plots[0],
            PlotAttributesPatch {
                name: "Herb Bed".to_string(),
                soil_quality: SoilQuality::Excellent,
                sun_exposure: SunExposure::PartialSun,
                irrigation_type: IrrigationType::Drip,
            },
        );
        assert!(matches!(intent, Intent::PlotAttributesUpdate { plot_local_id: 1, .. }));
    }
}
