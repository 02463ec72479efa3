//! Edit Intents
//!
//! The editors never touch the canonical collections directly — a
//! validated gesture produces one of these, and the sync controller
//! applies it. Drafts carry everything the backend needs except the id
//! it will assign.

use crate::models::{GeoPoint, IrrigationType, SoilQuality, SunExposure};

/// A not-yet-persisted plot, as produced by completing a draw gesture
#[derive(Debug, Clone, PartialEq)]
pub struct PlotDraft {
    pub name: String,
    pub boundary: Vec<GeoPoint>,
    pub center: GeoPoint,
    pub width_feet: f64,
    pub height_feet: f64,
    pub soil_quality: SoilQuality,
    pub sun_exposure: SunExposure,
    pub irrigation_type: IrrigationType,
    pub garden_location_id: u32,
}

/// Geometry change to an existing plot (drag move or vertex edit)
#[derive(Debug, Clone, PartialEq)]
pub struct PlotGeometryPatch {
    pub boundary: Vec<GeoPoint>,
    pub center: GeoPoint,
    pub width_feet: f64,
    pub height_feet: f64,
}

/// Non-geometric attribute change; legal even on protected plots
#[derive(Debug, Clone, PartialEq)]
pub struct PlotAttributesPatch {
    pub name: String,
    pub soil_quality: SoilQuality,
    pub sun_exposure: SunExposure,
    pub irrigation_type: IrrigationType,
}

/// A not-yet-persisted placement, snapshotting its plant type
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementDraft {
    pub plot_local_id: u32,
    pub position: GeoPoint,
    pub plant_type_id: u32,
    pub plant_name: String,
    pub plant_icon: String,
    pub plant_color: String,
    pub spacing_inches: u32,
    pub sun_requirement: String,
    pub water_requirement: String,
    pub days_to_harvest: u32,
    pub scientific_name: String,
    pub category: String,
    pub planted_date: String,
}

/// A validated mutation, ready for optimistic apply
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    PlotCreate(PlotDraft),
    PlotGeometryUpdate {
        plot_local_id: u32,
        patch: PlotGeometryPatch,
    },
    PlotAttributesUpdate {
        plot_local_id: u32,
        patch: PlotAttributesPatch,
    },
    PlotDelete {
        plot_local_id: u32,
    },
    PlacementCreate(PlacementDraft),
    PlacementMove {
        placement_local_id: u32,
        position: GeoPoint,
    },
    PlacementDelete {
        placement_local_id: u32,
    },
}
