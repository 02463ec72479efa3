//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store
//! is a render mirror: the sync controller owns the canonical
//! collections, and the app copies them in here after every
//! apply/resolve so components re-render.

use crate::models::{GardenLocation, Placement, PlantType, Plot};
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Render mirror of the canonical plots
    pub plots: Vec<Plot>,
    /// Render mirror of the canonical placements
    pub placements: Vec<Placement>,
    /// Plant catalog (read-only lookup)
    pub plant_types: Vec<PlantType>,
    /// Map anchor; None until the user sets a location
    pub garden_location: Option<GardenLocation>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Mirror the canonical collections into the store
pub fn store_sync_collections(store: &AppStore, plots: Vec<Plot>, placements: Vec<Placement>) {
    *store.plots().write() = plots;
    *store.placements().write() = placements;
}

/// Replace the plant catalog
pub fn store_set_plant_types(store: &AppStore, plant_types: Vec<PlantType>) {
    *store.plant_types().write() = plant_types;
}

/// Set the garden anchor location
pub fn store_set_location(store: &AppStore, location: Option<GardenLocation>) {
    *store.garden_location().write() = location;
}
