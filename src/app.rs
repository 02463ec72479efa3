//! Garden Map Frontend App
//!
//! Main application component with palette / map / details layout.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{GardenMap, NoticeBanner, PlacementDetails, PlantPalette, PlotDetails};
use crate::context::{AppContext, Notice};
use crate::models::PlantType;
use crate::store::{store_set_location, store_set_plant_types, AppState, AppStateStoreFields, AppStore};
use crate::sync::SyncController;

#[component]
pub fn App() -> impl IntoView {
    // State
    let store: AppStore = Store::new(AppState::default());
    let sync = RwSignal::new(SyncController::new());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (notice, set_notice) = signal::<Option<Notice>>(None);
    let selected_plot = RwSignal::new(None::<u32>);
    let selected_placement = RwSignal::new(None::<u32>);
    let drag = leptos_mapdrag::create_drag_signals::<PlantType>();

    // Provide context to all children
    provide_context(store);
    let ctx = AppContext::new(
        sync,
        store,
        (reload_trigger, set_reload_trigger),
        (notice, set_notice),
    );
    provide_context(ctx);

    // Load location and catalog on mount and on reload
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading garden data, trigger={}", trigger).into());
        spawn_local(async move {
            match api::get_garden_location().await {
                Ok(location) => store_set_location(&store, location),
                Err(e) => {
                    web_sys::console::warn_1(&format!("[APP] location load failed: {}", e).into())
                }
            }
            if let Ok(catalog) = api::get_plant_types().await {
                store_set_plant_types(&store, catalog);
            }
        });
    });

    // Load plots and placements; a reload while edits are in flight
    // would clobber optimistic state, so skip it
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        spawn_local(async move {
            if sync.with_untracked(|s| s.has_pending_ops()) {
                web_sys::console::log_1(
                    &format!("[APP] skip collection reload (ops pending), trigger={}", trigger)
                        .into(),
                );
                return;
            }
            let plots = api::get_plots().await;
            let placements = api::get_placements().await;
            match (plots, placements) {
                (Ok(plots), Ok(placements)) => {
                    web_sys::console::log_1(
                        &format!(
                            "[APP] Loaded {} plots, {} placements",
                            plots.len(),
                            placements.len()
                        )
                        .into(),
                    );
                    sync.update(|s| s.set_loaded(plots, placements));
                    ctx.mirror();
                }
                (Err(e), _) | (_, Err(e)) => {
                    ctx.show_notice(Notice::error(format!("Failed to load garden: {}", e)));
                }
            }
        });
    });

    view! {
        <div class="app-layout">
            // Left: plant catalog
            <PlantPalette drag=drag />

            // Center: the map itself
            <main class="main-content">
                <div class="map-header">
                    <h1>"Garden Map"</h1>
                    <button class="refresh-btn" on:click=move |_| ctx.reload()>
                        "↻ Refresh"
                    </button>
                </div>
                <NoticeBanner />
                <GardenMap
                    drag=drag
                    selected_plot=selected_plot
                    selected_placement=selected_placement
                />
                <p class="map-status">
                    {move || {
                        format!(
                            "{} plots, {} plants",
                            store.plots().get().len(),
                            store.placements().get().len()
                        )
                    }}
                </p>
            </main>

            // Right: details for whatever is selected
            <aside class="details-column">
                <PlotDetails selected_plot=selected_plot />
                <PlacementDetails selected_placement=selected_placement />
            </aside>
        </div>
    }
}
