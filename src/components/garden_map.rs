//! Garden Map Component
//!
//! Hosts the map surface and owns the gesture loop: raw map gestures
//! come in through the adapter callback, the editors validate them,
//! and validated intents go to the sync layer via the context. The
//! component also re-renders overlays whenever the mirrored
//! collections or the selection change.

use leptos::prelude::*;
use leptos_mapdrag::{make_on_dragleave, make_on_dragover, take_drop, DragSignals};

use crate::context::{AppContext, Notice};
use crate::editor::{PlacementEditor, PlotEditor};
use crate::map_adapter::{
    GestureEvent, JsMapSurface, MapSurface, PlacementRender, PlotRender,
};
use crate::models::PlantType;
use crate::store::{use_app_store, AppStateStoreFields};

const MAP_ELEMENT_ID: &str = "garden-map";
const DEFAULT_ZOOM: u8 = 19;

/// Today as `YYYY-MM-DD`, the planted-date format the backend stores
fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

/// The interactive map: draw plots, drop plants, drag markers
#[component]
pub fn GardenMap(
    drag: DragSignals<PlantType>,
    selected_plot: RwSignal<Option<u32>>,
    selected_placement: RwSignal<Option<u32>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let plot_editor = RwSignal::new(PlotEditor::new());
    let surface: StoredValue<Option<JsMapSurface>> = StoredValue::new(None);
    let (map_ready, set_map_ready) = signal(false);

    let drawing = move || plot_editor.with(|e| e.is_drawing());

    // Initialize the surface once the garden location is known, then
    // keep the map centered on it.
    Effect::new(move |_| {
        let Some(location) = store.garden_location().get() else {
            return;
        };
        if map_ready.get_untracked() {
            surface.with_value(|s| {
                if let Some(s) = s {
                    s.center_on(location.center(), DEFAULT_ZOOM);
                }
            });
            return;
        }
        let built = JsMapSurface::new(
            MAP_ELEMENT_ID,
            location.center(),
            DEFAULT_ZOOM,
            move |event| handle_gesture(ctx, plot_editor, selected_plot, selected_placement, surface, event),
        );
        surface.set_value(Some(built));
        set_map_ready.set(true);
        web_sys::console::log_1(&"[MAP] surface initialized".into());
    });

    // Redraw overlays on any collection or selection change
    Effect::new(move |_| {
        if !map_ready.get() {
            return;
        }
        let plots = store.plots().get();
        let placements = store.placements().get();
        let plot_sel = selected_plot.get();
        let marker_sel = selected_placement.get();

        let plot_renders: Vec<PlotRender> = plots
            .iter()
            .map(|p| PlotRender {
                local_id: p.local_id,
                boundary: p.boundary.clone(),
                selected: plot_sel == Some(p.local_id),
                protected: placements.iter().any(|pl| pl.plot_local_id == p.local_id),
            })
            .collect();
        let marker_renders: Vec<PlacementRender> = placements
            .iter()
            .map(|p| PlacementRender {
                local_id: p.local_id,
                position: p.position,
                name: p.plant_name.clone(),
                icon: p.plant_icon.clone(),
                color: p.plant_color.clone(),
                selected: marker_sel == Some(p.local_id),
            })
            .collect();

        surface.with_value(|s| {
            if let Some(s) = s {
                s.render_plots(&plot_renders);
                s.render_placements(&marker_renders);
            }
        });
    });

    let start_draw = move |_| {
        selected_plot.set(None);
        selected_placement.set(None);
        plot_editor.update(|e| e.begin_draw());
        surface.with_value(|s| {
            if let Some(s) = s {
                s.set_drawing_mode(true);
            }
        });
    };

    let cancel_draw = move |_| {
        plot_editor.update(|e| e.cancel_draw());
        surface.with_value(|s| {
            if let Some(s) = s {
                s.set_drawing_mode(false);
            }
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        let Some((plant, x, y)) = take_drop(drag, &ev) else {
            return;
        };
        let point = surface.with_value(|s| s.as_ref().and_then(|s| s.point_at_pixel(x, y)));
        let Some(point) = point else {
            return;
        };
        let result = ctx
            .sync
            .with_untracked(|s| PlacementEditor::new().propose_drop(&s.index(), &plant, point, today_iso()));
        match result {
            Ok(intent) => {
                ctx.clear_notice();
                ctx.apply(intent);
            }
            Err(e) => ctx.show_notice(Notice::warning(e.to_string())),
        }
    };

    view! {
        <div class="map-column">
            <div class="map-toolbar">
                <Show when=move || !drawing()>
                    <button class="draw-btn" on:click=start_draw>
                        "Draw New Garden Plot"
                    </button>
                </Show>
                <Show when=move || drawing()>
                    <span class="draw-hint">
                        "Click the map to add corners, double-click to finish (3 or more corners)"
                    </span>
                    <button class="cancel-btn" on:click=cancel_draw>
                        "Cancel"
                    </button>
                </Show>
            </div>
            <div
                id=MAP_ELEMENT_ID
                class=move || {
                    if drag.over_target_read.get() {
                        "map-container drop-active"
                    } else {
                        "map-container"
                    }
                }
                on:dragover=make_on_dragover(drag)
                on:dragleave=make_on_dragleave(drag)
                on:drop=on_drop
            ></div>
        </div>
    }
}

/// Route one raw gesture through the editors acting on the canonical
/// collections, and hand any validated intent to the sync layer.
fn handle_gesture(
    ctx: AppContext,
    plot_editor: RwSignal<PlotEditor>,
    selected_plot: RwSignal<Option<u32>>,
    selected_placement: RwSignal<Option<u32>>,
    surface: StoredValue<Option<JsMapSurface>>,
    event: GestureEvent,
) {
    match event {
        GestureEvent::VertexClicked { position } => {
            plot_editor.update(|e| e.add_vertex(position));
        }
        GestureEvent::DrawFinished => {
            let count = ctx.sync.with_untracked(|s| s.plots().len());
            let location_id = ctx
                .store
                .garden_location()
                .get_untracked()
                .map(|l| l.id)
                .unwrap_or(1);
            let intent = plot_editor
                .try_update(|e| e.complete_draw(count, location_id))
                .flatten();
            surface.with_value(|s| {
                if let Some(s) = s {
                    s.set_drawing_mode(false);
                }
            });
            if let Some(intent) = intent {
                ctx.apply(intent);
            }
        }
        GestureEvent::PlotClicked { local_id } => {
            selected_placement.set(None);
            let notice = ctx.sync.with_untracked(|s| {
                s.plot_by_local(local_id).and_then(|plot| {
                    plot_editor
                        .try_update(|e| e.select(plot, &s.index()))
                        .flatten()
                })
            });
            selected_plot.set(Some(local_id));
            if let Some(n) = notice {
                ctx.show_notice(Notice::info(format!(
                    "{} contains {} plant(s). Remove them before editing its boundary.",
                    n.name, n.placement_count
                )));
            }
        }
        GestureEvent::PolygonEdited { local_id, boundary } => {
            let result = ctx.sync.with_untracked(|s| {
                s.plot_by_local(local_id).map(|plot| {
                    plot_editor.with_untracked(|e| e.boundary_edit(plot, &s.index(), boundary))
                })
            });
            match result {
                Some(Ok(intent)) => ctx.apply(intent),
                Some(Err(e)) => {
                    ctx.show_notice(Notice::warning(e.to_string()));
                    // re-mirror so the polygon snaps back to the
                    // canonical boundary
                    ctx.mirror();
                }
                None => {}
            }
        }
        GestureEvent::MarkerDragged { local_id, position } => {
            let result = ctx.sync.with_untracked(|s| {
                s.placement_by_local(local_id)
                    .map(|p| PlacementEditor::new().propose_move(&s.index(), p, position))
            });
            match result {
                Some(Ok(intent)) => ctx.apply(intent),
                Some(Err(e)) => {
                    ctx.show_notice(Notice::warning(e.to_string()));
                    ctx.mirror();
                }
                None => {}
            }
        }
        GestureEvent::MarkerClicked { local_id } => {
            plot_editor.update(|e| e.clear_selection());
            selected_plot.set(None);
            selected_placement.set(Some(local_id));
        }
    }
}
