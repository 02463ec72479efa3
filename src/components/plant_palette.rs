//! Plant Palette Component
//!
//! Catalog sidebar of draggable plant entries. Dragging an entry onto
//! the map hands the full catalog entry to the drop handler through
//! the shared drag signals.

use leptos::prelude::*;
use leptos_mapdrag::{make_on_dragend, make_on_dragstart, DragSignals};
use wasm_bindgen::JsCast;

use crate::models::PlantType;
use crate::store::{use_app_store, AppStateStoreFields};

/// Sidebar listing the plant catalog as drag sources
#[component]
pub fn PlantPalette(drag: DragSignals<PlantType>) -> impl IntoView {
    let store = use_app_store();
    let (filter, set_filter) = signal(String::new());

    let filtered = move || {
        let needle = filter.get().to_lowercase();
        store
            .plant_types()
            .get()
            .into_iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="plant-palette">
            <h3>"Plants"</h3>
            <input
                type="text"
                class="palette-filter"
                placeholder="Filter plants..."
                prop:value=move || filter.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_filter.set(input.value());
                }
            />
            <div class="palette-list">
                <For
                    each=filtered
                    key=|plant| plant.id
                    let:plant
                >
                    {
                        let entry = plant.clone();
                        view! {
                            <div
                                class="palette-entry"
                                draggable="true"
                                style=format!("border-left: 4px solid {}", plant.color)
                                on:dragstart=make_on_dragstart(drag, entry)
                                on:dragend=make_on_dragend(drag)
                            >
                                <span class="palette-icon">{plant.icon.clone()}</span>
                                <span class="palette-name">{plant.name.clone()}</span>
                                <span class="palette-spacing">
                                    {format!("{}\" spacing", plant.spacing_inches)}
                                </span>
                            </div>
                        }
                    }
                </For>
            </div>
        </div>
    }
}
