//! Placement Details Component
//!
//! Read-only card for the selected placement's snapshotted plant
//! data, plus removal with an inline confirm.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::editor::PlacementEditor;
use crate::store::{use_app_store, AppStateStoreFields};

/// Detail card for the currently selected placement
#[component]
pub fn PlacementDetails(selected_placement: RwSignal<Option<u32>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let current = move || {
        selected_placement.get().and_then(|id| {
            store
                .placements()
                .get()
                .into_iter()
                .find(|p| p.local_id == id)
        })
    };

    let (confirm_remove, set_confirm_remove) = signal(false);

    Effect::new(move |_| {
        selected_placement.track();
        set_confirm_remove.set(false);
    });

    let remove = move |_| {
        let Some(id) = selected_placement.get_untracked() else {
            return;
        };
        let intent = ctx.sync.with_untracked(|s| {
            s.placement_by_local(id)
                .map(|p| PlacementEditor::new().remove(p))
        });
        if let Some(intent) = intent {
            selected_placement.set(None);
            ctx.apply(intent);
        }
    };

    view! {
        {move || current().map(|placement| view! {
            <div class="placement-details">
                <h3>
                    <span class="placement-icon">{placement.plant_icon.clone()}</span>
                    {placement.plant_name.clone()}
                </h3>
                <div class="placement-scientific">{placement.scientific_name.clone()}</div>
                <dl class="placement-facts">
                    <dt>"Category"</dt>
                    <dd>{placement.category.clone()}</dd>
                    <dt>"Spacing"</dt>
                    <dd>{format!("{}\"", placement.spacing_inches)}</dd>
                    <dt>"Sun"</dt>
                    <dd>{placement.sun_requirement.clone()}</dd>
                    <dt>"Water"</dt>
                    <dd>{placement.water_requirement.clone()}</dd>
                    <dt>"Days to Harvest"</dt>
                    <dd>{placement.days_to_harvest}</dd>
                    <dt>"Planted"</dt>
                    <dd>{placement.planted_date.clone()}</dd>
                </dl>

                <Show when=move || !confirm_remove.get()>
                    <button
                        class="delete-btn"
                        on:click=move |_| set_confirm_remove.set(true)
                    >
                        "Remove Plant"
                    </button>
                </Show>
                <Show when=move || confirm_remove.get()>
                    <span class="delete-confirm">
                        <span class="delete-confirm-text">"Remove this plant?"</span>
                        <button class="confirm-btn" on:click=remove>"✓"</button>
                        <button
                            class="cancel-btn"
                            on:click=move |_| set_confirm_remove.set(false)
                        >
                            "✗"
                        </button>
                    </span>
                </Show>
            </div>
        })}
    }
}
