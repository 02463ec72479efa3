//! Plot Details Component
//!
//! Edit panel for the selected plot: name and growing-condition
//! attributes are editable on every plot, protected ones included.
//! Deletion goes through the editor so the protected rule is applied
//! in one place.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::{AppContext, Notice};
use crate::editor::PlotEditor;
use crate::intent::PlotAttributesPatch;
use crate::models::{IrrigationType, SoilQuality, SunExposure};
use crate::store::{use_app_store, AppStateStoreFields};

const SOIL_OPTIONS: &[(&str, &str)] = &[
    ("poor", "Poor"),
    ("fair", "Fair"),
    ("good", "Good"),
    ("excellent", "Excellent"),
];

const SUN_OPTIONS: &[(&str, &str)] = &[
    ("full_sun", "Full Sun"),
    ("partial_sun", "Partial Sun"),
    ("partial_shade", "Partial Shade"),
    ("full_shade", "Full Shade"),
];

const IRRIGATION_OPTIONS: &[(&str, &str)] = &[
    ("manual", "Manual"),
    ("drip", "Drip"),
    ("sprinkler", "Sprinkler"),
    ("soaker_hose", "Soaker Hose"),
];

fn soil_value(soil: SoilQuality) -> &'static str {
    match soil {
        SoilQuality::Poor => "poor",
        SoilQuality::Fair => "fair",
        SoilQuality::Good => "good",
        SoilQuality::Excellent => "excellent",
    }
}

fn parse_soil(value: &str) -> SoilQuality {
    match value {
        "poor" => SoilQuality::Poor,
        "fair" => SoilQuality::Fair,
        "excellent" => SoilQuality::Excellent,
        _ => SoilQuality::Good,
    }
}

fn sun_value(sun: SunExposure) -> &'static str {
    match sun {
        SunExposure::FullSun => "full_sun",
        SunExposure::PartialSun => "partial_sun",
        SunExposure::PartialShade => "partial_shade",
        SunExposure::FullShade => "full_shade",
    }
}

fn parse_sun(value: &str) -> SunExposure {
    match value {
        "partial_sun" => SunExposure::PartialSun,
        "partial_shade" => SunExposure::PartialShade,
        "full_shade" => SunExposure::FullShade,
        _ => SunExposure::FullSun,
    }
}

fn irrigation_value(irrigation: IrrigationType) -> &'static str {
    match irrigation {
        IrrigationType::Manual => "manual",
        IrrigationType::Drip => "drip",
        IrrigationType::Sprinkler => "sprinkler",
        IrrigationType::SoakerHose => "soaker_hose",
    }
}

fn parse_irrigation(value: &str) -> IrrigationType {
    match value {
        "drip" => IrrigationType::Drip,
        "sprinkler" => IrrigationType::Sprinkler,
        "soaker_hose" => IrrigationType::SoakerHose,
        _ => IrrigationType::Manual,
    }
}

/// Detail/edit panel for the currently selected plot
#[component]
pub fn PlotDetails(selected_plot: RwSignal<Option<u32>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let current_plot = move || {
        selected_plot.get().and_then(|id| {
            store
                .plots()
                .get()
                .into_iter()
                .find(|p| p.local_id == id)
        })
    };

    let placement_count = move || {
        selected_plot
            .get()
            .map(|id| {
                store
                    .placements()
                    .get()
                    .iter()
                    .filter(|p| p.plot_local_id == id)
                    .count()
            })
            .unwrap_or(0)
    };

    let (name, set_name) = signal(String::new());
    let (soil, set_soil) = signal(String::from("good"));
    let (sun, set_sun) = signal(String::from("full_sun"));
    let (irrigation, set_irrigation) = signal(String::from("manual"));
    let (confirm_delete, set_confirm_delete) = signal(false);

    // Reset the form whenever the selection changes
    Effect::new(move |_| {
        if let Some(plot) = current_plot() {
            set_name.set(plot.name.clone());
            set_soil.set(soil_value(plot.soil_quality).to_string());
            set_sun.set(sun_value(plot.sun_exposure).to_string());
            set_irrigation.set(irrigation_value(plot.irrigation_type).to_string());
            set_confirm_delete.set(false);
        }
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = selected_plot.get_untracked() else {
            return;
        };
        let patch = PlotAttributesPatch {
            name: name.get_untracked(),
            soil_quality: parse_soil(&soil.get_untracked()),
            sun_exposure: parse_sun(&sun.get_untracked()),
            irrigation_type: parse_irrigation(&irrigation.get_untracked()),
        };
        let intent = ctx.sync.with_untracked(|s| {
            s.plot_by_local(id)
                .map(|p| PlotEditor::new().update_attributes(p, patch))
        });
        if let Some(intent) = intent {
            ctx.apply(intent);
        }
    };

    let delete = move |_| {
        let Some(id) = selected_plot.get_untracked() else {
            return;
        };
        let result = ctx.sync.with_untracked(|s| {
            s.plot_by_local(id)
                .map(|p| PlotEditor::new().delete_plot(p, &s.index()))
        });
        match result {
            Some(Ok(intent)) => {
                selected_plot.set(None);
                ctx.apply(intent);
            }
            Some(Err(e)) => {
                set_confirm_delete.set(false);
                ctx.show_notice(Notice::warning(e.to_string()));
            }
            None => {}
        }
    };

    view! {
        {move || current_plot().map(|plot| view! {
            <div class="plot-details">
                <h3>"Plot"</h3>
                <Show when={move || placement_count() > 0}>
                    <div class="protected-badge">
                        {move || format!("🔒 {} plant(s) — boundary locked", placement_count())}
                    </div>
                </Show>
                <div class="plot-dimensions">
                    {format!("{:.0} ft × {:.0} ft", plot.width_feet, plot.height_feet)}
                </div>

                <form on:submit=save>
                    <label>"Name"</label>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_name.set(input.value());
                        }
                    />

                    <label>"Soil Quality"</label>
                    <select
                        prop:value=move || soil.get()
                        on:change=move |ev| {
                            let target = ev.target().unwrap();
                            let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                            set_soil.set(select.value());
                        }
                    >
                        {SOIL_OPTIONS.iter().map(|(value, label)| view! {
                            <option value=*value>{*label}</option>
                        }).collect_view()}
                    </select>

                    <label>"Sun Exposure"</label>
                    <select
                        prop:value=move || sun.get()
                        on:change=move |ev| {
                            let target = ev.target().unwrap();
                            let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                            set_sun.set(select.value());
                        }
                    >
                        {SUN_OPTIONS.iter().map(|(value, label)| view! {
                            <option value=*value>{*label}</option>
                        }).collect_view()}
                    </select>

                    <label>"Irrigation"</label>
                    <select
                        prop:value=move || irrigation.get()
                        on:change=move |ev| {
                            let target = ev.target().unwrap();
                            let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                            set_irrigation.set(select.value());
                        }
                    >
                        {IRRIGATION_OPTIONS.iter().map(|(value, label)| view! {
                            <option value=*value>{*label}</option>
                        }).collect_view()}
                    </select>

                    <button type="submit" class="save-btn">"Save"</button>
                </form>

                <Show when=move || !confirm_delete.get()>
                    <button
                        class="delete-btn"
                        on:click=move |_| set_confirm_delete.set(true)
                    >
                        "Delete Plot"
                    </button>
                </Show>
                <Show when=move || confirm_delete.get()>
                    <span class="delete-confirm">
                        <span class="delete-confirm-text">"Delete this plot?"</span>
                        <button class="confirm-btn" on:click=delete>"✓"</button>
                        <button
                            class="cancel-btn"
                            on:click=move |_| set_confirm_delete.set(false)
                        >
                            "✗"
                        </button>
                    </span>
                </Show>
            </div>
        })}
    }
}
