//! Map Adapter
//!
//! The one seam between the editor core and the concrete map
//! provider. The provider lives in a small JS wrapper (satellite
//! tiles, polygon overlays, draggable markers) bound here through a
//! `wasm_bindgen` extern block; everything crossing the seam is
//! expressed in lat/lng, never pixels or provider objects. The editor
//! core depends only on [`GestureEvent`] and [`MapSurface`].

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::models::GeoPoint;

/// Raw map gestures, already translated to geographic coordinates by
/// the wrapper
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Click on the map while in drawing mode
    VertexClicked { position: GeoPoint },
    /// Double-click (or first-vertex click) closing the draw gesture
    DrawFinished,
    /// A plot polygon was dragged or its vertices edited
    PolygonEdited { local_id: u32, boundary: Vec<GeoPoint> },
    PlotClicked { local_id: u32 },
    /// A placement marker finished a drag
    MarkerDragged { local_id: u32, position: GeoPoint },
    MarkerClicked { local_id: u32 },
}

/// Plot polygon ready to draw, with its derived styling flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotRender {
    pub local_id: u32,
    pub boundary: Vec<GeoPoint>,
    pub selected: bool,
    /// Protected plots render with the lock styling and no edit
    /// handles
    pub protected: bool,
}

/// Placement marker ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementRender {
    pub local_id: u32,
    pub position: GeoPoint,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub selected: bool,
}

/// Render-side contract of the map seam
pub trait MapSurface {
    fn center_on(&self, point: GeoPoint, zoom: u8);
    fn render_plots(&self, plots: &[PlotRender]);
    fn render_placements(&self, placements: &[PlacementRender]);
    fn set_drawing_mode(&self, drawing: bool);
    /// Container-relative pixel to lat/lng, for HTML5 palette drops
    fn point_at_pixel(&self, x: f64, y: f64) -> Option<GeoPoint>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "gardenMap"], js_name = init)]
    fn map_init(element_id: &str, lat: f64, lng: f64, zoom: u8);

    #[wasm_bindgen(js_namespace = ["window", "gardenMap"], js_name = setCenter)]
    fn map_set_center(lat: f64, lng: f64, zoom: u8);

    #[wasm_bindgen(js_namespace = ["window", "gardenMap"], js_name = renderPlots)]
    fn map_render_plots(plots: JsValue);

    #[wasm_bindgen(js_namespace = ["window", "gardenMap"], js_name = renderPlacements)]
    fn map_render_placements(placements: JsValue);

    #[wasm_bindgen(js_namespace = ["window", "gardenMap"], js_name = setDrawingMode)]
    fn map_set_drawing_mode(drawing: bool);

    #[wasm_bindgen(js_namespace = ["window", "gardenMap"], js_name = pointFromPixel)]
    fn map_point_from_pixel(x: f64, y: f64) -> JsValue;

    #[wasm_bindgen(js_namespace = ["window", "gardenMap"], js_name = onGesture)]
    fn map_on_gesture(callback: &js_sys::Function);
}

/// The production surface: forwards to the JS wrapper and feeds its
/// gesture callbacks back through one closure installed at
/// construction.
pub struct JsMapSurface;

impl JsMapSurface {
    /// Initialize the wrapper inside `element_id` and install the
    /// gesture callback. Constructed once per map component mount.
    pub fn new<F>(element_id: &str, center: GeoPoint, zoom: u8, on_gesture: F) -> Self
    where
        F: Fn(GestureEvent) + 'static,
    {
        map_init(element_id, center.lat, center.lng, zoom);

        let callback = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            match serde_wasm_bindgen::from_value::<GestureEvent>(payload) {
                Ok(event) => on_gesture(event),
                Err(e) => {
                    web_sys::console::warn_1(&format!("[MAP] bad gesture payload: {}", e).into())
                }
            }
        });
        map_on_gesture(callback.as_ref().unchecked_ref());
        callback.forget();

        Self
    }
}

impl MapSurface for JsMapSurface {
    fn center_on(&self, point: GeoPoint, zoom: u8) {
        map_set_center(point.lat, point.lng, zoom);
    }

    fn render_plots(&self, plots: &[PlotRender]) {
        if let Ok(value) = serde_wasm_bindgen::to_value(plots) {
            map_render_plots(value);
        }
    }

    fn render_placements(&self, placements: &[PlacementRender]) {
        if let Ok(value) = serde_wasm_bindgen::to_value(placements) {
            map_render_placements(value);
        }
    }

    fn set_drawing_mode(&self, drawing: bool) {
        map_set_drawing_mode(drawing);
    }

    fn point_at_pixel(&self, x: f64, y: f64) -> Option<GeoPoint> {
        let value = map_point_from_pixel(x, y);
        serde_wasm_bindgen::from_value(value).ok()
    }
}
