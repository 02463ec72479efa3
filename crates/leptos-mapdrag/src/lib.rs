//! Leptos MapDrag Utilities
//!
//! Drag support for dropping palette entries onto a map container.
//! The payload travels through signals rather than `dataTransfer`
//! serialization, so drop handlers get the typed value back without a
//! JSON round trip.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drag state signals, generic over the dragged payload
pub struct DragSignals<P: Clone + Send + Sync + 'static> {
    pub dragging_read: ReadSignal<Option<P>>,
    pub dragging_write: WriteSignal<Option<P>>,
    /// True while a drag hovers over the drop container
    pub over_target_read: ReadSignal<bool>,
    pub over_target_write: WriteSignal<bool>,
}

// Signals are Copy handles regardless of the payload type
impl<P: Clone + Send + Sync + 'static> Clone for DragSignals<P> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<P: Clone + Send + Sync + 'static> Copy for DragSignals<P> {}

pub fn create_drag_signals<P: Clone + Send + Sync + 'static>() -> DragSignals<P> {
    let (dragging_read, dragging_write) = signal(None::<P>);
    let (over_target_read, over_target_write) = signal(false);
    DragSignals {
        dragging_read,
        dragging_write,
        over_target_read,
        over_target_write,
    }
}

/// Create dragstart handler for a draggable palette entry
pub fn make_on_dragstart<P: Clone + Send + Sync + 'static>(
    drag: DragSignals<P>,
    payload: P,
) -> impl Fn(web_sys::DragEvent) + Clone + 'static {
    move |ev: web_sys::DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", "mapdrag");
            dt.set_effect_allowed("copy");
        }
        drag.dragging_write.set(Some(payload.clone()));
    }
}

/// Create dragend handler clearing drag state (fires whether or not
/// the drop landed)
pub fn make_on_dragend<P: Clone + Send + Sync + 'static>(
    drag: DragSignals<P>,
) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        drag.dragging_write.set(None);
        drag.over_target_write.set(false);
    }
}

/// Create dragover handler for the drop container
pub fn make_on_dragover<P: Clone + Send + Sync + 'static>(
    drag: DragSignals<P>,
) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        if drag.dragging_read.get_untracked().is_some() {
            ev.prevent_default();
            if let Some(dt) = ev.data_transfer() {
                dt.set_drop_effect("copy");
            }
            drag.over_target_write.set(true);
        }
    }
}

/// Create dragleave handler for the drop container
pub fn make_on_dragleave<P: Clone + Send + Sync + 'static>(
    drag: DragSignals<P>,
) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        drag.over_target_write.set(false);
    }
}

/// Consume a drop: returns the dragged payload plus the drop point in
/// container-relative pixels, or None if nothing was being dragged.
/// Always clears the drag state.
pub fn take_drop<P: Clone + Send + Sync + 'static>(
    drag: DragSignals<P>,
    ev: &web_sys::DragEvent,
) -> Option<(P, f64, f64)> {
    ev.prevent_default();
    drag.over_target_write.set(false);

    let payload = drag.dragging_read.get_untracked()?;
    drag.dragging_write.set(None);

    let target = ev.current_target()?;
    let element = target.dyn_ref::<web_sys::Element>()?;
    let rect = element.get_bounding_client_rect();
    let x = ev.client_x() as f64 - rect.left();
    let y = ev.client_y() as f64 - rect.top();

    Some((payload, x, y))
}
