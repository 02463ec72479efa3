//! Map Editors
//!
//! Gesture-driven state machines for plots and placements. Both
//! operate on drafts and emit [`crate::intent::Intent`]s; the sync
//! controller is the only code that mutates the canonical collections.

mod placement;
mod plot;

pub use placement::PlacementEditor;
pub use plot::{PlotEditor, ProtectedPlotNotice};
