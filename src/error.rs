//! Editor Error Taxonomy
//!
//! Every way a map gesture can be rejected. None of these are fatal:
//! the worst case is a refused gesture with prior state intact.

use serde::{Deserialize, Serialize};

/// Common result type for editor operations
pub type EditResult<T> = Result<T, EditError>;

/// Errors surfaced by the plot/placement editors and the sync layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditError {
    /// Malformed polygon input (programmer/data error — validated
    /// drafts never produce this)
    InvalidGeometry(String),
    /// Drop point is not inside any plot
    OutsideAnyPlot,
    /// Drop/move point violates minimum plant spacing
    TooClose {
        min_inches: u32,
        conflicting_local_id: u32,
        distance_meters: f64,
    },
    /// Boundary edit or delete attempted on a plot that has placements
    ProtectedPlotEdit {
        name: String,
        placement_count: usize,
    },
    /// Backend rejected or failed a persistence call; the optimistic
    /// change has been rolled back
    PersistenceFailure(String),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            EditError::OutsideAnyPlot => {
                write!(f, "Plants must be placed inside a garden plot")
            }
            EditError::TooClose { min_inches, .. } => {
                write!(f, "Plants must be at least {}\" apart", min_inches)
            }
            EditError::ProtectedPlotEdit { name, placement_count } => write!(
                f,
                "Plot \"{}\" is protected because it contains {} plant(s). Remove plants first to edit the plot boundaries.",
                name, placement_count
            ),
            EditError::PersistenceFailure(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for EditError {}
