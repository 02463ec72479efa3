//! UI Components
//!
//! Reusable Leptos components.

mod garden_map;
mod notice;
mod placement_details;
mod plant_palette;
mod plot_details;

pub use garden_map::GardenMap;
pub use notice::NoticeBanner;
pub use placement_details::PlacementDetails;
pub use plant_palette::PlantPalette;
pub use plot_details::PlotDetails;
