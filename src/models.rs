//! Frontend Models
//!
//! Data structures matching backend entities, plus the geometric value
//! types the map editor works in.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate. Equality is exact floating-point equality — the
/// backend stores whatever the map hands us, with no snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Soil quality attribute (matches backend value set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Sun exposure attribute (matches backend value set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunExposure {
    FullSun,
    PartialSun,
    PartialShade,
    FullShade,
}

/// Irrigation type attribute (matches backend value set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationType {
    Manual,
    Drip,
    Sprinkler,
    SoakerHose,
}

/// A polygonal garden bed drawn over the satellite map.
///
/// `local_id` is assigned client-side the moment the plot enters the
/// canonical collection; `id` stays `None` until the backend confirms
/// the create. A plot with at least one placement is *protected*: its
/// boundary may not be edited and it may not be deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    #[serde(skip)]
    pub local_id: u32,
    pub id: Option<u32>,
    pub name: String,
    /// Ordered vertices of a simple polygon; the first vertex is not
    /// repeated at the end.
    pub boundary: Vec<GeoPoint>,
    /// Bounding-box centroid of `boundary` (not the polygon centroid).
    pub center: GeoPoint,
    pub width_feet: f64,
    pub height_feet: f64,
    pub soil_quality: SoilQuality,
    pub sun_exposure: SunExposure,
    pub irrigation_type: IrrigationType,
    pub garden_location_id: u32,
}

/// A single plant placed at a point inside exactly one plot.
///
/// Plant-type fields are snapshotted from the catalog at placement
/// time rather than referenced live — the catalog can change without
/// rewriting history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(skip)]
    pub local_id: u32,
    pub id: Option<u32>,
    /// Client-side key of the owning plot.
    #[serde(skip)]
    pub plot_local_id: u32,
    /// Backend id of the owning plot, once it has one.
    pub plot_id: Option<u32>,
    pub position: GeoPoint,
    pub plant_type_id: u32,
    pub plant_name: String,
    pub plant_icon: String,
    pub plant_color: String,
    pub spacing_inches: u32,
    pub sun_requirement: String,
    pub water_requirement: String,
    pub days_to_harvest: u32,
    pub scientific_name: String,
    pub category: String,
    /// ISO `YYYY-MM-DD`, as the backend expects.
    pub planted_date: String,
}

/// Plant catalog entry (read-only lookup from the backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantType {
    pub id: u32,
    pub name: String,
    pub scientific_name: String,
    pub category: String,
    pub days_to_harvest: u32,
    pub spacing_inches: u32,
    pub sun_requirement: String,
    pub water_requirement: String,
    #[serde(default = "default_plant_icon")]
    pub icon: String,
    #[serde(default = "default_plant_color")]
    pub color: String,
    #[serde(default)]
    pub description: String,
}

fn default_plant_icon() -> String {
    "🌱".to_string()
}

fn default_plant_color() -> String {
    "#4CAF50".to_string()
}

/// The single anchor point the map centers on (one per user)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenLocation {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
}

impl GardenLocation {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
