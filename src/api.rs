//! Persistence API Bindings
//!
//! Thin async wrappers over the garden backend's REST endpoints. Wire
//! DTOs mirror the backend's JSON exactly (`center_x`/`center_y`,
//! `latitude`/`longitude`, snake_case throughout); conversion to the
//! editor's model types happens here and nowhere else.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::models::{
    GardenLocation, GeoPoint, IrrigationType, Placement, PlantType, Plot, SoilQuality,
    SunExposure,
};
use crate::sync::{Outcome, PersistCall};

// ========================
// Wire DTOs
// ========================

#[derive(Serialize, Deserialize)]
struct PlotDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u32>,
    name: String,
    coordinates: Vec<GeoPoint>,
    /// Longitude of the plot center (backend naming)
    center_x: f64,
    /// Latitude of the plot center (backend naming)
    center_y: f64,
    width: f64,
    height: f64,
    soil_quality: SoilQuality,
    sun_exposure: SunExposure,
    irrigation_type: IrrigationType,
    garden_location_id: u32,
}

impl PlotDto {
    fn from_model(plot: &Plot) -> Self {
        Self {
            id: plot.id,
            name: plot.name.clone(),
            coordinates: plot.boundary.clone(),
            center_x: plot.center.lng,
            center_y: plot.center.lat,
            width: plot.width_feet,
            height: plot.height_feet,
            soil_quality: plot.soil_quality,
            sun_exposure: plot.sun_exposure,
            irrigation_type: plot.irrigation_type,
            garden_location_id: plot.garden_location_id,
        }
    }

    fn into_model(self) -> Plot {
        Plot {
            local_id: 0,
            id: self.id,
            name: self.name,
            boundary: self.coordinates,
            center: GeoPoint::new(self.center_y, self.center_x),
            width_feet: self.width,
            height_feet: self.height,
            soil_quality: self.soil_quality,
            sun_exposure: self.sun_exposure,
            irrigation_type: self.irrigation_type,
            garden_location_id: self.garden_location_id,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PlacementDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u32>,
    plot_id: Option<u32>,
    latitude: f64,
    longitude: f64,
    plant_type_id: u32,
    plant_name: String,
    plant_icon: String,
    plant_color: String,
    spacing_inches: u32,
    sun_requirement: String,
    water_requirement: String,
    days_to_harvest: u32,
    scientific_name: String,
    category: String,
    planted_date: String,
}

impl PlacementDto {
    fn from_model(placement: &Placement) -> Self {
        Self {
            id: placement.id,
            plot_id: placement.plot_id,
            latitude: placement.position.lat,
            longitude: placement.position.lng,
            plant_type_id: placement.plant_type_id,
            plant_name: placement.plant_name.clone(),
            plant_icon: placement.plant_icon.clone(),
            plant_color: placement.plant_color.clone(),
            spacing_inches: placement.spacing_inches,
            sun_requirement: placement.sun_requirement.clone(),
            water_requirement: placement.water_requirement.clone(),
            days_to_harvest: placement.days_to_harvest,
            scientific_name: placement.scientific_name.clone(),
            category: placement.category.clone(),
            planted_date: placement.planted_date.clone(),
        }
    }

    fn into_model(self) -> Placement {
        Placement {
            local_id: 0,
            id: self.id,
            plot_local_id: 0,
            plot_id: self.plot_id,
            position: GeoPoint::new(self.latitude, self.longitude),
            plant_type_id: self.plant_type_id,
            plant_name: self.plant_name,
            plant_icon: self.plant_icon,
            plant_color: self.plant_color,
            spacing_inches: self.spacing_inches,
            sun_requirement: self.sun_requirement,
            water_requirement: self.water_requirement,
            days_to_harvest: self.days_to_harvest,
            scientific_name: self.scientific_name,
            category: self.category,
            planted_date: self.planted_date,
        }
    }
}

// ========================
// Response Envelopes
// ========================

#[derive(Deserialize)]
struct PlotsResponse {
    success: bool,
    #[serde(default)]
    plots: Vec<PlotDto>,
}

#[derive(Deserialize)]
struct PlotResponse {
    success: bool,
    plot: PlotDto,
}

#[derive(Deserialize)]
struct PlacementsResponse {
    success: bool,
    #[serde(default)]
    placements: Vec<PlacementDto>,
}

#[derive(Deserialize)]
struct PlacementResponse {
    success: bool,
    placement: PlacementDto,
}

#[derive(Deserialize)]
struct OkResponse {
    success: bool,
}

#[derive(Deserialize)]
struct LocationResponse {
    success: bool,
    location: Option<GardenLocation>,
}

#[derive(Deserialize)]
struct PlantTypesResponse {
    success: bool,
    #[serde(default)]
    plant_types: Vec<PlantType>,
}

fn check(success: bool) -> Result<(), String> {
    if success {
        Ok(())
    } else {
        Err("request rejected by server".to_string())
    }
}

// ========================
// Garden Commands
// ========================

pub async fn get_garden_location() -> Result<Option<GardenLocation>, String> {
    let resp = Request::get("/api/garden/location")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: LocationResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)?;
    Ok(body.location)
}

pub async fn get_plots() -> Result<Vec<Plot>, String> {
    let resp = Request::get("/api/garden/plots")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: PlotsResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)?;
    Ok(body.plots.into_iter().map(PlotDto::into_model).collect())
}

pub async fn create_plot(plot: &Plot) -> Result<Plot, String> {
    let resp = Request::post("/api/garden/plots")
        .json(&PlotDto::from_model(plot))
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: PlotResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)?;
    Ok(body.plot.into_model())
}

pub async fn update_plot(id: u32, plot: &Plot) -> Result<Plot, String> {
    let resp = Request::put(&format!("/api/garden/plots/{}", id))
        .json(&PlotDto::from_model(plot))
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: PlotResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)?;
    Ok(body.plot.into_model())
}

pub async fn delete_plot(id: u32) -> Result<(), String> {
    let resp = Request::delete(&format!("/api/garden/plots/{}", id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: OkResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)
}

// ========================
// Placement Commands
// ========================

pub async fn get_placements() -> Result<Vec<Placement>, String> {
    let resp = Request::get("/api/garden/placements")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: PlacementsResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)?;
    Ok(body
        .placements
        .into_iter()
        .map(PlacementDto::into_model)
        .collect())
}

pub async fn create_placement(placement: &Placement) -> Result<Placement, String> {
    let resp = Request::post("/api/garden/placements")
        .json(&PlacementDto::from_model(placement))
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: PlacementResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)?;
    Ok(body.placement.into_model())
}

pub async fn update_placement(id: u32, placement: &Placement) -> Result<Placement, String> {
    let resp = Request::put(&format!("/api/garden/placements/{}", id))
        .json(&PlacementDto::from_model(placement))
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: PlacementResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)?;
    Ok(body.placement.into_model())
}

pub async fn delete_placement(id: u32) -> Result<(), String> {
    let resp = Request::delete(&format!("/api/garden/placements/{}", id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: OkResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)
}

// ========================
// Plant Catalog
// ========================

pub async fn get_plant_types() -> Result<Vec<PlantType>, String> {
    let resp = Request::get("/api/plant-types")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: PlantTypesResponse = resp.json().await.map_err(|e| e.to_string())?;
    check(body.success)?;
    Ok(body.plant_types)
}

/// Run one sync-controller op against the backend. Timeouts and
/// transport errors collapse into `Outcome::Failed`, the same path as
/// an explicit rejection.
pub async fn perform(call: PersistCall) -> Outcome {
    let result = match &call {
        PersistCall::CreatePlot(plot) => create_plot(plot).await.map(Outcome::Plot),
        PersistCall::UpdatePlot { id, plot } => update_plot(*id, plot).await.map(Outcome::Plot),
        PersistCall::DeletePlot { id } => delete_plot(*id).await.map(|_| Outcome::Deleted),
        PersistCall::CreatePlacement(placement) => {
            create_placement(placement).await.map(Outcome::Placement)
        }
        PersistCall::UpdatePlacement { id, placement } => {
            update_placement(*id, placement).await.map(Outcome::Placement)
        }
        PersistCall::DeletePlacement { id } => {
            delete_placement(*id).await.map(|_| Outcome::Deleted)
        }
    };
    result.unwrap_or_else(Outcome::Failed)
}
