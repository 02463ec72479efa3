//! Shared test fixtures for the geometry/editor/sync suites.

use crate::models::{
    GeoPoint, IrrigationType, Placement, PlantType, Plot, SoilQuality, SunExposure,
};

/// Unit square with its south-west corner at (lat, lng)
pub fn unit_square(lat: f64, lng: f64) -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(lat, lng),
        GeoPoint::new(lat, lng + 1.0),
        GeoPoint::new(lat + 1.0, lng + 1.0),
        GeoPoint::new(lat + 1.0, lng),
    ]
}

pub fn make_plot(local_id: u32, boundary: Vec<GeoPoint>) -> Plot {
    let bounds = crate::geometry::bounding_box(&boundary).expect("fixture boundary is non-empty");
    let center = crate::geometry::bounding_box_center(&bounds);
    let dims = crate::geometry::estimate_dimensions_feet(&bounds);
    Plot {
        local_id,
        id: Some(local_id * 100),
        name: format!("Garden Plot {}", local_id),
        boundary,
        center,
        width_feet: dims.width_feet,
        height_feet: dims.height_feet,
        soil_quality: SoilQuality::Good,
        sun_exposure: SunExposure::FullSun,
        irrigation_type: IrrigationType::Manual,
        garden_location_id: 1,
    }
}

pub fn make_placement(local_id: u32, plot_local_id: u32, position: GeoPoint) -> Placement {
    Placement {
        local_id,
        id: Some(local_id * 100),
        plot_local_id,
        plot_id: Some(plot_local_id * 100),
        position,
        plant_type_id: 1,
        plant_name: "Tomato".to_string(),
        plant_icon: "🍅".to_string(),
        plant_color: "#FF6B6B".to_string(),
        spacing_inches: 24,
        sun_requirement: "full".to_string(),
        water_requirement: "medium".to_string(),
        days_to_harvest: 80,
        scientific_name: "Solanum lycopersicum".to_string(),
        category: "vegetables".to_string(),
        planted_date: "2025-05-01".to_string(),
    }
}

pub fn make_plant_type(id: u32, spacing_inches: u32) -> PlantType {
    PlantType {
        id,
        name: "Lettuce".to_string(),
        scientific_name: "Lactuca sativa".to_string(),
        category: "vegetables".to_string(),
        days_to_harvest: 45,
        spacing_inches,
        sun_requirement: "partial".to_string(),
        water_requirement: "high".to_string(),
        icon: "🥬".to_string(),
        color: "#51CF66".to_string(),
        description: "Cool-season leafy green".to_string(),
    }
}
