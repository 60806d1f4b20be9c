//! Vehicle endpoints
//!
//! ```text
//! POST   /vehicles               -> 201 {"message": "Vehicle created", "vehicle": {...}}
//! GET    /vehicles               -> 200 [Vehicle...]
//! GET    /vehicles/brand/:brand  -> 200 Vehicle | 404 | 400
//! GET    /vehicles/:id           -> 200 Vehicle
//! PUT    /vehicles/:id           -> 200 {"message": "Vehicle updated"}
//! DELETE /vehicles/:id           -> 200 {"message": "Vehicle deleted"}
//! ```

use crate::{app::AppState, error::ApiResult, routes::MessageResponse};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use motorpool_shared::models::vehicle::{NewVehicle, Vehicle, VehicleChanges};
use serde::{Deserialize, Serialize};

/// Creation response
#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleCreatedResponse {
    pub message: String,
    pub vehicle: Vehicle,
}

/// Creates a vehicle
///
/// The owner reference is stored as given.
pub async fn create_vehicle(
    State(state): State<AppState>,
    body: Result<Json<NewVehicle>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<VehicleCreatedResponse>)> {
    let Json(data) = body?;
    let vehicle = state.vehicles.create(data).await?;

    Ok((
        StatusCode::CREATED,
        Json(VehicleCreatedResponse {
            message: "Vehicle created".to_string(),
            vehicle,
        }),
    ))
}

/// Lists all vehicles
pub async fn list_vehicles(State(state): State<AppState>) -> ApiResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.vehicles.list_all().await?))
}

/// Gets a vehicle by ID
pub async fn get_vehicle(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vehicle>> {
    let Path(id) = id?;
    Ok(Json(state.vehicles.get_by_id(&id).await?))
}

/// Replaces kind, color and brand of a vehicle
pub async fn update_vehicle(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<VehicleChanges>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let Json(changes) = body?;
    state.vehicles.update(&id, changes).await?;

    Ok(Json(MessageResponse::new("Vehicle updated")))
}

/// Finds the first vehicle of a brand
///
/// Rejected brand input answers 400, a well-formed brand with no match 404.
pub async fn get_vehicle_by_brand(
    State(state): State<AppState>,
    brand: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vehicle>> {
    let Path(brand) = brand?;
    Ok(Json(state.vehicles.get_by_brand(Some(&brand)).await?))
}

/// Deletes a vehicle
pub async fn delete_vehicle(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    state.vehicles.delete_by_id(&id).await?;
    Ok(Json(MessageResponse::new("Vehicle deleted")))
}
