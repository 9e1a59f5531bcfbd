use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{
    EmailQuery, OwnershipStatusResponse, RegisterVehicleRequest, RegisterVehicleResponse,
};
use crate::models::Vehicle;
use crate::services::Registration;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_vehicle))
        .route("/my-vehicles", get(my_vehicles))
        .route("/status/:vehicle_number", get(ownership_status))
}

async fn register_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<RegisterVehicleRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let controller = VehicleController::new(&state);

    let response = match controller.register(request).await? {
        Registration::Created(vehicle) => (StatusCode::CREATED, Json(vehicle)).into_response(),
        Registration::AlreadyOwned(vehicle) => Json(RegisterVehicleResponse {
            message: "Vehicle already registered to you".to_string(),
            vehicle,
        })
        .into_response(),
    };
    Ok(response)
}

async fn my_vehicles(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.my_vehicles(query).await?))
}

async fn ownership_status(
    State(state): State<AppState>,
    Path(vehicle_number): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<OwnershipStatusResponse>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.ownership_status(&vehicle_number, query).await?))
}
