use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::ChallanController;
use crate::dto::challan_dto::{
    ChallanQuery, CreateChallanRequest, MessageResponse, SetStatusRequest, UpdateChallanRequest,
};
use crate::models::Challan;
use crate::services::ChallanStats;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_challan_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_challans).post(create_challan))
        .route("/seed", post(seed_challans))
        .route("/stats", get(challan_stats))
        .route("/:id", get(get_challan).put(update_challan))
        .route("/:id/status", put(set_challan_status))
        .route("/:id/pay", post(pay_challan))
}

async fn list_challans(
    State(state): State<AppState>,
    Query(query): Query<ChallanQuery>,
) -> Result<Json<Vec<Challan>>, AppError> {
    let controller = ChallanController::new(&state);
    Ok(Json(controller.list(query).await?))
}

async fn challan_stats(
    State(state): State<AppState>,
    Query(query): Query<ChallanQuery>,
) -> Result<Json<ChallanStats>, AppError> {
    let controller = ChallanController::new(&state);
    Ok(Json(controller.stats(query).await?))
}

async fn get_challan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Challan>, AppError> {
    let controller = ChallanController::new(&state);
    Ok(Json(controller.get(&id).await?))
}

async fn create_challan(
    State(state): State<AppState>,
    payload: Result<Json<CreateChallanRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Challan>), AppError> {
    let Json(request) = payload?;
    let controller = ChallanController::new(&state);
    let challan = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(challan)))
}

async fn update_challan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateChallanRequest>, JsonRejection>,
) -> Result<Json<Challan>, AppError> {
    let Json(request) = payload?;
    let controller = ChallanController::new(&state);
    Ok(Json(controller.update(&id, request).await?))
}

async fn set_challan_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SetStatusRequest>, JsonRejection>,
) -> Result<Json<Challan>, AppError> {
    let Json(request) = payload?;
    let controller = ChallanController::new(&state);
    Ok(Json(controller.set_status(&id, request).await?))
}

async fn pay_challan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Challan>, AppError> {
    let controller = ChallanController::new(&state);
    Ok(Json(controller.pay(&id).await?))
}

async fn seed_challans(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    let controller = ChallanController::new(&state);
    controller.seed().await?;
    Ok(Json(MessageResponse::new("Database seeded successfully")))
}
