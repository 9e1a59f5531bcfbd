use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::ChallanController;
use crate::dto::challan_dto::LastSearchResponse;
use crate::dto::vehicle_dto::EmailQuery;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_search_router() -> Router<AppState> {
    Router::new().route("/last", get(last_search).delete(clear_last_search))
}

async fn last_search(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<LastSearchResponse>, AppError> {
    let controller = ChallanController::new(&state);
    Ok(Json(controller.last_search(query).await?))
}

async fn clear_last_search(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<StatusCode, AppError> {
    let controller = ChallanController::new(&state);
    controller.clear_last_search(query).await?;
    Ok(StatusCode::NO_CONTENT)
}
