//! Rutas de la API
//!
//! Este módulo agrupa los routers de vehículos, challans y búsquedas.

pub mod challan_routes;
pub mod search_routes;
pub mod vehicle_routes;

use axum::Router;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/challans", challan_routes::create_challan_router())
        .nest("/search", search_routes::create_search_router())
}
