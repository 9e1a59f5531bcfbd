//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la capa de almacenamiento y los errores
//! de la aplicación, junto con su conversión a respuestas HTTP.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Código de error que el frontend usa para detectar vehículos ajenos
pub const VEHICLE_OWNED_BY_OTHER: &str = "VEHICLE_OWNED_BY_OTHER";

/// Mensaje mostrado tal cual cuando un vehículo pertenece a otra cuenta
pub const OWNED_BY_OTHER_MESSAGE: &str =
    "This vehicle number is already registered with another email ID.";

/// Errores de la capa de repositorios
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store operation timed out")]
    Timeout,

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".to_string()),
            sqlx::Error::PoolTimedOut => StoreError::Timeout,
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                StoreError::Duplicate(db.message().to_string())
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Ownership conflict: {0}")]
    OwnershipConflict(String),

    #[error("Forbidden: {0}")]
    ForbiddenOtherOwner(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

// Cuerpo JSON ilegible o con tipos incorrectos
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                let fields = invalid_fields(&e);
                warn!("Validation error on fields: {}", fields);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: format!("Invalid or missing fields: {}", fields),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
                )
            }

            AppError::InvalidStatus(msg) => {
                warn!("Invalid status: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Invalid Status", msg, "INVALID_STATUS"),
                )
            }

            AppError::OwnershipConflict(msg) => {
                warn!("Ownership conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("Conflict", msg, "OWNERSHIP_CONFLICT"),
                )
            }

            AppError::ForbiddenOtherOwner(msg) => {
                warn!("Forbidden lookup: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::new("Forbidden", msg, VEHICLE_OWNED_BY_OTHER),
                )
            }

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Not Found", msg, "NOT_FOUND"),
            ),

            AppError::DuplicateId(msg) => {
                warn!("Duplicate id: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Duplicate Id", msg, "DUPLICATE_ID"),
                )
            }

            AppError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new(
                    "Rate Limit Exceeded",
                    "Too many requests. Please try again later".to_string(),
                    "RATE_LIMIT_EXCEEDED",
                ),
            ),

            AppError::Store(e) => {
                error!("❌ Store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Store Error",
                        "An error occurred while accessing the data store".to_string(),
                        "STORE_ERROR",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Lista ordenada de campos que fallaron la validación
fn invalid_fields(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();
    fields.join(", ")
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} not found", resource))
}
