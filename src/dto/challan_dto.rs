use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{ChallanDetailsPatch, ChallanStatus, ChallanUpdate};
use crate::services::{LookupRequest, NewChallan};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{
    validate_amount, validate_date, validate_license_plate, validate_not_empty, validate_time,
};

// Query `?vehicleNumber=&userEmail=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallanQuery {
    pub vehicle_number: Option<String>,
    pub user_email: Option<String>,
}

impl ChallanQuery {
    /// `vehicleNumber=` vacío equivale a no filtrar; uno solo de espacios
    /// se normaliza a "" y no coincide con ninguna matrícula
    pub fn into_lookup(self) -> LookupRequest {
        LookupRequest {
            vehicle_number: self.vehicle_number.filter(|s| !s.is_empty()),
            account_id: self
                .user_email
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

fn parse_status(status: Option<&str>) -> AppResult<Option<ChallanStatus>> {
    status
        .map(|s| s.parse::<ChallanStatus>().map_err(|e| AppError::InvalidStatus(e.to_string())))
        .transpose()
}

// Request para crear un challan
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallanRequest {
    #[validate(custom = "validate_not_empty")]
    pub id: Option<String>,

    #[validate(required, custom = "validate_date")]
    pub date: Option<String>,

    #[validate(required, custom = "validate_time")]
    pub time: Option<String>,

    #[serde(rename = "type", alias = "violationType")]
    #[validate(required, custom = "validate_not_empty")]
    pub violation_type: Option<String>,

    #[validate(required, custom = "validate_not_empty")]
    pub location: Option<String>,

    #[validate(required, custom = "validate_license_plate")]
    pub license_plate: Option<String>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(required, custom = "validate_amount")]
    pub amount: Option<Decimal>,

    pub status: Option<String>,

    #[validate(custom = "validate_date")]
    pub due_date: Option<String>,

    pub description: Option<String>,
}

impl CreateChallanRequest {
    /// Validar y convertir a datos de alta
    pub fn into_new_challan(self) -> AppResult<NewChallan> {
        self.validate()?;
        let status = parse_status(self.status.as_deref())?;

        Ok(NewChallan {
            id: self.id.map(|id| id.trim().to_string()),
            date: trimmed(self.date).unwrap_or_default(),
            time: trimmed(self.time).unwrap_or_default(),
            violation_type: trimmed(self.violation_type).unwrap_or_default(),
            location: trimmed(self.location).unwrap_or_default(),
            license_plate: self.license_plate.unwrap_or_default(),
            amount: self.amount.unwrap_or_default(),
            status,
            due_date: trimmed(self.due_date),
            description: self.description,
        })
    }
}

// Request para actualizar un challan; `id` y campos desconocidos se ignoran
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChallanRequest {
    #[validate(custom = "validate_date")]
    pub date: Option<String>,

    #[validate(custom = "validate_time")]
    pub time: Option<String>,

    #[serde(rename = "type", alias = "violationType")]
    #[validate(custom = "validate_not_empty")]
    pub violation_type: Option<String>,

    #[validate(custom = "validate_not_empty")]
    pub location: Option<String>,

    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_amount")]
    pub amount: Option<Decimal>,

    pub status: Option<String>,

    #[validate(custom = "validate_date")]
    pub due_date: Option<String>,

    pub description: Option<String>,
}

impl UpdateChallanRequest {
    pub fn into_update(self) -> AppResult<ChallanUpdate> {
        self.validate()?;

        Ok(ChallanUpdate {
            status: parse_status(self.status.as_deref())?,
            details: ChallanDetailsPatch {
                date: trimmed(self.date),
                time: trimmed(self.time),
                violation_type: trimmed(self.violation_type),
                location: trimmed(self.location),
                license_plate: self.license_plate,
                amount: self.amount,
                due_date: trimmed(self.due_date),
                description: self.description,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSearchResponse {
    pub vehicle_number: String,
}
