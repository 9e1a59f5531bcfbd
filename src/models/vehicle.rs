//! Modelo de Vehicle
//!
//! Un vehículo registrado vincula una matrícula normalizada con exactamente
//! una cuenta propietaria. Mapea a la tabla `vehicles`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::validation::normalize_vehicle_number;

/// Vehicle principal - `vehicle_number` es la clave única
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub vehicle_number: String,
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Crear un vehículo nuevo; normaliza la matrícula
    pub fn new(vehicle_number: &str, owner_email: &str) -> Self {
        Self {
            vehicle_number: normalize_vehicle_number(vehicle_number),
            owner_email: owner_email.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, account_id: &str) -> bool {
        self.owner_email == account_id
    }
}

/// Clasificación de propiedad de una matrícula respecto a quien consulta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipStatus {
    Unregistered,
    OwnedBySelf,
    OwnedByOther,
}

impl OwnershipStatus {
    /// Clasificar un vehículo (o su ausencia) para una cuenta opcional
    pub fn classify(vehicle: Option<&Vehicle>, account_id: Option<&str>) -> Self {
        match (vehicle, account_id) {
            (None, _) => OwnershipStatus::Unregistered,
            (Some(v), Some(account)) if v.is_owned_by(account) => OwnershipStatus::OwnedBySelf,
            (Some(_), _) => OwnershipStatus::OwnedByOther,
        }
    }
}
