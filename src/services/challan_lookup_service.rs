//! Consulta de challans por vehículo con control de propiedad
//!
//! Si quien consulta se identifica y la matrícula pertenece a otra cuenta,
//! no se devuelve ningún challan. Las matrículas sin registrar se consultan
//! igual: hay infracciones anteriores al registro del vehículo.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::{Challan, OwnershipStatus};
use crate::repositories::{ChallanRepository, VehicleRepository};
use crate::utils::errors::{AppError, AppResult, OWNED_BY_OTHER_MESSAGE};
use crate::utils::validation::normalize_vehicle_number;

/// Petición explícita de consulta
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupRequest {
    pub vehicle_number: Option<String>,
    pub account_id: Option<String>,
}

impl LookupRequest {
    pub fn new(vehicle_number: impl Into<String>, account_id: Option<String>) -> Self {
        Self {
            vehicle_number: Some(vehicle_number.into()),
            account_id,
        }
    }

    /// Sin matrícula: todos los registros (vista de administración)
    pub fn all() -> Self {
        Self::default()
    }
}

#[derive(Clone)]
pub struct ChallanLookupService {
    vehicles: Arc<dyn VehicleRepository>,
    challans: Arc<dyn ChallanRepository>,
}

impl ChallanLookupService {
    pub fn new(vehicles: Arc<dyn VehicleRepository>, challans: Arc<dyn ChallanRepository>) -> Self {
        Self { vehicles, challans }
    }

    pub async fn lookup(&self, request: &LookupRequest) -> AppResult<Vec<Challan>> {
        let Some(raw_number) = request.vehicle_number.as_deref() else {
            return Ok(self.challans.find_all().await?);
        };

        let normalized = normalize_vehicle_number(raw_number);

        if let Some(account_id) = request.account_id.as_deref() {
            let vehicle = self.vehicles.find_by_number(&normalized).await?;
            if let Some(vehicle) = vehicle.filter(|v| !v.is_owned_by(account_id)) {
                warn!("🚫 {} consultó {}, registrado por otra cuenta", account_id, vehicle.vehicle_number);
                return Err(AppError::ForbiddenOtherOwner(OWNED_BY_OTHER_MESSAGE.to_string()));
            }
        }

        // Se filtra en memoria porque license_plate puede estar guardada sin normalizar
        let matching: Vec<Challan> = self
            .challans
            .find_all()
            .await?
            .into_iter()
            .filter(|c| c.normalized_plate() == normalized)
            .collect();

        debug!("🔍 {} challans para {}", matching.len(), normalized);
        Ok(matching)
    }

    /// Clasificar la propiedad de una matrícula sin devolver challans
    pub async fn ownership_status(
        &self,
        vehicle_number: &str,
        account_id: Option<&str>,
    ) -> AppResult<OwnershipStatus> {
        let normalized = normalize_vehicle_number(vehicle_number);
        let vehicle = self.vehicles.find_by_number(&normalized).await?;
        Ok(OwnershipStatus::classify(vehicle.as_ref(), account_id))
    }
}
