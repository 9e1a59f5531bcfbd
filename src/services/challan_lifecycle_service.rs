//! Ciclo de vida de los challans
//!
//! Alta, cambios de estado, edición de detalles y carga de datos demo.
//! `Paid → Pending` está permitido: no hay guarda de transición.

use chrono::Duration;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{Challan, ChallanDetailsPatch, ChallanStatus, ChallanUpdate};
use crate::repositories::ChallanRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult, StoreError};
use crate::utils::validation::{normalize_vehicle_number, parse_date};

/// Días de plazo por defecto para pagar un challan
const DEFAULT_DUE_DAYS: i64 = 30;

/// Datos de alta ya validados
#[derive(Debug, Clone, PartialEq)]
pub struct NewChallan {
    pub id: Option<String>,
    pub date: String,
    pub time: String,
    pub violation_type: String,
    pub location: String,
    pub license_plate: String,
    pub amount: Decimal,
    pub status: Option<ChallanStatus>,
    pub due_date: Option<String>,
    pub description: Option<String>,
}

impl NewChallan {
    fn into_challan(self) -> Challan {
        let due_date = self.due_date.or_else(|| {
            parse_date(&self.date)
                .map(|d| (d + Duration::days(DEFAULT_DUE_DAYS)).format("%Y-%m-%d").to_string())
        });

        Challan {
            id: self.id.unwrap_or_else(generate_challan_id),
            date: self.date,
            time: self.time,
            violation_type: self.violation_type,
            location: self.location,
            license_plate: normalize_vehicle_number(&self.license_plate),
            amount: self.amount,
            status: self.status.unwrap_or_default(),
            due_date,
            description: self.description,
        }
    }
}

/// Identificador `CHLN` + 8 hex en mayúsculas
pub fn generate_challan_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("CHLN{}", simple[..8].to_uppercase())
}

#[derive(Clone)]
pub struct ChallanLifecycleService {
    repository: Arc<dyn ChallanRepository>,
}

impl ChallanLifecycleService {
    pub fn new(repository: Arc<dyn ChallanRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_record(&self, new_challan: NewChallan) -> AppResult<Challan> {
        let challan = new_challan.into_challan();

        match self.repository.insert(&challan).await {
            Ok(created) => {
                info!("📝 Challan {} creado para {}", created.id, created.license_plate);
                Ok(created)
            }
            Err(StoreError::Duplicate(_)) => Err(AppError::DuplicateId(format!(
                "A challan with id '{}' already exists",
                challan.id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Cambiar estado; solo `Pending` o `Paid`
    pub async fn set_status(&self, id: &str, status: &str) -> AppResult<Challan> {
        let status = status
            .parse::<ChallanStatus>()
            .map_err(|e| AppError::InvalidStatus(e.to_string()))?;

        self.update(id, ChallanUpdate::status(status)).await
    }

    pub async fn mark_paid(&self, id: &str) -> AppResult<Challan> {
        self.update(id, ChallanUpdate::status(ChallanStatus::Paid)).await
    }

    pub async fn edit_details(&self, id: &str, details: ChallanDetailsPatch) -> AppResult<Challan> {
        self.update(id, ChallanUpdate::details(details)).await
    }

    /// Aplicar una actualización cerrada; la matrícula se normaliza al escribir
    pub async fn update(&self, id: &str, mut update: ChallanUpdate) -> AppResult<Challan> {
        if let Some(plate) = update.details.license_plate.take() {
            update.details.license_plate = Some(normalize_vehicle_number(&plate));
        }

        if update == ChallanUpdate::default() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| not_found_error("Challan"));
        }

        match self.repository.update(id, &update).await {
            Ok(updated) => {
                info!("✏️ Challan {} actualizado (estado: {})", updated.id, updated.status);
                Ok(updated)
            }
            Err(StoreError::NotFound(_)) => Err(not_found_error("Challan")),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Challan>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Challan>> {
        Ok(self.repository.find_all().await?)
    }

    /// Reemplazar todo el almacén con los datos demo
    pub async fn seed_demo_data(&self) -> AppResult<()> {
        let fixtures = demo_challans();
        self.repository.replace_all(&fixtures).await?;
        info!("🌱 Datos demo cargados ({} challans)", fixtures.len());
        Ok(())
    }
}

/// Cinco challans de ejemplo sobre dos matrículas, con ambos estados
pub fn demo_challans() -> Vec<Challan> {
    let fixture = |id: &str, date: &str, time: &str, kind: &str, location: &str, plate: &str, amount: i64, status| {
        Challan {
            id: id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            violation_type: kind.to_string(),
            location: location.to_string(),
            license_plate: plate.to_string(),
            amount: Decimal::from(amount),
            status,
            due_date: None,
            description: None,
        }
    };

    vec![
        fixture("CHLN001", "2024-10-15", "14:30", "Speeding", "Mumbai-Pune Expressway", "MH12AB1234", 1000, ChallanStatus::Pending),
        fixture("CHLN002", "2024-11-02", "09:15", "Signal Jump", "Deccan Gymkhana, Pune", "MH12AB1234", 500, ChallanStatus::Pending),
        fixture("CHLN003", "2024-09-20", "18:45", "No Parking", "FC Road, Pune", "MH12AB1234", 500, ChallanStatus::Paid),
        fixture("CHLN004", "2024-12-01", "10:00", "Helmet Violation", "Shivaji Nagar", "MH14XY9876", 500, ChallanStatus::Pending),
        fixture("CHLN005", "2024-12-05", "11:30", "Speeding", "Baner Road", "MH14XY9876", 1000, ChallanStatus::Paid),
    ]
}
