//! Registro de vehículos
//!
//! Fuente única de la relación matrícula → cuenta propietaria.

use std::sync::Arc;
use tracing::{info, warn};

use crate::models::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::{AppError, AppResult, StoreError, OWNED_BY_OTHER_MESSAGE};
use crate::utils::validation::normalize_vehicle_number;

/// Resultado de un registro exitoso
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Created(Vehicle),
    AlreadyOwned(Vehicle),
}

impl Registration {
    pub fn vehicle(&self) -> &Vehicle {
        match self {
            Registration::Created(v) | Registration::AlreadyOwned(v) => v,
        }
    }
}

#[derive(Clone)]
pub struct VehicleRegistryService {
    repository: Arc<dyn VehicleRepository>,
}

impl VehicleRegistryService {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    /// Registrar una matrícula para una cuenta.
    ///
    /// Idempotente para el mismo propietario; `OwnershipConflict` si otra
    /// cuenta ya la tiene. Una carrera perdida contra otro `register` llega
    /// como `StoreError::Duplicate` y se resuelve releyendo el propietario.
    pub async fn register(&self, vehicle_number: &str, account_id: &str) -> AppResult<Registration> {
        let normalized = normalize_vehicle_number(vehicle_number);

        if let Some(existing) = self.repository.find_by_number(&normalized).await? {
            return Self::resolve_existing(existing, account_id);
        }

        match self.repository.insert(&Vehicle::new(&normalized, account_id)).await {
            Ok(vehicle) => {
                info!("🚗 Vehículo {} registrado para {}", vehicle.vehicle_number, account_id);
                Ok(Registration::Created(vehicle))
            }
            Err(StoreError::Duplicate(_)) => {
                let existing = self
                    .repository
                    .find_by_number(&normalized)
                    .await?
                    .ok_or_else(|| StoreError::Backend(format!("Vehicle {} vanished after conflict", normalized)))?;
                Self::resolve_existing(existing, account_id)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_existing(existing: Vehicle, account_id: &str) -> AppResult<Registration> {
        if existing.is_owned_by(account_id) {
            Ok(Registration::AlreadyOwned(existing))
        } else {
            warn!("🚫 {} intentó registrar {}, ya asignado a otra cuenta", account_id, existing.vehicle_number);
            Err(AppError::OwnershipConflict(OWNED_BY_OTHER_MESSAGE.to_string()))
        }
    }

    /// Buscar por matrícula; la ausencia no es un error
    pub async fn find_by_number(&self, vehicle_number: &str) -> AppResult<Option<Vehicle>> {
        let normalized = normalize_vehicle_number(vehicle_number);
        Ok(self.repository.find_by_number(&normalized).await?)
    }

    pub async fn list_by_owner(&self, account_id: &str) -> AppResult<Vec<Vehicle>> {
        Ok(self.repository.find_by_owner(account_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryVehicleRepository;
    use async_trait::async_trait;

    fn service() -> VehicleRegistryService {
        VehicleRegistryService::new(Arc::new(InMemoryVehicleRepository::new()))
    }

    #[tokio::test]
    async fn test_register_creates_normalized_vehicle() {
        let registry = service();
        let registration = registry.register("mh 12 ab 1234", "a@x.com").await.unwrap();

        assert!(matches!(registration, Registration::Created(_)));
        assert_eq!(registration.vehicle().vehicle_number, "MH12AB1234");
    }

    #[tokio::test]
    async fn test_register_conflict_keeps_original_owner() {
        let registry = service();
        registry.register("MH12AB1234", "a@x.com").await.unwrap();

        let result = registry.register("mh 12ab1234", "b@x.com").await;
        match result {
            Err(AppError::OwnershipConflict(msg)) => assert_eq!(msg, OWNED_BY_OTHER_MESSAGE),
            other => panic!("expected OwnershipConflict, got {:?}", other),
        }

        let stored = registry.find_by_number("MH12AB1234").await.unwrap().unwrap();
        assert_eq!(stored.owner_email, "a@x.com");
        assert!(registry.list_by_owner("b@x.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_is_idempotent_for_same_owner() {
        let registry = service();
        let first = registry.register("MH12AB1234", "a@x.com").await.unwrap();
        let second = registry.register("MH12AB1234", "a@x.com").await.unwrap();

        assert!(matches!(first, Registration::Created(_)));
        assert!(matches!(second, Registration::AlreadyOwned(_)));
        assert_eq!(registry.list_by_owner("a@x.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_number_missing_is_none() {
        assert!(service().find_by_number("KA01AB0001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_owner() {
        let registry = service();
        registry.register("MH12AB1234", "a@x.com").await.unwrap();
        registry.register("MH14XY9876", "a@x.com").await.unwrap();
        registry.register("KA01AB0001", "b@x.com").await.unwrap();

        let mut numbers: Vec<String> = registry
            .list_by_owner("a@x.com")
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.vehicle_number)
            .collect();
        numbers.sort();
        assert_eq!(numbers, vec!["MH12AB1234", "MH14XY9876"]);
    }

    /// Simula perder la carrera: la primera lectura no ve el vehículo, pero
    /// el insert choca con la restricción de unicidad.
    struct RacingRepository {
        inner: InMemoryVehicleRepository,
        winner: Vehicle,
        reads: tokio::sync::Mutex<u32>,
    }

    #[async_trait]
    impl VehicleRepository for RacingRepository {
        async fn find_by_number(&self, vehicle_number: &str) -> Result<Option<Vehicle>, StoreError> {
            let mut reads = self.reads.lock().await;
            *reads += 1;
            if *reads == 1 {
                self.inner.insert(&self.winner).await?;
                return Ok(None);
            }
            self.inner.find_by_number(vehicle_number).await
        }

        async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<Vehicle>, StoreError> {
            self.inner.find_by_owner(owner_email).await
        }

        async fn insert(&self, vehicle: &Vehicle) -> Result<Vehicle, StoreError> {
            self.inner.insert(vehicle).await
        }
    }

    fn racing(winner_owner: &str) -> VehicleRegistryService {
        VehicleRegistryService::new(Arc::new(RacingRepository {
            inner: InMemoryVehicleRepository::new(),
            winner: Vehicle::new("MH12AB1234", winner_owner),
            reads: tokio::sync::Mutex::new(0),
        }))
    }

    #[tokio::test]
    async fn test_lost_race_against_other_owner_is_conflict() {
        let result = racing("a@x.com").register("MH12AB1234", "b@x.com").await;
        assert!(matches!(result, Err(AppError::OwnershipConflict(_))));
    }

    #[tokio::test]
    async fn test_lost_race_against_same_owner_is_success() {
        let result = racing("a@x.com").register("MH12AB1234", "a@x.com").await.unwrap();
        assert!(matches!(result, Registration::AlreadyOwned(_)));
    }
}
