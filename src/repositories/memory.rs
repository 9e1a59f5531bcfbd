//! Repositorios en memoria
//!
//! Se usan cuando no hay `DATABASE_URL` configurada y en los tests.
//! Conservan las mismas garantías que PostgreSQL: unicidad de claves y
//! orden natural de inserción.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{ChallanRepository, VehicleRepository};
use crate::models::{Challan, ChallanUpdate, Vehicle};
use crate::utils::errors::StoreError;

#[derive(Clone, Default)]
pub struct InMemoryVehicleRepository {
    vehicles: Arc<RwLock<HashMap<String, Vehicle>>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_by_number(&self, vehicle_number: &str) -> Result<Option<Vehicle>, StoreError> {
        Ok(self.vehicles.read().await.get(vehicle_number).cloned())
    }

    async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<Vehicle>, StoreError> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles
            .values()
            .filter(|v| v.owner_email == owner_email)
            .cloned()
            .collect())
    }

    async fn insert(&self, vehicle: &Vehicle) -> Result<Vehicle, StoreError> {
        let mut vehicles = self.vehicles.write().await;
        if vehicles.contains_key(&vehicle.vehicle_number) {
            return Err(StoreError::Duplicate(vehicle.vehicle_number.clone()));
        }
        vehicles.insert(vehicle.vehicle_number.clone(), vehicle.clone());
        Ok(vehicle.clone())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryChallanRepository {
    challans: Arc<RwLock<Vec<Challan>>>,
}

impl InMemoryChallanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChallanRepository for InMemoryChallanRepository {
    async fn insert(&self, challan: &Challan) -> Result<Challan, StoreError> {
        let mut challans = self.challans.write().await;
        if challans.iter().any(|c| c.id == challan.id) {
            return Err(StoreError::Duplicate(challan.id.clone()));
        }
        challans.push(challan.clone());
        Ok(challan.clone())
    }

    async fn update(&self, id: &str, update: &ChallanUpdate) -> Result<Challan, StoreError> {
        let mut challans = self.challans.write().await;
        let challan = challans
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        challan.apply(update);
        Ok(challan.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Challan>, StoreError> {
        Ok(self.challans.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Challan>, StoreError> {
        Ok(self.challans.read().await.clone())
    }

    async fn replace_all(&self, challans: &[Challan]) -> Result<(), StoreError> {
        let mut stored = self.challans.write().await;
        stored.clear();
        stored.extend_from_slice(challans);
        Ok(())
    }
}
