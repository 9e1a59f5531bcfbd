//! Repositorios
//!
//! Contratos de almacenamiento para vehículos y challans, con una
//! implementación PostgreSQL y otra en memoria.

pub mod challan_repository;
pub mod memory;
pub mod vehicle_repository;

use async_trait::async_trait;

use crate::models::{Challan, ChallanUpdate, Vehicle};
use crate::utils::errors::StoreError;

pub use challan_repository::PgChallanRepository;
pub use memory::{InMemoryChallanRepository, InMemoryVehicleRepository};
pub use vehicle_repository::PgVehicleRepository;

/// Registro de vehículos. `vehicle_number` llega siempre normalizado.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_number(&self, vehicle_number: &str) -> Result<Option<Vehicle>, StoreError>;

    async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<Vehicle>, StoreError>;

    /// Insertar; devuelve `StoreError::Duplicate` si la matrícula ya existe
    async fn insert(&self, vehicle: &Vehicle) -> Result<Vehicle, StoreError>;
}

/// Almacén de challans, en orden natural de inserción
#[async_trait]
pub trait ChallanRepository: Send + Sync {
    /// Insertar; devuelve `StoreError::Duplicate` si el `id` ya existe
    async fn insert(&self, challan: &Challan) -> Result<Challan, StoreError>;

    /// Actualización parcial; devuelve `StoreError::NotFound` si no existe
    async fn update(&self, id: &str, update: &ChallanUpdate) -> Result<Challan, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Challan>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Challan>, StoreError>;

    /// Borrar todo e insertar el conjunto dado. No es seguro frente a
    /// escritores concurrentes: sus cambios pueden perderse.
    async fn replace_all(&self, challans: &[Challan]) -> Result<(), StoreError>;
}
