use async_trait::async_trait;
use sqlx::PgPool;

use super::VehicleRepository;
use crate::models::Vehicle;
use crate::utils::errors::StoreError;

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn find_by_number(&self, vehicle_number: &str) -> Result<Option<Vehicle>, StoreError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT vehicle_number, owner_email, created_at FROM vehicles WHERE vehicle_number = $1",
        )
        .bind(vehicle_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<Vehicle>, StoreError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT vehicle_number, owner_email, created_at FROM vehicles WHERE owner_email = $1",
        )
        .bind(owner_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn insert(&self, vehicle: &Vehicle) -> Result<Vehicle, StoreError> {
        // La PRIMARY KEY de vehicle_number es la garantía final de unicidad;
        // 23505 se convierte en StoreError::Duplicate
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (vehicle_number, owner_email, created_at)
            VALUES ($1, $2, $3)
            RETURNING vehicle_number, owner_email, created_at
            "#,
        )
        .bind(&vehicle.vehicle_number)
        .bind(&vehicle.owner_email)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }
}
