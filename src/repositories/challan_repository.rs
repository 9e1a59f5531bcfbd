use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use super::ChallanRepository;
use crate::models::{Challan, ChallanStatus, ChallanUpdate};
use crate::utils::errors::StoreError;

const CHALLAN_COLUMNS: &str =
    "id, date, time, violation_type, location, license_plate, amount, status, due_date, description";

// Fila tal cual sale de la tabla challans
#[derive(Debug, sqlx::FromRow)]
struct ChallanRow {
    id: String,
    date: String,
    time: String,
    violation_type: String,
    location: String,
    license_plate: String,
    amount: Decimal,
    status: String,
    due_date: Option<String>,
    description: Option<String>,
}

impl TryFrom<ChallanRow> for Challan {
    type Error = StoreError;

    fn try_from(row: ChallanRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ChallanStatus>()
            .map_err(|e| StoreError::Backend(format!("Corrupt challan {}: {}", row.id, e)))?;

        Ok(Challan {
            id: row.id,
            date: row.date,
            time: row.time,
            violation_type: row.violation_type,
            location: row.location,
            license_plate: row.license_plate,
            amount: row.amount,
            status,
            due_date: row.due_date,
            description: row.description,
        })
    }
}

pub struct PgChallanRepository {
    pool: PgPool,
}

impl PgChallanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        challan: &Challan,
    ) -> Result<ChallanRow, StoreError> {
        let row = sqlx::query_as::<_, ChallanRow>(&format!(
            r#"
            INSERT INTO challans ({CHALLAN_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {CHALLAN_COLUMNS}
            "#
        ))
        .bind(&challan.id)
        .bind(&challan.date)
        .bind(&challan.time)
        .bind(&challan.violation_type)
        .bind(&challan.location)
        .bind(&challan.license_plate)
        .bind(challan.amount)
        .bind(challan.status.as_str())
        .bind(challan.due_date.as_deref())
        .bind(challan.description.as_deref())
        .fetch_one(&mut **tx)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl ChallanRepository for PgChallanRepository {
    async fn insert(&self, challan: &Challan) -> Result<Challan, StoreError> {
        let mut tx = self.pool.begin().await?;
        let row = Self::insert_in_tx(&mut tx, challan).await?;
        tx.commit().await?;

        Challan::try_from(row)
    }

    async fn update(&self, id: &str, update: &ChallanUpdate) -> Result<Challan, StoreError> {
        let details = &update.details;

        let row = sqlx::query_as::<_, ChallanRow>(&format!(
            r#"
            UPDATE challans
            SET status = COALESCE($2, status),
                date = COALESCE($3, date),
                time = COALESCE($4, time),
                violation_type = COALESCE($5, violation_type),
                location = COALESCE($6, location),
                license_plate = COALESCE($7, license_plate),
                amount = COALESCE($8, amount),
                due_date = COALESCE($9, due_date),
                description = COALESCE($10, description)
            WHERE id = $1
            RETURNING {CHALLAN_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.status.map(|s| s.as_str()))
        .bind(details.date.as_deref())
        .bind(details.time.as_deref())
        .bind(details.violation_type.as_deref())
        .bind(details.location.as_deref())
        .bind(details.license_plate.as_deref())
        .bind(details.amount)
        .bind(details.due_date.as_deref())
        .bind(details.description.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Challan::try_from(row)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Challan>, StoreError> {
        let row = sqlx::query_as::<_, ChallanRow>(&format!(
            "SELECT {CHALLAN_COLUMNS} FROM challans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Challan::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Challan>, StoreError> {
        let rows = sqlx::query_as::<_, ChallanRow>(&format!(
            "SELECT {CHALLAN_COLUMNS} FROM challans ORDER BY seq"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Challan::try_from).collect()
    }

    async fn replace_all(&self, challans: &[Challan]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM challans").execute(&mut *tx).await?;
        for challan in challans {
            Self::insert_in_tx(&mut tx, challan).await?;
        }

        tx.commit().await?;
        log::info!("🌱 Tabla challans reemplazada con {} registros", challans.len());
        Ok(())
    }
}
