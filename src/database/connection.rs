//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool y crea el esquema de vehículos y challans.

use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        vehicle_number TEXT PRIMARY KEY,
        owner_email TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_vehicles_owner_email ON vehicles (owner_email)",
    r#"
    CREATE TABLE IF NOT EXISTS challans (
        seq BIGSERIAL,
        id TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        time TEXT NOT NULL,
        violation_type TEXT NOT NULL,
        location TEXT NOT NULL,
        license_plate TEXT NOT NULL,
        amount NUMERIC(12, 2) NOT NULL CHECK (amount >= 0),
        status TEXT NOT NULL CHECK (status IN ('Pending', 'Paid')),
        due_date TEXT,
        description TEXT
    )
    "#,
];

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!("🔌 Conectando a {}", mask_database_url(&config.url));
    config.create_pool().await
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("✅ Esquema de base de datos verificado");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    // La contraseña puede contener '@'; el separador del host es el último
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    if scheme_end + 3 > at_pos {
        return url.to_string();
    }

    format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
}
