//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::cache::SearchCache;
use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    ChallanRepository, InMemoryChallanRepository, InMemoryVehicleRepository, PgChallanRepository,
    PgVehicleRepository, VehicleRepository,
};
use crate::services::{ChallanLifecycleService, ChallanLookupService, VehicleRegistryService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub registry: VehicleRegistryService,
    pub lookup: ChallanLookupService,
    pub lifecycle: ChallanLifecycleService,
    pub search_cache: SearchCache,
    pub store_kind: &'static str,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        vehicles: Arc<dyn VehicleRepository>,
        challans: Arc<dyn ChallanRepository>,
        store_kind: &'static str,
    ) -> Self {
        Self {
            registry: VehicleRegistryService::new(vehicles.clone()),
            lookup: ChallanLookupService::new(vehicles, challans.clone()),
            lifecycle: ChallanLifecycleService::new(challans),
            search_cache: SearchCache::new(config.search_cache_ttl),
            config,
            store_kind,
        }
    }

    /// Estado respaldado por PostgreSQL
    pub fn with_postgres(config: EnvironmentConfig, pool: PgPool) -> Self {
        Self::new(
            config,
            Arc::new(PgVehicleRepository::new(pool.clone())),
            Arc::new(PgChallanRepository::new(pool)),
            "postgres",
        )
    }

    /// Estado en memoria (sin DATABASE_URL y en tests)
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryVehicleRepository::new()),
            Arc::new(InMemoryChallanRepository::new()),
            "memory",
        )
    }
}
