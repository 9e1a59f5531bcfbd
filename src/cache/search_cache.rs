//! Cache de la última búsqueda por cuenta
//!
//! Recuerda la última matrícula consultada por cada cuenta durante un TTL
//! fijo. Las entradas expiradas nunca se devuelven y se purgan al escribir.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedSearch {
    vehicle_number: String,
    expires_at: Instant,
}

impl CachedSearch {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Clone)]
pub struct SearchCache {
    entries: Arc<RwLock<HashMap<String, CachedSearch>>>,
    ttl: Duration,
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Guardar la matrícula (ya normalizada) consultada por una cuenta
    pub async fn remember(&self, account_id: &str, vehicle_number: &str) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, entry| !entry.is_expired(now));
        entries.insert(
            account_id.to_string(),
            CachedSearch {
                vehicle_number: vehicle_number.to_string(),
                expires_at: now + self.ttl,
            },
        );
        debug!("💾 Búsqueda {} guardada para {}", vehicle_number, account_id);
    }

    pub async fn recall(&self, account_id: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(account_id)
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.vehicle_number.clone())
    }

    /// Olvidar la búsqueda de una cuenta; devuelve si había algo vigente
    pub async fn clear(&self, account_id: &str) -> bool {
        let mut entries = self.entries.write().await;
        entries
            .remove(account_id)
            .map(|entry| !entry.is_expired(Instant::now()))
            .unwrap_or(false)
    }

    pub async fn active_entries(&self) -> usize {
        let now = Instant::now();
        self.entries.read().await.values().filter(|e| !e.is_expired(now)).count()
    }
}
