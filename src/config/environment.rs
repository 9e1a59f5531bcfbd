//! Configuración de variables de entorno
//!
//! Cada variable tiene un valor por defecto; un valor ausente o inválido se
//! registra en el log y se sustituye por el defecto.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub search_cache_ttl: Duration,
    pub seed_demo_data: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: None,
            db_max_connections: 10,
            db_acquire_timeout: Duration::from_secs(5),
            cors_origins: Vec::new(),
            rate_limit_requests: 120,
            rate_limit_window: 60,
            search_cache_ttl: Duration::from_secs(1800),
            seed_demo_data: false,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno (llamar después de `dotenv()`)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            environment: try_load("ENVIRONMENT", defaults.environment),
            host: try_load("HOST", defaults.host),
            port: try_load("PORT", defaults.port),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            db_max_connections: try_load("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            db_acquire_timeout: Duration::from_secs(try_load(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.db_acquire_timeout.as_secs(),
            )),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            rate_limit_requests: try_load("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests),
            rate_limit_window: try_load("RATE_LIMIT_WINDOW", defaults.rate_limit_window),
            search_cache_ttl: Duration::from_secs(try_load(
                "SEARCH_CACHE_TTL_SECS",
                defaults.search_cache_ttl.as_secs(),
            )),
            seed_demo_data: try_load("SEED_DEMO_DATA", defaults.seed_demo_data),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("⚠️ Valor inválido para {}: {} (usando {})", key, e, default);
            default
        }),
        Err(_) => {
            info!("{} no definido, usando {}", key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:5000");
        assert!(config.database_url.is_none());
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_try_load_falls_back_on_invalid_value() {
        env::set_var("CHALLAN_TEST_INVALID_PORT", "not-a-port");
        assert_eq!(try_load("CHALLAN_TEST_INVALID_PORT", 5000u16), 5000);
        env::remove_var("CHALLAN_TEST_INVALID_PORT");
    }

    #[test]
    fn test_try_load_parses_value() {
        env::set_var("CHALLAN_TEST_WINDOW", " 90 ");
        assert_eq!(try_load("CHALLAN_TEST_WINDOW", 60u64), 90);
        env::remove_var("CHALLAN_TEST_WINDOW");
    }
}
