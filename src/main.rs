use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use challan_tracker::config::{DatabaseConfig, EnvironmentConfig};
use challan_tracker::database::{create_pool, run_migrations};
use challan_tracker::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚦 E-Challan Tracker - API REST");
    info!("================================");

    let config = EnvironmentConfig::from_env();
    if config.is_development() {
        info!("🛠️ Modo desarrollo activo");
    } else {
        info!("🏭 Entorno: {}", config.environment);
    }

    let app_state = match DatabaseConfig::from_environment(&config) {
        Some(db_config) => {
            let pool = create_pool(&db_config).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {}", e);
                anyhow::anyhow!("Error de base de datos: {}", e)
            })?;
            run_migrations(&pool).await?;
            AppState::with_postgres(config.clone(), pool)
        }
        None => {
            warn!("⚠️ DATABASE_URL no definido, usando almacén en memoria");
            AppState::in_memory(config.clone())
        }
    };

    if config.seed_demo_data {
        app_state.lifecycle.seed_demo_data().await?;
    }

    let app = challan_tracker::create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🚗 Vehículos:");
    info!("   POST /api/vehicles/register - Registrar vehículo");
    info!("   GET  /api/vehicles/my-vehicles?email= - Vehículos de una cuenta");
    info!("   GET  /api/vehicles/status/:vehicleNumber?email= - Estado de propiedad");
    info!("📋 Challans:");
    info!("   GET  /api/challans?vehicleNumber=&userEmail= - Consultar challans");
    info!("   GET  /api/challans/stats - Estadísticas");
    info!("   POST /api/challans - Crear challan");
    info!("   GET  /api/challans/:id - Obtener challan");
    info!("   PUT  /api/challans/:id - Actualizar challan");
    info!("   PUT  /api/challans/:id/status - Cambiar estado");
    info!("   POST /api/challans/:id/pay - Pagar challan");
    info!("   POST /api/challans/seed - Cargar datos demo");
    info!("🔁 Búsquedas:");
    info!("   GET|DELETE /api/search/last?email= - Última búsqueda");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
