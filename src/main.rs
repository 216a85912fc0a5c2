use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use rental_management::config::database::DatabaseConfig;
use rental_management::config::environment::EnvironmentConfig;
use rental_management::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use rental_management::routes;
use rental_management::services::completion_service;
use rental_management::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 FenixCars - Gestión de Alquileres");
    info!("====================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match DatabaseConfig::default().create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ Base de datos conectada exitosamente");

    // Barrido de auto-completado: una pasada inmediata y luego una por
    // intervalo; promueve reservas pagadas y vencidas a completed
    tokio::spawn(completion_service::run(
        pool.clone(),
        config.sweep_interval_secs,
    ));
    info!(
        "🔄 Barrido de auto-completado cada {} segundos",
        config.sweep_interval_secs
    );

    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/rental", routes::rental_routes::create_rental_router())
        .nest("/api/payment", routes::payment_routes::create_payment_router())
        .nest("/api/client", routes::client_routes::create_client_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/driver", routes::driver_routes::create_driver_router())
        .nest("/api/category", routes::category_routes::create_category_router())
        .nest("/api/reports", routes::report_routes::create_report_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📋 Endpoints - Rental:");
    info!("   POST /api/rental - Crear contrato");
    info!("   GET  /api/rental - Listar contratos");
    info!("   GET  /api/rental/availability - Vehículos/conductores ocupados");
    info!("   GET  /api/rental/quote - Cotizar monto por horas");
    info!("   GET  /api/rental/:id - Obtener contrato");
    info!("   PUT  /api/rental/:id - Actualizar contrato");
    info!("   DELETE /api/rental/:id - Eliminar contrato y sus pagos");
    info!("💰 Endpoints - Payment:");
    info!("   POST /api/rental/:id/payment - Registrar cobro o devolución");
    info!("   GET  /api/rental/:id/payments - Historial de transacciones");
    info!("   GET  /api/rental/:id/payments/summary - Resumen por tipo");
    info!("   DELETE /api/payment/:id - Eliminar transacción");
    info!("📇 Endpoints - Catálogos:");
    info!("   CRUD /api/client, /api/vehicle, /api/driver, /api/category");
    info!("📊 Endpoints - Reportes:");
    info!("   GET  /api/reports/rentals - Filas para exportación");
    info!("   GET  /api/reports/summary - KPIs del dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "rental-management",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
