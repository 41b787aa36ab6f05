mod config;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use config::EnvironmentConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging (menos verboso en producción)
    let log_level = if config.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🏢 Company Management - API multi-tenant");
    info!("========================================");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;

    let app_state = AppState::new(pool, config);
    let app = routes::create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST  /auth/sign-up - Registrar company");
    info!("   POST  /auth/sign-in - Login company/employee");
    info!("   GET   /auth/confirm-email - Confirmar email por token");
    info!("   POST  /auth/set-password - Fijar contraseña (employee)");
    info!("   POST  /auth/request-reset-password - Solicitar reset");
    info!("   POST  /auth/reset-password - Resetear contraseña");
    info!("🏢 Endpoints - Company:");
    info!("   GET    /company/current - Obtener company actual");
    info!("   PATCH  /company - Actualizar perfil");
    info!("   DELETE /company - Eliminar company");
    info!("   POST   /company/create-employee - Alta de employee");
    info!("   GET    /company/employees - Listar employees");
    info!("   GET    /company/employee/:id - Obtener employee");
    info!("   DELETE /company/employee/:id - Eliminar employee");
    info!("👤 Endpoints - Employee:");
    info!("   GET  /employee/current - Obtener employee actual");
    info!("📄 Endpoints - File:");
    info!("   POST   /file/upload - Subir archivo (multipart)");
    info!("   GET    /file - Listar archivos visibles");
    info!("   PATCH  /file/permissions - Cambiar permisos");
    info!("   DELETE /file/:id - Eliminar archivo");
    info!("💳 Endpoints - Subscription:");
    info!("   PATCH /subscription/upgrade - Subir de plan");
    info!("   PATCH /subscription/downgrade - Bajar de plan");
    info!("   GET   /subscription/billing-info - Datos de facturación");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!("Error del servidor: {}", e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
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
