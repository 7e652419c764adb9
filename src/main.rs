use anyhow::Result;
use chrono::Utc;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use uuid::Uuid;

use sand_fleet_monitoring::config::environment::EnvironmentConfig;
use sand_fleet_monitoring::create_app;
use sand_fleet_monitoring::database::connection;
use sand_fleet_monitoring::models::user::{User, UserRole};
use sand_fleet_monitoring::repositories::user_repository::UserRepository;
use sand_fleet_monitoring::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚛 Sand Fleet Monitoring - API del departamento regulador");
    info!("=========================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match connection::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = connection::run_migrations(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }
    info!("✅ Migraciones aplicadas");

    // Crear el admin inicial si la tabla users está vacía
    ensure_default_admin(&pool, &config).await?;

    let app_state = AppState::new(pool, config.clone());
    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🚚 Vehicles:");
    info!("   GET  /api/vehicles - Listar vehículos (filtro + paginación)");
    info!("   POST /api/vehicles - Registrar vehículo");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("   PUT  /api/vehicles/:id/status - Cambiar estado");
    info!("🚨 Incidents:");
    info!("   GET  /api/incidents - Listar incidentes (filtro + paginación)");
    info!("   POST /api/incidents - Reportar incidente");
    info!("   GET  /api/incidents/:id - Obtener incidente");
    info!("   PUT  /api/incidents/:id - Editar incidente");
    info!("   DELETE /api/incidents/:id - Eliminar incidente");
    info!("📡 Telemetry:");
    info!("   POST /api/telemetry - Ingesta de posiciones (sin auth)");
    info!("   GET  /api/telemetry/live - Canal en vivo (WebSocket)");
    info!("📊 Analytics & Reports:");
    info!("   GET  /api/analytics/summary - Resumen del rango de fechas");
    info!("   GET  /api/reports/vehicles - Reporte de vehículos (txt)");
    info!("   GET  /api/reports/incidents - Reporte de incidentes (txt)");
    info!("   GET  /api/reports/analytics - Reporte de analytics (txt)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Sembrar el admin inicial desde ADMIN_USERNAME/ADMIN_PASSWORD cuando la
/// tabla users está vacía
async fn ensure_default_admin(pool: &sqlx::PgPool, config: &EnvironmentConfig) -> Result<()> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        return Ok(());
    };

    let repository = UserRepository::new(pool.clone());
    if repository.count().await? > 0 {
        return Ok(());
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    repository
        .create(User {
            id: Uuid::new_v4(),
            username: username.clone(),
            password_hash,
            full_name: "Administrator".to_string(),
            role: UserRole::Admin,
            created_at: Utc::now(),
        })
        .await?;

    info!("✅ Admin inicial '{}' creado", username);
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
