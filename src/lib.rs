//! Backend de monitoreo de flota de transporte de arena
//!
//! API REST para vehículos e incidentes, ingesta de telemetría con canal
//! en vivo, y agregación/reportes sobre los registros.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod live;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use state::AppState;

/// Armar el router completo de la aplicación
///
/// La ingesta de telemetría y su canal en vivo quedan fuera del
/// middleware de sesión; el resto de la API lo requiere, y el check de
/// rol de escritura ocurre en cada handler de mutación.
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/incidents", routes::incident_routes::create_incident_router())
        .nest("/api/analytics", routes::analytics_routes::create_analytics_router())
        .nest("/api/reports", routes::analytics_routes::create_reports_router())
        .merge(routes::auth_routes::create_session_router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    // Sin orígenes configurados se permite cualquiera (desarrollo)
    let cors = if state.config.cors_origins.is_empty() {
        middleware::cors::cors_middleware()
    } else {
        middleware::cors::cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_check))
        .merge(routes::auth_routes::create_auth_router())
        .nest("/api/telemetry", routes::telemetry_routes::create_telemetry_router())
        .merge(protected)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "sand-fleet-monitoring",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
