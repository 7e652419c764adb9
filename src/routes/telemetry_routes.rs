//! Rutas de telemetría
//!
//! La ingesta viene de las unidades GPS embarcadas y no lleva
//! autenticación; el canal en vivo tampoco. Cada POST persiste una
//! muestra y la republica a los suscriptores conectados.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::{TimeZone, Utc};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::dto::telemetry_dto::{TelemetryAck, TelemetryEvent, TelemetryIngestRequest};
use crate::models::telemetry::TelemetrySample;
use crate::repositories::telemetry_repository::TelemetryRepository;
use crate::state::AppState;
use crate::utils::errors::{field_validation_error, validation_error, AppError};
use crate::utils::validation::validate_coordinates;

pub fn create_telemetry_router() -> Router<AppState> {
    Router::new()
        .route("/", post(ingest_telemetry))
        .route("/live", get(telemetry_live))
}

async fn ingest_telemetry(
    State(state): State<AppState>,
    Json(request): Json<TelemetryIngestRequest>,
) -> Result<Json<TelemetryAck>, AppError> {
    let truck_number = request
        .truck_number
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| validation_error("truckNumber", "truck number is required"))?;
    let lat = request
        .lat
        .ok_or_else(|| validation_error("lat", "latitude is required"))?;
    let lng = request
        .lng
        .ok_or_else(|| validation_error("lng", "longitude is required"))?;
    validate_coordinates(lat, lng).map_err(|e| field_validation_error("lat", e))?;

    // ts del dispositivo si viene; si no, instante de recepción
    let ts = match request.ts {
        Some(millis) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| validation_error("ts", "invalid timestamp"))?,
        None => Utc::now(),
    };

    let sample = TelemetrySample {
        id: Uuid::new_v4(),
        vehicle_number: truck_number.clone(),
        lat,
        lng,
        speed: request.speed,
        ts,
    };

    TelemetryRepository::new(state.pool.clone()).insert(sample).await?;

    // Fire-and-forget hacia los suscriptores; ts del evento es el
    // instante de recepción en el servidor
    state.telemetry_hub.publish(TelemetryEvent {
        truck_number,
        driver_name: request.driver_name,
        owner_number: request.owner_number,
        lat,
        lng,
        speed: request.speed,
        ts: Utc::now().timestamp_millis(),
    });

    Ok(Json(TelemetryAck::ok()))
}

async fn telemetry_live(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let receiver = state.telemetry_hub.subscribe();
    ws.on_upgrade(move |socket| handle_live_socket(socket, receiver))
}

/// Reenviar cada evento publicado al socket hasta que el cliente corte.
/// Un suscriptor que se retrasa pierde los eventos saltados; nunca se
/// reenvían.
async fn handle_live_socket(socket: WebSocket, mut events: broadcast::Receiver<TelemetryEvent>) {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let payload = match serde_json::to_string(&serde_json::json!({
                        "event": "telemetry",
                        "data": event,
                    })) {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::error!("failed to serialize telemetry event: {}", e);
                            continue;
                        }
                    };
                    if sink.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("live subscriber lagged, {} event(s) dropped", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            message = stream.next() => match message {
                // Se ignora todo lo que mande el cliente salvo el cierre
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
}
