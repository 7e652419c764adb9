//! Modelo de Telemetry
//!
//! Muestras de posición GPS, append-only: sin update ni delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Una muestra de telemetría - mapea exactamente a la tabla telemetry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TelemetrySample {
    pub id: Uuid,
    pub vehicle_number: String,
    pub lat: f64,
    pub lng: f64,
    pub speed: Option<f64>,
    pub ts: DateTime<Utc>,
}
