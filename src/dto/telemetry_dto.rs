//! DTOs de Telemetry
//!
//! El emisor (unidad GPS embarcada) manda truckNumber/lat/lng como mínimo;
//! ts viene en milisegundos epoch cuando el dispositivo lo incluye.

use serde::{Deserialize, Serialize};

/// Request de ingesta de telemetría
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryIngestRequest {
    pub truck_number: Option<String>,
    pub driver_name: Option<String>,
    pub owner_number: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub speed: Option<f64>,
    pub ts: Option<i64>,
}

/// Evento publicado a los suscriptores del canal en vivo
///
/// `ts` es el instante de recepción en el servidor, en milisegundos epoch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    pub truck_number: String,
    pub driver_name: Option<String>,
    pub owner_number: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub speed: Option<f64>,
    pub ts: i64,
}

/// Ack de la ingesta
#[derive(Debug, Serialize, Deserialize)]
pub struct TelemetryAck {
    pub status: String,
}

impl TelemetryAck {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event = TelemetryEvent {
            truck_number: "KA01AB1234".to_string(),
            driver_name: None,
            owner_number: None,
            lat: 12.9,
            lng: 77.6,
            speed: Some(42.5),
            ts: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["truckNumber"], "KA01AB1234");
        assert_eq!(json["lat"], 12.9);
        assert_eq!(json["ts"], 1_700_000_000_000i64);
    }
}
