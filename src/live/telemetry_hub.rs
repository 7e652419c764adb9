//! Canal en vivo de telemetría
//!
//! Fan-out publish/subscribe sobre tokio::sync::broadcast. La entrega es
//! best-effort y at-most-once: un suscriptor que se retrasa o se conecta
//! después de una publicación pierde esos eventos y nunca los recupera.

use tokio::sync::broadcast;

use crate::dto::telemetry_dto::TelemetryEvent;

/// Capacidad del buffer por suscriptor; al superarla, el receptor
/// retrasado pierde los eventos más antiguos
const CHANNEL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct TelemetryHub {
    sender: broadcast::Sender<TelemetryEvent>,
}

impl TelemetryHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publicar un evento a todos los suscriptores actuales
    ///
    /// No bloquea, no reintenta y no falla: publicar sin suscriptores
    /// conectados es un no-op.
    pub fn publish(&self, event: TelemetryEvent) {
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::debug!("telemetry event delivered to {} subscriber(s)", delivered);
    }

    /// Suscribirse al canal; solo se reciben eventos publicados después
    /// de este instante
    pub fn subscribe(&self) -> broadcast::Receiver<TelemetryEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TelemetryHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(truck_number: &str) -> TelemetryEvent {
        TelemetryEvent {
            truck_number: truck_number.to_string(),
            driver_name: None,
            owner_number: None,
            lat: 12.9,
            lng: 77.6,
            speed: None,
            ts: 1_700_000_000_000,
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let hub = TelemetryHub::new();
        let mut rx = hub.subscribe();

        hub.publish(sample_event("KA01AB1234"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.truck_number, "KA01AB1234");
        assert_eq!(event.lat, 12.9);
        assert_eq!(event.lng, 77.6);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let hub = TelemetryHub::new();
        // No debe entrar en pánico ni bloquear
        hub.publish(sample_event("KA01AB1234"));
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let hub = TelemetryHub::new();

        hub.publish(sample_event("KA01AB1234"));

        let mut rx = hub.subscribe();
        hub.publish(sample_event("MH02CD5678"));

        // El primer evento se publicó antes de la suscripción: no llega
        let event = rx.recv().await.unwrap();
        assert_eq!(event.truck_number, "MH02CD5678");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_all_subscribers_receive_the_same_event() {
        let hub = TelemetryHub::new();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        hub.publish(sample_event("KA01AB1234"));

        assert_eq!(rx1.recv().await.unwrap(), rx2.recv().await.unwrap());
    }
}
