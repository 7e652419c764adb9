//! Repositorio de Telemetry
//!
//! Solo inserción: la tabla es append-only y sin política de retención.

use sqlx::PgPool;

use crate::models::telemetry::TelemetrySample;
use crate::utils::errors::AppError;

pub struct TelemetryRepository {
    pool: PgPool,
}

impl TelemetryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, sample: TelemetrySample) -> Result<TelemetrySample, AppError> {
        let inserted = sqlx::query_as::<_, TelemetrySample>(
            r#"
            INSERT INTO telemetry (id, vehicle_number, lat, lng, speed, ts)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(sample.id)
        .bind(&sample.vehicle_number)
        .bind(sample.lat)
        .bind(sample.lng)
        .bind(sample.speed)
        .bind(sample.ts)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }
}
