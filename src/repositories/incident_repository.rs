//! Repositorio de Incident
//!
//! Acceso SQL a la tabla incidents: CRUD más listado filtrado/paginado.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::common_dto::PageParams;
use crate::models::incident::{Incident, IncidentStatus};
use crate::utils::errors::AppError;

/// Filtros del listado
#[derive(Debug, Default)]
pub struct IncidentFilter {
    pub status: Option<IncidentStatus>,
    pub search: Option<String>,
}

pub struct IncidentRepository {
    pool: PgPool,
}

impl IncidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, incident: Incident) -> Result<Incident, AppError> {
        let created = sqlx::query_as::<_, Incident>(
            r#"
            INSERT INTO incidents (
                id, vehicle_id, vehicle_number, incident_type, description, location,
                incident_date, severity, status, reported_by, assigned_to,
                resolution_notes, evidence_files, estimated_damage, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(incident.id)
        .bind(incident.vehicle_id)
        .bind(&incident.vehicle_number)
        .bind(incident.incident_type)
        .bind(&incident.description)
        .bind(&incident.location)
        .bind(incident.incident_date)
        .bind(incident.severity)
        .bind(incident.status)
        .bind(&incident.reported_by)
        .bind(&incident.assigned_to)
        .bind(&incident.resolution_notes)
        .bind(&incident.evidence_files)
        .bind(incident.estimated_damage)
        .bind(incident.created_at)
        .bind(incident.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Incident>, AppError> {
        let incident = sqlx::query_as::<_, Incident>("SELECT * FROM incidents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(incident)
    }

    /// Listado filtrado, más reciente primero, con total de coincidencias
    pub async fn list(
        &self,
        filter: &IncidentFilter,
        page: PageParams,
    ) -> Result<(Vec<Incident>, i64), AppError> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM incidents");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::new("SELECT * FROM incidents");
        push_filters(&mut query, filter);
        query.push(" ORDER BY created_at DESC, id");
        query.push(" LIMIT ");
        query.push_bind(page.limit);
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let incidents = query
            .build_query_as::<Incident>()
            .fetch_all(&self.pool)
            .await?;

        Ok((incidents, total))
    }

    /// Lote completo para analytics y reportes; el filtrado por fechas
    /// ocurre en la capa de agregación
    pub async fn list_all(&self) -> Result<Vec<Incident>, AppError> {
        let incidents = sqlx::query_as::<_, Incident>(
            "SELECT * FROM incidents ORDER BY created_at DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(incidents)
    }

    pub async fn update(&self, incident: Incident) -> Result<Incident, AppError> {
        let updated = sqlx::query_as::<_, Incident>(
            r#"
            UPDATE incidents
            SET vehicle_id = $2, vehicle_number = $3, incident_type = $4,
                description = $5, location = $6, incident_date = $7, severity = $8,
                status = $9, reported_by = $10, assigned_to = $11,
                resolution_notes = $12, evidence_files = $13, estimated_damage = $14,
                updated_at = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(incident.id)
        .bind(incident.vehicle_id)
        .bind(&incident.vehicle_number)
        .bind(incident.incident_type)
        .bind(&incident.description)
        .bind(&incident.location)
        .bind(incident.incident_date)
        .bind(incident.severity)
        .bind(incident.status)
        .bind(&incident.reported_by)
        .bind(&incident.assigned_to)
        .bind(&incident.resolution_notes)
        .bind(&incident.evidence_files)
        .bind(incident.estimated_damage)
        .bind(incident.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Incident not found".to_string()));
        }

        Ok(())
    }
}

fn push_filters<'a>(query: &mut QueryBuilder<'a, Postgres>, filter: &'a IncidentFilter) {
    let mut separated = false;

    if let Some(status) = filter.status {
        query.push(" WHERE status = ");
        query.push_bind(status);
        separated = true;
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        query.push(if separated { " AND (" } else { " WHERE (" });
        query.push("vehicle_number ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR location ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR description ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}
