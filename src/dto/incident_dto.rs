//! DTOs de Incident

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::common_dto::PaginationMeta;
use crate::models::incident::{Incident, IncidentSeverity, IncidentStatus, IncidentType};

/// Filtros del listado de incidentes
#[derive(Debug, Deserialize)]
pub struct IncidentListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Request para reportar un incidente
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentRequest {
    pub vehicle_id: Option<Uuid>,
    pub vehicle_number: Option<String>,
    pub incident_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub incident_date: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub reported_by: Option<String>,
    pub assigned_to: Option<String>,
    pub resolution_notes: Option<String>,
    pub evidence_files: Option<serde_json::Value>,
    pub estimated_damage: Option<Decimal>,
}

/// Request para editar un incidente (merge parcial)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncidentRequest {
    pub vehicle_id: Option<Uuid>,
    pub vehicle_number: Option<String>,
    pub incident_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub incident_date: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub reported_by: Option<String>,
    pub assigned_to: Option<String>,
    pub resolution_notes: Option<String>,
    pub evidence_files: Option<serde_json::Value>,
    pub estimated_damage: Option<Decimal>,
}

/// Response de incidente para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentResponse {
    pub id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_number: Option<String>,
    pub incident_type: IncidentType,
    pub description: String,
    pub location: String,
    pub incident_date: DateTime<Utc>,
    pub severity: IncidentSeverity,
    pub status: IncidentStatus,
    pub reported_by: String,
    pub assigned_to: Option<String>,
    pub resolution_notes: Option<String>,
    pub evidence_files: Option<serde_json::Value>,
    pub estimated_damage: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response del listado paginado
#[derive(Debug, Serialize, Deserialize)]
pub struct IncidentListResponse {
    pub incidents: Vec<IncidentResponse>,
    pub pagination: PaginationMeta,
}

impl From<Incident> for IncidentResponse {
    fn from(incident: Incident) -> Self {
        Self {
            id: incident.id,
            vehicle_id: incident.vehicle_id,
            vehicle_number: incident.vehicle_number,
            incident_type: incident.incident_type,
            description: incident.description,
            location: incident.location,
            incident_date: incident.incident_date,
            severity: incident.severity,
            status: incident.status,
            reported_by: incident.reported_by,
            assigned_to: incident.assigned_to,
            resolution_notes: incident.resolution_notes,
            evidence_files: incident.evidence_files,
            estimated_damage: incident.estimated_damage,
            created_at: incident.created_at,
            updated_at: incident.updated_at,
        }
    }
}
