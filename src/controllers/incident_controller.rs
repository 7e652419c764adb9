//! Controller de Incident
//!
//! Las transiciones de estado no están restringidas: cualquier valor del
//! enum puede fijarse en cualquier momento.

use chrono::Utc;
use uuid::Uuid;

use crate::dto::common_dto::{PageParams, PaginationMeta};
use crate::dto::incident_dto::{
    CreateIncidentRequest, IncidentListQuery, IncidentListResponse, IncidentResponse,
    UpdateIncidentRequest,
};
use crate::models::incident::{Incident, IncidentSeverity, IncidentStatus, IncidentType};
use crate::repositories::incident_repository::{IncidentFilter, IncidentRepository};
use crate::utils::errors::{field_validation_error, validation_error, AppError};
use crate::utils::validation::validate_datetime;

pub struct IncidentController {
    repository: IncidentRepository,
}

impl IncidentController {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            repository: IncidentRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateIncidentRequest,
    ) -> Result<IncidentResponse, AppError> {
        let incident_type = parse_incident_type(request.incident_type.as_deref())?
            .ok_or_else(|| validation_error("incidentType", "incident type is required"))?;
        let description = required_string(request.description, "description")?;
        let location = required_string(request.location, "location")?;
        let reported_by = required_string(request.reported_by, "reportedBy")?;

        let severity = parse_severity(request.severity.as_deref())?.unwrap_or(IncidentSeverity::Medium);
        let status = parse_status(request.status.as_deref())?.unwrap_or(IncidentStatus::Reported);

        let now = Utc::now();
        let incident_date = match request.incident_date {
            Some(raw) => validate_datetime(&raw)
                .map_err(|e| field_validation_error("incidentDate", e))?,
            None => now,
        };

        let incident = Incident {
            id: Uuid::new_v4(),
            vehicle_id: request.vehicle_id,
            vehicle_number: request.vehicle_number,
            incident_type,
            description,
            location,
            incident_date,
            severity,
            status,
            reported_by,
            assigned_to: request.assigned_to,
            resolution_notes: request.resolution_notes,
            evidence_files: request.evidence_files,
            estimated_damage: request.estimated_damage,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(incident).await?;
        Ok(created.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<IncidentResponse, AppError> {
        let incident = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".to_string()))?;

        Ok(incident.into())
    }

    pub async fn list(&self, query: IncidentListQuery) -> Result<IncidentListResponse, AppError> {
        let page = PageParams::new(query.page, query.limit)?;

        let filter = IncidentFilter {
            status: parse_status(query.status.as_deref())?,
            search: query.search.filter(|s| !s.trim().is_empty()),
        };

        let (incidents, total) = self.repository.list(&filter, page).await?;

        Ok(IncidentListResponse {
            incidents: incidents.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(page, total),
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateIncidentRequest,
    ) -> Result<IncidentResponse, AppError> {
        let mut incident = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Incident not found".to_string()))?;

        if let Some(incident_type) = parse_incident_type(request.incident_type.as_deref())? {
            incident.incident_type = incident_type;
        }
        if let Some(severity) = parse_severity(request.severity.as_deref())? {
            incident.severity = severity;
        }
        if let Some(status) = parse_status(request.status.as_deref())? {
            incident.status = status;
        }
        if let Some(description) = request.description {
            incident.description = description;
        }
        if let Some(location) = request.location {
            incident.location = location;
        }
        if let Some(reported_by) = request.reported_by {
            incident.reported_by = reported_by;
        }
        if let Some(incident_date) = request.incident_date {
            incident.incident_date = validate_datetime(&incident_date)
                .map_err(|e| field_validation_error("incidentDate", e))?;
        }
        if request.vehicle_id.is_some() {
            incident.vehicle_id = request.vehicle_id;
        }
        if request.vehicle_number.is_some() {
            incident.vehicle_number = request.vehicle_number;
        }
        if request.assigned_to.is_some() {
            incident.assigned_to = request.assigned_to;
        }
        if request.resolution_notes.is_some() {
            incident.resolution_notes = request.resolution_notes;
        }
        if request.evidence_files.is_some() {
            incident.evidence_files = request.evidence_files;
        }
        if request.estimated_damage.is_some() {
            incident.estimated_damage = request.estimated_damage;
        }

        incident.updated_at = Utc::now();

        let updated = self.repository.update(incident).await?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}

fn required_string(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    let value = value.ok_or_else(|| validation_error(field, "field is required"))?;
    if value.trim().is_empty() {
        return Err(validation_error(field, "field must not be empty"));
    }
    Ok(value)
}

fn parse_incident_type(value: Option<&str>) -> Result<Option<IncidentType>, AppError> {
    match value {
        Some(raw) => raw
            .parse::<IncidentType>()
            .map(Some)
            .map_err(|_| validation_error("incidentType", "invalid incident type")),
        None => Ok(None),
    }
}

fn parse_severity(value: Option<&str>) -> Result<Option<IncidentSeverity>, AppError> {
    match value {
        Some(raw) => raw
            .parse::<IncidentSeverity>()
            .map(Some)
            .map_err(|_| validation_error("severity", "invalid severity")),
        None => Ok(None),
    }
}

fn parse_status(value: Option<&str>) -> Result<Option<IncidentStatus>, AppError> {
    match value {
        Some(raw) => raw
            .parse::<IncidentStatus>()
            .map(Some)
            .map_err(|_| validation_error("status", "invalid status")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_incident_type() {
        assert_eq!(
            parse_incident_type(Some("illegal_mining")).unwrap(),
            Some(IncidentType::IllegalMining)
        );
        assert!(parse_incident_type(Some("unauthorized_route")).is_err());
        assert_eq!(parse_incident_type(None).unwrap(), None);
    }

    #[test]
    fn test_parse_status_rejects_unknown_values() {
        assert!(parse_status(Some("open")).is_err());
        assert_eq!(
            parse_status(Some("reported")).unwrap(),
            Some(IncidentStatus::Reported)
        );
    }
}
