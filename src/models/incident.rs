//! Modelo de Incident
//!
//! Este módulo contiene el struct Incident y sus enums asociados.
//! vehicle_id es nullable: un incidente puede citar un número de vehículo
//! que todavía no corresponde a ningún registro.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tipo de incidente - mapea al ENUM incident_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "incident_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Violation,
    Accident,
    Overloading,
    IllegalMining,
    Other,
}

impl FromStr for IncidentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "violation" => Ok(IncidentType::Violation),
            "accident" => Ok(IncidentType::Accident),
            "overloading" => Ok(IncidentType::Overloading),
            "illegal_mining" => Ok(IncidentType::IllegalMining),
            "other" => Ok(IncidentType::Other),
            _ => Err(format!("invalid incident type '{}'", s)),
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IncidentType::Violation => "violation",
            IncidentType::Accident => "accident",
            IncidentType::Overloading => "overloading",
            IncidentType::IllegalMining => "illegal_mining",
            IncidentType::Other => "other",
        };
        f.write_str(s)
    }
}

/// Severidad del incidente - mapea al ENUM incident_severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "incident_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FromStr for IncidentSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(IncidentSeverity::Low),
            "medium" => Ok(IncidentSeverity::Medium),
            "high" => Ok(IncidentSeverity::High),
            "critical" => Ok(IncidentSeverity::Critical),
            _ => Err(format!("invalid incident severity '{}'", s)),
        }
    }
}

impl fmt::Display for IncidentSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IncidentSeverity::Low => "low",
            IncidentSeverity::Medium => "medium",
            IncidentSeverity::High => "high",
            IncidentSeverity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Estado del incidente - mapea al ENUM incident_status
///
/// Las transiciones no están restringidas: cualquier valor puede fijarse
/// en cualquier momento.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "incident_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Reported,
    Investigating,
    Resolved,
    Closed,
}

impl FromStr for IncidentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reported" => Ok(IncidentStatus::Reported),
            "investigating" => Ok(IncidentStatus::Investigating),
            "resolved" => Ok(IncidentStatus::Resolved),
            "closed" => Ok(IncidentStatus::Closed),
            _ => Err(format!("invalid incident status '{}'", s)),
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IncidentStatus::Reported => "reported",
            IncidentStatus::Investigating => "investigating",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Incident principal - mapea exactamente a la tabla incidents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Incident {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incident_type_from_str() {
        assert_eq!(
            "illegal_mining".parse::<IncidentType>().unwrap(),
            IncidentType::IllegalMining
        );
        assert!("overload".parse::<IncidentType>().is_err());
    }

    #[test]
    fn test_incident_status_roundtrip() {
        for s in ["reported", "investigating", "resolved", "closed"] {
            let parsed = s.parse::<IncidentStatus>().unwrap();
            assert_eq!(parsed.to_string(), s);
        }
    }
}
