//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus enums asociados.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Truck,
    Dumper,
    Trailer,
    Tipper,
    Other,
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "truck" => Ok(VehicleType::Truck),
            "dumper" => Ok(VehicleType::Dumper),
            "trailer" => Ok(VehicleType::Trailer),
            "tipper" => Ok(VehicleType::Tipper),
            "other" => Ok(VehicleType::Other),
            _ => Err(format!("invalid vehicle type '{}'", s)),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VehicleType::Truck => "truck",
            VehicleType::Dumper => "dumper",
            VehicleType::Trailer => "trailer",
            VehicleType::Tipper => "tipper",
            VehicleType::Other => "other",
        };
        f.write_str(s)
    }
}

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Suspended,
    Flagged,
    Inactive,
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(VehicleStatus::Active),
            "suspended" => Ok(VehicleStatus::Suspended),
            "flagged" => Ok(VehicleStatus::Flagged),
            "inactive" => Ok(VehicleStatus::Inactive),
            _ => Err(format!("invalid vehicle status '{}'", s)),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Suspended => "suspended",
            VehicleStatus::Flagged => "flagged",
            VehicleStatus::Inactive => "inactive",
        };
        f.write_str(s)
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub capacity_tons: Option<Decimal>,
    pub gps_number: Option<String>,
    pub gps_id: Option<String>,
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_address: String,
    pub license_number: Option<String>,
    pub registration_date: NaiveDate,
    pub status: VehicleStatus,
    pub last_activity: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_from_str() {
        assert_eq!("tipper".parse::<VehicleType>().unwrap(), VehicleType::Tipper);
        assert!("bicycle".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_vehicle_status_roundtrip() {
        for s in ["active", "suspended", "flagged", "inactive"] {
            let parsed = s.parse::<VehicleStatus>().unwrap();
            assert_eq!(parsed.to_string(), s);
        }
    }
}
