//! DTOs de Vehicle
//!
//! El contrato externo usa camelCase; los modelos internos, snake_case.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::common_dto::PaginationMeta;
use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};

/// Filtros del listado de vehículos
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub vehicle_type: Option<String>,
}

/// Request para registrar un vehículo
///
/// Los campos requeridos llegan como Option para poder responder 400 con
/// detalle de campo en lugar del rechazo genérico del extractor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub vehicle_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub capacity_tons: Option<Decimal>,
    pub gps_number: Option<String>,
    pub gps_id: Option<String>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
    pub owner_address: Option<String>,
    pub license_number: Option<String>,
    pub registration_date: Option<String>,
    pub notes: Option<String>,
}

/// Request para actualizar un vehículo (merge parcial)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub vehicle_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub capacity_tons: Option<Decimal>,
    pub gps_number: Option<String>,
    pub gps_id: Option<String>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
    pub owner_address: Option<String>,
    pub license_number: Option<String>,
    pub registration_date: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Request para cambiar solo el estado
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusRequest {
    pub status: Option<String>,
}

/// Response de vehículo para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
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

/// Response del listado paginado
#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleListResponse {
    pub vehicles: Vec<VehicleResponse>,
    pub pagination: PaginationMeta,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            vehicle_number: vehicle.vehicle_number,
            vehicle_type: vehicle.vehicle_type,
            capacity_tons: vehicle.capacity_tons,
            gps_number: vehicle.gps_number,
            gps_id: vehicle.gps_id,
            owner_name: vehicle.owner_name,
            owner_phone: vehicle.owner_phone,
            owner_address: vehicle.owner_address,
            license_number: vehicle.license_number,
            registration_date: vehicle.registration_date,
            status: vehicle.status,
            last_activity: vehicle.last_activity,
            notes: vehicle.notes,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_response_wire_format_is_camel_case() {
        let response = VehicleResponse {
            id: Uuid::nil(),
            vehicle_number: "KA01AB1234".to_string(),
            vehicle_type: VehicleType::Truck,
            capacity_tons: None,
            gps_number: None,
            gps_id: None,
            owner_name: "Rajesh Kumar".to_string(),
            owner_phone: "+91 9876543210".to_string(),
            owner_address: "123 Main Street, Bangalore".to_string(),
            license_number: None,
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: VehicleStatus::Active,
            last_activity: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["vehicleNumber"], "KA01AB1234");
        assert_eq!(json["vehicleType"], "truck");
        assert_eq!(json["ownerName"], "Rajesh Kumar");
        assert_eq!(json["registrationDate"], "2024-01-15");
        assert_eq!(json["status"], "active");
    }
}
