//! Controller de Vehicle
//!
//! Validación de campos, parseo de enums y check de unicidad antes de
//! tocar el repositorio. Ninguna mutación se intenta con input inválido.

use chrono::Utc;
use uuid::Uuid;

use crate::dto::common_dto::{PageParams, PaginationMeta};
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, UpdateVehicleStatusRequest, VehicleListQuery,
    VehicleListResponse, VehicleResponse,
};
use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};
use crate::repositories::vehicle_repository::{VehicleFilter, VehicleRepository};
use crate::utils::errors::{conflict_error, field_validation_error, validation_error, AppError};
use crate::utils::validation::{validate_date, validate_not_empty, validate_phone, validate_vehicle_number};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<VehicleResponse, AppError> {
        let vehicle_number = required_string(request.vehicle_number, "vehicleNumber")?;
        validate_vehicle_number(&vehicle_number)
            .map_err(|e| field_validation_error("vehicleNumber", e))?;

        let vehicle_type = parse_vehicle_type(request.vehicle_type.as_deref())?
            .ok_or_else(|| validation_error("vehicleType", "vehicle type is required"))?;

        let owner_name = required_string(request.owner_name, "ownerName")?;
        let owner_phone = required_string(request.owner_phone, "ownerPhone")?;
        validate_phone(&owner_phone).map_err(|e| field_validation_error("ownerPhone", e))?;
        let owner_address = required_string(request.owner_address, "ownerAddress")?;

        let registration_date = request
            .registration_date
            .ok_or_else(|| validation_error("registrationDate", "registration date is required"))
            .and_then(|d| {
                validate_date(&d).map_err(|e| field_validation_error("registrationDate", e))
            })?;

        // Verificar unicidad antes de insertar
        if self
            .repository
            .vehicle_number_exists(&vehicle_number, None)
            .await?
        {
            return Err(conflict_error("Vehicle", "vehicleNumber", &vehicle_number));
        }

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            vehicle_number,
            vehicle_type,
            capacity_tons: request.capacity_tons,
            gps_number: request.gps_number,
            gps_id: request.gps_id,
            owner_name,
            owner_phone,
            owner_address,
            license_number: request.license_number,
            registration_date,
            status: VehicleStatus::Active,
            last_activity: None,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(vehicle).await?;
        Ok(created.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self, query: VehicleListQuery) -> Result<VehicleListResponse, AppError> {
        let page = PageParams::new(query.page, query.limit)?;

        let filter = VehicleFilter {
            status: parse_vehicle_status(query.status.as_deref())?,
            vehicle_type: parse_vehicle_type(query.vehicle_type.as_deref())?,
            search: query.search.filter(|s| !s.trim().is_empty()),
        };

        let (vehicles, total) = self.repository.list(&filter, page).await?;

        Ok(VehicleListResponse {
            vehicles: vehicles.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(page, total),
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        let mut vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if let Some(vehicle_number) = request.vehicle_number {
            validate_not_empty(&vehicle_number)
                .and_then(|_| validate_vehicle_number(&vehicle_number))
                .map_err(|e| field_validation_error("vehicleNumber", e))?;

            // El rename al número de otro vehículo es conflicto; el propio, no
            if vehicle_number != vehicle.vehicle_number
                && self
                    .repository
                    .vehicle_number_exists(&vehicle_number, Some(id))
                    .await?
            {
                return Err(conflict_error("Vehicle", "vehicleNumber", &vehicle_number));
            }
            vehicle.vehicle_number = vehicle_number;
        }

        if let Some(vehicle_type) = parse_vehicle_type(request.vehicle_type.as_deref())? {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(status) = parse_vehicle_status(request.status.as_deref())? {
            vehicle.status = status;
        }
        if let Some(owner_name) = request.owner_name {
            validate_not_empty(&owner_name).map_err(|e| field_validation_error("ownerName", e))?;
            vehicle.owner_name = owner_name;
        }
        if let Some(owner_phone) = request.owner_phone {
            validate_phone(&owner_phone).map_err(|e| field_validation_error("ownerPhone", e))?;
            vehicle.owner_phone = owner_phone;
        }
        if let Some(owner_address) = request.owner_address {
            validate_not_empty(&owner_address)
                .map_err(|e| field_validation_error("ownerAddress", e))?;
            vehicle.owner_address = owner_address;
        }
        if let Some(registration_date) = request.registration_date {
            vehicle.registration_date = validate_date(&registration_date)
                .map_err(|e| field_validation_error("registrationDate", e))?;
        }
        if request.capacity_tons.is_some() {
            vehicle.capacity_tons = request.capacity_tons;
        }
        if request.gps_number.is_some() {
            vehicle.gps_number = request.gps_number;
        }
        if request.gps_id.is_some() {
            vehicle.gps_id = request.gps_id;
        }
        if request.license_number.is_some() {
            vehicle.license_number = request.license_number;
        }
        if request.notes.is_some() {
            vehicle.notes = request.notes;
        }

        vehicle.updated_at = Utc::now();

        let updated = self.repository.update(vehicle).await?;
        Ok(updated.into())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateVehicleStatusRequest,
    ) -> Result<VehicleResponse, AppError> {
        let status = parse_vehicle_status(request.status.as_deref())?
            .ok_or_else(|| validation_error("status", "status is required"))?;

        let mut vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        vehicle.status = status;
        vehicle.updated_at = Utc::now();

        let updated = self.repository.update(vehicle).await?;
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

fn parse_vehicle_type(value: Option<&str>) -> Result<Option<VehicleType>, AppError> {
    match value {
        Some(raw) => raw
            .parse::<VehicleType>()
            .map(Some)
            .map_err(|_| validation_error("vehicleType", "invalid vehicle type")),
        None => Ok(None),
    }
}

fn parse_vehicle_status(value: Option<&str>) -> Result<Option<VehicleStatus>, AppError> {
    match value {
        Some(raw) => raw
            .parse::<VehicleStatus>()
            .map(Some)
            .map_err(|_| validation_error("status", "invalid status")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_string_rejects_missing_and_blank() {
        assert!(required_string(None, "ownerName").is_err());
        assert!(required_string(Some("  ".to_string()), "ownerName").is_err());
        assert_eq!(
            required_string(Some("Rajesh Kumar".to_string()), "ownerName").unwrap(),
            "Rajesh Kumar"
        );
    }

    #[test]
    fn test_parse_vehicle_type() {
        assert_eq!(
            parse_vehicle_type(Some("tipper")).unwrap(),
            Some(VehicleType::Tipper)
        );
        assert!(parse_vehicle_type(Some("bicycle")).is_err());
        assert_eq!(parse_vehicle_type(None).unwrap(), None);
    }

    #[test]
    fn test_parse_vehicle_status() {
        assert_eq!(
            parse_vehicle_status(Some("flagged")).unwrap(),
            Some(VehicleStatus::Flagged)
        );
        assert!(parse_vehicle_status(Some("unknown")).is_err());
        assert_eq!(parse_vehicle_status(None).unwrap(), None);
    }
}
