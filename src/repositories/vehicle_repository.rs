//! Repositorio de Vehicle
//!
//! Acceso SQL a la tabla vehicles: CRUD más listado filtrado/paginado.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::common_dto::PageParams;
use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};
use crate::utils::errors::AppError;

/// Filtros del listado (ya parseados a sus enums)
#[derive(Debug, Default)]
pub struct VehicleFilter {
    pub status: Option<VehicleStatus>,
    pub vehicle_type: Option<VehicleType>,
    pub search: Option<String>,
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, AppError> {
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, vehicle_number, vehicle_type, capacity_tons, gps_number, gps_id,
                owner_name, owner_phone, owner_address, license_number,
                registration_date, status, last_activity, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.vehicle_number)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.capacity_tons)
        .bind(&vehicle.gps_number)
        .bind(&vehicle.gps_id)
        .bind(&vehicle.owner_name)
        .bind(&vehicle.owner_phone)
        .bind(&vehicle.owner_address)
        .bind(&vehicle.license_number)
        .bind(vehicle.registration_date)
        .bind(vehicle.status)
        .bind(vehicle.last_activity)
        .bind(&vehicle.notes)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Verificar unicidad de vehicle_number; exclude_id permite el rename
    /// de un vehículo sobre su propio número
    pub async fn vehicle_number_exists(
        &self,
        vehicle_number: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE vehicle_number = $1 AND ($2::uuid IS NULL OR id != $2))",
        )
        .bind(vehicle_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Listado filtrado, más reciente primero, con total de coincidencias
    pub async fn list(
        &self,
        filter: &VehicleFilter,
        page: PageParams,
    ) -> Result<(Vec<Vehicle>, i64), AppError> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM vehicles");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::new("SELECT * FROM vehicles");
        push_filters(&mut query, filter);
        // id como desempate para que el orden sea determinista
        query.push(" ORDER BY created_at DESC, id");
        query.push(" LIMIT ");
        query.push_bind(page.limit);
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let vehicles = query
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok((vehicles, total))
    }

    /// Lote completo para analytics y reportes; el filtrado por fechas
    /// ocurre en la capa de agregación
    pub async fn list_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles ORDER BY created_at DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn update(&self, vehicle: Vehicle) -> Result<Vehicle, AppError> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vehicle_number = $2, vehicle_type = $3, capacity_tons = $4,
                gps_number = $5, gps_id = $6, owner_name = $7, owner_phone = $8,
                owner_address = $9, license_number = $10, registration_date = $11,
                status = $12, last_activity = $13, notes = $14, updated_at = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.vehicle_number)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.capacity_tons)
        .bind(&vehicle.gps_number)
        .bind(&vehicle.gps_id)
        .bind(&vehicle.owner_name)
        .bind(&vehicle.owner_phone)
        .bind(&vehicle.owner_address)
        .bind(&vehicle.license_number)
        .bind(vehicle.registration_date)
        .bind(vehicle.status)
        .bind(vehicle.last_activity)
        .bind(&vehicle.notes)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Borrado físico; no hay cascada hacia incidents
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        Ok(())
    }
}

fn push_filters<'a>(query: &mut QueryBuilder<'a, Postgres>, filter: &'a VehicleFilter) {
    let mut separated = false;

    if let Some(status) = filter.status {
        query.push(" WHERE status = ");
        query.push_bind(status);
        separated = true;
    }

    if let Some(vehicle_type) = filter.vehicle_type {
        query.push(if separated { " AND vehicle_type = " } else { " WHERE vehicle_type = " });
        query.push_bind(vehicle_type);
        separated = true;
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        query.push(if separated { " AND (" } else { " WHERE (" });
        query.push("vehicle_number ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR owner_name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR owner_phone ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}
