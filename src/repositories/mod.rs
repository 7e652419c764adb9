//! Repositorios
//!
//! Una capa por entidad sobre el pool compartido de PostgreSQL.

pub mod incident_repository;
pub mod telemetry_repository;
pub mod user_repository;
pub mod vehicle_repository;
