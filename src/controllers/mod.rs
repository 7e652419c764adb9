//! Controllers
//!
//! Orquestación por entidad: validación de requests, parseo de enums y
//! llamadas a repositorios. Los handlers de rutas delegan aquí.

pub mod analytics_controller;
pub mod auth_controller;
pub mod incident_controller;
pub mod vehicle_controller;
