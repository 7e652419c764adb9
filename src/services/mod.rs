//! Services module
//!
//! Funciones puras de agregación y renderizado de reportes. Operan sobre
//! lotes ya consultados; no tocan la base de datos.

pub mod analytics_service;
pub mod report_service;
