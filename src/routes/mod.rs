pub mod analytics_routes;
pub mod auth_routes;
pub mod incident_routes;
pub mod telemetry_routes;
pub mod vehicle_routes;
