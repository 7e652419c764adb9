pub mod telemetry_hub;
