// Domain layer - Telemetry models and display classification
pub mod chart;
pub mod connection;
pub mod dashboard;
pub mod gauge;
pub mod status;
pub mod telemetry;
