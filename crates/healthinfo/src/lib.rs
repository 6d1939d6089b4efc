pub mod config;
pub mod error;
pub mod symptoms;
pub mod telemetry;
