// src/lib.rs
pub mod config;
pub mod health;

pub use config::{load_config, ProbeConfig};
pub use health::{check_health, ErrorKind, HealthProbe, HealthReport, ProbeError};
