// src/health/mod.rs
mod checker;
mod error;
mod status;

pub use checker::{check_health, HealthProbe};
pub use error::{ErrorKind, ProbeError};
pub use status::{HealthBody, HealthReport};
