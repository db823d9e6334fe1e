//! The one fallible surface in this crate: validating tunable exploration
//! weights supplied from outside (e.g. the driver's CLI).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("exploration weight {name} must be finite and non-negative, got {value}")]
    Config { name: &'static str, value: f64 },
}

pub type AgentResult<T> = Result<T, AgentError>;
