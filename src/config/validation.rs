//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, at least one endpoint)
//! - Detect blank and duplicate endpoints
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ClusterConfig → Result<(), Vec<ValidationError>>
//! - Descriptor syntax is left to the driver at connector construction

use std::collections::HashMap;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ClusterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one endpoint is required")]
    NoEndpoints,

    #[error("dial_timeout_ms must be greater than zero")]
    ZeroDialTimeout,

    #[error("endpoint #{0} is blank")]
    BlankEndpoint(usize),

    #[error("endpoint #{index} duplicates endpoint #{first}")]
    DuplicateEndpoint { index: usize, first: usize },

    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ClusterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }

    if config.dial_timeout_ms == 0 {
        errors.push(ValidationError::ZeroDialTimeout);
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, endpoint) in config.endpoints.iter().enumerate() {
        let trimmed = endpoint.trim();
        if trimmed.is_empty() {
            errors.push(ValidationError::BlankEndpoint(index));
            continue;
        }
        if let Some(&first) = seen.get(trimmed) {
            errors.push(ValidationError::DuplicateEndpoint { index, first });
        } else {
            seen.insert(trimmed, index);
        }
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
