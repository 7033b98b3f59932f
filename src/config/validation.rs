//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (body cap > 0, pool size > 0)
//! - Check the bind address and path prefix shapes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{ServiceConfig, StorageBackend};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("api.path_prefix '{0}' must be empty or start with '/'")]
    PathPrefix(String),

    #[error("api.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("storage.dsn is required for the sqlite backend")]
    MissingDsn,

    #[error("storage.max_connections must be greater than zero")]
    ZeroPoolSize,
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let prefix = &config.api.path_prefix;
    if !prefix.is_empty() && !prefix.starts_with('/') {
        errors.push(ValidationError::PathPrefix(prefix.clone()));
    }

    if config.api.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.storage.backend == StorageBackend::Sqlite {
        if config.storage.dsn.trim().is_empty() {
            errors.push(ValidationError::MissingDsn);
        }
        if config.storage.max_connections == 0 {
            errors.push(ValidationError::ZeroPoolSize);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_problem() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "localhost".into();
        config.api.path_prefix = "v1".into();
        config.api.max_body_bytes = 0;
        config.storage.dsn = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::PathPrefix("v1".into()),
                ValidationError::ZeroBodyLimit,
                ValidationError::MissingDsn,
            ]
        );
    }

    #[test]
    fn test_memory_backend_ignores_dsn() {
        let mut config = ServiceConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.storage.dsn = String::new();
        config.storage.max_connections = 0;
        assert!(validate_config(&config).is_ok());
    }
}
