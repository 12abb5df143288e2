//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check credential entries (non-empty tokens, distinct principals)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::GateConfig;

/// One semantic violation found in a config.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    BlankPrincipal,
    DuplicatePrincipal(String),
    EmptyToken { principal: String },
    ZeroRequestTimeout,
    ZeroBodyLimit,
    ZeroConnectionLimit,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address '{}' is not a valid socket address", addr)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address '{}' is not a valid socket address", addr)
            }
            ValidationError::BlankPrincipal => write!(f, "auth key with blank principal"),
            ValidationError::DuplicatePrincipal(principal) => {
                write!(f, "duplicate auth principal '{}'", principal)
            }
            ValidationError::EmptyToken { principal } => {
                write!(f, "auth key for '{}' has an empty token", principal)
            }
            ValidationError::ZeroRequestTimeout => {
                write!(f, "timeouts.request_secs must be greater than zero")
            }
            ValidationError::ZeroBodyLimit => {
                write!(f, "security.max_body_size must be greater than zero")
            }
            ValidationError::ZeroConnectionLimit => {
                write!(f, "listener.max_connections must be greater than zero")
            }
        }
    }
}

/// Check a parsed config for semantic problems, reporting every violation.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for key in &config.auth.keys {
        if key.principal.trim().is_empty() {
            errors.push(ValidationError::BlankPrincipal);
        } else if !seen.insert(key.principal.as_str()) {
            errors.push(ValidationError::DuplicatePrincipal(key.principal.clone()));
        }
        if key.token.is_empty() {
            errors.push(ValidationError::EmptyToken {
                principal: key.principal.clone(),
            });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    // A zero cap would park every request on the concurrency semaphore.
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroConnectionLimit);
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
    use crate::config::schema::ApiKeyConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GateConfig::default()).is_ok());
    }

    #[test]
    fn all_violations_are_reported_together() {
        let mut config = GateConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.timeouts.request_secs = 0;
        config.security.max_body_size = 0;
        config.auth.keys.push(ApiKeyConfig {
            principal: "ops".to_string(),
            token: String::new(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
        assert!(errors.contains(&ValidationError::EmptyToken {
            principal: "ops".to_string()
        }));
    }

    #[test]
    fn zero_connection_limit_is_rejected() {
        let mut config = GateConfig::default();
        config.listener.max_connections = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ZeroConnectionLimit]);
    }

    #[test]
    fn duplicate_principals_are_flagged() {
        let mut config = GateConfig::default();
        for _ in 0..2 {
            config.auth.keys.push(ApiKeyConfig {
                principal: "ops".to_string(),
                token: "secret".to_string(),
            });
        }

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicatePrincipal("ops".to_string())]
        );
    }

    #[test]
    fn metrics_address_only_checked_when_enabled() {
        let mut config = GateConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
