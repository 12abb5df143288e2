//! Identity verification for the access gate.
//!
//! The filter never validates credentials itself; it hands every extracted
//! token to an [`IdentityVerifier`] and acts on the result. The verifier is
//! injected at construction so tests can swap in accepting, rejecting or
//! faulting implementations.

use async_trait::async_trait;
use subtle::ConstantTimeEq;

use crate::config::schema::{ApiKeyConfig, AuthConfig};

/// Ephemeral credential built from the raw `X-Access-Token` header value.
///
/// Carries nothing beyond the token string and lives for exactly one login
/// attempt. A missing header produces an empty credential, which verifiers
/// are expected to reject.
#[derive(Clone, Debug)]
pub struct StatelessCredential {
    token: String,
}

impl StatelessCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }
}

/// Per-request authentication context. Attached to the request extensions on
/// a successful login and dropped when the request completes; never stored.
#[derive(Clone, Debug)]
pub struct Session {
    /// Name associated with the accepted token.
    pub principal: String,
}

/// Login failure reported by a verifier.
///
/// Both variants surface to the client as the same 401 envelope; the split
/// exists only for logging and metrics.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The credential is missing, unknown or expired.
    #[error("credential rejected: {reason}")]
    Rejected { reason: &'static str },

    /// The verifier itself failed while checking the credential.
    #[error("identity backend fault: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable label for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Rejected { .. } => "rejected",
            AuthError::Internal(_) => "fault",
        }
    }
}

/// Capability consumed by the access filter: one login attempt per request.
///
/// Implementations must report every failure as an `AuthError`, including
/// their own internal faults. `login` may block on I/O; the filter treats it
/// as such and holds nothing across the call.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn login(&self, credential: StatelessCredential) -> Result<Session, AuthError>;
}

/// Production verifier backed by the static `[[auth.keys]]` config entries.
pub struct StaticTokenVerifier {
    keys: Vec<ApiKeyConfig>,
}

impl StaticTokenVerifier {
    pub fn from_config(auth: &AuthConfig) -> Self {
        if auth.keys.is_empty() {
            tracing::warn!("no api keys configured; every login will be rejected");
        }
        Self {
            keys: auth.keys.clone(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn login(&self, credential: StatelessCredential) -> Result<Session, AuthError> {
        if credential.is_empty() {
            return Err(AuthError::Rejected {
                reason: "empty credential",
            });
        }

        for key in &self.keys {
            // Constant-time comparison prevents timing attacks
            if key
                .token
                .as_bytes()
                .ct_eq(credential.token().as_bytes())
                .into()
            {
                return Ok(Session {
                    principal: key.principal.clone(),
                });
            }
        }

        Err(AuthError::Rejected {
            reason: "unknown token",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier_with(principal: &str, token: &str) -> StaticTokenVerifier {
        StaticTokenVerifier::from_config(&AuthConfig {
            keys: vec![ApiKeyConfig {
                principal: principal.to_string(),
                token: token.to_string(),
            }],
        })
    }

    #[tokio::test]
    async fn known_token_logs_in_with_its_principal() {
        let verifier = verifier_with("ops", "secret-1");
        let session = verifier
            .login(StatelessCredential::new("secret-1"))
            .await
            .unwrap();
        assert_eq!(session.principal, "ops");
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let verifier = verifier_with("ops", "secret-1");
        let err = verifier
            .login(StatelessCredential::new("wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected { .. }));
    }

    #[tokio::test]
    async fn empty_credential_is_rejected() {
        let verifier = verifier_with("ops", "secret-1");
        let err = verifier
            .login(StatelessCredential::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected { .. }));
        assert_eq!(err.kind(), "rejected");
    }

    #[tokio::test]
    async fn empty_key_list_rejects_everything() {
        let verifier = StaticTokenVerifier::from_config(&AuthConfig::default());
        assert!(verifier
            .login(StatelessCredential::new("anything"))
            .await
            .is_err());
    }
}
