//! Failure response envelope.
//!
//! # Responsibilities
//! - Define the JSON body shape the gate returns on rejection
//! - Pin the exact content type the rejection carries
//!
//! # Design Decisions
//! - One envelope for every failure kind; clients never learn whether a
//!   token was wrong or the identity backend faulted
//! - `code` is a stable non-zero application code, not the HTTP status

use serde::{Deserialize, Serialize};

/// Content type of every rejection response, charset included.
pub const APPLICATION_JSON_UTF8: &str = "application/json;charset=utf-8";

/// Application code reported when a login is required but failed.
pub const UNAUTHORIZED_CODE: i32 = 601;

pub const UNAUTHORIZED_MESSAGE: &str = "token is invalid, expired or missing";

/// JSON body of a gate rejection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureBody {
    pub code: i32,
    pub message: String,
}

impl FailureBody {
    pub fn unauthorized() -> Self {
        Self {
            code: UNAUTHORIZED_CODE,
            message: UNAUTHORIZED_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_envelope_shape() {
        let value = serde_json::to_value(FailureBody::unauthorized()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "code": 601,
                "message": "token is invalid, expired or missing",
            })
        );
    }

    #[test]
    fn envelope_round_trips_from_client_side() {
        let parsed: FailureBody =
            serde_json::from_str(r#"{"code":601,"message":"token is invalid, expired or missing"}"#)
                .unwrap();
        assert_eq!(parsed, FailureBody::unauthorized());
        assert_ne!(parsed.code, 0);
    }
}
