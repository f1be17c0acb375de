use super::envelope::{ErrorBody, ResponseEnvelope};
use super::resolver::Resolution;

/// Code carried by every failure the mock detects on its own.
pub const MOCK_ERROR_CODE: i32 = 500;

/// Everything that can come out of handling one request body.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    RequestUnparsable,
    Resolution(Resolution<'a>),
}

impl<'a> From<Resolution<'a>> for Outcome<'a> {
    fn from(resolution: Resolution<'a>) -> Self {
        Outcome::Resolution(resolution)
    }
}

fn mock_error(message: &str, id: i64) -> ResponseEnvelope {
    let body = ErrorBody {
        code: MOCK_ERROR_CODE,
        error: format!("MOCK SERVER ERROR: {message}"),
    };
    ResponseEnvelope::error(body.into(), id)
}

pub fn shape(outcome: Outcome<'_>, id: i64) -> ResponseEnvelope {
    match outcome {
        Outcome::RequestUnparsable => mock_error("parse body error", id),
        Outcome::Resolution(Resolution::MethodNotFound) => mock_error("method not found", id),
        Outcome::Resolution(Resolution::DiscriminatorNotFound) => {
            mock_error("discriminator not found", id)
        }
        // Simulated errors surface the configured data as-is, without the code wrapper.
        Outcome::Resolution(Resolution::Resolved(entry)) if entry.is_error => {
            ResponseEnvelope::error(entry.data.clone(), id)
        }
        Outcome::Resolution(Resolution::Resolved(entry)) => {
            ResponseEnvelope::result(entry.data.clone(), id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResultEntry;
    use crate::rpc::envelope::Payload;
    use serde_json::{json, Value};

    fn shaped(outcome: Outcome<'_>, id: i64) -> Value {
        serde_json::to_value(shape(outcome, id)).unwrap()
    }

    #[test]
    fn engine_failures_have_fixed_bodies() {
        assert_eq!(
            shaped(Outcome::RequestUnparsable, 0),
            json!({"error": {"code": 500, "error": "MOCK SERVER ERROR: parse body error"}, "id": 0})
        );
        assert_eq!(
            shaped(Resolution::MethodNotFound.into(), 8),
            json!({"error": {"code": 500, "error": "MOCK SERVER ERROR: method not found"}, "id": 8})
        );
        assert_eq!(
            shaped(Resolution::DiscriminatorNotFound.into(), 9),
            json!({"error": {"code": 500, "error": "MOCK SERVER ERROR: discriminator not found"}, "id": 9})
        );
    }

    #[test]
    fn resolved_entries_choose_slot_by_is_error() {
        let success = ResultEntry {
            discriminator: "success".into(),
            is_error: false,
            data: json!({"id": 1}),
        };
        let failure = ResultEntry {
            discriminator: "not_found".into(),
            is_error: true,
            data: json!({"msg": "no such user"}),
        };

        assert_eq!(
            shaped(Resolution::Resolved(&success).into(), 7),
            json!({"result": {"id": 1}, "id": 7})
        );
        assert_eq!(
            shaped(Resolution::Resolved(&failure).into(), 7),
            json!({"error": {"msg": "no such user"}, "id": 7})
        );
    }

    #[test]
    fn null_error_data_is_still_an_error() {
        let entry = ResultEntry {
            discriminator: "empty".into(),
            is_error: true,
            data: Value::Null,
        };
        let envelope = shape(Resolution::Resolved(&entry).into(), -2);
        assert!(matches!(envelope.payload, Payload::Error(Value::Null)));
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"error":null,"id":-2}"#
        );
    }
}
