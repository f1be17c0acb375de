use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inbound call. Absent or `null` members decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    /// Accepted but never consulted when resolving.
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
}

/// Exactly one of `result` or `error`, enforced by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Result(Value),
    Error(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(flatten)]
    pub payload: Payload,
    pub id: i64,
}

impl ResponseEnvelope {
    pub fn result(data: Value, id: i64) -> Self {
        Self { payload: Payload::Result(data), id }
    }

    pub fn error(data: Value, id: i64) -> Self {
        Self { payload: Payload::Error(data), id }
    }
}

/// Error body emitted for failures the mock itself detects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: i32,
    pub error: String,
}

impl From<ErrorBody> for Value {
    fn from(body: ErrorBody) -> Self {
        json!({ "code": body.code, "error": body.error })
    }
}
