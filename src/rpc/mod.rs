pub mod envelope;
pub mod resolver;
pub mod shaper;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Configuration;
use envelope::{RequestEnvelope, ResponseEnvelope};
use resolver::{effective_discriminator, resolve};
use shaper::{shape, Outcome};

/// Decodes a request body. On failure, returns the id that could still be
/// recovered from it, `0` if none.
///
/// The body is always treated as JSON: `Content-Type` is not consulted, and
/// an empty body (even on GET or DELETE) is unparsable rather than a call to
/// method `""`.
pub fn decode_request(body: &[u8]) -> Result<RequestEnvelope, i64> {
    let document: Value = serde_json::from_slice(body).map_err(|_| 0)?;
    let recovered_id = document.get("id").and_then(Value::as_i64).unwrap_or(0);
    serde_json::from_value(document).map_err(|_| recovered_id)
}

/// Turns one request body into its response. Never fails: every problem
/// ends up inside the returned envelope.
pub fn respond(
    config: &Configuration,
    body: &[u8],
    discriminator: Option<&str>,
) -> ResponseEnvelope {
    let request = match decode_request(body) {
        Ok(request) => request,
        Err(id) => {
            warn!(id, "Unparsable request body");
            return shape(Outcome::RequestUnparsable, id);
        }
    };

    let resolution = resolve(config, &request.method, discriminator);
    debug!(
        method = %request.method,
        discriminator = effective_discriminator(discriminator),
        id = request.id,
        ?resolution,
        "Resolved request"
    );
    shape(resolution.into(), request.id)
}
