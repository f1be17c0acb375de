use serde::Serialize;
use tokio::io::{self, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, warn};

use super::request::{parse_http_request, remaining_body_len};
use crate::config::Configuration;
use crate::rpc;
use crate::rpc::shaper::{shape, Outcome};

/// Upper bound on the request line plus headers.
pub const MAX_HEADER_BYTES: usize = 8 * 1024;
/// Upper bound on a request body; larger bodies are never buffered.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

const INTERNAL_SERVER_ERROR: &str = "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
const NOT_FOUND_BODY: &str = r#"{"message":"Not Found"}"#;
const HEADERS_TOO_LARGE_BODY: &str = r#"{"message":"Request Header Fields Too Large"}"#;

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        431 => "Request Header Fields Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn json_response(status: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason_phrase(status),
        body.len(),
        body
    )
}

fn serialized_response<T: Serialize>(status: u16, value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(body) => json_response(status, &body),
        Err(err) => {
            error!("Response serialization error: {}", err);
            INTERNAL_SERVER_ERROR.to_string()
        }
    }
}

enum Incoming {
    Complete(Vec<u8>),
    /// Declared body exceeds `MAX_BODY_BYTES`; holds only what was read so far.
    BodyTooLarge(Vec<u8>),
    HeadersTooLarge,
}

async fn read_http_request<S>(stream: &mut S) -> io::Result<Incoming>
where
    S: AsyncRead + Unpin,
{
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];

    // Read until we find the header terminator.
    let remaining = loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(Incoming::Complete(data));
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(remaining) = remaining_body_len(&data) {
            break remaining;
        }
        if data.len() > MAX_HEADER_BYTES {
            return Ok(Incoming::HeadersTooLarge);
        }
    };

    if remaining > MAX_BODY_BYTES {
        return Ok(Incoming::BodyTooLarge(data));
    }

    // A client that closes early leaves a short body, which then fails to decode.
    (&mut *stream)
        .take(remaining as u64)
        .read_to_end(&mut data)
        .await?;
    Ok(Incoming::Complete(data))
}

/// Serves one request on `stream`. Any HTTP verb on the configured path is
/// answered with status 200; the outcome lives only in the JSON envelope.
pub async fn handle_client<S>(mut stream: S, config: &Configuration) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (data, body_too_large) = match read_http_request(&mut stream).await? {
        Incoming::Complete(data) => (data, false),
        Incoming::BodyTooLarge(head) => (head, true),
        Incoming::HeadersTooLarge => {
            warn!(limit = MAX_HEADER_BYTES, "Request headers too large");
            let response = json_response(431, HEADERS_TOO_LARGE_BODY);
            stream.write_all(response.as_bytes()).await?;
            return stream.flush().await;
        }
    };
    let req = parse_http_request(&data);

    let response = if req.path != config.route_path() {
        debug!(path = %req.path, "No route for path");
        json_response(404, NOT_FOUND_BODY)
    } else if body_too_large {
        warn!(
            content_length = req.content_length(),
            limit = MAX_BODY_BYTES,
            "Request body too large"
        );
        serialized_response(200, &shape(Outcome::RequestUnparsable, 0))
    } else {
        let discriminator = req.header(&config.discriminator_header);
        let envelope = rpc::respond(config, &req.body, discriminator);
        serialized_response(200, &envelope)
    };

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::duplex;

    fn config() -> Configuration {
        serde_json::from_value(json!({
            "server_port": 0,
            "url_prefix": "rpc",
            "discriminator_header": "X-Mock-Case",
            "handlers": [{"method": "ping", "result": [
                {"discriminator": "success", "is_error": false, "data": "pong"},
                {"discriminator": "down", "is_error": true, "data": {"reason": "maintenance"}}
            ]}]
        }))
        .unwrap()
    }

    async fn exchange(raw: &str) -> String {
        let (mut client, server) = duplex(64 * 1024);
        let config = config();
        let serve = tokio::spawn(async move { handle_client(server, &config).await });

        client.write_all(raw.as_bytes()).await.unwrap();
        let mut out = String::new();
        client.read_to_string(&mut out).await.unwrap();
        serve.await.unwrap().unwrap();
        out
    }

    fn post(path: &str, extra_headers: &str, body: &str) -> String {
        format!(
            "POST {} HTTP/1.1\r\nHost: test\r\n{}Content-Length: {}\r\n\r\n{}",
            path,
            extra_headers,
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn answers_on_normalized_prefix() {
        let out = exchange(&post("/rpc", "", r#"{"method":"ping","id":1}"#)).await;
        assert!(out.starts_with("HTTP/1.1 200 OK\r\n"), "{out}");
        assert!(out.ends_with(r#"{"result":"pong","id":1}"#), "{out}");
    }

    #[tokio::test]
    async fn configured_header_selects_entry() {
        let out = exchange(&post("/rpc", "x-mock-case: down\r\n", r#"{"method":"ping","id":2}"#)).await;
        assert!(out.starts_with("HTTP/1.1 200 OK\r\n"), "{out}");
        assert!(out.ends_with(r#"{"error":{"reason":"maintenance"},"id":2}"#), "{out}");
    }

    #[tokio::test]
    async fn engine_errors_keep_status_200() {
        let out = exchange(&post("/rpc", "", "{broken")).await;
        assert!(out.starts_with("HTTP/1.1 200 OK\r\n"), "{out}");
        assert!(out.contains("MOCK SERVER ERROR: parse body error"), "{out}");
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let out = exchange(&post("/other", "", "{}")).await;
        assert!(out.starts_with("HTTP/1.1 404 Not Found\r\n"), "{out}");
        assert!(out.ends_with(NOT_FOUND_BODY), "{out}");
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_without_buffering() {
        let raw = "POST /rpc HTTP/1.1\r\nContent-Length: 4611686018427387904\r\n\r\n{}";
        let out = exchange(raw).await;
        assert!(out.starts_with("HTTP/1.1 200 OK\r\n"), "{out}");
        assert!(
            out.ends_with(r#"{"error":{"code":500,"error":"MOCK SERVER ERROR: parse body error"},"id":0}"#),
            "{out}"
        );
    }

    #[tokio::test]
    async fn body_at_limit_is_still_read() {
        let padding = " ".repeat(MAX_BODY_BYTES - 64);
        let body = format!(r#"{{"method":"ping","id":4}}{padding}"#);
        let out = exchange(&post("/rpc", "", &body)).await;
        assert!(out.ends_with(r#"{"result":"pong","id":4}"#), "{out}");
    }

    #[tokio::test]
    async fn endless_headers_are_cut_off() {
        let mut raw = String::from("POST /rpc HTTP/1.1\r\n");
        while raw.len() <= MAX_HEADER_BYTES + 1024 {
            raw.push_str("X-Filler: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n");
        }
        let out = exchange(&raw).await;
        assert!(out.starts_with("HTTP/1.1 431 Request Header Fields Too Large\r\n"), "{out}");
    }
}
