use tracing::debug;

#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    /// Request target without its query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Header lookup; names compare ASCII case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(0)
    }
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<(String, String)> {
    lines
        .filter_map(|line| {
            let idx = line.find(':')?;
            Some((line[..idx].trim().to_string(), line[idx + 1..].trim().to_string()))
        })
        .collect()
}

/// Splits a raw HTTP/1.1 message into request line, headers and body.
/// Missing pieces come back empty rather than as an error.
pub fn parse_http_request(buffer: &[u8]) -> Request {
    let (head, body) = match find_header_end(buffer) {
        Some(end) => (&buffer[..end], &buffer[end + 4..]),
        None => (buffer, &[][..]),
    };
    let head = String::from_utf8_lossy(head);

    // Split into lines. The first line is the request line.
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or("");

    // Parse request line (e.g., "POST /rpc?debug=1 HTTP/1.1")
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("/");
    let path = match target.find('?') {
        Some(idx) => target[..idx].to_string(),
        None => target.to_string(),
    };

    let headers = parse_headers(lines);

    debug!(%method, %path, ?headers, body_len = body.len(), "Parsed request");

    Request {
        method,
        path,
        headers,
        body: body.to_vec(),
    }
}

/// Number of body bytes still expected after `buffer`, once its headers are complete.
pub fn remaining_body_len(buffer: &[u8]) -> Option<usize> {
    let header_end = find_header_end(buffer)?;
    let head = String::from_utf8_lossy(&buffer[..header_end]);
    let request = Request {
        method: String::new(),
        path: String::new(),
        headers: parse_headers(head.lines().skip(1)),
        body: Vec::new(),
    };
    let received = buffer.len() - (header_end + 4);
    Some(request.content_length().saturating_sub(received))
}
