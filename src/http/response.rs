//! Response construction.
//!
//! Responses are written as a single flat byte buffer: status line, the few
//! fixed headers, blank line, body.  Every response carries
//! `Connection: close` — the server handles one request per connection.
//! Only the CORS preflight answer carries the `Access-Control-*` headers;
//! the companion web UI tolerates their absence on actual responses.

/// Success body for an executed batch: `{"success": true, "executed": N}`.
pub fn command_result(executed: usize) -> Vec<u8> {
    let body = format!("{{\"success\": true, \"executed\": {executed}}}");
    with_head("200 OK", "application/json", &body)
}

/// Status probe body: `{"status":"online","devices":N}`.
pub fn status(device_count: usize) -> Vec<u8> {
    let body = format!("{{\"status\":\"online\",\"devices\":{device_count}}}");
    with_head("200 OK", "application/json", &body)
}

/// Client-error body: `{"error": "<message>"}` with the message escaped
/// through the JSON serializer, since parse errors quote raw input.
pub fn bad_request(message: &str) -> Vec<u8> {
    let escaped = serde_json::to_string(message).unwrap_or_else(|_| String::from("\"\""));
    let body = format!("{{\"error\": {escaped}}}");
    with_head("400 Bad Request", "application/json", &body)
}

/// CORS preflight answer: headers only, empty body.
pub fn preflight() -> Vec<u8> {
    let mut out = Vec::with_capacity(192);
    out.extend_from_slice(b"HTTP/1.1 200 OK\r\n");
    out.extend_from_slice(b"Access-Control-Allow-Origin: *\r\n");
    out.extend_from_slice(b"Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n");
    out.extend_from_slice(b"Access-Control-Allow-Headers: Content-Type\r\n");
    out.extend_from_slice(b"Connection: close\r\n\r\n");
    out
}

/// Plain-text 404 for anything the router doesn't recognize.
pub fn not_found() -> Vec<u8> {
    with_head("404 Not Found", "text/plain", "404 Not Found")
}

fn with_head(status_line: &str, content_type: &str, body: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(64 + body.len());
    out.extend_from_slice(b"HTTP/1.1 ");
    out.extend_from_slice(status_line.as_bytes());
    out.extend_from_slice(b"\r\nContent-Type: ");
    out.extend_from_slice(content_type.as_bytes());
    out.extend_from_slice(b"\r\nConnection: close\r\n\r\n");
    out.extend_from_slice(body.as_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn command_result_shape() {
        let resp = text(command_result(3));
        assert!(resp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(resp.contains("Content-Type: application/json\r\n"));
        assert!(resp.contains("Connection: close\r\n"));
        assert!(resp.ends_with("{\"success\": true, \"executed\": 3}"));
    }

    #[test]
    fn status_shape() {
        let resp = text(status(6));
        assert!(resp.ends_with("{\"status\":\"online\",\"devices\":6}"));
    }

    #[test]
    fn bad_request_escapes_message() {
        let resp = text(bad_request("expected `\"` at line 1"));
        assert!(resp.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(resp.contains("\\\""), "quotes in the message are escaped");
    }

    #[test]
    fn preflight_carries_cors_headers_and_no_body() {
        let resp = text(preflight());
        assert!(resp.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(resp.contains("Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n"));
        assert!(resp.contains("Access-Control-Allow-Headers: Content-Type\r\n"));
        assert!(resp.ends_with("\r\n\r\n"));
    }

    #[test]
    fn plain_responses_do_not_carry_cors_headers() {
        for resp in [text(command_result(0)), text(status(6)), text(not_found())] {
            assert!(!resp.contains("Access-Control"));
        }
    }

    #[test]
    fn not_found_is_plain_text() {
        let resp = text(not_found());
        assert!(resp.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(resp.contains("Content-Type: text/plain\r\n"));
        assert!(resp.ends_with("404 Not Found"));
    }
}
