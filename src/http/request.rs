//! Structured inbound request and the request-line/header tokenizer.
//!
//! Replaces ad-hoc substring scanning with a small explicit tokenizer while
//! keeping the same tolerant semantics: the method is whatever the first
//! token says, `content-length` matches case-insensitively, and anything
//! malformed degrades to a harmless default instead of an error.

/// Request method, reduced to what the router distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Options,
    Other,
}

impl Method {
    fn parse(token: &str) -> Self {
        match token {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "OPTIONS" => Self::Options,
            _ => Self::Other,
        }
    }
}

/// Parsed request line plus the one header the server cares about.
#[derive(Debug, Clone, Default)]
pub struct RequestHead {
    pub method: Option<Method>,
    pub path: String,
    /// Parsed `Content-Length`; missing or malformed values read as 0.
    pub content_length: usize,
    /// First request line verbatim, for diagnostics on unmatched requests.
    pub request_line: String,
}

impl RequestHead {
    /// Tokenize the first line of the head: `METHOD SP PATH SP VERSION`.
    /// Extra or missing tokens are tolerated.
    pub fn parse_request_line(&mut self, line: &str) {
        let mut tokens = line.split_whitespace();
        self.request_line = line.trim_end().to_string();
        if let Some(m) = tokens.next() {
            self.method = Some(Method::parse(m));
        }
        if let Some(p) = tokens.next() {
            self.path = p.to_string();
        }
    }

    /// Feed one header line; picks out `content-length` case-insensitively.
    pub fn parse_header_line(&mut self, line: &str) {
        let Some((name, value)) = line.split_once(':') else {
            return;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            self.content_length = value.trim().parse().unwrap_or(0);
        }
    }
}

/// A fully assembled request, body included, handed to the router.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub head: RequestHead,
    /// Body bytes as received.  May be shorter than `content_length` if the
    /// body phase timed out; validation is the parser's job.
    pub body: Vec<u8>,
}

impl InboundRequest {
    pub fn method(&self) -> Option<Method> {
        self.head.method
    }

    pub fn path(&self) -> &str {
        &self.head.path
    }

    /// The body interpreted as UTF-8, lossily.
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_request_line() {
        let mut head = RequestHead::default();
        head.parse_request_line("POST /api/commands HTTP/1.1\r");
        assert_eq!(head.method, Some(Method::Post));
        assert_eq!(head.path, "/api/commands");
        assert_eq!(head.request_line, "POST /api/commands HTTP/1.1");
    }

    #[test]
    fn content_length_is_case_insensitive() {
        let mut head = RequestHead::default();
        head.parse_header_line("content-LENGTH:  42 \r");
        assert_eq!(head.content_length, 42);
    }

    #[test]
    fn malformed_content_length_reads_as_zero() {
        let mut head = RequestHead::default();
        head.parse_header_line("Content-Length: banana\r");
        assert_eq!(head.content_length, 0);
        head.parse_header_line("Content-Length\r"); // no colon at all
        assert_eq!(head.content_length, 0);
    }

    #[test]
    fn unknown_method_degrades_to_other() {
        let mut head = RequestHead::default();
        head.parse_request_line("BREW /teapot HTTP/1.1");
        assert_eq!(head.method, Some(Method::Other));
        assert_eq!(head.path, "/teapot");
    }

    #[test]
    fn empty_line_leaves_defaults() {
        let mut head = RequestHead::default();
        head.parse_request_line("");
        assert_eq!(head.method, None);
        assert_eq!(head.path, "");
    }
}
