//! API response with uniform success/error classification.

use serde_json::Value;

use super::transport::TransportError;
use crate::params::Params;

/// Outcome of one pipeline call.
///
/// Nothing in here is an `Err`: transport failures, HTTP failures and
/// API-reported failures are all data, inspected through the accessors.
#[derive(Debug, Clone)]
pub struct Response {
    pub(crate) url: String,
    pub(crate) http_code: u16,
    pub(crate) transport_code: u32,
    pub(crate) transport_message: String,
    pub(crate) headers: Params,
    pub(crate) body: Params,
}

impl Response {
    pub(crate) fn new(
        url: String,
        http_code: u16,
        transport_error: Option<&TransportError>,
        headers: Params,
        body: Params,
    ) -> Self {
        Self {
            url,
            http_code,
            transport_code: transport_error.map_or(0, TransportError::code),
            transport_message: transport_error.map_or_else(String::new, |e| e.to_string()),
            headers,
            body,
        }
    }

    /// URL the response came back from (the canonical request URL).
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn http_code(&self) -> u16 {
        self.http_code
    }

    /// Textual form of the HTTP status, empty for unknown codes.
    pub fn http_message(&self) -> &'static str {
        status_text(self.http_code)
    }

    /// Transport error code, `0` when the wire exchange itself worked.
    pub fn transport_code(&self) -> u32 {
        self.transport_code
    }

    pub fn transport_message(&self) -> &str {
        &self.transport_message
    }

    /// Response headers, name to value in arrival order. Empty unless
    /// header capture was requested (or forced by the cache layer).
    pub fn headers(&self) -> &Params {
        &self.headers
    }

    /// Decoded JSON body. On failures this carries the synthesized
    /// `status`/`error` pair instead.
    pub fn body(&self) -> &Params {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Params {
        &mut self.body
    }

    /// Replace the body wholesale; mainly for post-send hooks.
    pub fn set_body(&mut self, body: Params) {
        self.body = body;
    }

    pub fn is_transport_error(&self) -> bool {
        self.transport_code > 0
    }

    pub fn is_http_error(&self) -> bool {
        self.http_code < 200 || self.http_code >= 300
    }

    pub fn is_success(&self) -> bool {
        !self.is_transport_error() && !self.is_http_error()
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// The failure message: transport first, then HTTP, else empty.
    pub fn message(&self) -> String {
        if self.is_transport_error() {
            return self.transport_message.clone();
        }
        if self.is_http_error() {
            return self.http_message().to_string();
        }
        String::new()
    }

    /// The failure code: transport first, then HTTP, else `0`.
    pub fn code(&self) -> u32 {
        if self.is_transport_error() {
            return self.transport_code;
        }
        if self.is_http_error() {
            return u32::from(self.http_code);
        }
        0
    }

    /// ETag response header, when captured.
    pub fn etag(&self) -> Option<String> {
        self.headers.iter().find_map(|(name, value)| {
            name.eq_ignore_ascii_case("etag")
                .then(|| value.as_str().unwrap_or_default().to_string())
        })
    }

    /// Headers as raw `Name: value` lines, the form cache entries store.
    pub fn header_lines(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|(name, value)| match value {
                Value::String(text) => format!("{name}: {text}"),
                other => format!("{name}: {other}"),
            })
            .collect()
    }
}

/// Static HTTP code to reason-phrase table.
pub fn status_text(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        101 => "Switching Protocols",
        102 => "Processing",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        207 => "Multi-Status",
        208 => "Already Reported",
        226 => "IM Used",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot",
        422 => "Unprocessable Entity",
        423 => "Locked",
        424 => "Failed Dependency",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        506 => "Variant Also Negotiates",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        510 => "Not Extended",
        511 => "Network Authentication Required",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(http_code: u16, transport_error: Option<TransportError>) -> Response {
        Response::new(
            "https://example.tld/api/lists".to_string(),
            http_code,
            transport_error.as_ref(),
            Params::new(),
            Params::new(),
        )
    }

    #[test]
    fn success_requires_no_transport_error_and_2xx() {
        assert!(response(200, None).is_success());
        assert!(response(299, None).is_success());
        assert!(!response(199, None).is_success());
        assert!(!response(300, None).is_success());
        assert!(!response(404, None).is_success());
        assert!(!response(200, Some(TransportError::Timeout)).is_success());
    }

    #[test]
    fn message_prefers_transport_over_http() {
        let r = response(404, Some(TransportError::Timeout));
        assert_eq!(r.message(), "connection timed out");
        assert_eq!(r.code(), TransportError::Timeout.code());

        let r = response(404, None);
        assert_eq!(r.message(), "Not Found");
        assert_eq!(r.code(), 404);

        let r = response(204, None);
        assert_eq!(r.message(), "");
        assert_eq!(r.code(), 0);
    }

    #[test]
    fn not_modified_is_an_http_error_by_classification() {
        let r = response(304, None);
        assert!(r.is_http_error());
        assert!(!r.is_success());
        assert_eq!(r.http_message(), "Not Modified");
    }

    #[test]
    fn etag_is_found_case_insensitively() {
        let headers = Params::from_iter([("ETag", "\"abc\""), ("Content-Type", "a/b")]);
        let r = Response::new(String::new(), 200, None, headers, Params::new());
        assert_eq!(r.etag(), Some("\"abc\"".to_string()));
    }

    #[test]
    fn header_lines_render_name_colon_value() {
        let headers = Params::from_iter([("ETag", "\"abc\"")]);
        let r = Response::new(String::new(), 200, None, headers, Params::new());
        assert_eq!(r.header_lines(), vec!["ETag: \"abc\"".to_string()]);
    }
}
