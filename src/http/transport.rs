//! Pluggable HTTP transport.
//!
//! The pipeline talks to the wire through [`Transport`], so tests can swap
//! the network for a scripted implementation. The default transport wraps
//! `reqwest`'s blocking client.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use super::request::Method;
use crate::config::DEFAULT_TIMEOUT;

/// Transport-level failure, before any HTTP status exists.
///
/// Each class maps to a stable nonzero code so callers can branch on
/// numbers the way they branch on HTTP statuses; `0` always means "no
/// transport error".
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request could not be built: {0}")]
    InvalidRequest(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connection timed out")]
    Timeout,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl TransportError {
    pub fn code(&self) -> u32 {
        match self {
            TransportError::InvalidRequest(_) => 1,
            TransportError::Connect(_) => 2,
            TransportError::Timeout => 3,
            TransportError::TooManyRedirects => 4,
            TransportError::Body(_) => 5,
            TransportError::Other(_) => 6,
        }
    }
}

/// One fully built wire request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Form-urlencoded body for POST/PUT/DELETE, `None` for GET.
    pub form_body: Option<String>,
    pub timeout: Duration,
}

/// Raw wire response before any parsing.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

pub trait Transport: Send + Sync {
    fn execute(&self, request: &TransportRequest) -> Result<RawResponse, TransportError>;
}

/// Default transport over `reqwest::blocking`.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given connect timeout. The total duration
    /// timeout is applied per request from the request spec.
    pub fn new(connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self { client })
    }

    fn classify(error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else if error.is_redirect() {
            TransportError::TooManyRedirects
        } else if error.is_builder() || error.is_request() {
            TransportError::InvalidRequest(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        // The builder only fails on TLS backend misconfiguration; with the
        // default backend this cannot happen.
        Self::new(DEFAULT_TIMEOUT).expect("default http client")
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &TransportRequest) -> Result<RawResponse, TransportError> {
        debug!(method = request.method.as_str(), url = %request.url, "Sending request");

        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let mut builder = self
            .client
            .request(method, &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.form_body {
            builder = builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body.clone());
        }

        let response = builder.send().map_err(Self::classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status, size = body.len(), "Request completed");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable_and_nonzero() {
        let cases = [
            (TransportError::InvalidRequest("x".into()), 1),
            (TransportError::Connect("x".into()), 2),
            (TransportError::Timeout, 3),
            (TransportError::TooManyRedirects, 4),
            (TransportError::Body("x".into()), 5),
            (TransportError::Other("x".into()), 6),
        ];
        for (error, code) in cases {
            assert_eq!(error.code(), code);
            assert_ne!(error.code(), 0);
        }
    }
}
