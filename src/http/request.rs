//! Request descriptor built by endpoint methods.

use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT;
use crate::params::Params;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Everything needed to issue one API call: verb, URL, per-verb parameter
/// bags, headers and the flags the pipeline consults. Built fresh per call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    pub params_get: Params,
    pub params_post: Params,
    pub params_put: Params,
    pub params_delete: Params,
    pub headers: Params,
    pub timeout: Duration,
    pub enable_cache: bool,
    pub want_response_headers: bool,
}

impl RequestSpec {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params_get: Params::new(),
            params_post: Params::new(),
            params_put: Params::new(),
            params_delete: Params::new(),
            headers: Params::new(),
            timeout: DEFAULT_TIMEOUT,
            enable_cache: false,
            want_response_headers: false,
        }
    }

    pub fn get_params(mut self, params: Params) -> Self {
        self.params_get = params;
        self
    }

    pub fn post_params(mut self, params: Params) -> Self {
        self.params_post = params;
        self
    }

    pub fn put_params(mut self, params: Params) -> Self {
        self.params_put = params;
        self
    }

    pub fn delete_params(mut self, params: Params) -> Self {
        self.params_delete = params;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Allow the pipeline to serve and store this request through the
    /// configured cache. Only effective for GET.
    pub fn cached(mut self) -> Self {
        self.enable_cache = true;
        self
    }

    pub fn response_headers(mut self) -> Self {
        self.want_response_headers = true;
        self
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::Get
    }

    pub fn has_body(&self) -> bool {
        !self.is_get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let spec = RequestSpec::new(Method::Get, "https://example.tld/api/lists");
        assert_eq!(spec.timeout, DEFAULT_TIMEOUT);
        assert!(!spec.enable_cache);
        assert!(!spec.want_response_headers);
        assert!(spec.is_get());
        assert!(!spec.has_body());
    }

    #[test]
    fn builder_chain() {
        let spec = RequestSpec::new(Method::Put, "https://example.tld/api/lists/x")
            .put_params(Params::from_iter([("name", "renamed")]))
            .header("X-Debug", "1")
            .timeout(Duration::from_secs(5))
            .cached();

        assert!(spec.has_body());
        assert!(spec.enable_cache);
        assert_eq!(spec.headers.get_str("X-Debug"), Some("1"));
        assert_eq!(spec.timeout, Duration::from_secs(5));
    }
}
