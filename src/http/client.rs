//! The request/response pipeline.

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, warn};

use super::hooks::RequestHook;
use super::request::{Method, RequestSpec};
use super::response::Response;
use super::transport::{RawResponse, ReqwestTransport, Transport, TransportError, TransportRequest};
use crate::cache::{Cache, CacheEntry};
use crate::config::{ClientConfig, ConfigError, Settings};
use crate::endpoint;
use crate::params::Params;

/// Entry point of the SDK: validated configuration, a transport, an
/// optional cache and the hook list, threaded explicitly into every call.
pub struct ApiClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
    cache: Option<Box<dyn Cache>>,
    hooks: Vec<Box<dyn RequestHook>>,
}

impl ApiClient {
    /// Client with the default `reqwest` transport and no cache.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: Box::new(ReqwestTransport::default()),
            cache: None,
            hooks: Vec::new(),
        }
    }

    /// Build a client from loaded settings, including the configured
    /// cache backend.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let config = settings.client_config()?;
        let mut client = Self::new(config);
        if !settings.cache.is_none() {
            client.cache = Some(settings.cache.build()?);
        }
        Ok(client)
    }

    pub fn with_cache(mut self, cache: Box<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn add_hook(mut self, hook: Box<dyn RequestHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // Endpoint handles.

    pub fn campaigns(&self) -> endpoint::Campaigns<'_> {
        endpoint::Campaigns::new(self)
    }

    pub fn campaign_bounces(&self) -> endpoint::CampaignBounces<'_> {
        endpoint::CampaignBounces::new(self)
    }

    pub fn campaign_delivery_logs(&self) -> endpoint::CampaignDeliveryLogs<'_> {
        endpoint::CampaignDeliveryLogs::new(self)
    }

    pub fn campaign_unsubscribes(&self) -> endpoint::CampaignUnsubscribes<'_> {
        endpoint::CampaignUnsubscribes::new(self)
    }

    pub fn campaigns_tracking(&self) -> endpoint::CampaignsTracking<'_> {
        endpoint::CampaignsTracking::new(self)
    }

    pub fn countries(&self) -> endpoint::Countries<'_> {
        endpoint::Countries::new(self)
    }

    pub fn customers(&self) -> endpoint::Customers<'_> {
        endpoint::Customers::new(self)
    }

    pub fn list_fields(&self) -> endpoint::ListFields<'_> {
        endpoint::ListFields::new(self)
    }

    pub fn list_segments(&self) -> endpoint::ListSegments<'_> {
        endpoint::ListSegments::new(self)
    }

    pub fn list_subscribers(&self) -> endpoint::ListSubscribers<'_> {
        endpoint::ListSubscribers::new(self)
    }

    pub fn lists(&self) -> endpoint::Lists<'_> {
        endpoint::Lists::new(self)
    }

    pub fn templates(&self) -> endpoint::Templates<'_> {
        endpoint::Templates::new(self)
    }

    pub fn transactional_emails(&self) -> endpoint::TransactionalEmails<'_> {
        endpoint::TransactionalEmails::new(self)
    }

    /// Run one request through the pipeline: build, cache read, transport,
    /// parse, cache write. Never fails; every outcome is a [`Response`].
    pub fn execute(&self, mut spec: RequestSpec) -> Response {
        for hook in &self.hooks {
            hook.before_send(&mut spec);
        }

        spec.headers.set("X-API-KEY", self.config.api_key());
        if matches!(spec.method, Method::Put | Method::Delete) {
            spec.headers
                .set("X-HTTP-Method-Override", spec.method.as_str());
        }

        // Canonical URL: trimmed base plus the sorted query string. The
        // same string is both the wire URL and the cache key.
        let mut request_url = spec.url.trim_end_matches('/').to_string();
        let query = spec.params_get.to_query_string();
        if !query.is_empty() {
            request_url.push('?');
            request_url.push_str(&query);
        }

        let cache = if spec.is_get() && spec.enable_cache {
            self.cache.as_deref()
        } else {
            None
        };

        let mut want_headers = spec.want_response_headers;
        let mut cached_body: Option<Value> = None;
        let mut sent_etag: Option<String> = None;

        if let Some(cache) = cache {
            // Header capture is required to read back the fresh ETag.
            want_headers = true;
            if let Some(entry) = cache.get(&request_url) {
                if let Some(etag) = entry.etag() {
                    debug!(url = %request_url, etag = %etag, "Cache hit, revalidating");
                    spec.headers.set("If-None-Match", etag.clone());
                    sent_etag = Some(etag);
                    cached_body = Some(entry.body);
                }
            }
        }

        let form_body = spec.has_body().then(|| {
            let mut merged = spec.params_post.clone();
            merged.merge_with(&spec.params_put, true);
            merged.merge_with(&spec.params_delete, true);
            merged.to_form_body()
        });

        let wire_request = TransportRequest {
            method: spec.method,
            url: request_url.clone(),
            headers: header_pairs(&spec.headers),
            form_body,
            timeout: spec.timeout,
        };

        let outcome = self.transport.execute(&wire_request);

        let (raw, transport_error): (RawResponse, Option<TransportError>) = match outcome {
            Ok(raw) => (raw, None),
            Err(e) => {
                warn!(url = %request_url, error = %e, "Transport failure");
                (
                    RawResponse {
                        status: 0,
                        headers: Vec::new(),
                        body: Bytes::new(),
                    },
                    Some(e),
                )
            }
        };

        let mut body = if transport_error.is_none() && !raw.body.is_empty() {
            match serde_json::from_slice::<Value>(&raw.body) {
                Ok(value) => Params::from_value(value),
                Err(_) => Params::new(),
            }
        } else {
            Params::new()
        };

        // A 304 confirms the cached body is still current.
        if raw.status == 304 {
            if let Some(cached) = cached_body {
                debug!(url = %request_url, "Not modified, serving cached body");
                body = Params::from_value(cached);
            }
        }

        let headers = if want_headers {
            raw.headers
                .iter()
                .map(|(name, value)| (name.clone(), Value::from(value.clone())))
                .collect()
        } else {
            Params::new()
        };

        let mut response = Response::new(
            request_url.clone(),
            raw.status,
            transport_error.as_ref(),
            headers,
            body,
        );

        if !response.is_success()
            && response.body.get_str("status") != Some("success")
            && !response.body.contains("error")
        {
            let message = response.message();
            response.body.set("status", "error");
            response.body.set("error", message);
        }

        if let Some(cache) = cache {
            if response.is_success() && response.body.get_str("status") == Some("success") {
                if let Some(fresh_etag) = response.etag() {
                    if sent_etag.as_deref() != Some(fresh_etag.as_str()) {
                        debug!(url = %request_url, etag = %fresh_etag, "Storing response in cache");
                        let entry = CacheEntry {
                            headers: response.header_lines(),
                            body: response.body.to_value(),
                        };
                        cache.set(&request_url, &entry);
                    }
                }
            }
        }

        for hook in &self.hooks {
            hook.after_send(&spec, &mut response);
        }

        response
    }
}

fn header_pairs(headers: &Params) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let rendered = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (name.to_string(), rendered)
        })
        .collect()
}
