//! Campaigns endpoint.

use super::{encode_base64_nested, page_params, wrap};
use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

/// Template fields carried as base64 on the wire.
const TEMPLATE_BINARY_FIELDS: &[&str] = &["content", "archive", "plain_text"];

pub struct Campaigns<'a> {
    client: &'a ApiClient,
}

impl<'a> Campaigns<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get all campaigns of the customer. Results can be cached.
    pub fn list(&self, page: u32, per_page: u32) -> Response {
        let url = self.client.config().endpoint_url("campaigns");
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }

    /// Get one campaign. Results can be cached.
    pub fn get(&self, campaign_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}"));
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }

    /// Create a new campaign. Binary template fields are base64-encoded
    /// before transmission.
    pub fn create(&self, mut data: Params) -> Response {
        encode_base64_nested(&mut data, "template", TEMPLATE_BINARY_FIELDS);
        let url = self.client.config().endpoint_url("campaigns");
        self.client.execute(
            RequestSpec::new(Method::Post, url).post_params(wrap("campaign", data)),
        )
    }

    /// Update an existing campaign.
    pub fn update(&self, campaign_uid: &str, mut data: Params) -> Response {
        encode_base64_nested(&mut data, "template", TEMPLATE_BINARY_FIELDS);
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}"));
        self.client.execute(
            RequestSpec::new(Method::Put, url).put_params(wrap("campaign", data)),
        )
    }

    /// Copy an existing campaign.
    pub fn copy(&self, campaign_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}/copy"));
        self.client.execute(RequestSpec::new(Method::Post, url))
    }

    /// Pause or unpause a sending campaign, whichever applies.
    pub fn pause_unpause(&self, campaign_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}/pause-unpause"));
        self.client.execute(RequestSpec::new(Method::Put, url))
    }

    /// Mark a campaign as sent.
    pub fn mark_sent(&self, campaign_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}/mark-sent"));
        self.client.execute(RequestSpec::new(Method::Put, url))
    }

    /// Delete an existing campaign.
    pub fn delete(&self, campaign_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}"));
        self.client.execute(RequestSpec::new(Method::Delete, url))
    }

    /// Get the delivery/open/click statistics of a campaign.
    pub fn stats(&self, campaign_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}/stats"));
        self.client.execute(RequestSpec::new(Method::Get, url))
    }
}
