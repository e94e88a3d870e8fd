//! Email templates endpoint.

use super::{encode_base64_fields, page_params, wrap};
use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

/// Template fields carried as base64 on the wire.
const BINARY_FIELDS: &[&str] = &["content", "archive"];

pub struct Templates<'a> {
    client: &'a ApiClient,
}

impl<'a> Templates<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get all email templates of the customer. Results can be cached.
    pub fn list(&self, page: u32, per_page: u32) -> Response {
        let url = self.client.config().endpoint_url("templates");
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }

    /// Search templates by the given filter. Results can be cached.
    pub fn search(&self, page: u32, per_page: u32, filter: Params) -> Response {
        let mut params = page_params(page, per_page);
        params.set("filter", filter.to_value());

        let url = self.client.config().endpoint_url("templates");
        self.client
            .execute(RequestSpec::new(Method::Get, url).get_params(params).cached())
    }

    /// Get one template. Results can be cached.
    pub fn get(&self, template_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("templates/{template_uid}"));
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }

    /// Create a new template. `content` and `archive` travel base64-encoded.
    pub fn create(&self, mut data: Params) -> Response {
        encode_base64_fields(&mut data, BINARY_FIELDS);
        let url = self.client.config().endpoint_url("templates");
        self.client.execute(
            RequestSpec::new(Method::Post, url).post_params(wrap("template", data)),
        )
    }

    /// Update an existing template.
    pub fn update(&self, template_uid: &str, mut data: Params) -> Response {
        encode_base64_fields(&mut data, BINARY_FIELDS);
        let url = self
            .client
            .config()
            .endpoint_url(&format!("templates/{template_uid}"));
        self.client.execute(
            RequestSpec::new(Method::Put, url).put_params(wrap("template", data)),
        )
    }

    /// Delete an existing template.
    pub fn delete(&self, template_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("templates/{template_uid}"));
        self.client.execute(RequestSpec::new(Method::Delete, url))
    }
}
