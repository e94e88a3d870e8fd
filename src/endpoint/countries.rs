//! Countries endpoint.

use super::page_params;
use crate::http::{ApiClient, Method, RequestSpec, Response};

pub struct Countries<'a> {
    client: &'a ApiClient,
}

impl<'a> Countries<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get all available countries. Results can be cached.
    pub fn list(&self, page: u32, per_page: u32) -> Response {
        let url = self.client.config().endpoint_url("countries");
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }

    /// Get the zones of a country. Results can be cached.
    pub fn zones(&self, country_id: u64, page: u32, per_page: u32) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("countries/{country_id}/zones"));
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }
}
