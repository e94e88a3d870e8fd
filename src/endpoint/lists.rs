//! Mail lists endpoint.

use super::page_params;
use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

pub struct Lists<'a> {
    client: &'a ApiClient,
}

impl<'a> Lists<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get all the mail lists of the customer. Results can be cached.
    pub fn list(&self, page: u32, per_page: u32) -> Response {
        let url = self.client.config().endpoint_url("lists");
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }

    /// Get one mail list. Results can be cached.
    pub fn get(&self, list_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}"));
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }

    /// Create a new mail list.
    pub fn create(&self, data: Params) -> Response {
        let url = self.client.config().endpoint_url("lists");
        self.client
            .execute(RequestSpec::new(Method::Post, url).post_params(data))
    }

    /// Update an existing mail list.
    pub fn update(&self, list_uid: &str, data: Params) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}"));
        self.client
            .execute(RequestSpec::new(Method::Put, url).put_params(data))
    }

    /// Copy an existing mail list.
    pub fn copy(&self, list_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/copy"));
        self.client.execute(RequestSpec::new(Method::Post, url))
    }

    /// Delete an existing mail list.
    pub fn delete(&self, list_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}"));
        self.client.execute(RequestSpec::new(Method::Delete, url))
    }
}
