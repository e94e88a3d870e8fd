//! List segments endpoint.

use super::page_params;
use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

pub struct ListSegments<'a> {
    client: &'a ApiClient,
}

impl<'a> ListSegments<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get the segments of a list. Results can be cached.
    pub fn list(&self, list_uid: &str, page: u32, per_page: u32) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/segments"));
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }

    /// Get one segment of a list. Results can be cached.
    pub fn get(&self, list_uid: &str, segment_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/segments/{segment_uid}"));
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }

    /// Create a new segment in a list.
    pub fn create(&self, list_uid: &str, data: Params) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/segments"));
        self.client
            .execute(RequestSpec::new(Method::Post, url).post_params(data))
    }

    /// Update an existing segment.
    pub fn update(&self, list_uid: &str, segment_uid: &str, data: Params) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/segments/{segment_uid}"));
        self.client
            .execute(RequestSpec::new(Method::Put, url).put_params(data))
    }

    /// Delete an existing segment.
    pub fn delete(&self, list_uid: &str, segment_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/segments/{segment_uid}"));
        self.client.execute(RequestSpec::new(Method::Delete, url))
    }

    /// Get the operators usable in segment conditions. Results can be
    /// cached.
    pub fn condition_operators(&self) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url("lists/segments/condition-operators");
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }
}
