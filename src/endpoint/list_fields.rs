//! List custom fields endpoint.

use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

pub struct ListFields<'a> {
    client: &'a ApiClient,
}

impl<'a> ListFields<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get the custom fields of a list. Results can be cached.
    pub fn list(&self, list_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/fields"));
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }

    /// Get one custom field of a list. Results can be cached.
    pub fn get(&self, list_uid: &str, field_id: u64) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/fields/{field_id}"));
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }

    /// Create a new custom field in a list.
    pub fn create(&self, list_uid: &str, data: Params) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/fields"));
        self.client
            .execute(RequestSpec::new(Method::Post, url).post_params(data))
    }

    /// Update an existing custom field.
    pub fn update(&self, list_uid: &str, field_id: u64, data: Params) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/fields/{field_id}"));
        self.client
            .execute(RequestSpec::new(Method::Put, url).put_params(data))
    }

    /// Delete an existing custom field.
    pub fn delete(&self, list_uid: &str, field_id: u64) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/fields/{field_id}"));
        self.client.execute(RequestSpec::new(Method::Delete, url))
    }

    /// Get the available custom field types. Results can be cached.
    pub fn field_types(&self) -> Response {
        let url = self.client.config().endpoint_url("lists/fields/types");
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }
}
