//! Transactional emails endpoint.

use super::{encode_base64_fields, page_params, wrap};
use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

pub struct TransactionalEmails<'a> {
    client: &'a ApiClient,
}

impl<'a> TransactionalEmails<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get all transactional emails of the customer. Results can be cached.
    pub fn list(&self, page: u32, per_page: u32) -> Response {
        let url = self.client.config().endpoint_url("transactional-emails");
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }

    /// Get one transactional email. Results can be cached.
    pub fn get(&self, email_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("transactional-emails/{email_uid}"));
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }

    /// Queue a new transactional email. The HTML `body` and `plain_text`
    /// travel base64-encoded.
    pub fn create(&self, mut data: Params) -> Response {
        encode_base64_fields(&mut data, &["body", "plain_text"]);
        let url = self.client.config().endpoint_url("transactional-emails");
        self.client.execute(
            RequestSpec::new(Method::Post, url).post_params(wrap("email", data)),
        )
    }

    /// Delete an existing transactional email.
    pub fn delete(&self, email_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("transactional-emails/{email_uid}"));
        self.client.execute(RequestSpec::new(Method::Delete, url))
    }
}
