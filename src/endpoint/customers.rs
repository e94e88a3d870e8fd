//! Customers endpoint.

use serde_json::Value;

use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

pub struct Customers<'a> {
    client: &'a ApiClient,
}

impl<'a> Customers<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Register a new customer account.
    ///
    /// The API requires the password and email to be confirmed, so both are
    /// mirrored into their `confirm_*` twins; the timezone defaults to UTC
    /// when not given.
    pub fn create(&self, mut data: Params) -> Response {
        if let Some(Value::Object(customer)) = data.get_mut("customer") {
            if let Some(password) = customer.get("password").cloned() {
                customer.insert("confirm_password".to_string(), password);
            }
            if let Some(email) = customer.get("email").cloned() {
                customer.insert("confirm_email".to_string(), email);
            }
            let timezone_missing = customer
                .get("timezone")
                .and_then(Value::as_str)
                .is_none_or(str::is_empty);
            if timezone_missing {
                customer.insert("timezone".to_string(), Value::from("UTC"));
            }
        }

        let url = self.client.config().endpoint_url("customers");
        self.client
            .execute(RequestSpec::new(Method::Post, url).post_params(data))
    }
}
