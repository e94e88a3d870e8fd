//! List subscribers endpoint.
//!
//! The by-email operations are composites: a search round trip followed by
//! a conditional mutate round trip. There is no transaction between the
//! two, so a concurrent change on the remote side between lookup and mutate
//! is an accepted race.

use serde_json::Value;

use super::page_params;
use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

pub struct ListSubscribers<'a> {
    client: &'a ApiClient,
}

impl<'a> ListSubscribers<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get the subscribers of a list. Results can be cached.
    pub fn list(&self, list_uid: &str, page: u32, per_page: u32) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/subscribers"));
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }

    /// Get one subscriber of a list. Results can be cached.
    pub fn get(&self, list_uid: &str, subscriber_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/subscribers/{subscriber_uid}"));
        self.client.execute(RequestSpec::new(Method::Get, url).cached())
    }

    /// Create a new subscriber in a list.
    pub fn create(&self, list_uid: &str, data: Params) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/subscribers"));
        self.client
            .execute(RequestSpec::new(Method::Post, url).post_params(data))
    }

    /// Create subscribers in bulk; `subscribers` is a JSON array of
    /// subscriber bags.
    pub fn create_bulk(&self, list_uid: &str, subscribers: Value) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/subscribers/bulk"));
        self.client.execute(
            RequestSpec::new(Method::Post, url)
                .post_params(Params::from_iter([("subscribers", subscribers)])),
        )
    }

    /// Update an existing subscriber.
    pub fn update(&self, list_uid: &str, subscriber_uid: &str, data: Params) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/subscribers/{subscriber_uid}"));
        self.client
            .execute(RequestSpec::new(Method::Put, url).put_params(data))
    }

    /// Update an existing subscriber, located by email address.
    pub fn update_by_email(&self, list_uid: &str, email: &str, data: Params) -> Response {
        let response = self.email_search(list_uid, email);
        if response.is_transport_error() {
            return response;
        }
        if response.is_error() && response.http_code() == 404 {
            return response;
        }
        match found_subscriber_uid(&response) {
            Some(uid) => self.update(list_uid, &uid, data),
            None => response,
        }
    }

    /// Unsubscribe an existing subscriber.
    pub fn unsubscribe(&self, list_uid: &str, subscriber_uid: &str) -> Response {
        let url = self.client.config().endpoint_url(&format!(
            "lists/{list_uid}/subscribers/{subscriber_uid}/unsubscribe"
        ));
        self.client.execute(RequestSpec::new(Method::Put, url))
    }

    /// Unsubscribe an existing subscriber, located by email address.
    pub fn unsubscribe_by_email(&self, list_uid: &str, email: &str) -> Response {
        let response = self.email_search(list_uid, email);
        if response.is_transport_error() {
            return response;
        }
        if response.is_error() && response.http_code() == 404 {
            return response;
        }
        match found_subscriber_uid(&response) {
            Some(uid) => self.unsubscribe(list_uid, &uid),
            None => response,
        }
    }

    /// Unsubscribe an email address from every list it appears in.
    pub fn unsubscribe_by_email_from_all_lists(&self, email: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url("lists/subscribers/unsubscribe-by-email-from-all-lists");
        self.client.execute(
            RequestSpec::new(Method::Put, url)
                .put_params(Params::from_iter([("EMAIL", email)])),
        )
    }

    /// Delete an existing subscriber.
    pub fn delete(&self, list_uid: &str, subscriber_uid: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/subscribers/{subscriber_uid}"));
        self.client.execute(RequestSpec::new(Method::Delete, url))
    }

    /// Delete an existing subscriber, located by email address.
    pub fn delete_by_email(&self, list_uid: &str, email: &str) -> Response {
        let response = self.email_search(list_uid, email);
        if response.is_error() {
            return response;
        }
        match found_subscriber_uid(&response) {
            Some(uid) => self.delete(list_uid, &uid),
            None => response,
        }
    }

    /// Search a list for a subscriber by email address.
    pub fn email_search(&self, list_uid: &str, email: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/subscribers/search-by-email"));
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(Params::from_iter([("EMAIL", email)])),
        )
    }

    /// Search every list for a subscriber by email address.
    pub fn email_search_all_lists(&self, email: &str) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url("lists/subscribers/search-by-email-in-all-lists");
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(Params::from_iter([("EMAIL", email)])),
        )
    }

    /// Search a list by custom field values.
    pub fn search_by_custom_fields(
        &self,
        list_uid: &str,
        fields: Params,
        page: u32,
        per_page: u32,
    ) -> Response {
        let mut params = fields;
        params.set("page", page);
        params.set("per_page", per_page);

        let url = self.client.config().endpoint_url(&format!(
            "lists/{list_uid}/subscribers/search-by-custom-fields"
        ));
        self.client
            .execute(RequestSpec::new(Method::Get, url).get_params(params))
    }

    /// Get the subscribers of a list having a given status. Results can be
    /// cached.
    pub fn search_by_status(
        &self,
        list_uid: &str,
        status: &str,
        page: u32,
        per_page: u32,
    ) -> Response {
        let mut params = page_params(page, per_page);
        params.set("status", status);

        let url = self
            .client
            .config()
            .endpoint_url(&format!("lists/{list_uid}/subscribers"));
        self.client
            .execute(RequestSpec::new(Method::Get, url).get_params(params).cached())
    }

    /// Only the confirmed subscribers.
    pub fn confirmed(&self, list_uid: &str, page: u32, per_page: u32) -> Response {
        self.search_by_status(list_uid, "confirmed", page, per_page)
    }

    /// Only the unconfirmed subscribers.
    pub fn unconfirmed(&self, list_uid: &str, page: u32, per_page: u32) -> Response {
        self.search_by_status(list_uid, "unconfirmed", page, per_page)
    }

    /// Only the unsubscribed subscribers.
    pub fn unsubscribed(&self, list_uid: &str, page: u32, per_page: u32) -> Response {
        self.search_by_status(list_uid, "unsubscribed", page, per_page)
    }

    /// Create the subscriber when the `EMAIL` in `data` is unknown to the
    /// list, update the existing one otherwise.
    pub fn create_update(&self, list_uid: &str, data: Params) -> Response {
        let email = data.get_str("EMAIL").unwrap_or_default().to_string();
        let response = self.email_search(list_uid, &email);
        if response.is_transport_error() {
            return response;
        }
        if response.is_error() && response.http_code() == 404 {
            return self.create(list_uid, data);
        }
        match found_subscriber_uid(&response) {
            Some(uid) => self.update(list_uid, &uid, data),
            None => response,
        }
    }
}

/// The subscriber uid a successful search reports, if any.
fn found_subscriber_uid(response: &Response) -> Option<String> {
    response
        .body()
        .get("data")
        .and_then(|data| data.get("subscriber_uid"))
        .and_then(Value::as_str)
        .filter(|uid| !uid.is_empty())
        .map(String::from)
}
