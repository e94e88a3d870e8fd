//! Campaign unsubscribes endpoint.

use super::page_params;
use crate::http::{ApiClient, Method, RequestSpec, Response};

pub struct CampaignUnsubscribes<'a> {
    client: &'a ApiClient,
}

impl<'a> CampaignUnsubscribes<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get the unsubscribes of a campaign. Results can be cached.
    pub fn list(&self, campaign_uid: &str, page: u32, per_page: u32) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}/unsubscribes"));
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }
}
