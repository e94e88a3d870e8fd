//! Campaign bounces endpoint.

use super::page_params;
use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

pub struct CampaignBounces<'a> {
    client: &'a ApiClient,
}

impl<'a> CampaignBounces<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get the bounces of a campaign. Results can be cached.
    pub fn list(&self, campaign_uid: &str, page: u32, per_page: u32) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}/bounces"));
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }

    /// Record a new bounce for a campaign.
    pub fn create(&self, campaign_uid: &str, data: Params) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}/bounces"));
        self.client
            .execute(RequestSpec::new(Method::Post, url).post_params(data))
    }
}
