//! Campaign tracking endpoint.

use crate::http::{ApiClient, Method, RequestSpec, Response};
use crate::params::Params;

pub struct CampaignsTracking<'a> {
    client: &'a ApiClient,
}

impl<'a> CampaignsTracking<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Register a url click for a subscriber of a campaign.
    pub fn track_url(&self, campaign_uid: &str, subscriber_uid: &str, hash: &str) -> Response {
        let url = self.client.config().endpoint_url(&format!(
            "campaigns/{campaign_uid}/track-url/{subscriber_uid}/{hash}"
        ));
        self.client.execute(RequestSpec::new(Method::Get, url))
    }

    /// Register an open for a subscriber of a campaign.
    pub fn track_opening(&self, campaign_uid: &str, subscriber_uid: &str) -> Response {
        let url = self.client.config().endpoint_url(&format!(
            "campaigns/{campaign_uid}/track-opening/{subscriber_uid}"
        ));
        self.client.execute(RequestSpec::new(Method::Get, url))
    }

    /// Register an unsubscribe for a subscriber of a campaign.
    pub fn track_unsubscribe(
        &self,
        campaign_uid: &str,
        subscriber_uid: &str,
        data: Params,
    ) -> Response {
        let url = self.client.config().endpoint_url(&format!(
            "campaigns/{campaign_uid}/track-unsubscribe/{subscriber_uid}"
        ));
        self.client
            .execute(RequestSpec::new(Method::Post, url).post_params(data))
    }
}
