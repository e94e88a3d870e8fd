//! Campaign delivery logs endpoint.

use super::page_params;
use crate::http::{ApiClient, Method, RequestSpec, Response};

pub struct CampaignDeliveryLogs<'a> {
    client: &'a ApiClient,
}

impl<'a> CampaignDeliveryLogs<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Get the delivery logs of a campaign. Results can be cached.
    pub fn list(&self, campaign_uid: &str, page: u32, per_page: u32) -> Response {
        let url = self
            .client
            .config()
            .endpoint_url(&format!("campaigns/{campaign_uid}/delivery-logs"));
        self.client.execute(
            RequestSpec::new(Method::Get, url)
                .get_params(page_params(page, per_page))
                .cached(),
        )
    }

    /// Look up a single delivery log by the email message id it was sent
    /// with.
    pub fn get_by_email_message_id(&self, email_message_id: &str) -> Response {
        let url = self.client.config().endpoint_url(&format!(
            "campaigns/delivery-logs/email-message-id/{email_message_id}"
        ));
        self.client.execute(RequestSpec::new(Method::Get, url))
    }
}
