//! Per-resource endpoint handles.
//!
//! Each handle is a thin façade over [`crate::http::ApiClient::execute`]:
//! it interpolates resource identifiers into a path, fills the right
//! parameter bag and returns the pipeline's [`crate::http::Response`]
//! untouched. Composite by-email operations chain a lookup call and a
//! mutate call; the two round trips carry no transaction guarantee.

mod campaign_bounces;
mod campaign_delivery_logs;
mod campaign_unsubscribes;
mod campaigns;
mod campaigns_tracking;
mod countries;
mod customers;
mod list_fields;
mod list_segments;
mod list_subscribers;
mod lists;
mod templates;
mod transactional_emails;

pub use campaign_bounces::CampaignBounces;
pub use campaign_delivery_logs::CampaignDeliveryLogs;
pub use campaign_unsubscribes::CampaignUnsubscribes;
pub use campaigns::Campaigns;
pub use campaigns_tracking::CampaignsTracking;
pub use countries::Countries;
pub use customers::Customers;
pub use list_fields::ListFields;
pub use list_segments::ListSegments;
pub use list_subscribers::ListSubscribers;
pub use lists::Lists;
pub use templates::Templates;
pub use transactional_emails::TransactionalEmails;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

use crate::params::Params;

/// Standard pagination bag.
pub(crate) fn page_params(page: u32, per_page: u32) -> Params {
    Params::from_iter([("page", page), ("per_page", per_page)])
}

/// Wrap a parameter bag under a single top-level key, the envelope most
/// mutating endpoints expect (`campaign`, `template`, `email`).
pub(crate) fn wrap(key: &str, data: Params) -> Params {
    Params::from_iter([(key, data.to_value())])
}

/// Base64-encode the named top-level string fields in place.
pub(crate) fn encode_base64_fields(params: &mut Params, fields: &[&str]) {
    for field in fields {
        if let Some(value) = params.get_mut(field) {
            if let Some(text) = value.as_str() {
                *value = Value::String(BASE64.encode(text));
            }
        }
    }
}

/// Base64-encode the named string fields of a nested object in place.
pub(crate) fn encode_base64_nested(params: &mut Params, parent: &str, fields: &[&str]) {
    if let Some(Value::Object(map)) = params.get_mut(parent) {
        for field in fields {
            if let Some(value) = map.get_mut(*field) {
                if let Some(text) = value.as_str() {
                    *value = Value::String(BASE64.encode(text));
                }
            }
        }
    }
}
