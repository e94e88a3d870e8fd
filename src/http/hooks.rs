//! Pre/post request hooks.

use super::request::RequestSpec;
use super::response::Response;

/// Extension point invoked synchronously around the transport phase.
///
/// Hooks run in registration order. `before_send` may mutate the outgoing
/// spec (add headers, tweak parameters); `after_send` may rewrite or
/// replace the response before the caller sees it.
pub trait RequestHook: Send + Sync {
    fn before_send(&self, _spec: &mut RequestSpec) {}

    fn after_send(&self, _spec: &RequestSpec, _response: &mut Response) {}
}
