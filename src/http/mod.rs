//! HTTP request/response pipeline.
//!
//! Endpoint methods build a [`RequestSpec`]; [`ApiClient::execute`] turns
//! it into a wire request, consults the cache for revalidatable GETs, and
//! normalizes every outcome into a [`Response`].

mod client;
mod hooks;
mod request;
mod response;
mod transport;

pub use client::ApiClient;
pub use hooks::RequestHook;
pub use request::{Method, RequestSpec};
pub use response::{status_text, Response};
pub use transport::{
    RawResponse, ReqwestTransport, Transport, TransportError, TransportRequest,
};
