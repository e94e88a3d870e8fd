//! Synchronous client SDK for an email marketing REST API.
//!
//! The crate is organized in three layers:
//!
//! - [`params::Params`], the insertion-ordered map used for query and body
//!   parameters, headers and decoded response bodies;
//! - the [`http`] pipeline, which executes one blocking request at a time
//!   and can revalidate cacheable GETs against a [`cache`] backend using
//!   `ETag` / `If-None-Match`;
//! - [`endpoint`] handles, one per API resource, reached through
//!   [`ApiClient`].
//!
//! ```no_run
//! use ems_client::{ApiClient, ClientConfig};
//!
//! let config = ClientConfig::new("https://example.tld/api", "KEY1").unwrap();
//! let client = ApiClient::new(config);
//! let response = client.campaigns().list(1, 10);
//! if response.is_success() {
//!     println!("{:?}", response.body().get("data"));
//! }
//! ```

pub mod cache;
pub mod config;
pub mod endpoint;
pub mod http;
pub mod params;

pub use cache::{Cache, CacheEntry, CacheError, FileCache, NullCache, TableCache};
pub use config::{CacheSettings, ClientConfig, ConfigError, Settings};
pub use http::{ApiClient, Method, RequestHook, RequestSpec, Response};
pub use params::Params;

/// User agent sent with every request.
pub(crate) const USER_AGENT: &str = concat!("ems-client/", env!("CARGO_PKG_VERSION"));
