//! Shared test doubles: a scripted transport and a write-counting cache.
#![allow(dead_code)] // not every test binary uses every helper

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use ems_client::cache::{Cache, CacheEntry};
use ems_client::http::{RawResponse, Transport, TransportError, TransportRequest};
use ems_client::{ApiClient, ClientConfig};

/// Transport that replays queued responses and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    queue: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, result: Result<RawResponse, TransportError>) {
        self.inner.queue.lock().unwrap().push_back(result);
    }

    pub fn enqueue_response(&self, status: u16, headers: &[(&str, &str)], body: &str) {
        self.enqueue(Ok(RawResponse {
            status,
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body: Bytes::from(body.to_string()),
        }));
    }

    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue(Err(error));
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &TransportRequest) -> Result<RawResponse, TransportError> {
        self.inner.requests.lock().unwrap().push(request.clone());
        self.inner
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_string())))
    }
}

/// Cache decorator counting reads and writes that reach the backend.
pub struct CountingCache<C> {
    inner: C,
    sets: Arc<AtomicUsize>,
    gets: Arc<AtomicUsize>,
}

impl<C: Cache> CountingCache<C> {
    pub fn new(inner: C) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let sets = Arc::new(AtomicUsize::new(0));
        let gets = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                sets: sets.clone(),
                gets: gets.clone(),
            },
            sets,
            gets,
        )
    }
}

impl<C: Cache> Cache for CountingCache<C> {
    fn set(&self, key: &str, value: &CacheEntry) -> bool {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }

    fn delete(&self, key: &str) -> bool {
        self.inner.delete(key)
    }

    fn flush(&self) -> bool {
        self.inner.flush()
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new("https://example.tld/api", "KEY1").unwrap()
}

pub fn test_client(transport: &ScriptedTransport) -> ApiClient {
    ApiClient::new(test_config()).with_transport(transport.boxed())
}

/// Value of a header in a recorded request, if present.
pub fn header_value(request: &TransportRequest, name: &str) -> Option<String> {
    request
        .headers
        .iter()
        .find(|(header, _)| header.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.clone())
}
