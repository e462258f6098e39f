//! In-memory transport for testing.

use super::{Page, Transport};
use crate::error::Result;
use async_trait::async_trait;
use novelfetch_extract::HttpMethod;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory [`Transport`] serving canned pages.
///
/// Every request is recorded so tests can assert how often (and how) the
/// network would have been hit. URLs without a canned page answer `404` with
/// an empty body. A per-URL delay makes responses complete in a chosen order.
#[derive(Debug, Default)]
pub struct MockTransport {
    pages: RwLock<HashMap<String, Page>>,
    delays: HashMap<String, Duration>,
    requests: RwLock<Vec<(HttpMethod, String)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    /// Create a mock transport answering `200 OK` for each of `pages`.
    pub fn with_pages(pages: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        let pages = pages.into_iter().map(|(url, body)| (url.into(), Page::ok(body))).collect();
        Self { pages: RwLock::new(pages), ..Self::default() }
    }

    pub fn with_page(mut self, url: impl Into<String>, page: Page) -> Self {
        self.pages.get_mut().insert(url.into(), page);
        self
    }

    /// Hold the response for `url` back by `delay`.
    pub fn with_delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    /// Every request made so far, in the order they were sent.
    pub async fn requests(&self) -> Vec<(HttpMethod, String)> {
        self.requests.read().await.clone()
    }

    /// Number of requests made for `url`.
    pub async fn hits(&self, url: &str) -> usize {
        self.requests.read().await.iter().filter(|(_, requested)| requested == url).count()
    }

    /// Highest number of requests that were waiting on a response at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, method: HttpMethod, url: &str) -> Result<Page> {
        self.requests.write().await.push((method, url.to_string()));
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        let page = self.pages.read().await.get(url).cloned();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(page.unwrap_or(Page { status: 404, body: String::new() }))
    }
}
