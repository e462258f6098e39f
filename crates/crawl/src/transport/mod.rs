//! Where pages come from.
//!
//! Everything above this module talks to a [`Transport`], never to an HTTP
//! client directly, so the pipeline can be driven by an in-memory
//! [`MockTransport`] in tests.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::{HttpOptions, HttpTransport};
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockTransport;
use crate::error::Result;
use async_trait::async_trait;
use novelfetch_extract::HttpMethod;
use std::sync::Arc;

/// A response, reduced to what the pipeline looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: u16,
    pub body: String,
}
impl Page {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Requests `url` and returns whatever the server answered, whatever the
    /// status code. Only failing to get an answer at all is an error.
    async fn send(&self, method: HttpMethod, url: &str) -> Result<Page>;
}

pub type TransportHandle = Arc<dyn Transport + Send + Sync>;
