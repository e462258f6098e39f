use super::{Page, Transport};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use novelfetch_extract::HttpMethod;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    /// Applied to every request; `None` waits forever.
    pub timeout: Option<Duration>,
    /// Accept any certificate the server presents.
    pub insecure_tls: bool,
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(options: &HttpOptions) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(options.user_agent.as_str())
            .danger_accept_invalid_certs(options.insecure_tls);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if options.insecure_tls {
            tracing::warn!("TLS certificate validation is disabled; responses can be tampered with");
        }
        let client = builder.build().or_raise(|| ErrorKind::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self))]
    async fn send(&self, method: HttpMethod, url: &str) -> Result<Page> {
        let request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        let response = request.send().await.or_raise(|| ErrorKind::Network(url.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.or_raise(|| ErrorKind::Network(url.to_string()))?;
        tracing::debug!(status, bytes = body.len(), "Response received");
        Ok(Page { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_and_without_timeout() {
        let mut options = HttpOptions {
            user_agent: "novelfetch-test".to_string(),
            timeout: Some(Duration::from_secs(5)),
            insecure_tls: false,
        };
        assert!(HttpTransport::new(&options).is_ok());
        options.timeout = None;
        options.insecure_tls = true;
        assert!(HttpTransport::new(&options).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let options = HttpOptions {
            user_agent: "novelfetch-test".to_string(),
            timeout: Some(Duration::from_secs(5)),
            insecure_tls: false,
        };
        let transport = HttpTransport::new(&options).unwrap();
        // Port 9 on loopback: nothing listens there, so the connection is refused.
        let err = transport.send(HttpMethod::Get, "http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Network(_)));
    }
}
