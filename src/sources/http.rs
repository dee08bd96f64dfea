use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use crate::errors::FetchError;
use super::client::SourceClient;
use super::SourceKind;

/// JSON-over-HTTP source. A single GET per call, bounded by `timeout`
/// end to end (connect, headers and body).
pub struct HttpSource {
    client: Client,
    kind: SourceKind,
    url: String,
    query_param: Option<&'static str>,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(
        client: Client,
        kind: SourceKind,
        url: &str,
        query_param: Option<&'static str>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            kind,
            url: url.to_string(),
            query_param,
            api_key,
            timeout,
        }
    }

    async fn send(&self, query: Option<&str>) -> Result<Value, FetchError> {
        let mut request = self.client
            .get(&self.url)
            .header(ACCEPT, "application/json");
        if let (Some(param), Some(value)) = (self.query_param, query) {
            request = request.query(&[(param, value)]);
        }
        if let Some(key) = &self.api_key {
            request = request.header("apiKey", key);
        }

        let resp = request.send().await.map_err(|e| FetchError::Transport {
            origin: self.kind,
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus { origin: self.kind, code: status.as_u16() });
        }

        let body = resp.bytes().await.map_err(|e| FetchError::Transport {
            origin: self.kind,
            message: format!("Failed to read body: {}", e),
        })?;
        debug!(source = %self.kind, bytes = body.len(), "Source responded");

        serde_json::from_slice(&body).map_err(|e| FetchError::Parse {
            origin: self.kind,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SourceClient for HttpSource {
    async fn fetch(&self, query: Option<&str>) -> Result<Value, FetchError> {
        match tokio::time::timeout(self.timeout, self.send(query)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                origin: self.kind,
                after_secs: self.timeout.as_secs(),
            }),
        }
    }

    fn kind(&self) -> SourceKind {
        self.kind
    }
}
