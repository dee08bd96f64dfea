use std::sync::Arc;
use async_trait::async_trait;
use serde_json::Value;
use crate::config::SourcesConfig;
use crate::errors::{FetchError, TriageError};
use super::http::HttpSource;
use super::SourceKind;

#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Fetch the raw payload. `query` is the identifier for per-item sources
    /// and `None` for bulk catalogs. Must resolve within the client's timeout.
    async fn fetch(&self, query: Option<&str>) -> Result<Value, FetchError>;

    /// Which dataset this client serves, for logging and error attribution
    fn kind(&self) -> SourceKind;
}

/// One client per external dataset.
#[derive(Clone)]
pub struct Sources {
    pub severity: Arc<dyn SourceClient>,
    pub exploit_probability: Arc<dyn SourceClient>,
    pub known_exploited: Arc<dyn SourceClient>,
    pub weakness_catalog: Arc<dyn SourceClient>,
    pub attack_pattern_catalog: Arc<dyn SourceClient>,
}

impl Sources {
    pub fn from_config(config: &SourcesConfig) -> Result<Self, TriageError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TriageError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let build = |kind: SourceKind, query_param: Option<&'static str>| -> Arc<dyn SourceClient> {
            let endpoint = config.endpoint(kind);
            Arc::new(HttpSource::new(
                client.clone(),
                kind,
                &endpoint.url,
                query_param,
                endpoint.resolved_api_key(),
                config.timeout_for(kind),
            ))
        };

        Ok(Self {
            severity: build(SourceKind::Severity, Some("cveId")),
            exploit_probability: build(SourceKind::ExploitProbability, Some("cve")),
            known_exploited: build(SourceKind::KnownExploited, None),
            weakness_catalog: build(SourceKind::WeaknessCatalog, None),
            attack_pattern_catalog: build(SourceKind::AttackPatternCatalog, None),
        })
    }
}
