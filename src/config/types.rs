use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::errors::RetryConfig;
use crate::sources::SourceKind;
use super::credentials::resolve_credential;

pub const DEFAULT_TIMEOUT_SECS: u64 = 12;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TriageConfig {
    pub sources: SourcesConfig,
    pub policy: PolicyConfig,
    pub cache: CacheConfig,
    pub retry: RetryConfig,
    /// YAML file replacing the bundled embedded-threat mapping
    pub embedded_threats_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub nvd: SourceEndpoint,
    pub epss: SourceEndpoint,
    pub kev: SourceEndpoint,
    pub cwe_catalog: SourceEndpoint,
    pub capec_catalog: SourceEndpoint,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("cvetriage/{}", env!("CARGO_PKG_VERSION")),
            nvd: SourceEndpoint::new("https://services.nvd.nist.gov/rest/json/cves/2.0"),
            epss: SourceEndpoint::new("https://api.first.org/data/v1/epss"),
            kev: SourceEndpoint::new(
                "https://raw.githubusercontent.com/cisagov/kev-data/main/known_exploited_vulnerabilities.json",
            ),
            cwe_catalog: SourceEndpoint::new(
                "https://raw.githubusercontent.com/Galeax/CVE2CAPEC/main/resources/cwe_db.json",
            ),
            capec_catalog: SourceEndpoint::new(
                "https://raw.githubusercontent.com/Galeax/CVE2CAPEC/main/resources/capec_db.json",
            ),
        }
    }
}

impl SourcesConfig {
    pub fn endpoint(&self, kind: SourceKind) -> &SourceEndpoint {
        match kind {
            SourceKind::Severity => &self.nvd,
            SourceKind::ExploitProbability => &self.epss,
            SourceKind::KnownExploited => &self.kev,
            SourceKind::WeaknessCatalog => &self.cwe_catalog,
            SourceKind::AttackPatternCatalog => &self.capec_catalog,
        }
    }

    /// Per-endpoint timeout, falling back to the shared one.
    pub fn timeout_for(&self, kind: SourceKind) -> Duration {
        let secs = self.endpoint(kind).timeout_secs.unwrap_or(self.timeout_secs);
        Duration::from_secs(secs)
    }

    pub fn all_endpoints(&self) -> [(SourceKind, &SourceEndpoint); 5] {
        [
            (SourceKind::Severity, &self.nvd),
            (SourceKind::ExploitProbability, &self.epss),
            (SourceKind::KnownExploited, &self.kev),
            (SourceKind::WeaknessCatalog, &self.cwe_catalog),
            (SourceKind::AttackPatternCatalog, &self.capec_catalog),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceEndpoint {
    pub url: String,
    pub timeout_secs: Option<u64>,
    /// Literal key or `$ENV_VAR` reference
    pub api_key: Option<String>,
}

impl SourceEndpoint {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timeout_secs: None,
            api_key: None,
        }
    }

    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(resolve_credential)
            .filter(|k| !k.is_empty() && !k.starts_with('$'))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Description languages in order of preference
    pub description_languages: Vec<String>,
    pub kev_match: KevMatchPolicy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            description_languages: vec!["fr".to_string(), "en".to_string()],
            kev_match: KevMatchPolicy::First,
        }
    }
}

/// Which catalog entry wins when the known-exploited feed lists an
/// identifier more than once.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KevMatchPolicy {
    #[default]
    First,
    /// Most recent `dateAdded`
    Latest,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// Session directory for the `session` backend
    pub directory: Option<String>,
}

impl CacheConfig {
    pub fn session_dir(&self) -> PathBuf {
        self.directory
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("cvetriage-cache"))
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Session,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_twelve_seconds() {
        let config = SourcesConfig::default();
        assert_eq!(config.timeout_for(SourceKind::Severity), Duration::from_secs(12));
    }

    #[test]
    fn test_endpoint_timeout_overrides_shared() {
        let mut config = SourcesConfig::default();
        config.kev.timeout_secs = Some(30);
        assert_eq!(config.timeout_for(SourceKind::KnownExploited), Duration::from_secs(30));
        assert_eq!(config.timeout_for(SourceKind::ExploitProbability), Duration::from_secs(12));
    }

    #[test]
    fn test_default_policy_prefers_french_then_english() {
        let policy = PolicyConfig::default();
        assert_eq!(policy.description_languages, vec!["fr", "en"]);
        assert_eq!(policy.kev_match, KevMatchPolicy::First);
    }

    #[test]
    fn test_kev_match_deserialize() {
        let parsed: KevMatchPolicy = serde_json::from_str("\"latest\"").unwrap();
        assert_eq!(parsed, KevMatchPolicy::Latest);
    }

    #[test]
    fn test_unresolved_api_key_is_dropped() {
        let mut endpoint = SourceEndpoint::new("https://example.org");
        endpoint.api_key = Some("$CVETRIAGE_TEST_UNSET_KEY".to_string());
        assert_eq!(endpoint.resolved_api_key(), None);

        endpoint.api_key = Some("literal-key".to_string());
        assert_eq!(endpoint.resolved_api_key().as_deref(), Some("literal-key"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "policy:\n  kev_match: latest\n";
        let config: TriageConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.policy.kev_match, KevMatchPolicy::Latest);
        assert_eq!(config.policy.description_languages, vec!["fr", "en"]);
        assert_eq!(config.sources.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
    }
}
