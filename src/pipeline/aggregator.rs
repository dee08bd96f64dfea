use std::path::Path;
use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;
use crate::cache::{self, DatasetKey, ReferenceCache};
use crate::config::{PolicyConfig, TriageConfig};
use crate::errors::{with_retry, FetchError, RetryConfig, TriageError};
use crate::mapping::{EmbeddedThreatTable, ThreatMapper};
use crate::models::*;
use crate::normalize::*;
use crate::sources::{SourceClient, SourceKind, Sources};

/// Gathers evidence for one identifier from every source and assembles the
/// canonical record.
///
/// Wave 1 fetches severity, exploit probability and known-exploited status
/// concurrently. Wave 2 runs only when weakness ids were found and loads
/// both catalogs through the reference cache. Only a failure of the
/// severity source aborts; anything else degrades the matching field.
pub struct EvidenceAggregator {
    sources: Sources,
    cache: Arc<dyn ReferenceCache>,
    mapper: ThreatMapper,
    policy: PolicyConfig,
    retry: RetryConfig,
}

impl EvidenceAggregator {
    pub fn new(
        sources: Sources,
        cache: Arc<dyn ReferenceCache>,
        mapper: ThreatMapper,
        policy: PolicyConfig,
        retry: RetryConfig,
    ) -> Self {
        Self { sources, cache, mapper, policy, retry }
    }

    pub fn from_config(config: &TriageConfig) -> Result<Self, TriageError> {
        let sources = Sources::from_config(&config.sources)?;
        let table = match &config.embedded_threats_file {
            Some(path) => EmbeddedThreatTable::from_yaml_file(Path::new(path))?,
            None => EmbeddedThreatTable::bundled(),
        };
        Ok(Self::new(
            sources,
            cache::from_config(&config.cache),
            ThreatMapper::new(table),
            config.policy.clone(),
            config.retry.clone(),
        ))
    }

    pub fn mapper(&self) -> &ThreatMapper {
        &self.mapper
    }

    pub fn cache(&self) -> &Arc<dyn ReferenceCache> {
        &self.cache
    }

    /// Validate raw input and aggregate. Malformed identifiers are rejected
    /// before any source is contacted.
    pub async fn analyze(&self, raw_id: &str) -> Result<EvidenceRecord, TriageError> {
        let id = VulnId::parse(raw_id)?;
        self.aggregate(&id).await
    }

    pub async fn aggregate(&self, id: &VulnId) -> Result<EvidenceRecord, TriageError> {
        let span = info_span!("aggregate", analysis_id = %Uuid::new_v4(), id = %id);
        self.aggregate_inner(id).instrument(span).await
    }

    async fn aggregate_inner(&self, id: &VulnId) -> Result<EvidenceRecord, TriageError> {
        info!("Collecting evidence");
        let query = Some(id.as_str());

        // Wave 1
        let (primary, exploit, known) = tokio::join!(
            self.fetch(&self.sources.severity, query),
            self.fetch(&self.sources.exploit_probability, query),
            self.fetch(&self.sources.known_exploited, None),
        );

        let primary = match primary {
            Ok(payload) => normalize_primary(&payload, &self.policy.description_languages),
            Err(e) => {
                error!(error = %e, "Primary source unreachable");
                return Err(TriageError::PrimarySourceUnreachable(e));
            }
        };
        if !primary.found {
            warn!("Primary source has no record for this identifier");
        }

        let mut degraded = Vec::new();

        let exploit_probability = match exploit {
            Ok(payload) => normalize_exploit_probability(&payload),
            Err(e) => {
                degrade(&mut degraded, &e);
                None
            }
        };

        let known_exploited = match known {
            Ok(catalog) => Some(normalize_known_exploited(&catalog, id, self.policy.kev_match)),
            Err(e) => {
                degrade(&mut degraded, &e);
                None
            }
        };

        // Wave 2
        let weakness_ids = primary.weakness_ids;
        let attack_patterns = if weakness_ids.is_empty() {
            Some(Vec::new())
        } else {
            let (weaknesses, patterns) = tokio::join!(
                self.load_catalog(DatasetKey::WeaknessCatalog),
                self.load_catalog(DatasetKey::AttackPatternCatalog),
            );
            let patterns = match patterns {
                Ok(dataset) => dataset,
                Err(e) => {
                    degrade(&mut degraded, &e);
                    Arc::new(Dataset::AttackPatterns(AttackPatternCatalog::default()))
                }
            };
            match weaknesses {
                Ok(weaknesses) => {
                    let empty = AttackPatternCatalog::default();
                    let weaknesses = weaknesses.as_weaknesses();
                    let patterns = patterns.as_attack_patterns().unwrap_or(&empty);
                    weaknesses.map(|w| self.mapper.attack_patterns(&weakness_ids, w, patterns))
                }
                Err(e) => {
                    degrade(&mut degraded, &e);
                    None
                }
            }
        };
        let embedded_threats = self.mapper.embedded_threats(&weakness_ids);

        let record = EvidenceRecord {
            id: id.clone(),
            in_primary_catalog: primary.found,
            description: primary.description,
            severity_v3: primary.severity_v3,
            severity_v4: primary.severity_v4,
            exploit_probability,
            known_exploited,
            weakness_ids,
            attack_patterns,
            embedded_threats,
            references: primary.references,
            degraded_sources: degraded,
        };

        info!(
            weaknesses = record.weakness_ids.len(),
            patterns = record.attack_patterns.as_ref().map_or(0, Vec::len),
            degraded = record.degraded_sources.len(),
            "Evidence assembled"
        );
        Ok(record)
    }

    /// Load every reference catalog into the cache, returning the keys that
    /// could not be loaded.
    pub async fn warm_catalogs(&self) -> Vec<(DatasetKey, FetchError)> {
        let results = futures::future::join_all(
            DatasetKey::ALL.into_iter().map(|key| async move { (key, self.load_catalog(key).await) }),
        )
        .await;
        results
            .into_iter()
            .filter_map(|(key, result)| result.err().map(|e| (key, e)))
            .collect()
    }

    async fn fetch(&self, client: &Arc<dyn SourceClient>, query: Option<&str>) -> Result<Value, FetchError> {
        let kind = client.kind();
        with_retry(kind.as_str(), &self.retry, || client.fetch(query)).await
    }

    /// Cache-first catalog load. A cached entry of the wrong shape is
    /// dropped and refetched.
    async fn load_catalog(&self, key: DatasetKey) -> Result<Arc<Dataset>, FetchError> {
        if let Some(dataset) = self.cache.get(key).await {
            if holds(&dataset, key) {
                debug!(key = %key, "Catalog served from cache");
                return Ok(dataset);
            }
            warn!(key = %key, "Cached dataset has the wrong shape, refetching");
            self.cache.invalidate(key).await;
        }

        let client = match key {
            DatasetKey::WeaknessCatalog => &self.sources.weakness_catalog,
            DatasetKey::AttackPatternCatalog => &self.sources.attack_pattern_catalog,
        };
        let payload = self.fetch(client, None).await?;
        let dataset = match key {
            DatasetKey::WeaknessCatalog => WeaknessCatalog::from_payload(&payload).map(Dataset::Weaknesses),
            DatasetKey::AttackPatternCatalog => AttackPatternCatalog::from_payload(&payload).map(Dataset::AttackPatterns),
        }
        .map_err(|message| FetchError::Parse { origin: key.source(), message })?;

        let dataset = Arc::new(dataset);
        self.cache.put(key, Arc::clone(&dataset)).await;
        info!(key = %key, "Catalog fetched and cached");
        Ok(dataset)
    }
}

fn holds(dataset: &Dataset, key: DatasetKey) -> bool {
    match key {
        DatasetKey::WeaknessCatalog => dataset.as_weaknesses().is_some(),
        DatasetKey::AttackPatternCatalog => dataset.as_attack_patterns().is_some(),
    }
}

fn degrade(degraded: &mut Vec<SourceKind>, err: &FetchError) {
    let class = err.classify();
    warn!(source = %err.origin(), error_type = class.error_type, error = %err, "Source degraded");
    if !degraded.contains(&err.origin()) {
        degraded.push(err.origin());
    }
}
