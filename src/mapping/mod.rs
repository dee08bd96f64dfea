pub mod attack_patterns;
pub mod embedded;

pub use attack_patterns::{map_to_attack_patterns, PLACEHOLDER_PATTERN_NAME};
pub use embedded::{threat_url, EmbeddedThreatTable, ThreatLink, BUNDLED_TABLE_VERSION};

use std::sync::Arc;
use crate::models::{AttackPattern, AttackPatternCatalog, EmbeddedThreat, WeaknessCatalog};

/// Map a weakness id list through the embedded-threat table. One threat per
/// weakness at most; the same threat may appear for several weaknesses.
pub fn map_to_embedded_threats(weakness_ids: &[String], table: &EmbeddedThreatTable) -> Vec<EmbeddedThreat> {
    weakness_ids
        .iter()
        .filter_map(|id| table.lookup(id).cloned())
        .collect()
}

/// Resolves weakness ids to attack patterns and embedded threats.
#[derive(Debug, Clone, Default)]
pub struct ThreatMapper {
    embedded: Arc<EmbeddedThreatTable>,
}

impl ThreatMapper {
    pub fn new(embedded: EmbeddedThreatTable) -> Self {
        Self { embedded: Arc::new(embedded) }
    }

    pub fn embedded_table(&self) -> &EmbeddedThreatTable {
        &self.embedded
    }

    pub fn attack_patterns(
        &self,
        weakness_ids: &[String],
        weaknesses: &WeaknessCatalog,
        patterns: &AttackPatternCatalog,
    ) -> Vec<AttackPattern> {
        map_to_attack_patterns(weakness_ids, weaknesses, patterns)
    }

    pub fn embedded_threats(&self, weakness_ids: &[String]) -> Vec<EmbeddedThreat> {
        map_to_embedded_threats(weakness_ids, &self.embedded)
    }
}
