use std::collections::HashSet;
use crate::models::{AttackPattern, AttackPatternCatalog, WeaknessCatalog};

/// Shown when the pattern catalog has no name for an id.
pub const PLACEHOLDER_PATTERN_NAME: &str = "CAPEC";

/// Resolve weakness ids to related attack patterns, first occurrence wins.
pub fn map_to_attack_patterns(
    weakness_ids: &[String],
    weaknesses: &WeaknessCatalog,
    patterns: &AttackPatternCatalog,
) -> Vec<AttackPattern> {
    let mut seen = HashSet::new();
    weakness_ids
        .iter()
        .flat_map(|id| weaknesses.related_patterns(id))
        .filter(|pattern_id| seen.insert(pattern_id.as_str()))
        .map(|pattern_id| AttackPattern {
            id: pattern_id.clone(),
            name: patterns
                .name_of(pattern_id)
                .unwrap_or(PLACEHOLDER_PATTERN_NAME)
                .to_string(),
        })
        .collect()
}
