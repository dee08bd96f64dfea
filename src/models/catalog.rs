use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Weakness catalog entry: the attack patterns a weakness is related to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeaknessEntry {
    pub related_attack_patterns: Vec<String>,
}

/// Weakness id → related attack patterns. Upstream keys are either
/// `CWE-79` or bare `79`; lookups try both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeaknessCatalog {
    entries: HashMap<String, WeaknessEntry>,
}

impl WeaknessCatalog {
    pub fn from_entries(entries: HashMap<String, WeaknessEntry>) -> Self {
        Self { entries }
    }

    /// Build from the raw `cwe_db.json` shape:
    /// `{ "79": { "RelatedAttackPatterns": ["209", "588", ...] }, ... }`.
    /// Entries that are not objects are skipped.
    pub fn from_payload(payload: &Value) -> Result<Self, String> {
        let object = payload.as_object().ok_or("weakness catalog is not a JSON object")?;
        let entries = object
            .iter()
            .filter_map(|(key, entry)| {
                let entry = entry.as_object()?;
                let related = entry
                    .get("RelatedAttackPatterns")
                    .or_else(|| entry.get("related_attack_patterns"))
                    .and_then(Value::as_array)
                    .map(|ids| ids.iter().filter_map(pattern_id).collect())
                    .unwrap_or_default();
                Some((key.trim().to_ascii_uppercase(), WeaknessEntry { related_attack_patterns: related }))
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn related_patterns(&self, weakness_id: &str) -> &[String] {
        let bare = weakness_id.strip_prefix("CWE-").unwrap_or(weakness_id);
        self.entries
            .get(weakness_id)
            .or_else(|| self.entries.get(bare))
            .map(|e| e.related_attack_patterns.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttackPatternEntry {
    pub name: Option<String>,
}

/// Attack pattern id (bare number) → detail record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttackPatternCatalog {
    entries: HashMap<String, AttackPatternEntry>,
}

impl AttackPatternCatalog {
    pub fn from_entries(entries: HashMap<String, AttackPatternEntry>) -> Self {
        Self { entries }
    }

    /// Build from the raw `capec_db.json` shape:
    /// `{ "1": { "name": "Accessing Functionality Not Properly Constrained by ACLs", ... } }`.
    /// Both `name` and `Name` spellings occur upstream.
    pub fn from_payload(payload: &Value) -> Result<Self, String> {
        let object = payload.as_object().ok_or("attack pattern catalog is not a JSON object")?;
        let entries = object
            .iter()
            .filter_map(|(key, entry)| {
                let entry = entry.as_object()?;
                let name = entry
                    .get("name")
                    .or_else(|| entry.get("Name"))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                let id = pattern_id(&Value::String(key.clone()))?;
                Some((id, AttackPatternEntry { name }))
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn name_of(&self, pattern_id: &str) -> Option<&str> {
        self.entries.get(pattern_id).and_then(|e| e.name.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize a pattern reference (`"CAPEC-66"`, `"66"` or `66`) to its bare number.
fn pattern_id(raw: &Value) -> Option<String> {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let upper = text.to_ascii_uppercase();
    let bare = upper.strip_prefix("CAPEC-").unwrap_or(&upper);
    if !bare.is_empty() && bare.chars().all(|c| c.is_ascii_digit()) {
        Some(bare.to_string())
    } else {
        None
    }
}

/// A slow-changing reference dataset held by the reference cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataset", content = "data", rename_all = "snake_case")]
pub enum Dataset {
    Weaknesses(WeaknessCatalog),
    AttackPatterns(AttackPatternCatalog),
}

impl Dataset {
    pub fn as_weaknesses(&self) -> Option<&WeaknessCatalog> {
        match self {
            Self::Weaknesses(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_attack_patterns(&self) -> Option<&AttackPatternCatalog> {
        match self {
            Self::AttackPatterns(c) => Some(c),
            _ => None,
        }
    }
}
