use std::collections::HashMap;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::errors::TriageError;
use crate::models::EmbeddedThreat;
use crate::normalize::normalize_weakness_id;

pub const BUNDLED_TABLE_VERSION: &str = "emb3d-top25-2024.1";

pub const EMB3D_THREAT_URL: &str = "https://emb3d.mitre.org/threats/";

/// Public EMB3D page for a threat id.
pub fn threat_url(threat_id: &str) -> String {
    format!("{}{}", EMB3D_THREAT_URL, threat_id.trim())
}

/// An embedded threat together with its EMB3D page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreatLink {
    #[serde(flatten)]
    pub threat: EmbeddedThreat,
    pub url: String,
}

impl From<&EmbeddedThreat> for ThreatLink {
    fn from(threat: &EmbeddedThreat) -> Self {
        Self { url: threat_url(&threat.threat_id), threat: threat.clone() }
    }
}

/// Weakness id → embedded-device threats. Immutable once built; the first
/// entry of each list is the one reported.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedThreatTable {
    version: String,
    entries: HashMap<String, Vec<EmbeddedThreat>>,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    version: String,
    mappings: HashMap<String, Vec<ThreatRow>>,
}

#[derive(Debug, Deserialize)]
struct ThreatRow {
    threat_id: String,
    threat_name: String,
    category: String,
}

impl EmbeddedThreatTable {
    pub fn new(version: impl Into<String>, entries: HashMap<String, Vec<EmbeddedThreat>>) -> Self {
        Self { version: version.into(), entries }
    }

    /// The table shipped with the crate.
    pub fn bundled() -> Self {
        let rows = [
            ("CWE-787", "T1.1", "Memory Corruption", "Application Software"),
            ("CWE-121", "T1.1", "Stack-based Buffer Overflow", "Application Software"),
            ("CWE-798", "T3.1", "Hard-coded Credentials", "System Software"),
            ("CWE-20", "T1.2", "Inadequate Input Validation", "Application Software"),
            ("CWE-319", "T4.2", "Cleartext Transmission", "Networking"),
        ];
        let entries = rows
            .into_iter()
            .map(|(cwe, tid, name, category)| {
                (cwe.to_string(), vec![EmbeddedThreat {
                    weakness_id: cwe.to_string(),
                    threat_id: tid.to_string(),
                    threat_name: name.to_string(),
                    category: category.to_string(),
                }])
            })
            .collect();
        Self::new(BUNDLED_TABLE_VERSION, entries)
    }

    /// Load a replacement table from YAML:
    ///
    /// ```yaml
    /// version: site-2025.02
    /// mappings:
    ///   CWE-787:
    ///     - threat_id: T1.1
    ///       threat_name: Memory Corruption
    ///       category: Application Software
    /// ```
    pub fn from_yaml_file(path: &Path) -> Result<Self, TriageError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TriageError::Config(format!("Failed to read threat table {}: {}", path.display(), e))
        })?;
        let table = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), version = %table.version, entries = table.len(), "Loaded embedded threat table");
        Ok(table)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, TriageError> {
        let file: TableFile = serde_yaml::from_str(content)?;
        if file.version.trim().is_empty() {
            return Err(TriageError::Config("Threat table version must not be empty".into()));
        }

        let mut entries = HashMap::new();
        for (raw_id, rows) in file.mappings {
            let weakness_id = normalize_weakness_id(&raw_id).ok_or_else(|| {
                TriageError::Config(format!("Threat table key '{}' is not a weakness id", raw_id))
            })?;
            let threats = rows
                .into_iter()
                .map(|row| EmbeddedThreat {
                    weakness_id: weakness_id.clone(),
                    threat_id: row.threat_id,
                    threat_name: row.threat_name,
                    category: row.category,
                })
                .collect();
            entries.insert(weakness_id, threats);
        }
        Ok(Self::new(file.version, entries))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// First mapping for a weakness id, if any.
    pub fn lookup(&self, weakness_id: &str) -> Option<&EmbeddedThreat> {
        self.entries.get(weakness_id).and_then(|threats| threats.first())
    }

    /// Every mapping for a weakness id, in table order.
    pub fn lookup_all(&self, weakness_id: &str) -> &[EmbeddedThreat] {
        self.entries.get(weakness_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every mapping for a weakness id with its EMB3D link.
    pub fn links(&self, weakness_id: &str) -> Vec<ThreatLink> {
        self.lookup_all(weakness_id).iter().map(ThreatLink::from).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EmbeddedThreatTable {
    fn default() -> Self {
        Self::bundled()
    }
}
