pub mod client;
pub mod http;

pub use client::{SourceClient, Sources};
pub use http::HttpSource;

use serde::{Deserialize, Serialize};

/// The external datasets evidence is gathered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Description, CVSS metrics, weaknesses and references (NVD)
    Severity,
    /// Exploit prediction score (EPSS)
    ExploitProbability,
    /// Known exploited vulnerabilities catalog (CISA KEV)
    KnownExploited,
    WeaknessCatalog,
    AttackPatternCatalog,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::ExploitProbability => "exploit-probability",
            Self::KnownExploited => "known-exploited",
            Self::WeaknessCatalog => "weakness-catalog",
            Self::AttackPatternCatalog => "attack-pattern-catalog",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
