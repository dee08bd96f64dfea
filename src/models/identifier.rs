use std::sync::LazyLock;
use regex::Regex;
use serde::Serialize;
use crate::errors::TriageError;

static VULN_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Z0-9]*-(\d{4})-\d{4,}$").expect("vulnerability id pattern is valid")
});

/// Canonical vulnerability identifier (`PREFIX-YYYY-NNNN+`, uppercase).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VulnId(String);

impl VulnId {
    /// Validate and normalize user input. Runs before any network call.
    pub fn parse(raw: &str) -> Result<Self, TriageError> {
        let candidate = raw.trim().to_ascii_uppercase();
        if VULN_ID_RE.is_match(&candidate) {
            Ok(Self(candidate))
        } else {
            Err(TriageError::MalformedIdentifier(format!(
                "'{}' does not match PREFIX-YYYY-NNNN",
                raw.trim()
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> u16 {
        VULN_ID_RE
            .captures(&self.0)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for VulnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
