use serde::{Deserialize, Serialize};

/// Declares a CVSS categorical metric. The first literal is the canonical
/// NVD spelling, any further literals are accepted aliases.
macro_rules! cvss_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal $(| $alias:literal)*),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub fn parse(raw: &str) -> Option<Self> {
                match raw.trim().to_ascii_uppercase().as_str() {
                    $($text $(| $alias)* => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

cvss_enum!(AttackVector {
    Network => "NETWORK",
    Adjacent => "ADJACENT_NETWORK" | "ADJACENT",
    Local => "LOCAL",
    Physical => "PHYSICAL",
});

cvss_enum!(AttackComplexity {
    Low => "LOW",
    High => "HIGH",
});

cvss_enum!(
    /// CVSS v4 only
    AttackRequirements {
        None => "NONE",
        Present => "PRESENT",
    }
);

cvss_enum!(PrivilegesRequired {
    None => "NONE",
    Low => "LOW",
    High => "HIGH",
});

cvss_enum!(
    /// v3 uses NONE/REQUIRED, v4 splits interaction into PASSIVE/ACTIVE
    UserInteraction {
        None => "NONE",
        Required => "REQUIRED",
        Passive => "PASSIVE",
        Active => "ACTIVE",
    }
);

cvss_enum!(Scope {
    Unchanged => "UNCHANGED",
    Changed => "CHANGED",
});

cvss_enum!(Impact {
    None => "NONE",
    Low => "LOW",
    High => "HIGH",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CvssVersion {
    #[serde(rename = "3.0")]
    V3_0,
    #[serde(rename = "3.1")]
    V3_1,
    #[serde(rename = "4.0")]
    V4_0,
}

impl CvssVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V3_0 => "3.0",
            Self::V3_1 => "3.1",
            Self::V4_0 => "4.0",
        }
    }
}

/// One scored CVSS metric set. `score` is always within [0, 10]; metric sets
/// with a missing or out-of-range score are dropped during normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvssMetric {
    pub version: CvssVersion,
    pub score: f64,
    pub vector: Option<String>,
    pub attack_vector: Option<AttackVector>,
    pub attack_complexity: Option<AttackComplexity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_requirements: Option<AttackRequirements>,
    pub privileges_required: Option<PrivilegesRequired>,
    pub user_interaction: Option<UserInteraction>,
    pub scope: Option<Scope>,
    pub confidentiality: Option<Impact>,
    pub integrity: Option<Impact>,
    pub availability: Option<Impact>,
}

impl CvssMetric {
    pub fn is_critical(&self) -> bool {
        self.score >= 9.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(AttackVector::parse("network"), Some(AttackVector::Network));
        assert_eq!(Impact::parse(" High "), Some(Impact::High));
    }

    #[test]
    fn test_parse_accepts_v4_adjacent_alias() {
        assert_eq!(AttackVector::parse("ADJACENT"), Some(AttackVector::Adjacent));
        assert_eq!(AttackVector::parse("ADJACENT_NETWORK"), Some(AttackVector::Adjacent));
        assert_eq!(AttackVector::Adjacent.as_str(), "ADJACENT_NETWORK");
    }

    #[test]
    fn test_parse_unknown_value() {
        assert_eq!(Scope::parse("SOMETIMES"), None);
        assert_eq!(UserInteraction::parse(""), None);
    }

    #[test]
    fn test_serializes_with_nvd_spelling() {
        let json = serde_json::to_string(&UserInteraction::Required).unwrap();
        assert_eq!(json, "\"REQUIRED\"");
    }
}
