use serde::{Deserialize, Serialize, Serializer};

/// Declares a categorical decision point. Each variant has a one-letter
/// code used in rationales plus any spelled-out aliases accepted on input.
macro_rules! decision_point {
    (
        $(#[$meta:meta])* $name:ident, default = $default:ident, legend = $legend:literal {
            $($variant:ident => $code:literal, $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];
            pub const LEGEND: &'static str = $legend;

            /// Strict parse: one-letter code, label or known alias.
            pub fn parse(raw: &str) -> Option<Self> {
                let normalized = raw.trim().to_ascii_uppercase().replace(['_', '-', ' '], "");
                match normalized.as_str() {
                    $(c if c == $code || c == $label.to_ascii_uppercase().replace(' ', "") $(|| c == $alias)* => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Lenient parse used for caller input: absent or unrecognized
            /// values fall back to the default.
            pub fn from_raw(raw: Option<&str>) -> Self {
                raw.and_then(Self::parse).unwrap_or_default()
            }

            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Self::parse(raw).ok_or_else(|| format!("unrecognized value '{}' ({})", raw, $legend))
            }
        }
    };
}

decision_point!(
    /// Current state of exploitation in the wild
    Exploitation, default = None, legend = "N=None, P=Public PoC, A=Active" {
        None => "N", "None",
        PublicPoc => "P", "Public PoC" | "POC" | "PUBLIC",
        Active => "A", "Active",
    }
);

decision_point!(
    /// How reachable the affected system is
    Exposure, default = Open, legend = "S=Small, C=Controlled, O=Open" {
        Small => "S", "Small",
        Controlled => "C", "Controlled",
        Open => "O", "Open",
    }
);

decision_point!(
    TechnicalImpact, default = Partial, legend = "P=Partial, T=Total" {
        Partial => "P", "Partial",
        Total => "T", "Total",
    }
);

/// The three categorical inputs to a triage decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawDecisionInput")]
pub struct DecisionInput {
    pub exploitation: Exploitation,
    pub exposure: Exposure,
    pub technical_impact: TechnicalImpact,
}

impl DecisionInput {
    pub fn new(exploitation: Exploitation, exposure: Exposure, technical_impact: TechnicalImpact) -> Self {
        Self { exploitation, exposure, technical_impact }
    }

    pub fn from_raw(exploitation: Option<&str>, exposure: Option<&str>, technical_impact: Option<&str>) -> Self {
        Self {
            exploitation: Exploitation::from_raw(exploitation),
            exposure: Exposure::from_raw(exposure),
            technical_impact: TechnicalImpact::from_raw(technical_impact),
        }
    }

    /// Every combination of the three decision points.
    pub fn all() -> impl Iterator<Item = DecisionInput> {
        Exploitation::ALL.iter().flat_map(|&e| {
            Exposure::ALL.iter().flat_map(move |&x| {
                TechnicalImpact::ALL.iter().map(move |&t| DecisionInput::new(e, x, t))
            })
        })
    }
}

/// Wire shape for decision input. Fields accept any JSON value; anything
/// other than a recognized string falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDecisionInput {
    exploitation: Option<serde_json::Value>,
    exposure: Option<serde_json::Value>,
    #[serde(alias = "techImpact", alias = "impact")]
    technical_impact: Option<serde_json::Value>,
}

impl From<RawDecisionInput> for DecisionInput {
    fn from(raw: RawDecisionInput) -> Self {
        fn text(value: &Option<serde_json::Value>) -> Option<&str> {
            value.as_ref().and_then(serde_json::Value::as_str)
        }
        Self::from_raw(text(&raw.exploitation), text(&raw.exposure), text(&raw.technical_impact))
    }
}

/// DSOI urgency tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UrgencyTier {
    Defer,
    Scheduled,
    OutOfCycle,
    Immediate,
}

impl UrgencyTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Defer => "Defer",
            Self::Scheduled => "Scheduled",
            Self::OutOfCycle => "Out-of-Cycle",
            Self::Immediate => "Immediate",
        }
    }
}

/// CISA action tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionTier {
    Track,
    TrackStar,
    Attend,
    Act,
}

impl ActionTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Track => "Track",
            Self::TrackStar => "Track*",
            Self::Attend => "Attend",
            Self::Act => "Act",
        }
    }
}

macro_rules! label_serde {
    ($($name:ident),+) => {$(
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    )+};
}

label_serde!(UrgencyTier, ActionTier);

/// Result of one decision. `rationale` is `steps` joined with ` | `.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionOutcome {
    pub input: DecisionInput,
    pub urgency: UrgencyTier,
    pub action: ActionTier,
    /// Name of the rule that matched, `fallback` when none did
    pub rule: &'static str,
    pub steps: Vec<String>,
    pub rationale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes_labels_and_aliases() {
        assert_eq!(Exploitation::parse("a"), Some(Exploitation::Active));
        assert_eq!(Exploitation::parse("public_poc"), Some(Exploitation::PublicPoc));
        assert_eq!(Exploitation::parse("Public PoC"), Some(Exploitation::PublicPoc));
        assert_eq!(Exploitation::parse("poc"), Some(Exploitation::PublicPoc));
        assert_eq!(Exposure::parse("controlled"), Some(Exposure::Controlled));
        assert_eq!(TechnicalImpact::parse("T"), Some(TechnicalImpact::Total));
        assert_eq!(Exposure::parse("everywhere"), None);
    }

    #[test]
    fn test_lenient_defaults() {
        let input = DecisionInput::from_raw(None, Some("sideways"), Some(""));
        assert_eq!(input, DecisionInput::new(Exploitation::None, Exposure::Open, TechnicalImpact::Partial));
    }

    #[test]
    fn test_deserialize_missing_and_unknown_fields() {
        let input: DecisionInput = serde_json::from_str(r#"{"exploitation": "A", "exposure": null, "techImpact": "zzz"}"#).unwrap();
        assert_eq!(input.exploitation, Exploitation::Active);
        assert_eq!(input.exposure, Exposure::Open);
        assert_eq!(input.technical_impact, TechnicalImpact::Partial);
    }

    #[test]
    fn test_deserialize_non_string_values_default() {
        let input: DecisionInput =
            serde_json::from_str(r#"{"exploitation": "A", "exposure": 3, "technical_impact": ["T"]}"#).unwrap();
        assert_eq!(input, DecisionInput::new(Exploitation::Active, Exposure::Open, TechnicalImpact::Partial));
    }

    #[test]
    fn test_serialize_uses_codes_and_labels() {
        let input = DecisionInput::new(Exploitation::PublicPoc, Exposure::Small, TechnicalImpact::Total);
        let json = serde_json::to_value(input).unwrap();
        assert_eq!(json["exploitation"], "P");
        assert_eq!(json["exposure"], "S");
        assert_eq!(json["technical_impact"], "T");
        assert_eq!(serde_json::to_value(ActionTier::TrackStar).unwrap(), "Track*");
        assert_eq!(serde_json::to_value(UrgencyTier::OutOfCycle).unwrap(), "Out-of-Cycle");
    }

    #[test]
    fn test_all_combinations() {
        assert_eq!(DecisionInput::all().count(), 18);
    }
}
