use chrono::NaiveDate;
use serde_json::Value;
use crate::config::KevMatchPolicy;
use crate::models::{KnownExploited, VulnId};

/// Scan the known-exploited catalog for an exact identifier match.
pub fn normalize_known_exploited(catalog: &Value, id: &VulnId, policy: KevMatchPolicy) -> KnownExploited {
    let mut hits = catalog
        .get("vulnerabilities")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|entry| entry.get("cveID").and_then(Value::as_str) == Some(id.as_str()))
        .map(|entry| entry.get("dateAdded").and_then(Value::as_str).and_then(parse_date));

    let matched = match policy {
        KevMatchPolicy::First => hits.next(),
        KevMatchPolicy::Latest => hits.reduce(|best, date| best.max(date)),
    };

    KnownExploited {
        flag: matched.is_some(),
        date_added: matched.flatten(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Value {
        json!({
            "catalogVersion": "2025.01.15",
            "vulnerabilities": [
                { "cveID": "CVE-2021-44228", "dateAdded": "2021-12-10" },
                { "cveID": "CVE-2023-4966", "dateAdded": "not a date" },
                { "cveID": "CVE-2021-44228", "dateAdded": "2022-01-03" },
            ]
        })
    }

    fn id(raw: &str) -> VulnId {
        VulnId::parse(raw).unwrap()
    }

    #[test]
    fn test_first_match_policy() {
        let kev = normalize_known_exploited(&catalog(), &id("CVE-2021-44228"), KevMatchPolicy::First);
        assert!(kev.flag);
        assert_eq!(kev.date_added, NaiveDate::from_ymd_opt(2021, 12, 10));
    }

    #[test]
    fn test_latest_match_policy() {
        let kev = normalize_known_exploited(&catalog(), &id("CVE-2021-44228"), KevMatchPolicy::Latest);
        assert_eq!(kev.date_added, NaiveDate::from_ymd_opt(2022, 1, 3));
    }

    #[test]
    fn test_match_with_unparseable_date() {
        let kev = normalize_known_exploited(&catalog(), &id("CVE-2023-4966"), KevMatchPolicy::First);
        assert!(kev.flag);
        assert_eq!(kev.date_added, None);
    }

    #[test]
    fn test_no_match() {
        let kev = normalize_known_exploited(&catalog(), &id("CVE-2020-0001"), KevMatchPolicy::First);
        assert_eq!(kev, KnownExploited { flag: false, date_added: None });
    }

    #[test]
    fn test_missing_vulnerability_list() {
        let kev = normalize_known_exploited(&json!({}), &id("CVE-2021-44228"), KevMatchPolicy::First);
        assert!(!kev.flag);
    }
}
