use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use super::signals::HIGH_EXPLOIT_PROBABILITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Watch priority from remote reachability, known exploitation and exploit
/// probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WatchPriority {
    /// 0 to 10, two decimals
    pub score: f64,
    pub level: PriorityLevel,
}

impl WatchPriority {
    /// `epss*5 + 2 if remote + 3 if known exploited`, capped at 10.
    /// An unknown probability counts as zero here.
    pub fn compute(remote: bool, known_exploited: bool, epss: Option<f64>) -> Self {
        let epss = epss.filter(|e| e.is_finite()).unwrap_or(0.0).clamp(0.0, 1.0);
        let raw = epss * 5.0
            + if remote { 2.0 } else { 0.0 }
            + if known_exploited { 3.0 } else { 0.0 };
        let score = (raw.min(10.0) * 100.0).round() / 100.0;

        let level = if score >= 8.0
            || (known_exploited && remote)
            || (known_exploited && epss >= HIGH_EXPLOIT_PROBABILITY)
        {
            PriorityLevel::Critical
        } else if score >= 6.0 {
            PriorityLevel::High
        } else if score >= 3.0 {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        };

        Self { score, level }
    }
}

/// Lifecycle state of a tracked vulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingStatus {
    #[default]
    Active,
    Mitigated,
    Closed,
}

impl TrackingStatus {
    /// Unknown strings count as active.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("mitigated") => Self::Mitigated,
            Some("closed") => Self::Closed,
            _ => Self::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSchedule {
    pub frequency_days: u64,
    pub rationale: &'static str,
    pub next_review: NaiveDate,
}

/// How often a vulnerability should be looked at again, counted from the
/// last review.
pub fn review_schedule(level: PriorityLevel, status: TrackingStatus, last_review: NaiveDate) -> ReviewSchedule {
    let (frequency_days, rationale) = match (status, level) {
        (TrackingStatus::Mitigated | TrackingStatus::Closed, _) => {
            (90, "Mitigated or closed: review spaced out for archiving and monitoring.")
        }
        (_, PriorityLevel::Critical) => (7, "CRITICAL: remote, known exploited or high EPSS, weekly review."),
        (_, PriorityLevel::High) => (14, "HIGH: review every two weeks."),
        (_, PriorityLevel::Medium) => (30, "MEDIUM: monthly review."),
        (_, PriorityLevel::Low) => (60, "LOW: review every two months."),
    };
    let next_review = last_review
        .checked_add_days(Days::new(frequency_days))
        .unwrap_or(NaiveDate::MAX);

    ReviewSchedule { frequency_days, rationale, next_review }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula_and_cap() {
        assert_eq!(WatchPriority::compute(false, false, None).score, 0.0);
        assert_eq!(WatchPriority::compute(true, false, Some(0.5)).score, 4.5);
        assert_eq!(WatchPriority::compute(true, true, Some(1.0)).score, 10.0);
        assert_eq!(WatchPriority::compute(false, false, Some(0.123456)).score, 0.62);
    }

    #[test]
    fn test_known_exploited_and_remote_is_critical() {
        // 2 + 3 = 5, below 8, still critical
        let p = WatchPriority::compute(true, true, None);
        assert_eq!(p.score, 5.0);
        assert_eq!(p.level, PriorityLevel::Critical);
    }

    #[test]
    fn test_known_exploited_with_high_epss_is_critical() {
        let p = WatchPriority::compute(false, true, Some(0.2));
        assert_eq!(p.score, 4.0);
        assert_eq!(p.level, PriorityLevel::Critical);

        let p = WatchPriority::compute(false, true, Some(0.19));
        assert_eq!(p.level, PriorityLevel::Medium);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(WatchPriority::compute(true, false, Some(0.8)).level, PriorityLevel::High); // 6.0
        assert_eq!(WatchPriority::compute(true, false, Some(0.2)).level, PriorityLevel::Medium); // 3.0
        assert_eq!(WatchPriority::compute(true, false, Some(0.1)).level, PriorityLevel::Low); // 2.5
        assert_eq!(WatchPriority::compute(false, false, Some(1.0)).level, PriorityLevel::Medium); // 5.0
    }

    #[test]
    fn test_review_cadence() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let cases = [
            (PriorityLevel::Critical, 7),
            (PriorityLevel::High, 14),
            (PriorityLevel::Medium, 30),
            (PriorityLevel::Low, 60),
        ];
        for (level, days) in cases {
            let schedule = review_schedule(level, TrackingStatus::Active, today);
            assert_eq!(schedule.frequency_days, days);
            assert_eq!(schedule.next_review, today + Days::new(days));
        }

        let closed = review_schedule(PriorityLevel::Critical, TrackingStatus::Closed, today);
        assert_eq!(closed.frequency_days, 90);
        assert_eq!(closed.next_review, NaiveDate::from_ymd_opt(2025, 5, 30).unwrap());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(TrackingStatus::from_raw(Some("Mitigated")), TrackingStatus::Mitigated);
        assert_eq!(TrackingStatus::from_raw(Some("closed")), TrackingStatus::Closed);
        assert_eq!(TrackingStatus::from_raw(Some("whatever")), TrackingStatus::Active);
        assert_eq!(TrackingStatus::from_raw(None), TrackingStatus::Active);
    }
}
