//! Target directory: who can be petitioned, in which district, until when.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry in the fetched target directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub district: String,
    /// Signing deadline as `YYYY-MM-DD`.
    pub deadline: String,
}

impl Target {
    /// Whole days left until the signing deadline, negative once past.
    ///
    /// `None` when the deadline string does not parse; the directory is
    /// external content and a malformed date should not break generation.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        let deadline = NaiveDate::parse_from_str(&self.deadline, "%Y-%m-%d").ok()?;
        Some((deadline - today).num_days())
    }
}

/// The fetched directory of targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetDirectory {
    pub targets: Vec<Target>,
}

impl TargetDirectory {
    /// Find a target by its exact name.
    pub fn find(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// True when `name` has a directory entry.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TargetDirectory {
        serde_json::from_str(
            r#"{"targets": [
                {"name": "Jane Doe", "district": "3rd district", "deadline": "2026-09-30"},
                {"name": "John Roe", "district": "7th district", "deadline": "not-a-date"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_by_name() {
        let dir = sample();
        assert_eq!(dir.find("Jane Doe").unwrap().district, "3rd district");
        assert!(dir.find("jane doe").is_none());
        assert!(!dir.contains("Nobody"));
    }

    #[test]
    fn test_days_remaining() {
        let dir = sample();
        let today = NaiveDate::from_ymd_opt(2026, 9, 20).unwrap();
        assert_eq!(dir.find("Jane Doe").unwrap().days_remaining(today), Some(10));
        // Past the deadline the count goes negative rather than clamping.
        let later = NaiveDate::from_ymd_opt(2026, 10, 2).unwrap();
        assert_eq!(dir.find("Jane Doe").unwrap().days_remaining(later), Some(-2));
    }

    #[test]
    fn test_malformed_deadline_is_not_fatal() {
        let dir = sample();
        let today = NaiveDate::from_ymd_opt(2026, 9, 20).unwrap();
        assert_eq!(dir.find("John Roe").unwrap().days_remaining(today), None);
    }
}
