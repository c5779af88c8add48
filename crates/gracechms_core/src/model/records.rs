//! Persisted record shapes.
//!
//! Field names match the JSON stored under each collection key, so existing
//! browser-side data deserializes unchanged. Missing optional fields are
//! tolerated on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Church member directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Member {
    /// `"First Last"` with no trailing space when the last name is blank.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Uppercased first letters of first and last name, e.g. `AJ`.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect::<String>()
            .to_uppercase()
    }
}

/// One check-in. `member_id` is `None` for guests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: String,
    #[serde(default)]
    pub member_id: Option<String>,
    pub checked_in_at: DateTime<Utc>,
    #[serde(default)]
    pub method: String,
}

/// Recorded gift; `amount` is in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub amount: i64,
    #[serde(default)]
    pub donor_name: String,
    #[serde(default)]
    pub fund: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Small group; `leader` is a weak member id and may be blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub leader: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: String,
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundCheck {
    pub id: String,
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub status: String,
}

/// Looks up a member by weak reference.
///
/// Returns `None` for blank or dangling ids; callers render a fallback.
pub fn find_member<'a>(members: &'a [Member], member_id: &str) -> Option<&'a Member> {
    if member_id.is_empty() {
        return None;
    }
    members.iter().find(|member| member.id == member_id)
}

#[cfg(test)]
mod tests {
    use super::{find_member, Member};
    use std::collections::BTreeSet;

    fn member(id: &str, first: &str, last: &str) -> Member {
        Member {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: String::new(),
            email: String::new(),
            tags: BTreeSet::new(),
        }
    }

    #[test]
    fn initials_use_first_letters_uppercased() {
        assert_eq!(member("m_1", "alice", "johnson").initials(), "AJ");
        assert_eq!(member("m_2", "", "").initials(), "");
    }

    #[test]
    fn full_name_trims_missing_last_name() {
        assert_eq!(member("m_1", "Clara", "").full_name(), "Clara");
    }

    #[test]
    fn find_member_ignores_blank_and_dangling_ids() {
        let members = vec![member("m_1", "Alice", "Johnson")];
        assert!(find_member(&members, "").is_none());
        assert!(find_member(&members, "m_404").is_none());
        assert_eq!(
            find_member(&members, "m_1").map(|m| m.first_name.as_str()),
            Some("Alice")
        );
    }
}
