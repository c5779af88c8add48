//! Collection registry: storage keys, id prefixes and seed values.
//!
//! # Invariants
//! - Each collection lives under exactly one storage key.
//! - Seed values are deterministic apart from timestamps taken at seeding.

use crate::model::records::{
    Attendance, BackgroundCheck, Donation, Event, Group, Member, Volunteer,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Names of the seven persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKey {
    Members,
    Attendance,
    Donations,
    Events,
    Groups,
    Volunteers,
    BackgroundChecks,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 7] = [
        CollectionKey::Members,
        CollectionKey::Attendance,
        CollectionKey::Donations,
        CollectionKey::Events,
        CollectionKey::Groups,
        CollectionKey::Volunteers,
        CollectionKey::BackgroundChecks,
    ];

    /// Storage key the serialized sequence is written under.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Members => "gc_members_v1",
            Self::Attendance => "gc_attendance_v1",
            Self::Donations => "gc_donations_v1",
            Self::Events => "gc_events_v1",
            Self::Groups => "gc_groups_v1",
            Self::Volunteers => "gc_vols_v1",
            Self::BackgroundChecks => "gc_backgrounds_v1",
        }
    }

    /// Prefix of generated record ids, without the `_` separator.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Members => "m",
            Self::Attendance => "a",
            Self::Donations => "d",
            Self::Events => "e",
            Self::Groups => "g",
            Self::Volunteers => "v",
            Self::BackgroundChecks => "b",
        }
    }
}

impl Display for CollectionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// A record type persisted as one ordered collection.
pub trait Collection: Clone + Serialize + DeserializeOwned {
    const KEY: CollectionKey;

    fn id(&self) -> &str;

    /// Default content written on first access. `seeded_at` stamps
    /// time-dependent seed fields.
    fn seed(seeded_at: DateTime<Utc>) -> Vec<Self>;
}

impl Collection for Member {
    const KEY: CollectionKey = CollectionKey::Members;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(_seeded_at: DateTime<Utc>) -> Vec<Self> {
        vec![
            seed_member("m_1", "Alice", "Johnson", "555-0101", "alice@example.com", &["volunteer"]),
            seed_member("m_2", "Ben", "Williams", "555-0102", "ben@example.com", &["new"]),
            seed_member("m_3", "Clara", "Nguyen", "555-0103", "clara@example.com", &[]),
        ]
    }
}

impl Collection for Attendance {
    const KEY: CollectionKey = CollectionKey::Attendance;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(_seeded_at: DateTime<Utc>) -> Vec<Self> {
        Vec::new()
    }
}

impl Collection for Donation {
    const KEY: CollectionKey = CollectionKey::Donations;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(_seeded_at: DateTime<Utc>) -> Vec<Self> {
        Vec::new()
    }
}

impl Collection for Event {
    const KEY: CollectionKey = CollectionKey::Events;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(seeded_at: DateTime<Utc>) -> Vec<Self> {
        vec![Event {
            id: "e_1".to_string(),
            title: "Sunday Service".to_string(),
            desc: "Main Sunday gathering".to_string(),
            start: seeded_at,
            campus: "Main".to_string(),
            capacity: Some(200),
        }]
    }
}

impl Collection for Group {
    const KEY: CollectionKey = CollectionKey::Groups;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(_seeded_at: DateTime<Utc>) -> Vec<Self> {
        vec![Group {
            id: "g_1".to_string(),
            name: "Life Group - North".to_string(),
            leader: "m_1".to_string(),
        }]
    }
}

impl Collection for Volunteer {
    const KEY: CollectionKey = CollectionKey::Volunteers;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(_seeded_at: DateTime<Utc>) -> Vec<Self> {
        vec![Volunteer {
            id: "v_1".to_string(),
            member_id: "m_1".to_string(),
            role: "Usher".to_string(),
        }]
    }
}

impl Collection for BackgroundCheck {
    const KEY: CollectionKey = CollectionKey::BackgroundChecks;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(_seeded_at: DateTime<Utc>) -> Vec<Self> {
        vec![BackgroundCheck {
            id: "b_1".to_string(),
            member_id: "m_1".to_string(),
            status: "clear".to_string(),
        }]
    }
}

fn seed_member(
    id: &str,
    first_name: &str,
    last_name: &str,
    phone: &str,
    email: &str,
    tags: &[&str],
) -> Member {
    Member {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect::<BTreeSet<_>>(),
    }
}
