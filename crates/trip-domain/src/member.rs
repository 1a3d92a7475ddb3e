//! Trip membership types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A person taking part in a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: MemberStatus,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>, status: MemberStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            status,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_owner(&self) -> bool {
        self.status == MemberStatus::Owner
    }

    /// Members allowed to manage other members of the trip.
    pub fn can_manage_members(&self) -> bool {
        matches!(self.status, MemberStatus::Owner | MemberStatus::CoOrganizer)
    }
}

impl NamedEntity for Member {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Lifecycle of a member inside a trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStatus {
    Owner,
    CoOrganizer,
    Joined,
    Invited,
    Pending,
}

impl MemberStatus {
    /// Invitations that have not been accepted yet.
    pub fn is_awaiting_acceptance(self) -> bool {
        matches!(self, MemberStatus::Invited | MemberStatus::Pending)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MemberStatus::Owner => "owner",
            MemberStatus::CoOrganizer => "co-organizer",
            MemberStatus::Joined => "joined",
            MemberStatus::Invited => "invited",
            MemberStatus::Pending => "pending",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_kebab_case() {
        let json = serde_json::to_string(&MemberStatus::CoOrganizer).unwrap();
        assert_eq!(json, "\"co-organizer\"");
        let parsed: MemberStatus = serde_json::from_str("\"invited\"").unwrap();
        assert_eq!(parsed, MemberStatus::Invited);
    }

    #[test]
    fn only_owner_and_co_organizer_manage_members() {
        assert!(Member::new("a", "Asha", MemberStatus::Owner).can_manage_members());
        assert!(Member::new("b", "Ben", MemberStatus::CoOrganizer).can_manage_members());
        assert!(!Member::new("c", "Chen", MemberStatus::Joined).can_manage_members());
    }
}
