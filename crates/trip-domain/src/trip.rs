//! The trip aggregate: members plus planned and actual expenses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::*,
    item::{BudgetItem, SpendingItem},
    member::{Member, MemberStatus},
};

const JOIN_CODE_LEN: usize = 6;

/// A shared budgeting workspace. Owns its members and items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Member>,
    #[serde(default)]
    pub budget_items: Vec<BudgetItem>,
    #[serde(default)]
    pub spending_items: Vec<SpendingItem>,
    pub join_code: String,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Creates a trip whose first member is `owner`.
    pub fn new(name: impl Into<String>, owner: Member) -> Self {
        let mut owner = owner;
        owner.status = MemberStatus::Owner;
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: vec![owner],
            budget_items: Vec::new(),
            spending_items: Vec::new(),
            join_code: generate_join_code(),
            created_at: Utc::now(),
        }
    }

    pub fn owner(&self) -> Option<&Member> {
        self.members.first()
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|member| &member.id == id)
    }

    pub fn member_name(&self, id: &MemberId) -> Option<&str> {
        self.member(id).map(|member| member.name.as_str())
    }

    pub fn member_ids(&self) -> Vec<MemberId> {
        self.members.iter().map(|member| member.id.clone()).collect()
    }

    pub fn add_member(&mut self, member: Member) -> Result<(), MembershipError> {
        if self.member(&member.id).is_some() {
            return Err(MembershipError::DuplicateMember(member.id));
        }
        if member.status == MemberStatus::Owner {
            return Err(MembershipError::OwnerImmutable);
        }
        self.members.push(member);
        Ok(())
    }

    /// Removes `target` on behalf of `actor`. The owner can never be removed.
    pub fn remove_member(
        &mut self,
        actor: &MemberId,
        target: &MemberId,
    ) -> Result<Member, MembershipError> {
        let allowed = self
            .member(actor)
            .map(Member::can_manage_members)
            .ok_or_else(|| MembershipError::UnknownMember(actor.clone()))?;
        if !allowed {
            return Err(MembershipError::NotPermitted(actor.clone()));
        }
        let index = self.member_index(target)?;
        if self.members[index].is_owner() {
            return Err(MembershipError::OwnerImmutable);
        }
        Ok(self.members.remove(index))
    }

    pub fn rename_member(
        &mut self,
        id: &MemberId,
        name: impl Into<String>,
    ) -> Result<(), MembershipError> {
        let index = self.member_index(id)?;
        self.members[index].name = name.into();
        Ok(())
    }

    pub fn set_member_status(
        &mut self,
        id: &MemberId,
        status: MemberStatus,
    ) -> Result<(), MembershipError> {
        let index = self.member_index(id)?;
        if self.members[index].is_owner() || status == MemberStatus::Owner {
            return Err(MembershipError::OwnerImmutable);
        }
        self.members[index].status = status;
        Ok(())
    }

    /// Promotes an invited or pending member to `joined`.
    pub fn accept_invite(&mut self, id: &MemberId) -> Result<(), MembershipError> {
        let index = self.member_index(id)?;
        let member = &mut self.members[index];
        if !member.status.is_awaiting_acceptance() {
            return Err(MembershipError::NotInvited(id.clone()));
        }
        member.status = MemberStatus::Joined;
        Ok(())
    }

    pub fn add_budget_item(&mut self, mut item: BudgetItem) -> Uuid {
        item.trip_id = self.id;
        let id = item.id;
        self.budget_items.push(item);
        id
    }

    pub fn add_spending_item(&mut self, mut item: SpendingItem) -> Uuid {
        item.trip_id = self.id;
        let id = item.id;
        self.spending_items.push(item);
        id
    }

    pub fn budget_item(&self, id: Uuid) -> Option<&BudgetItem> {
        self.budget_items.iter().find(|item| item.id == id)
    }

    fn member_index(&self, id: &MemberId) -> Result<usize, MembershipError> {
        self.members
            .iter()
            .position(|member| &member.id == id)
            .ok_or_else(|| MembershipError::UnknownMember(id.clone()))
    }
}

impl Identifiable for Trip {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Trip {
    fn name(&self) -> &str {
        &self.name
    }
}

fn generate_join_code() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(JOIN_CODE_LEN)
        .collect::<String>()
        .to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised by membership changes on a [`Trip`].
pub enum MembershipError {
    DuplicateMember(MemberId),
    UnknownMember(MemberId),
    NotPermitted(MemberId),
    NotInvited(MemberId),
    OwnerImmutable,
}

impl fmt::Display for MembershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipError::DuplicateMember(id) => write!(f, "member `{id}` already exists"),
            MembershipError::UnknownMember(id) => write!(f, "member `{id}` not found"),
            MembershipError::NotPermitted(id) => {
                write!(f, "member `{id}` may not manage trip members")
            }
            MembershipError::NotInvited(id) => write!(f, "member `{id}` has no pending invite"),
            MembershipError::OwnerImmutable => f.write_str("the trip owner cannot be changed"),
        }
    }
}

impl std::error::Error for MembershipError {}
