//! Planned (budget) and actual (spending) expense records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::ExpenseCategory, common::*};

/// A planned expense shared equally among `member_ids`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub category: ExpenseCategory,
    pub member_ids: Vec<MemberId>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_unplanned: bool,
}

impl BudgetItem {
    pub fn new(
        trip_id: Uuid,
        name: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        member_ids: Vec<MemberId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            name: name.into(),
            amount,
            category,
            member_ids,
            created_at: Utc::now(),
            is_unplanned: false,
        }
    }

    pub fn unplanned(mut self) -> Self {
        self.is_unplanned = true;
        self
    }

    /// Records a completed payment against this item, paid by `payers`.
    pub fn record_spending(&self, amount: f64, payers: Vec<MemberId>) -> SpendingItem {
        SpendingItem::new(self.trip_id, self.name.clone(), amount, self.category, payers)
            .linked_to(self.id)
            .completed()
    }
}

impl Identifiable for BudgetItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for BudgetItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for BudgetItem {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Shared for BudgetItem {
    fn member_ids(&self) -> &[MemberId] {
        &self.member_ids
    }
}

/// An actual payment event, optionally drawn against a [`BudgetItem`].
///
/// `member_ids` lists the members who paid. Drafts (`is_completed == false`)
/// carry no financial effect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendingItem {
    pub id: Uuid,
    pub trip_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_item_id: Option<Uuid>,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub category: ExpenseCategory,
    pub member_ids: Vec<MemberId>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
}

impl SpendingItem {
    pub fn new(
        trip_id: Uuid,
        name: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        member_ids: Vec<MemberId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            budget_item_id: None,
            name: name.into(),
            amount,
            category,
            member_ids,
            created_at: Utc::now(),
            is_completed: false,
        }
    }

    pub fn linked_to(mut self, budget_item_id: Uuid) -> Self {
        self.budget_item_id = Some(budget_item_id);
        self
    }

    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    /// Spending with no budget counterpart.
    pub fn is_unlinked(&self) -> bool {
        self.budget_item_id.is_none()
    }
}

impl Identifiable for SpendingItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for SpendingItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for SpendingItem {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Shared for SpendingItem {
    fn member_ids(&self) -> &[MemberId] {
        &self.member_ids
    }
}
