//! Folds budget and spending items into per-member balances.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};
use trip_domain::{
    BudgetItem, ContributionBasis, ExpenseCategory, Member, MemberId, ReconciliationPolicy,
    SpendingItem, Trip,
};
use uuid::Uuid;

use crate::{reconciliation, CoreResult, ShareService};

/// Budgeted versus spent totals for one member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub name: String,
    pub budgeted: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl MemberBalance {
    fn empty(member_id: MemberId, name: String) -> Self {
        Self {
            member_id,
            name,
            budgeted: 0.0,
            spent: 0.0,
            remaining: 0.0,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }

    /// The member's contribution under `basis`.
    pub fn contribution(&self, basis: ContributionBasis) -> f64 {
        match basis {
            ContributionBasis::Assigned => self.budgeted,
            ContributionBasis::Paid => self.spent,
        }
    }
}

/// Trip-level aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TripTotals {
    pub total_budgeted: f64,
    pub total_spent: f64,
    pub remaining_budget: f64,
}

impl TripTotals {
    pub fn total_for(&self, basis: ContributionBasis) -> f64 {
        match basis {
            ContributionBasis::Assigned => self.total_budgeted,
            ContributionBasis::Paid => self.total_spent,
        }
    }
}

/// Per-member balances in trip member order, plus trip totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub members: Vec<MemberBalance>,
    pub totals: TripTotals,
}

impl BalanceSheet {
    pub fn member(&self, id: &MemberId) -> Option<&MemberBalance> {
        self.members.iter().find(|row| &row.member_id == id)
    }

    pub fn contributions(&self, basis: ContributionBasis) -> HashMap<MemberId, f64> {
        self.members
            .iter()
            .map(|row| (row.member_id.clone(), row.contribution(basis)))
            .collect()
    }
}

/// Remaining headroom of a single budget item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRemaining {
    pub budget_item_id: Uuid,
    pub name: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl ItemRemaining {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

#[derive(Default)]
struct Accumulator {
    rows: Vec<MemberBalance>,
    index: HashMap<MemberId, usize>,
}

impl Accumulator {
    fn with_members(members: &[Member]) -> Self {
        let mut acc = Self::default();
        for member in members {
            acc.row(&member.id, || member.name.clone());
        }
        acc
    }

    fn row(&mut self, id: &MemberId, name: impl FnOnce() -> String) -> &mut MemberBalance {
        let next = self.rows.len();
        let slot = *self.index.entry(id.clone()).or_insert(next);
        if slot == next {
            self.rows.push(MemberBalance::empty(id.clone(), name()));
        }
        &mut self.rows[slot]
    }

    fn stray(&mut self, id: &MemberId, item: &str) -> &mut MemberBalance {
        self.row(id, || {
            warn!(member = %id, item, "item references a member outside the trip");
            id.to_string()
        })
    }
}

/// Stateless aggregation over immutable trip snapshots.
pub struct BalanceService;

impl BalanceService {
    /// Computes budgeted, spent and remaining amounts per member.
    ///
    /// Only completed spending counts. `spent` is split over the spending
    /// item's own members, who may differ from the planned ones.
    pub fn compute_balances(
        members: &[Member],
        budget_items: &[BudgetItem],
        spending_items: &[SpendingItem],
    ) -> CoreResult<BalanceSheet> {
        debug!(
            members = members.len(),
            budget_items = budget_items.len(),
            spending_items = spending_items.len(),
            "computing balances"
        );
        let mut acc = Accumulator::with_members(members);
        let mut totals = TripTotals::default();

        for item in budget_items {
            for (id, share) in ShareService::item_shares(item)? {
                acc.stray(&id, &item.name).budgeted += share;
            }
            totals.total_budgeted += item.amount;
        }

        for item in spending_items.iter().filter(|item| item.is_completed) {
            for (id, share) in ShareService::item_shares(item)? {
                acc.stray(&id, &item.name).spent += share;
            }
            totals.total_spent += item.amount;
        }

        for row in &mut acc.rows {
            row.remaining = row.budgeted - row.spent;
        }
        totals.remaining_budget = totals.total_budgeted - totals.total_spent;

        Ok(BalanceSheet {
            members: acc.rows,
            totals,
        })
    }

    pub fn compute_trip_balances(trip: &Trip) -> CoreResult<BalanceSheet> {
        Self::compute_balances(&trip.members, &trip.budget_items, &trip.spending_items)
    }

    /// `budget_item.amount` minus the completed spending matched to it.
    ///
    /// Negative when the item is over-spent.
    pub fn item_remaining(
        budget_item: &BudgetItem,
        spending_items: &[SpendingItem],
        policy: ReconciliationPolicy,
    ) -> f64 {
        budget_item.amount - Self::matched_spending(budget_item, spending_items, policy)
    }

    /// Rows for the "remaining budget items" table, in budget item order.
    pub fn remaining_items(
        budget_items: &[BudgetItem],
        spending_items: &[SpendingItem],
        policy: ReconciliationPolicy,
    ) -> Vec<ItemRemaining> {
        if policy == ReconciliationPolicy::LinkedOrName {
            warn_on_ambiguous_names(budget_items, spending_items);
        }
        budget_items
            .iter()
            .map(|item| {
                let spent = Self::matched_spending(item, spending_items, policy);
                ItemRemaining {
                    budget_item_id: item.id,
                    name: item.name.clone(),
                    category: item.category,
                    amount: item.amount,
                    spent,
                    remaining: item.amount - spent,
                }
            })
            .collect()
    }

    /// Completed spending that draws down no budget item.
    pub fn unplanned_spending<'a>(
        budget_items: &[BudgetItem],
        spending_items: &'a [SpendingItem],
        policy: ReconciliationPolicy,
    ) -> Vec<&'a SpendingItem> {
        spending_items
            .iter()
            .filter(|spending| spending.is_completed)
            .filter(|spending| {
                !budget_items
                    .iter()
                    .any(|budget| reconciliation::is_matched(policy, budget, spending))
            })
            .collect()
    }

    fn matched_spending(
        budget_item: &BudgetItem,
        spending_items: &[SpendingItem],
        policy: ReconciliationPolicy,
    ) -> f64 {
        spending_items
            .iter()
            .filter(|spending| reconciliation::draws_down(policy, budget_item, spending))
            .map(|spending| spending.amount)
            .sum()
    }
}

fn warn_on_ambiguous_names(budget_items: &[BudgetItem], spending_items: &[SpendingItem]) {
    for spending in spending_items.iter().filter(|item| item.is_unlinked()) {
        let matches = budget_items
            .iter()
            .filter(|budget| reconciliation::matches_by_normalized_name(budget, spending))
            .count();
        if matches > 1 {
            warn!(
                spending = %spending.id,
                name = %spending.name,
                matches,
                "unlinked spending matches several budget items by name"
            );
        }
    }
}
