//! Rules deciding which spending draws down a budget item.
//!
//! Linked spending carries the budget item's id. Legacy records have no link
//! and are matched by name instead; that fallback can attribute one payment
//! to several same-named budget items, so callers log such overlaps.

use trip_domain::{BudgetItem, ReconciliationPolicy, SpendingItem};

/// Spending explicitly linked to `budget`.
pub fn matches_by_budget_item_id(budget: &BudgetItem, spending: &SpendingItem) -> bool {
    spending.budget_item_id == Some(budget.id)
}

/// Unlinked spending whose name equals `budget`'s name, ignoring case and
/// surrounding whitespace.
pub fn matches_by_normalized_name(budget: &BudgetItem, spending: &SpendingItem) -> bool {
    spending.budget_item_id.is_none()
        && normalize_name(&spending.name) == normalize_name(&budget.name)
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether `spending` counts against `budget` under `policy`.
///
/// Completion is not checked here; see [`draws_down`].
pub fn is_matched(
    policy: ReconciliationPolicy,
    budget: &BudgetItem,
    spending: &SpendingItem,
) -> bool {
    match policy {
        ReconciliationPolicy::LinkedOnly => matches_by_budget_item_id(budget, spending),
        ReconciliationPolicy::LinkedOrName => {
            matches_by_budget_item_id(budget, spending)
                || matches_by_normalized_name(budget, spending)
        }
    }
}

/// Completed spending matched to `budget` under `policy`.
pub fn draws_down(
    policy: ReconciliationPolicy,
    budget: &BudgetItem,
    spending: &SpendingItem,
) -> bool {
    spending.is_completed && is_matched(policy, budget, spending)
}
