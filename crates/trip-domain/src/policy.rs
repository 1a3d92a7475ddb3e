//! Policy switches shared by the settlement engine and user configuration.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Determines what counts as a member's contribution when settling up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionBasis {
    /// Budgeted per-item share: who was assigned to pay.
    Assigned,
    /// Completed spending share: who recorded having paid.
    #[default]
    Paid,
}

impl fmt::Display for ContributionBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContributionBasis::Assigned => f.write_str("assigned"),
            ContributionBasis::Paid => f.write_str("paid"),
        }
    }
}

impl FromStr for ContributionBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assigned" | "budgeted" => Ok(ContributionBasis::Assigned),
            "paid" | "spent" => Ok(ContributionBasis::Paid),
            other => Err(format!("unknown contribution basis `{other}`")),
        }
    }
}

/// Decides which spending items draw down a budget item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReconciliationPolicy {
    /// Only spending explicitly linked through `budget_item_id`.
    LinkedOnly,
    /// Linked spending, plus unlinked spending whose name matches
    /// the budget item's name case-insensitively.
    #[default]
    LinkedOrName,
}

impl fmt::Display for ReconciliationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationPolicy::LinkedOnly => f.write_str("linked-only"),
            ReconciliationPolicy::LinkedOrName => f.write_str("linked-or-name"),
        }
    }
}

impl FromStr for ReconciliationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linked-only" | "linked" => Ok(ReconciliationPolicy::LinkedOnly),
            "linked-or-name" | "name" => Ok(ReconciliationPolicy::LinkedOrName),
            other => Err(format!("unknown reconciliation policy `{other}`")),
        }
    }
}
