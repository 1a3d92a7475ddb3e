//! Greedy debt netting: turns member balances into pairwise transfers.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};
use trip_domain::{ContributionBasis, Member, MemberId, Trip};

use crate::{BalanceService, BalanceSheet, CoreResult};

/// Balances within this many currency units of zero count as settled.
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// One payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub from: MemberId,
    pub from_name: String,
    pub to: MemberId,
    pub to_name: String,
    pub amount: f64,
}

/// A member's contribution and resulting balance in a settlement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberContribution {
    pub member_id: MemberId,
    pub name: String,
    pub contribution: f64,
    /// `contribution - per_person_share`; positive means the member is owed.
    pub balance: f64,
}

/// Everything needed to render or verify a settlement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementPlan {
    pub basis: ContributionBasis,
    pub total_expenses: f64,
    pub per_person_share: f64,
    pub contributions: Vec<MemberContribution>,
    pub transfers: Vec<Transfer>,
}

impl SettlementPlan {
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Party<'a> {
    id: &'a MemberId,
    name: &'a str,
    balance: f64,
}

pub struct SettlementService;

impl SettlementService {
    /// Matches the largest debtor with the largest creditor until one side
    /// runs out.
    ///
    /// Each member's balance is `contribution - per_person_share`; members
    /// missing from `contributions` contributed nothing. A repeated member id
    /// counts once. Ties keep member order, so the result is deterministic
    /// for a given input.
    pub fn solve_settlements(
        members: &[Member],
        per_person_share: f64,
        contributions: &HashMap<MemberId, f64>,
    ) -> Vec<Transfer> {
        Self::solve(&distinct_members(members), per_person_share, contributions)
    }

    fn solve(
        members: &[&Member],
        per_person_share: f64,
        contributions: &HashMap<MemberId, f64>,
    ) -> Vec<Transfer> {
        let mut debtors = Vec::new();
        let mut creditors = Vec::new();
        for member in members.iter().copied() {
            let contributed = contributions.get(&member.id).copied().unwrap_or(0.0);
            let party = Party {
                id: &member.id,
                name: &member.name,
                balance: contributed - per_person_share,
            };
            if party.balance < -SETTLEMENT_EPSILON {
                debtors.push(party);
            } else if party.balance > SETTLEMENT_EPSILON {
                creditors.push(party);
            }
        }

        // `sort_by` is stable: equal balances keep member order.
        debtors.sort_by(|a, b| a.balance.total_cmp(&b.balance));
        creditors.sort_by(|a, b| b.balance.total_cmp(&a.balance));

        let mut transfers = Vec::new();
        let (mut d, mut c) = (0, 0);
        while d < debtors.len() && c < creditors.len() {
            let debtor = &mut debtors[d];
            let creditor = &mut creditors[c];
            let amount = (-debtor.balance).min(creditor.balance);
            if amount > SETTLEMENT_EPSILON {
                transfers.push(Transfer {
                    from: debtor.id.clone(),
                    from_name: debtor.name.to_string(),
                    to: creditor.id.clone(),
                    to_name: creditor.name.to_string(),
                    amount,
                });
            }
            debtor.balance += amount;
            creditor.balance -= amount;
            if debtor.balance.abs() < SETTLEMENT_EPSILON {
                d += 1;
            }
            if creditor.balance.abs() < SETTLEMENT_EPSILON {
                c += 1;
            }
        }

        debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transfers = transfers.len(),
            "settlement solved"
        );
        transfers
    }

    /// Builds a settlement plan from an already computed balance sheet.
    ///
    /// The fair share is the basis total split evenly over all `members`,
    /// regardless of who was assigned to individual items.
    pub fn settle_balances(
        members: &[Member],
        sheet: &BalanceSheet,
        basis: ContributionBasis,
    ) -> SettlementPlan {
        let members = distinct_members(members);
        let total_expenses = sheet.totals.total_for(basis);
        let per_person_share = if members.is_empty() {
            0.0
        } else {
            total_expenses / members.len() as f64
        };

        let contributions_by_id = sheet.contributions(basis);
        for row in &sheet.members {
            let in_trip = members.iter().any(|member| member.id == row.member_id);
            let contribution = row.contribution(basis);
            if !in_trip && contribution != 0.0 {
                warn!(
                    member = %row.member_id,
                    contribution,
                    "contribution from a member outside the trip is left unsettled"
                );
            }
        }

        let contributions = members
            .iter()
            .map(|member| {
                let contribution = contributions_by_id.get(&member.id).copied().unwrap_or(0.0);
                MemberContribution {
                    member_id: member.id.clone(),
                    name: member.name.clone(),
                    contribution,
                    balance: contribution - per_person_share,
                }
            })
            .collect();

        let transfers = Self::solve(&members, per_person_share, &contributions_by_id);

        SettlementPlan {
            basis,
            total_expenses,
            per_person_share,
            contributions,
            transfers,
        }
    }

    pub fn settle_trip(trip: &Trip, basis: ContributionBasis) -> CoreResult<SettlementPlan> {
        let sheet = BalanceService::compute_trip_balances(trip)?;
        Ok(Self::settle_balances(&trip.members, &sheet, basis))
    }

    /// Balances left after every transfer in `plan` has been paid.
    pub fn apply_transfers(plan: &SettlementPlan) -> Vec<(MemberId, f64)> {
        let mut residual: Vec<(MemberId, f64)> = plan
            .contributions
            .iter()
            .map(|row| (row.member_id.clone(), row.balance))
            .collect();
        for transfer in &plan.transfers {
            for (id, balance) in residual.iter_mut() {
                if *id == transfer.from {
                    *balance += transfer.amount;
                } else if *id == transfer.to {
                    *balance -= transfer.amount;
                }
            }
        }
        residual
    }
}

/// First occurrence of each member id, in trip order.
fn distinct_members(members: &[Member]) -> Vec<&Member> {
    let mut seen = HashSet::new();
    let distinct: Vec<&Member> = members
        .iter()
        .filter(|member| seen.insert(&member.id))
        .collect();
    if distinct.len() < members.len() {
        warn!(
            dropped = members.len() - distinct.len(),
            "repeated member ids counted once"
        );
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_domain::MemberStatus;

    fn members(names: &[(&str, &str)]) -> Vec<Member> {
        names
            .iter()
            .map(|(id, name)| Member::new(*id, *name, MemberStatus::Joined))
            .collect()
    }

    fn contributions(pairs: &[(&str, f64)]) -> HashMap<MemberId, f64> {
        pairs
            .iter()
            .map(|(id, amount)| (MemberId::new(*id), *amount))
            .collect()
    }

    #[test]
    fn single_debtor_pays_single_creditor() {
        let group = members(&[("a", "Asha"), ("b", "Ben")]);
        let transfers =
            SettlementService::solve_settlements(&group, 50.0, &contributions(&[("a", 100.0)]));
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].from_name, "Ben");
        assert_eq!(transfers[0].to_name, "Asha");
        assert_eq!(transfers[0].amount, 50.0);
    }

    #[test]
    fn equal_contributions_need_no_transfers() {
        let group = members(&[("a", "Asha"), ("b", "Ben"), ("c", "Chen")]);
        let paid = contributions(&[("a", 100.0), ("b", 100.0), ("c", 100.0)]);
        assert!(SettlementService::solve_settlements(&group, 100.0, &paid).is_empty());
    }

    #[test]
    fn near_zero_balances_are_treated_as_settled() {
        let group = members(&[("a", "Asha"), ("b", "Ben")]);
        let paid = contributions(&[("a", 50.004), ("b", 49.996)]);
        assert!(SettlementService::solve_settlements(&group, 50.0, &paid).is_empty());
    }

    #[test]
    fn largest_debtor_is_matched_with_largest_creditor_first() {
        let group = members(&[("a", "Asha"), ("b", "Ben"), ("c", "Chen"), ("d", "Dev")]);
        // share 100: a +200, b -40, c -100, d -60
        let paid = contributions(&[("a", 300.0), ("b", 60.0), ("c", 0.0), ("d", 40.0)]);
        let transfers = SettlementService::solve_settlements(&group, 100.0, &paid);
        let summary: Vec<(&str, &str, f64)> = transfers
            .iter()
            .map(|t| (t.from_name.as_str(), t.to_name.as_str(), t.amount))
            .collect();
        assert_eq!(
            summary,
            vec![("Chen", "Asha", 100.0), ("Dev", "Asha", 60.0), ("Ben", "Asha", 40.0)]
        );
    }

    #[test]
    fn ties_keep_member_order() {
        let group = members(&[("a", "Asha"), ("b", "Ben"), ("c", "Chen")]);
        let paid = contributions(&[("c", 90.0)]);
        let transfers = SettlementService::solve_settlements(&group, 30.0, &paid);
        let payers: Vec<&str> = transfers.iter().map(|t| t.from_name.as_str()).collect();
        assert_eq!(payers, vec!["Asha", "Ben"]);
    }

    #[test]
    fn transfer_count_is_bounded() {
        let group = members(&[("a", "A"), ("b", "B"), ("c", "C"), ("d", "D"), ("e", "E")]);
        let paid = contributions(&[("a", 70.0), ("b", 55.0), ("c", 20.0), ("d", 5.0)]);
        let share = 150.0 / 5.0;
        let transfers = SettlementService::solve_settlements(&group, share, &paid);
        // debtors: c, d, e; creditors: a, b
        assert!(transfers.len() <= 3 + 2 - 1);
    }

    #[test]
    fn repeated_member_ids_count_once() {
        let group = members(&[("a", "Asha"), ("b", "Ben"), ("a", "Asha again")]);
        let paid = contributions(&[("a", 90.0)]);
        let transfers = SettlementService::solve_settlements(&group, 45.0, &paid);
        assert_eq!(transfers.len(), 1);
        assert_eq!((transfers[0].from_name.as_str(), transfers[0].amount), ("Ben", 45.0));

        let mut trip = Trip::new("Goa", group[0].clone());
        trip.members = group;
        let dinner = trip_domain::BudgetItem::new(
            trip.id,
            "Dinner",
            90.0,
            trip_domain::ExpenseCategory::Food,
            vec![MemberId::new("a"), MemberId::new("b")],
        );
        trip.add_spending_item(dinner.record_spending(90.0, vec![MemberId::new("a")]));
        trip.add_budget_item(dinner);

        let plan = SettlementService::settle_trip(&trip, ContributionBasis::Paid).expect("plan");
        assert_eq!(plan.per_person_share, 45.0);
        assert_eq!(plan.contributions.len(), 2);
        let summary: Vec<(&str, &str, f64)> = plan
            .transfers
            .iter()
            .map(|t| (t.from_name.as_str(), t.to_name.as_str(), t.amount))
            .collect();
        assert_eq!(summary, vec![("Ben", "Asha", 45.0)]);
    }

    #[test]
    fn empty_member_list_yields_empty_plan() {
        let plan = SettlementService::settle_balances(
            &[],
            &BalanceSheet::default(),
            ContributionBasis::Paid,
        );
        assert_eq!(plan.per_person_share, 0.0);
        assert!(plan.is_settled());
    }
}
