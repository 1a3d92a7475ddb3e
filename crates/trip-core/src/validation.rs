use std::collections::HashSet;

use trip_domain::{MemberId, Trip};

/// Detects dangling references and other anomalies within a trip snapshot.
///
/// Records are validated upstream; these are reported, never fatal.
pub fn trip_warnings(trip: &Trip) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut member_ids: HashSet<&MemberId> = HashSet::new();
    for member in &trip.members {
        if !member_ids.insert(&member.id) {
            warnings.push(format!("member id `{}` appears more than once", member.id));
        }
    }
    let budget_ids: HashSet<_> = trip.budget_items.iter().map(|item| item.id).collect();

    for item in &trip.budget_items {
        check_amount_and_members(
            &mut warnings,
            "budget item",
            &item.name,
            item.amount,
            &item.member_ids,
            &member_ids,
        );
    }

    for item in &trip.spending_items {
        if let Some(link) = item.budget_item_id {
            if !budget_ids.contains(&link) {
                warnings.push(format!(
                    "spending item `{}` references unknown budget item {}",
                    item.name, link
                ));
            }
        }
        if item.is_completed {
            check_amount_and_members(
                &mut warnings,
                "spending item",
                &item.name,
                item.amount,
                &item.member_ids,
                &member_ids,
            );
        }
    }
    warnings
}

fn check_amount_and_members(
    warnings: &mut Vec<String>,
    kind: &str,
    name: &str,
    amount: f64,
    assigned: &[MemberId],
    known: &HashSet<&MemberId>,
) {
    if !amount.is_finite() || amount <= 0.0 {
        warnings.push(format!("{kind} `{name}` has non-positive amount {amount}"));
    }
    if assigned.is_empty() {
        warnings.push(format!("{kind} `{name}` has no members"));
    }
    for id in assigned {
        if !known.contains(id) {
            warnings.push(format!("{kind} `{name}` references unknown member `{id}`"));
        }
    }
}
