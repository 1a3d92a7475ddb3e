#![allow(dead_code)]

use assert_fs::{prelude::*, TempDir};
use trip_domain::{BudgetItem, ExpenseCategory, Member, MemberId, MemberStatus, Trip};

pub fn ids(raw: &[&str]) -> Vec<MemberId> {
    raw.iter().map(|id| MemberId::new(*id)).collect()
}

/// Goa: a shared villa plus a scuba dive only Asha signed up for.
/// Asha paid the whole villa.
pub fn goa_trip() -> Trip {
    let mut trip = Trip::new("Goa", Member::new("a", "Asha", MemberStatus::Owner));
    trip.add_member(Member::new("b", "Ben", MemberStatus::Joined))
        .expect("add Ben");
    trip.add_member(Member::new("c", "Chen", MemberStatus::CoOrganizer))
        .expect("add Chen");

    let villa = BudgetItem::new(
        trip.id,
        "Villa",
        300.0,
        ExpenseCategory::Accommodation,
        ids(&["a", "b", "c"]),
    );
    trip.add_spending_item(villa.record_spending(300.0, ids(&["a"])));
    trip.add_budget_item(villa);
    trip.add_budget_item(BudgetItem::new(
        trip.id,
        "Scuba",
        100.0,
        ExpenseCategory::Entertainment,
        ids(&["a"]),
    ));
    trip
}

/// Temp workspace holding `goa.json` next to an empty data home.
pub fn workspace_with_goa() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().expect("temp dir");
    let snapshot = temp.child("inbox").child("goa.json");
    snapshot
        .write_str(&serde_json::to_string_pretty(&goa_trip()).expect("serialize"))
        .expect("write snapshot");
    let path = snapshot.path().to_path_buf();
    (temp, path)
}
