use std::fs;

use tempfile::tempdir;
use trip_core::{CoreError, LedgerDataProvider};
use trip_domain::{BudgetItem, ExpenseCategory, Member, MemberId, MemberStatus, Trip};
use trip_storage_json::{load_trip_from_path, JsonTripStore};

fn sample_trip(name: &str) -> Trip {
    let mut trip = Trip::new(name, Member::new("a", "Asha", MemberStatus::Owner));
    trip.add_member(Member::new("b", "Ben", MemberStatus::Joined))
        .expect("add member");
    let hotel = BudgetItem::new(
        trip.id,
        "Hotel",
        200.0,
        ExpenseCategory::Accommodation,
        vec![MemberId::new("a"), MemberId::new("b")],
    );
    trip.add_spending_item(hotel.record_spending(120.0, vec![MemberId::new("a")]));
    trip.add_budget_item(hotel);
    trip
}

#[test]
fn json_store_can_save_and_load_trip() {
    let dir = tempdir().expect("tempdir");
    let store = JsonTripStore::with_root(dir.path()).expect("create store");
    let trip = sample_trip("Goa Escape");

    let path = store.save_trip(&trip).expect("save trip");
    assert_eq!(path, dir.path().join("trips").join("goa_escape.json"));

    let by_slug = store.load_trip("goa_escape").expect("load by slug");
    assert_eq!(by_slug, trip);
    let by_name = store.load_trip("GOA ESCAPE").expect("load by name");
    assert_eq!(by_name.id, trip.id);
    let by_id = store.load_trip(&trip.id.to_string()).expect("load by id");
    assert_eq!(by_id.name, "Goa Escape");

    assert_eq!(store.list_trips().expect("list"), vec!["goa_escape"]);
}

#[test]
fn snapshots_use_camel_case_fields() {
    let dir = tempdir().expect("tempdir");
    let store = JsonTripStore::with_root(dir.path()).expect("create store");
    let path = store.save_trip(&sample_trip("Goa")).expect("save");

    let raw = fs::read_to_string(path).expect("read");
    assert!(raw.contains("\"budgetItems\""));
    assert!(raw.contains("\"budgetItemId\""));
    assert!(raw.contains("\"joinCode\""));
}

#[test]
fn missing_trip_is_reported() {
    let dir = tempdir().expect("tempdir");
    let store = JsonTripStore::with_root(dir.path()).expect("create store");
    assert!(matches!(
        store.load_trip("nowhere"),
        Err(CoreError::TripNotFound(_))
    ));
}

#[test]
fn import_and_export_round_through_arbitrary_paths() {
    let dir = tempdir().expect("tempdir");
    let store = JsonTripStore::with_root(&dir.path().join("data")).expect("create store");
    let outside = dir.path().join("inbox").join("shared.json");
    fs::create_dir_all(outside.parent().expect("parent")).expect("mkdir");
    let trip = sample_trip("Ladakh");
    fs::write(&outside, serde_json::to_string(&trip).expect("json")).expect("write");

    let imported = store.import_from_path(&outside).expect("import");
    assert_eq!(imported.id, trip.id);
    assert!(store.trip_path("Ladakh").exists());

    let target = dir.path().join("out").join("ladakh.json");
    store.export_to_path("ladakh", &target).expect("export");
    let exported = load_trip_from_path(&target).expect("reload");
    assert_eq!(exported, trip);
}

#[test]
fn metadata_summarises_each_trip() {
    let dir = tempdir().expect("tempdir");
    let store = JsonTripStore::with_root(dir.path()).expect("create store");
    store.save_trip(&sample_trip("Zanskar")).expect("save");
    store.save_trip(&sample_trip("Alleppey")).expect("save");

    let rows = store.list_trip_metadata().expect("metadata");
    let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Alleppey", "Zanskar"]);
    assert_eq!(rows[0].member_count, 2);
    assert_eq!(rows[0].total_budgeted, Some(200.0));
    assert_eq!(rows[0].total_spent, Some(120.0));

    store.delete_trip("zanskar").expect("delete");
    assert_eq!(store.list_trips().expect("list"), vec!["alleppey"]);
}

#[test]
fn colliding_slugs_keep_both_trips() {
    let dir = tempdir().expect("tempdir");
    let store = JsonTripStore::with_root(dir.path()).expect("create store");
    let first = sample_trip("Goa!");
    let second = sample_trip("Goa?");

    let first_path = store.save_trip(&first).expect("save first");
    let second_path = store.save_trip(&second).expect("save second");
    assert_ne!(first_path, second_path);
    assert_eq!(store.stored_slug(&first), "goa_");
    let second_slug = store.stored_slug(&second);
    assert!(second_slug.starts_with("goa__"), "{second_slug}");
    assert_eq!(store.list_trips().expect("list").len(), 2);

    assert_eq!(store.load_trip("Goa!").expect("first by name").id, first.id);
    assert_eq!(store.load_trip("Goa?").expect("second by name").id, second.id);
    assert_eq!(store.load_trip("goa_").expect("by slug").id, first.id);
    assert_eq!(store.load_trip(&second_slug).expect("by suffixed slug").id, second.id);

    // saving again lands on the same file
    assert_eq!(store.save_trip(&second).expect("resave"), second_path);
    assert_eq!(store.list_trips().expect("list").len(), 2);
}

#[test]
fn metadata_survives_broken_snapshots() {
    let dir = tempdir().expect("tempdir");
    let store = JsonTripStore::with_root(dir.path()).expect("create store");
    store.save_trip(&sample_trip("Good")).expect("save good");

    let mut bad = sample_trip("Bad");
    bad.add_budget_item(BudgetItem::new(
        bad.id,
        "Ghost",
        50.0,
        ExpenseCategory::Miscellaneous,
        Vec::new(),
    ));
    let inbox = dir.path().join("bad.json");
    fs::write(&inbox, serde_json::to_string(&bad).expect("json")).expect("write");
    store.import_from_path(&inbox).expect("lenient import");
    fs::write(store.trips_dir().join("corrupt.json"), "{ not json").expect("write");

    let rows = store.list_trip_metadata().expect("metadata");
    let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Bad", "Good"]);
    assert_eq!(rows[0].total_budgeted, None);
    assert_eq!(rows[0].total_spent, None);
    assert_eq!(rows[1].total_budgeted, Some(200.0));
}
