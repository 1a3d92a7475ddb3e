mod common;

use trip_core::ReportService;
use trip_ledger::currency::LocaleFormatter;

#[test]
fn exported_report_text_is_stable() {
    let trip = common::goa_trip();
    let report =
        ReportService::export_report(&trip, &LocaleFormatter::default()).expect("report");

    insta::assert_snapshot!(report.render_lines().join("\n"), @r###"
Trip: Goa
Basis: assigned
Total expenses: ₹400.00
Per-person share: ₹133.33

Member breakdown
  Asha: ₹200.00
  Ben: ₹100.00
  Chen: ₹100.00

Settlements
  Ben owes Asha ₹33.33
  Chen owes Asha ₹33.33
"###);
}
