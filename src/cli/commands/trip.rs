use std::path::Path;

use trip_core::{trip_warnings, BalanceService, CurrencyFormatter};
use trip_storage_json::canonical_name;

use crate::cli::core::{short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "List stored trips", "list", cmd_list).with_aliases(&["ls"]),
        CommandEntry::new(
            "import",
            "Import a trip snapshot from a JSON file",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new(
            "show",
            "Show trip members, totals, and data warnings",
            "show [trip]",
            cmd_show,
        ),
        CommandEntry::new(
            "export",
            "Write a stored trip snapshot to a JSON file",
            "export <trip> <path>",
            cmd_export,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let rows = context.store.list_trip_metadata()?;
    if rows.is_empty() {
        output::info("No trips stored. Use `import <path>` to add one.");
        return Ok(());
    }
    output::section("Trips");
    let fmt = &context.formatter;
    let total = |amount: Option<f64>| match amount {
        Some(amount) => fmt.format_amount(amount),
        None => "n/a".to_string(),
    };
    for row in rows {
        output::line(format!(
            "  {:<20} {:<20} {:>2} members  budgeted {:>12}  spent {:>12}",
            row.name,
            row.slug,
            row.member_count,
            total(row.total_budgeted),
            total(row.total_spent),
        ));
    }
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::InvalidArguments("usage: import <path>".into()));
    };
    let trip = context.store.import_from_path(Path::new(path))?;
    context.remember_trip(&trip)?;
    let slug = context.store.stored_slug(&trip);
    output::success(format!(
        "Imported trip `{}` ({} members, {} budget items, {} spending items).",
        trip.name,
        trip.members.len(),
        trip.budget_items.len(),
        trip.spending_items.len()
    ));
    if slug != canonical_name(&trip.name) {
        output::warning(format!(
            "Another trip already uses `{}`; stored as `{slug}`.",
            canonical_name(&trip.name)
        ));
    }
    context.print_warnings(&trip_warnings(&trip));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = context.trip_key(args)?;
    let trip = context.open_trip(&key)?;
    let sheet = BalanceService::compute_trip_balances(&trip)?;
    let fmt = &context.formatter;

    output::section(format!("Trip: {}", trip.name));
    output::line(format!("  Id          : {}", short_id(trip.id)));
    output::line(format!("  Join code   : {}", trip.join_code));
    output::line(format!(
        "  Created     : {}",
        fmt.format_date(trip.created_at.date_naive())
    ));
    output::line(format!(
        "  Budgeted    : {}",
        fmt.format_amount(sheet.totals.total_budgeted)
    ));
    output::line(format!(
        "  Spent       : {}",
        fmt.format_amount(sheet.totals.total_spent)
    ));
    output::line(format!(
        "  Remaining   : {}",
        fmt.format_amount(sheet.totals.remaining_budget)
    ));
    output::line(format!("  Members ({}):", trip.members.len()));
    for member in &trip.members {
        let line = match &member.email {
            Some(email) => format!("    - {} <{}> ({})", member.name, email, member.status),
            None => format!("    - {} ({})", member.name, member.status),
        };
        output::line(line);
    }
    context.print_warnings(&trip_warnings(&trip));
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [key, path] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: export <trip> <path>".into(),
        ));
    };
    let trip = context.store.export_to_path(key, Path::new(path))?;
    output::success(format!("Exported `{}` to {}.", trip.name, path));
    Ok(())
}
