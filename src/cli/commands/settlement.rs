use trip_core::{BalanceService, CurrencyFormatter, ReportService, ALL_SETTLED};
use trip_domain::ContributionBasis;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "balances",
            "Show budgeted, spent, and remaining amounts per member",
            "balances [trip]",
            cmd_balances,
        ),
        CommandEntry::new(
            "remaining",
            "Show remaining budget per item and unplanned spending",
            "remaining [trip]",
            cmd_remaining,
        ),
        CommandEntry::new(
            "settle",
            "Compute who owes whom",
            "settle [trip] [assigned|paid]",
            cmd_settle,
        ),
        CommandEntry::new(
            "report",
            "Render the exported settlement report",
            "report [trip] [--json]",
            cmd_report,
        ),
    ]
}

fn cmd_balances(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = context.trip_key(args)?;
    let trip = context.open_trip(&key)?;
    let sheet = BalanceService::compute_trip_balances(&trip)?;
    let fmt = &context.formatter;

    output::section(format!("Balances: {}", trip.name));
    output::line(format!(
        "  {:<16} {:>12} {:>12} {:>12}",
        "Member", "Budgeted", "Spent", "Remaining"
    ));
    for row in &sheet.members {
        output::line(format!(
            "  {:<16} {:>12} {:>12} {:>12}",
            row.name,
            fmt.format_amount(row.budgeted),
            fmt.format_amount(row.spent),
            fmt.format_amount(row.remaining),
        ));
    }
    output::line(format!(
        "  {:<16} {:>12} {:>12} {:>12}",
        "Total",
        fmt.format_amount(sheet.totals.total_budgeted),
        fmt.format_amount(sheet.totals.total_spent),
        fmt.format_amount(sheet.totals.remaining_budget),
    ));
    for row in sheet.members.iter().filter(|row| row.is_over_budget()) {
        output::warning(format!(
            "{} is over budget by {}",
            row.name,
            fmt.format_amount(-row.remaining)
        ));
    }
    Ok(())
}

fn cmd_remaining(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = context.trip_key(args)?;
    let trip = context.open_trip(&key)?;
    let view = ReportService::dashboard(&trip, context.config.reconciliation)?;
    let fmt = &context.formatter;

    output::section(format!(
        "Remaining budget: {} ({})",
        trip.name, context.config.reconciliation
    ));
    if view.remaining_items.is_empty() {
        output::info("No budget items.");
    }
    for item in &view.remaining_items {
        output::line(format!(
            "  {:<20} {:<14} {:>12} {:>12} {:>12}",
            item.name,
            item.category.to_string(),
            fmt.format_amount(item.amount),
            fmt.format_amount(item.spent),
            fmt.format_amount(item.remaining),
        ));
    }
    for item in view.remaining_items.iter().filter(|item| item.is_over_budget()) {
        output::warning(format!(
            "{} is over budget by {}",
            item.name,
            fmt.format_amount(-item.remaining)
        ));
    }

    if !view.unplanned.is_empty() {
        output::section("Unplanned spending");
        for item in &view.unplanned {
            output::line(format!(
                "  {:<20} {:<14} {:>12}",
                item.name,
                item.category.to_string(),
                fmt.format_amount(item.amount)
            ));
        }
    }
    context.print_warnings(&view.warnings);
    Ok(())
}

fn cmd_settle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (trip_args, basis) = match args {
        [rest @ .., last] if last.parse::<ContributionBasis>().is_ok() => {
            (rest, last.parse::<ContributionBasis>().ok())
        }
        _ => (args, None),
    };
    if trip_args.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: settle [trip] [assigned|paid]".into(),
        ));
    }
    let basis = basis.unwrap_or(context.config.contribution_basis);
    let key = context.trip_key(trip_args)?;
    let trip = context.open_trip(&key)?;
    let report = ReportService::report(&trip, basis, &context.formatter)?;

    output::section(format!("Settlement: {} ({})", trip.name, basis));
    output::line(format!("  Total expenses   : {}", report.total_expenses_display));
    output::line(format!("  Per-person share : {}", report.per_person_share_display));
    for row in &report.members {
        output::line(format!(
            "  {:<16} {:>12}  balance {:>12}",
            row.name, row.total_display, row.balance_display
        ));
    }
    if report.all_settled {
        output::success(ALL_SETTLED);
    } else {
        for line in &report.settlements {
            output::line(format!("  {}", line.text()));
        }
    }
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let json = args.iter().any(|arg| *arg == "--json");
    let positional: Vec<&str> = args
        .iter()
        .copied()
        .filter(|arg| !arg.starts_with("--"))
        .collect();
    if let Some(flag) = args.iter().find(|arg| arg.starts_with("--") && **arg != "--json") {
        return Err(CommandError::InvalidArguments(format!(
            "unknown flag `{flag}`; usage: report [trip] [--json]"
        )));
    }
    if positional.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: report [trip] [--json]".into(),
        ));
    }
    let key = context.trip_key(&positional)?;
    let trip = context.open_trip(&key)?;
    let report = ReportService::export_report(&trip, &context.formatter)?;

    if json {
        output::line(serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.render_lines() {
            output::line(line);
        }
    }
    Ok(())
}
