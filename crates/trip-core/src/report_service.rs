//! Display-ready summaries for dashboards and exported reports.
//!
//! Amounts keep full precision in the raw fields; the `*_display` strings are
//! the only place rounding happens.

use serde::Serialize;
use tracing::warn;
use trip_domain::{ContributionBasis, ReconciliationPolicy, SpendingItem, Trip};

use crate::{
    trip_warnings, BalanceService, BalanceSheet, CoreResult, CurrencyFormatter, ItemRemaining,
    MemberBalance, SettlementPlan, SettlementService, TripTotals,
};

pub const ALL_SETTLED: &str = "✓ All settled!";

/// One member row of the report breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberReportRow {
    pub name: String,
    /// Contribution under the report's basis.
    pub total: f64,
    pub total_display: String,
    pub budgeted: f64,
    pub spent: f64,
    pub remaining: f64,
    pub balance: f64,
    pub balance_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementLine {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub amount_display: String,
}

impl SettlementLine {
    pub fn text(&self) -> String {
        format!("{} owes {} {}", self.from, self.to, self.amount_display)
    }
}

/// Summary consumed by the shell and by report exporters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub trip_name: String,
    pub basis: ContributionBasis,
    pub total_expenses: f64,
    pub total_expenses_display: String,
    pub per_person_share: f64,
    pub per_person_share_display: String,
    pub members: Vec<MemberReportRow>,
    pub settlements: Vec<SettlementLine>,
    pub all_settled: bool,
}

impl TripReport {
    pub fn status_line(&self) -> &'static str {
        if self.all_settled {
            ALL_SETTLED
        } else {
            "Pending settlements"
        }
    }

    /// Plain-text rendering, one entry per line.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Trip: {}", self.trip_name),
            format!("Basis: {}", self.basis),
            format!("Total expenses: {}", self.total_expenses_display),
            format!("Per-person share: {}", self.per_person_share_display),
            String::new(),
            "Member breakdown".to_string(),
        ];
        for row in &self.members {
            lines.push(format!("  {}: {}", row.name, row.total_display));
        }
        lines.push(String::new());
        lines.push("Settlements".to_string());
        if self.all_settled {
            lines.push(format!("  {ALL_SETTLED}"));
        } else {
            for line in &self.settlements {
                lines.push(format!("  {}", line.text()));
            }
        }
        lines
    }
}

/// Data behind the dashboard: member cards and the remaining-items table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub trip_name: String,
    pub totals: TripTotals,
    pub members: Vec<MemberBalance>,
    pub remaining_items: Vec<ItemRemaining>,
    pub unplanned: Vec<SpendingItem>,
    pub warnings: Vec<String>,
}

pub struct ReportService;

impl ReportService {
    /// Pure formatting of an already computed plan and balance sheet.
    pub fn format_summary(
        trip: &Trip,
        plan: &SettlementPlan,
        balances: &BalanceSheet,
        formatter: &dyn CurrencyFormatter,
    ) -> TripReport {
        let members = plan
            .contributions
            .iter()
            .map(|row| {
                let sheet_row = balances.member(&row.member_id);
                MemberReportRow {
                    name: row.name.clone(),
                    total: row.contribution,
                    total_display: formatter.format_amount(row.contribution),
                    budgeted: sheet_row.map(|r| r.budgeted).unwrap_or(0.0),
                    spent: sheet_row.map(|r| r.spent).unwrap_or(0.0),
                    remaining: sheet_row.map(|r| r.remaining).unwrap_or(0.0),
                    balance: row.balance,
                    balance_display: formatter.format_amount(row.balance),
                }
            })
            .collect();

        let settlements = plan
            .transfers
            .iter()
            .map(|transfer| SettlementLine {
                from: transfer.from_name.clone(),
                to: transfer.to_name.clone(),
                amount: transfer.amount,
                amount_display: formatter.format_amount(transfer.amount),
            })
            .collect();

        TripReport {
            trip_name: trip.name.clone(),
            basis: plan.basis,
            total_expenses: plan.total_expenses,
            total_expenses_display: formatter.format_amount(plan.total_expenses),
            per_person_share: plan.per_person_share,
            per_person_share_display: formatter.format_amount(plan.per_person_share),
            members,
            settlements,
            all_settled: plan.is_settled(),
        }
    }

    /// Computes and formats a settlement report under `basis`.
    pub fn report(
        trip: &Trip,
        basis: ContributionBasis,
        formatter: &dyn CurrencyFormatter,
    ) -> CoreResult<TripReport> {
        let sheet = BalanceService::compute_trip_balances(trip)?;
        let plan = SettlementService::settle_balances(&trip.members, &sheet, basis);
        Ok(Self::format_summary(trip, &plan, &sheet, formatter))
    }

    /// The downloadable report: budgeted contributions only, no spending.
    pub fn export_report(trip: &Trip, formatter: &dyn CurrencyFormatter) -> CoreResult<TripReport> {
        Self::report(trip, ContributionBasis::Assigned, formatter)
    }

    pub fn dashboard(trip: &Trip, policy: ReconciliationPolicy) -> CoreResult<DashboardView> {
        let warnings = trip_warnings(trip);
        for warning in &warnings {
            warn!(trip = %trip.id, "{warning}");
        }
        let sheet = BalanceService::compute_trip_balances(trip)?;
        let remaining_items =
            BalanceService::remaining_items(&trip.budget_items, &trip.spending_items, policy);
        let unplanned =
            BalanceService::unplanned_spending(&trip.budget_items, &trip.spending_items, policy)
                .into_iter()
                .cloned()
                .collect();
        Ok(DashboardView {
            trip_name: trip.name.clone(),
            totals: sheet.totals,
            members: sheet.members,
            remaining_items,
            unplanned,
            warnings,
        })
    }
}
