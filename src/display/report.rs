//! Report formatting for terminal output

use crate::models::currency;
use crate::reports::{BudgetStatus, DashboardSummary};
use crate::storage::BalanceDrift;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format the dashboard summary
pub fn format_dashboard(summary: &DashboardSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Dashboard: {}\n", summary.range));
    output.push_str(&separator(60));
    output.push('\n');

    if summary.currencies.is_empty() {
        output.push_str("No wallets yet.\n");
    }
    for row in &summary.currencies {
        let symbol = currency::symbol_for(&row.currency);
        output.push_str(&format!(
            "{:<6} Balance {:>14}  Income {:>12}  Expense {:>12}\n",
            row.currency,
            row.balance.format_with_symbol(&symbol),
            row.income.format_with_symbol(&symbol),
            row.expense.format_with_symbol(&symbol),
        ));
    }

    if !summary.categories.is_empty() {
        output.push_str("\nExpenses by category\n");
        let max = summary
            .categories
            .first()
            .map(|c| c.amount.as_f64())
            .unwrap_or(0.0);
        for category in &summary.categories {
            output.push_str(&format!(
                "  {:<20} {:>12} {}\n",
                category.category,
                category.amount.to_string(),
                format_bar(category.amount.as_f64(), max, 20)
            ));
        }
    }

    if !summary.recent.is_empty() {
        output.push_str("\nRecent transactions\n");
        for txn in &summary.recent {
            output.push_str(&format!("  {}\n", txn));
        }
    }

    output
}

/// Format budget status, one line per category
pub fn format_budget_status(status: &BudgetStatus) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget ({}) for {}\n", status.method, status.period));
    output.push_str(&separator(76));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>12} {:>12} {:>12} {:>8}  {}\n",
        "Category", "Spent", "Limit", "Remaining", "Used", "Status"
    ));

    for category in &status.categories {
        let flag = if category.over_budget {
            "OVER"
        } else if category.near_limit() {
            "near limit"
        } else {
            ""
        };
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12} {:>8}  {}\n",
            category.category,
            category.spent.to_string(),
            category.limit.to_string(),
            category.remaining.to_string(),
            format_percentage(category.percent_used),
            flag
        ));
    }

    if let Some(extras) = &status.zero_based {
        output.push_str(&separator(76));
        output.push('\n');
        output.push_str(&format!("Income this month: {}\n", extras.total_income));
        output.push_str(&format!("Total budgeted:    {}\n", extras.total_budgeted));
        output.push_str(&format!("Left to budget:    {}\n", extras.left_to_budget));
    }

    output
}

/// Format the result of a balance consistency check
pub fn format_drift(drift: &[BalanceDrift]) -> String {
    if drift.is_empty() {
        return "All wallet balances match their transaction history.".to_string();
    }

    let mut output = String::from("Balance mismatches:\n");
    for d in drift {
        output.push_str(&format!(
            "  {} ({}): recorded {}, expected {}\n",
            d.wallet_name, d.wallet_id, d.recorded, d.expected
        ));
    }
    output
}
