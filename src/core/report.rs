//! Report formatting - currency, progress bars and the dashboard summary.
//!
//! Amounts are Indonesian rupiah without fractional digits. All functions are
//! pure; they turn store figures into text for logs and terminals.

use crate::{
    entities::BudgetCategoryModel,
    store::{BudgetHealth, CategorySummary, DashboardStats},
};
use std::fmt::Write as _;

/// Formats an amount as full rupiah, e.g. `Rp 1.500.000`.
///
/// Fractions are rounded away; negative amounts get a leading minus sign.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    // Cast safety: rounded rupiah amounts fit comfortably in i64.
    #[allow(clippy::cast_possible_truncation)]
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Compact form used on summary cards: `Rp 1.5B`, `Rp 70.0M`, `Rp 750K`.
///
/// Amounts below one thousand fall back to [`format_currency`].
#[must_use]
pub fn format_short_currency(amount: f64) -> String {
    if amount >= 1_000_000_000.0 {
        format!("Rp {:.1}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("Rp {:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("Rp {:.0}K", amount / 1_000.0)
    } else {
        format_currency(amount)
    }
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`. The bar is
/// clamped to 0-100 while the label shows the real percentage.
#[must_use]
pub fn format_progress_bar(percentage: i64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percentage.clamp(0, 100);

    // Cast safety: clamped ∈ [0, 100], length is small (10-20).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped as f64 / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {percentage}%")
}

/// One budget line: name, spent of allocated, progress and a marker when
/// the category needs attention.
#[must_use]
pub fn format_category_line(category: &BudgetCategoryModel) -> String {
    let summary = CategorySummary::of(category);
    let marker = match summary.health {
        BudgetHealth::OnTrack => "",
        BudgetHealth::NearLimit => " (near limit)",
        BudgetHealth::OverBudget => " (over budget)",
    };

    format!(
        "{}: {} of {} {}{marker}",
        category.name,
        format_currency(category.spent_amount),
        format_currency(category.allocated_amount),
        format_progress_bar(summary.percentage, None),
    )
}

/// Multi-line dashboard summary.
#[must_use]
pub fn format_dashboard(title: &str, stats: &DashboardStats) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{title}");
    match stats.days_to_wedding {
        Some(days) if days > 0 => {
            let _ = writeln!(out, "{days} days to go");
        }
        Some(0) => {
            let _ = writeln!(out, "The big day is today");
        }
        Some(_) => {
            let _ = writeln!(out, "Wedding date has passed");
        }
        None => {
            let _ = writeln!(out, "Wedding date not set");
        }
    }
    let _ = writeln!(
        out,
        "Budget: {} of {} {}",
        format_short_currency(stats.total_spent),
        format_short_currency(stats.total_allocated),
        format_progress_bar(stats.budget_percentage, None),
    );
    let _ = writeln!(
        out,
        "Tasks: {} done, {} pending",
        stats.completed_tasks, stats.pending_tasks
    );
    let _ = write!(
        out,
        "Guests: {} confirmed of {} invited, {} attending",
        stats.confirmed_guests, stats.invited_guests, stats.total_attendees
    );

    out
}
