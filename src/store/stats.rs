//! Derived accessors - aggregates recomputed from the collections on every call.
//!
//! Nothing here is cached: collections are small, and a cache would need
//! invalidation from every mutator.

use super::AppStore;
use crate::entities::{BudgetCategoryModel, RsvpStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Share of the allocation already spent, rounded to a whole percent.
///
/// Returns 0 when nothing is allocated. Exceeds 100 when over budget.
#[must_use]
pub fn percentage_used(spent: f64, allocated: f64) -> i64 {
    if allocated <= 0.0 {
        return 0;
    }

    // Cast safety: money amounts are far below i64::MAX percent.
    #[allow(clippy::cast_possible_truncation)]
    let percent = ((spent / allocated) * 100.0).round() as i64;
    percent
}

/// How a budget line is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    /// Below 90% of the allocation
    OnTrack,
    /// At least 90% of the allocation spent, not yet over
    NearLimit,
    /// Spent more than allocated
    OverBudget,
}

/// Classifies spending against an allocation.
#[must_use]
pub fn budget_health(spent: f64, allocated: f64) -> BudgetHealth {
    if spent > allocated {
        BudgetHealth::OverBudget
    } else if percentage_used(spent, allocated) >= 90 {
        BudgetHealth::NearLimit
    } else {
        BudgetHealth::OnTrack
    }
}

/// Per-category figures shown on the budget page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategorySummary {
    /// Share of the allocation spent, rounded
    pub percentage: i64,
    /// `allocated - spent`; negative when over budget
    pub remaining: f64,
    pub health: BudgetHealth,
}

impl CategorySummary {
    /// Figures for one category
    #[must_use]
    pub fn of(category: &BudgetCategoryModel) -> Self {
        Self {
            percentage: percentage_used(category.spent_amount, category.allocated_amount),
            remaining: category.allocated_amount - category.spent_amount,
            health: budget_health(category.spent_amount, category.allocated_amount),
        }
    }
}

/// Everything the dashboard cards show, computed in one pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Share of the whole budget spent, rounded
    pub budget_percentage: i64,
    /// Sum of spent amounts
    pub total_spent: f64,
    /// Sum of allocated amounts
    pub total_allocated: f64,
    /// Tasks marked done
    pub completed_tasks: usize,
    /// Tasks still open
    pub pending_tasks: usize,
    /// Guests who accepted
    pub confirmed_guests: usize,
    /// Confirmed plus still-pending guests
    pub invited_guests: usize,
    pub total_attendees: i64,
    /// Days from `today` until the wedding date, if one is set
    pub days_to_wedding: Option<i64>,
}

impl AppStore {
    /// Sum of `spent_amount` over all budget categories.
    #[must_use]
    pub fn total_budget_spent(&self) -> f64 {
        self.budget_categories().iter().map(|c| c.spent_amount).sum()
    }

    /// Sum of `allocated_amount` over all budget categories.
    #[must_use]
    pub fn total_budget_allocated(&self) -> f64 {
        self.budget_categories()
            .iter()
            .map(|c| c.allocated_amount)
            .sum()
    }

    /// Rounded share of the total allocation spent
    #[must_use]
    pub fn budget_used_percentage(&self) -> i64 {
        percentage_used(self.total_budget_spent(), self.total_budget_allocated())
    }

    /// Tasks marked done
    #[must_use]
    pub fn completed_todos_count(&self) -> usize {
        self.todos().iter().filter(|t| t.completed).count()
    }

    /// Tasks still open
    #[must_use]
    pub fn pending_todos_count(&self) -> usize {
        self.todos().iter().filter(|t| !t.completed).count()
    }

    fn guests_with(&self, status: RsvpStatus) -> usize {
        self.guests()
            .iter()
            .filter(|g| g.rsvp_status == status)
            .count()
    }

    /// Guests who accepted
    #[must_use]
    pub fn confirmed_guests_count(&self) -> usize {
        self.guests_with(RsvpStatus::Yes)
    }

    /// Guests who have not answered
    #[must_use]
    pub fn pending_rsvp_count(&self) -> usize {
        self.guests_with(RsvpStatus::Pending)
    }

    /// Guests who declined
    #[must_use]
    pub fn declined_guests_count(&self) -> usize {
        self.guests_with(RsvpStatus::No)
    }

    /// Headcount of confirmed guests including their plus-ones.
    #[must_use]
    pub fn total_attendees(&self) -> i64 {
        self.guests()
            .iter()
            .filter(|g| g.rsvp_status == RsvpStatus::Yes)
            .map(|g| 1 + i64::from(g.plus_ones))
            .sum()
    }

    /// Dashboard figures as of `today`
    #[must_use]
    pub fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        let confirmed_guests = self.confirmed_guests_count();
        DashboardStats {
            budget_percentage: self.budget_used_percentage(),
            total_spent: self.total_budget_spent(),
            total_allocated: self.total_budget_allocated(),
            completed_tasks: self.completed_todos_count(),
            pending_tasks: self.pending_todos_count(),
            confirmed_guests,
            invited_guests: confirmed_guests + self.pending_rsvp_count(),
            total_attendees: self.total_attendees(),
            days_to_wedding: self
                .current_wedding()
                .and_then(|w| w.wedding_date)
                .map(|date| (date - today).num_days()),
        }
    }
}
