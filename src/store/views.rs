//! Filtering, searching and sorting over store snapshots.
//!
//! Collections carry no meaningful order, so every list page goes through one
//! of these. Time-dependent filters take `today`/`now` from the caller.

use crate::entities::{CalendarEventModel, EventType, GuestModel, RsvpStatus, TodoModel};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default look-ahead for [`upcoming_events`].
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

fn matches_query(query: &str, fields: &[Option<&str>]) -> bool {
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(query))
}

fn normalized_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

// --- Todos ---

/// Status tabs on the task page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoFilter {
    /// Every task
    #[default]
    All,
    /// Not done
    Pending,
    /// Done
    Completed,
    /// Not done and due before today
    Overdue,
    /// Not done and due today
    Today,
}

/// Order of the task list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoSort {
    /// High priority first
    #[default]
    Priority,
    /// Earliest due date first, undated last
    DueDate,
    /// Newest first
    Created,
}

/// What the task page is currently showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoQuery {
    /// Case-insensitive text match on title, description and category
    pub search: Option<String>,
    /// Status tab
    pub filter: TodoFilter,
    /// List order
    pub sort: TodoSort,
}

// Strictly before today: a task due today is listed under `Today`, never
// under `Overdue`, so the two filters do not overlap.
fn is_overdue(todo: &TodoModel, today: NaiveDate) -> bool {
    !todo.completed && todo.due_date.is_some_and(|due| due < today)
}

fn is_due_today(todo: &TodoModel, today: NaiveDate) -> bool {
    !todo.completed && todo.due_date == Some(today)
}

impl TodoFilter {
    /// Whether `todo` belongs under this tab on `today`.
    #[must_use]
    pub fn matches(self, todo: &TodoModel, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !todo.completed,
            Self::Completed => todo.completed,
            Self::Overdue => is_overdue(todo, today),
            Self::Today => is_due_today(todo, today),
        }
    }
}

fn compare_todos(sort: TodoSort, a: &TodoModel, b: &TodoModel) -> Ordering {
    match sort {
        TodoSort::Priority => b.priority.rank().cmp(&a.priority.rank()),
        TodoSort::DueDate => match (a.due_date, b.due_date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        TodoSort::Created => b.created_at.cmp(&a.created_at),
    }
}

/// Todos matching `query`, in display order.
#[must_use]
pub fn filter_todos<'a>(
    todos: &'a [TodoModel],
    query: &TodoQuery,
    today: NaiveDate,
) -> Vec<&'a TodoModel> {
    let search = normalized_search(query.search.as_deref());
    let mut selected: Vec<&TodoModel> = todos
        .iter()
        .filter(|todo| {
            search.as_deref().is_none_or(|q| {
                matches_query(
                    q,
                    &[
                        Some(todo.title.as_str()),
                        todo.description.as_deref(),
                        todo.category.as_deref(),
                    ],
                )
            })
        })
        .filter(|todo| query.filter.matches(todo, today))
        .collect();
    selected.sort_by(|a, b| compare_todos(query.sort, a, b));
    selected
}

/// Badge counts for the task page tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TodoFilterCounts {
    /// Every task
    pub all: usize,
    /// Not done
    pub pending: usize,
    /// Done
    pub completed: usize,
    /// Not done and past due
    pub overdue: usize,
    /// Not done and due today
    pub today: usize,
}

/// Count tasks per tab.
#[must_use]
pub fn todo_filter_counts(todos: &[TodoModel], today: NaiveDate) -> TodoFilterCounts {
    todos
        .iter()
        .fold(TodoFilterCounts::default(), |mut counts, todo| {
            counts.all += 1;
            if todo.completed {
                counts.completed += 1;
            } else {
                counts.pending += 1;
            }
            if is_overdue(todo, today) {
                counts.overdue += 1;
            }
            if is_due_today(todo, today) {
                counts.today += 1;
            }
            counts
        })
}

// --- Guests ---

/// RSVP tabs on the guest page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestFilter {
    /// Every guest
    #[default]
    All,
    /// Confirmed
    Yes,
    /// Declined
    No,
    /// No answer yet
    Pending,
}

impl GuestFilter {
    /// Whether `guest` belongs under this tab.
    #[must_use]
    pub fn matches(self, guest: &GuestModel) -> bool {
        match self {
            Self::All => true,
            Self::Yes => guest.rsvp_status == RsvpStatus::Yes,
            Self::No => guest.rsvp_status == RsvpStatus::No,
            Self::Pending => guest.rsvp_status == RsvpStatus::Pending,
        }
    }
}

/// Order of the guest list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestSort {
    /// Alphabetical, ignoring case
    #[default]
    Name,
    /// Confirmed, then pending, then declined
    Rsvp,
    /// Most plus-ones first
    PlusOnes,
    /// Newest first
    Created,
}

/// What the guest page is currently showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuestQuery {
    /// Case-insensitive text match on name, email and phone
    pub search: Option<String>,
    /// RSVP tab
    pub filter: GuestFilter,
    /// List order
    pub sort: GuestSort,
}

fn compare_guests(sort: GuestSort, a: &GuestModel, b: &GuestModel) -> Ordering {
    match sort {
        GuestSort::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        GuestSort::Rsvp => b.rsvp_status.rank().cmp(&a.rsvp_status.rank()),
        GuestSort::PlusOnes => b.plus_ones.cmp(&a.plus_ones),
        GuestSort::Created => b.created_at.cmp(&a.created_at),
    }
}

/// Guests matching `query`, in display order.
#[must_use]
pub fn filter_guests<'a>(guests: &'a [GuestModel], query: &GuestQuery) -> Vec<&'a GuestModel> {
    let search = normalized_search(query.search.as_deref());
    let mut selected: Vec<&GuestModel> = guests
        .iter()
        .filter(|guest| {
            search.as_deref().is_none_or(|q| {
                matches_query(
                    q,
                    &[
                        Some(guest.name.as_str()),
                        guest.email.as_deref(),
                        guest.phone.as_deref(),
                    ],
                )
            })
        })
        .filter(|guest| query.filter.matches(guest))
        .collect();
    selected.sort_by(|a, b| compare_guests(query.sort, a, b));
    selected
}

// --- Calendar ---

/// Events of one type, or all of them when `event_type` is `None`.
#[must_use]
pub fn filter_events(
    events: &[CalendarEventModel],
    event_type: Option<EventType>,
) -> Vec<&CalendarEventModel> {
    events
        .iter()
        .filter(|event| event_type.is_none_or(|t| event.event_type == t))
        .collect()
}

/// Events starting within `days` days from `now` (inclusive), earliest first.
///
/// A window too large to represent has no upper bound; a negative window
/// selects nothing.
#[must_use]
pub fn upcoming_events(
    events: &[CalendarEventModel],
    now: DateTime<Utc>,
    days: i64,
) -> Vec<&CalendarEventModel> {
    let horizon = Duration::try_days(days).and_then(|window| now.checked_add_signed(window));
    let mut selected: Vec<&CalendarEventModel> = events
        .iter()
        .filter(|event| {
            event.start_date >= now && horizon.is_none_or(|limit| event.start_date <= limit)
        })
        .collect();
    selected.sort_by_key(|event| event.start_date);
    selected
}

/// Events starting on `date` (UTC calendar day), earliest first.
#[must_use]
pub fn events_on(events: &[CalendarEventModel], date: NaiveDate) -> Vec<&CalendarEventModel> {
    let mut selected: Vec<&CalendarEventModel> = events
        .iter()
        .filter(|event| event.start_date.date_naive() == date)
        .collect();
    selected.sort_by_key(|event| event.start_date);
    selected
}
