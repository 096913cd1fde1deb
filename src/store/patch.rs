//! Partial updates for store records.
//!
//! A patch carries only the fields being changed. Plain fields are `Option<T>`
//! (absent or set); nullable fields are `Option<Option<T>>` so a patch can also
//! clear them. Identity fields (`id`, `wedding_id`, `created_at`) are never
//! patched.

use crate::entities::{
    BudgetCategoryModel, CalendarEventModel, EventType, GuestModel, Priority, RsvpStatus,
    TodoModel,
};
use chrono::{DateTime, NaiveDate, Utc};

/// A record held in a store collection.
pub trait Record: Clone {
    /// Partial update type for this record
    type Patch;

    /// Human-readable kind, used in logs and errors
    const KIND: &'static str;

    /// Opaque unique identifier
    fn id(&self) -> &str;

    /// Overwrites the fields present in `patch`, leaving the rest untouched.
    fn apply(&mut self, patch: Self::Patch);
}

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Changed fields of a budget category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BudgetCategoryPatch {
    /// New display name
    pub name: Option<String>,
    /// New allocation
    pub allocated_amount: Option<f64>,
    /// New spent amount
    pub spent_amount: Option<f64>,
    /// New display color
    pub color: Option<String>,
    /// Modification time, set by the backend
    pub updated_at: Option<DateTime<Utc>>,
}

/// Changed fields of a todo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// New title
    pub title: Option<String>,
    /// Set or clear the description
    pub description: Option<Option<String>>,
    /// New completion flag
    pub completed: Option<bool>,
    /// New priority
    pub priority: Option<Priority>,
    /// Set or clear the due date
    pub due_date: Option<Option<NaiveDate>>,
    /// Set or clear the category
    pub category: Option<Option<String>>,
    /// Modification time, set by the backend
    pub updated_at: Option<DateTime<Utc>>,
}

impl TodoPatch {
    /// Patch that only sets the completion flag.
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

/// Changed fields of a guest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuestPatch {
    /// New display name
    pub name: Option<String>,
    /// Set or clear the email address
    pub email: Option<Option<String>>,
    /// Set or clear the phone number
    pub phone: Option<Option<String>>,
    /// New RSVP answer
    pub rsvp_status: Option<RsvpStatus>,
    /// New plus-one count
    pub plus_ones: Option<i32>,
    /// Set or clear dietary notes
    pub dietary_restrictions: Option<Option<String>>,
    /// Set or clear the table assignment
    pub table_number: Option<Option<i32>>,
    /// Modification time, set by the backend
    pub updated_at: Option<DateTime<Utc>>,
}

impl GuestPatch {
    /// Patch that only changes the RSVP answer (the quick actions on the guest list).
    #[must_use]
    pub fn rsvp(status: RsvpStatus) -> Self {
        Self {
            rsvp_status: Some(status),
            ..Self::default()
        }
    }
}

/// Changed fields of a calendar event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalendarEventPatch {
    /// New title
    pub title: Option<String>,
    /// Set or clear the description
    pub description: Option<Option<String>>,
    /// New start instant
    pub start_date: Option<DateTime<Utc>>,
    /// Set or clear the end instant
    pub end_date: Option<Option<DateTime<Utc>>>,
    /// Set or clear the location
    pub location: Option<Option<String>>,
    /// New event kind
    pub event_type: Option<EventType>,
    /// Modification time, set by the backend
    pub updated_at: Option<DateTime<Utc>>,
}

// Full patches: every mutable field of a backend row, used to bring a store
// record in line with what the backend returned.

impl From<BudgetCategoryModel> for BudgetCategoryPatch {
    fn from(row: BudgetCategoryModel) -> Self {
        Self {
            name: Some(row.name),
            allocated_amount: Some(row.allocated_amount),
            spent_amount: Some(row.spent_amount),
            color: Some(row.color),
            updated_at: Some(row.updated_at),
        }
    }
}

impl From<TodoModel> for TodoPatch {
    fn from(row: TodoModel) -> Self {
        Self {
            title: Some(row.title),
            description: Some(row.description),
            completed: Some(row.completed),
            priority: Some(row.priority),
            due_date: Some(row.due_date),
            category: Some(row.category),
            updated_at: Some(row.updated_at),
        }
    }
}

impl From<GuestModel> for GuestPatch {
    fn from(row: GuestModel) -> Self {
        Self {
            name: Some(row.name),
            email: Some(row.email),
            phone: Some(row.phone),
            rsvp_status: Some(row.rsvp_status),
            plus_ones: Some(row.plus_ones),
            dietary_restrictions: Some(row.dietary_restrictions),
            table_number: Some(row.table_number),
            updated_at: Some(row.updated_at),
        }
    }
}

impl From<CalendarEventModel> for CalendarEventPatch {
    fn from(row: CalendarEventModel) -> Self {
        Self {
            title: Some(row.title),
            description: Some(row.description),
            start_date: Some(row.start_date),
            end_date: Some(row.end_date),
            location: Some(row.location),
            event_type: Some(row.event_type),
            updated_at: Some(row.updated_at),
        }
    }
}

impl Record for BudgetCategoryModel {
    type Patch = BudgetCategoryPatch;
    const KIND: &'static str = "Budget category";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: BudgetCategoryPatch) {
        overwrite(&mut self.name, patch.name);
        overwrite(&mut self.allocated_amount, patch.allocated_amount);
        overwrite(&mut self.spent_amount, patch.spent_amount);
        overwrite(&mut self.color, patch.color);
        overwrite(&mut self.updated_at, patch.updated_at);
    }
}

impl Record for TodoModel {
    type Patch = TodoPatch;
    const KIND: &'static str = "Todo";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: TodoPatch) {
        overwrite(&mut self.title, patch.title);
        overwrite(&mut self.description, patch.description);
        overwrite(&mut self.completed, patch.completed);
        overwrite(&mut self.priority, patch.priority);
        overwrite(&mut self.due_date, patch.due_date);
        overwrite(&mut self.category, patch.category);
        overwrite(&mut self.updated_at, patch.updated_at);
    }
}

impl Record for GuestModel {
    type Patch = GuestPatch;
    const KIND: &'static str = "Guest";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: GuestPatch) {
        overwrite(&mut self.name, patch.name);
        overwrite(&mut self.email, patch.email);
        overwrite(&mut self.phone, patch.phone);
        overwrite(&mut self.rsvp_status, patch.rsvp_status);
        overwrite(&mut self.plus_ones, patch.plus_ones);
        overwrite(&mut self.dietary_restrictions, patch.dietary_restrictions);
        overwrite(&mut self.table_number, patch.table_number);
        overwrite(&mut self.updated_at, patch.updated_at);
    }
}

impl Record for CalendarEventModel {
    type Patch = CalendarEventPatch;
    const KIND: &'static str = "Calendar event";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: CalendarEventPatch) {
        overwrite(&mut self.title, patch.title);
        overwrite(&mut self.description, patch.description);
        overwrite(&mut self.start_date, patch.start_date);
        overwrite(&mut self.end_date, patch.end_date);
        overwrite(&mut self.location, patch.location);
        overwrite(&mut self.event_type, patch.event_type);
        overwrite(&mut self.updated_at, patch.updated_at);
    }
}
