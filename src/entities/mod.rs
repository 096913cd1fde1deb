//! Entity module - SeaORM definitions for the backend tables.
//! These are also the record types held by the in-memory store.
//! Each entity has a Model struct for data and an Entity struct for operations.

/// Budget categories of a wedding
pub mod budget_category;
/// Calendar events of a wedding
pub mod calendar_event;
/// Invited guests
pub mod guest;
/// Planning tasks
pub mod todo;
/// Weddings owned by a user
pub mod wedding;

// Re-export specific types to avoid conflicts
pub use budget_category::{
    Column as BudgetCategoryColumn, Entity as BudgetCategory, Model as BudgetCategoryModel,
};
pub use calendar_event::{
    Column as CalendarEventColumn, Entity as CalendarEvent, EventType, Model as CalendarEventModel,
};
pub use guest::{Column as GuestColumn, Entity as Guest, Model as GuestModel, RsvpStatus};
pub use todo::{Column as TodoColumn, Entity as Todo, Model as TodoModel, Priority};
pub use wedding::{Column as WeddingColumn, Entity as Wedding, Model as WeddingModel};
