//! Shared test utilities.
//!
//! Database helpers set up an in-memory `SQLite` backend; the `sample_*`
//! builders make store records with sensible defaults without touching a
//! database.

#![allow(clippy::unwrap_used)]

use crate::{
    core::wedding::{self, NewWedding},
    entities::{
        BudgetCategoryModel, CalendarEventModel, EventType, GuestModel, Priority, RsvpStatus,
        TodoModel, WeddingModel,
    },
    errors::Result,
    store::CurrentUser,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all backend tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test wedding for `user_id`.
///
/// # Defaults
/// * title: "Ana & Budi"
/// * `budget_total`: 70,000,000
/// * `guest_count`: 150
/// * no date or venue
pub async fn create_test_wedding(db: &DatabaseConnection, user_id: &str) -> Result<WeddingModel> {
    wedding::create_wedding(
        db,
        NewWedding {
            user_id: user_id.to_string(),
            title: "Ana & Budi".to_string(),
            budget_total: 70_000_000.0,
            guest_count: 150,
            ..NewWedding::default()
        },
    )
    .await
}

/// Sets up a test database with a single wedding owned by `user1`.
/// Returns both the database connection and the wedding.
pub async fn setup_with_wedding() -> Result<(DatabaseConnection, WeddingModel)> {
    let db = setup_test_db().await?;
    let wedding = create_test_wedding(&db, "user1").await?;
    Ok((db, wedding))
}

/// UTC instant on the hour.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn sample_user() -> CurrentUser {
    CurrentUser {
        id: "user1".to_string(),
        email: "couple@example.com".to_string(),
        name: Some("Ana".to_string()),
    }
}

/// A wedding without date or venue, created 2026-01-01 09:00 UTC.
pub fn sample_wedding(id: &str) -> WeddingModel {
    WeddingModel {
        id: id.to_string(),
        user_id: "user1".to_string(),
        title: "Ana & Budi".to_string(),
        wedding_date: None,
        venue: None,
        budget_total: 70_000_000.0,
        guest_count: 150,
        created_at: at(2026, 1, 1, 9),
        updated_at: at(2026, 1, 1, 9),
    }
}

pub fn sample_budget_category(id: &str, allocated: f64, spent: f64) -> BudgetCategoryModel {
    BudgetCategoryModel {
        id: id.to_string(),
        wedding_id: "w1".to_string(),
        name: format!("Category {id}"),
        allocated_amount: allocated,
        spent_amount: spent,
        color: "#E11D48".to_string(),
        created_at: at(2026, 1, 1, 9),
        updated_at: at(2026, 1, 1, 9),
    }
}

/// A medium-priority task without due date, description or category.
pub fn sample_todo(id: &str, title: &str, completed: bool) -> TodoModel {
    TodoModel {
        id: id.to_string(),
        wedding_id: "w1".to_string(),
        title: title.to_string(),
        description: None,
        completed,
        priority: Priority::Medium,
        due_date: None,
        category: None,
        created_at: at(2026, 1, 1, 9),
        updated_at: at(2026, 1, 1, 9),
    }
}

pub fn sample_guest(id: &str, name: &str, rsvp_status: RsvpStatus, plus_ones: i32) -> GuestModel {
    GuestModel {
        id: id.to_string(),
        wedding_id: "w1".to_string(),
        name: name.to_string(),
        email: None,
        phone: None,
        rsvp_status,
        plus_ones,
        dietary_restrictions: None,
        table_number: None,
        created_at: at(2026, 1, 1, 9),
        updated_at: at(2026, 1, 1, 9),
    }
}

/// An event starting 2026-06-01 10:00 UTC with no end.
pub fn sample_calendar_event(id: &str, title: &str, event_type: EventType) -> CalendarEventModel {
    CalendarEventModel {
        id: id.to_string(),
        wedding_id: "w1".to_string(),
        title: title.to_string(),
        description: None,
        start_date: at(2026, 6, 1, 10),
        end_date: None,
        location: None,
        event_type,
        created_at: at(2026, 1, 1, 9),
        updated_at: at(2026, 1, 1, 9),
    }
}
