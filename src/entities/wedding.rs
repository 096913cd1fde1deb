//! Wedding entity - The root record every planning table hangs off.
//!
//! A user may own several weddings; the oldest one is treated as the default
//! when a session starts.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wedding database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weddings")]
pub struct Model {
    /// Unique identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owner of the wedding, as reported by the authentication service
    pub user_id: String,
    /// Display title (e.g. "Ana & Budi")
    pub title: String,
    /// The big day, if already fixed
    pub wedding_date: Option<NaiveDate>,
    /// Venue name, if already booked
    pub venue: Option<String>,
    /// Overall budget the couple has in mind
    pub budget_total: f64,
    /// Expected number of guests
    pub guest_count: i32,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// A wedding owns every planning record
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One wedding has many budget categories
    #[sea_orm(has_many = "super::budget_category::Entity")]
    BudgetCategories,
    /// One wedding has many todos
    #[sea_orm(has_many = "super::todo::Entity")]
    Todos,
    /// One wedding has many guests
    #[sea_orm(has_many = "super::guest::Entity")]
    Guests,
    /// One wedding has many calendar events
    #[sea_orm(has_many = "super::calendar_event::Entity")]
    CalendarEvents,
}

impl Related<super::budget_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetCategories.def()
    }
}

impl Related<super::todo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Todos.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guests.def()
    }
}

impl Related<super::calendar_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CalendarEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
