//! Calendar event entity - Ceremonies, appointments, deadlines and reminders.
//!
//! A deadline's `start_date` is its due instant. `end_date`, when present, is
//! checked against `start_date` at input time only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of calendar entry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// The ceremony itself
    #[sea_orm(string_value = "ceremony")]
    Ceremony,
    /// Meeting with a vendor or planner
    #[sea_orm(string_value = "appointment")]
    Appointment,
    /// Something due by this time
    #[sea_orm(string_value = "deadline")]
    Deadline,
    /// Plain reminder
    #[sea_orm(string_value = "reminder")]
    Reminder,
}

/// Calendar event database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "calendar_events")]
pub struct Model {
    /// Unique identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Wedding this event belongs to
    pub wedding_id: String,
    /// Event title, never empty
    pub title: String,
    pub description: Option<String>,
    /// Start instant; for deadlines, the due instant
    pub start_date: DateTimeUtc,
    /// End instant, if the event has a duration
    pub end_date: Option<DateTimeUtc>,
    pub location: Option<String>,
    /// Event kind, stored in the `type` column
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `CalendarEvent` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each event belongs to one wedding
    #[sea_orm(
        belongs_to = "super::wedding::Entity",
        from = "Column::WeddingId",
        to = "super::wedding::Column::Id",
        on_delete = "Cascade"
    )]
    Wedding,
}

impl Related<super::wedding::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wedding.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
