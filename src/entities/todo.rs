//! Todo entity - A wedding task with a priority and optional due date.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How urgent a task is.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Must be done first
    #[sea_orm(string_value = "high")]
    High,
    /// Default priority
    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,
    /// Can wait
    #[sea_orm(string_value = "low")]
    Low,
}

impl Priority {
    /// Sort weight; higher means more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Todo database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    /// Unique identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Wedding this task belongs to
    pub wedding_id: String,
    /// Short task title, never empty
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Whether the task is done
    pub completed: bool,
    /// Task urgency
    pub priority: Priority,
    /// Day the task is due, if any
    pub due_date: Option<NaiveDate>,
    /// Free-form grouping (e.g. "Venue", "Attire")
    pub category: Option<String>,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Todo and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each todo belongs to one wedding
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
