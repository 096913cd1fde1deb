//! Guest entity - An invitee and their RSVP state.
//!
//! `plus_ones` only counts toward attendance once the guest has answered yes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A guest's confirmation state. Any transition is allowed, but only by an
/// explicit user action.
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
pub enum RsvpStatus {
    /// No answer yet
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Attending
    #[sea_orm(string_value = "yes")]
    Yes,
    /// Declined
    #[sea_orm(string_value = "no")]
    No,
}

impl RsvpStatus {
    /// Sort weight used by the RSVP ordering: yes, then pending, then no.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Yes => 3,
            Self::Pending => 2,
            Self::No => 1,
        }
    }
}

/// Guest database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guests")]
pub struct Model {
    /// Unique identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Wedding this guest is invited to
    pub wedding_id: String,
    /// Guest name, never empty
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Current RSVP answer
    pub rsvp_status: RsvpStatus,
    /// Extra people coming with this guest
    pub plus_ones: i32,
    pub dietary_restrictions: Option<String>,
    /// Assigned table, numbered from 1
    pub table_number: Option<i32>,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Guest and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each guest belongs to one wedding
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
