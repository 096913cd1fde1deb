//! Budget category entity - One line of the wedding budget.
//!
//! Allocated and spent amounts are independent; spending more than was
//! allocated is a normal, displayable state.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_categories")]
pub struct Model {
    /// Unique identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Wedding this category belongs to
    pub wedding_id: String,
    /// Category name (e.g. "Venue", "Catering")
    pub name: String,
    /// Amount set aside for this category
    pub allocated_amount: f64,
    /// Amount already spent
    pub spent_amount: f64,
    /// Display color as a hex string (e.g. `#E11D48`)
    pub color: String,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `BudgetCategory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each category belongs to one wedding
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
