//! Budget category business logic - the backend side of the budget page.
//!
//! Categories are listed oldest first, the order in which couples usually
//! build up their budget.

use crate::{
    core::validation,
    entities::{BudgetCategory, budget_category},
    errors::{Error, Result},
    store::{BudgetCategoryPatch, Record},
};
use chrono::Utc;
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::instrument;
use uuid::Uuid;

/// Color used when the user does not pick one.
pub const DEFAULT_COLOR: &str = "#E11D48";

/// Input for a new budget category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewBudgetCategory {
    /// Owning wedding
    pub wedding_id: String,
    /// Display name
    pub name: String,
    /// Planned amount
    pub allocated_amount: f64,
    /// Amount already spent
    pub spent_amount: f64,
    /// Display color; a default is used when absent
    pub color: Option<String>,
}

fn check(category: &budget_category::Model) -> Result<()> {
    validation::required_text("name", &category.name)?;
    validation::non_negative_amount("allocated_amount", category.allocated_amount)?;
    validation::non_negative_amount("spent_amount", category.spent_amount)?;
    Ok(())
}

/// All categories of a wedding, oldest first.
pub async fn list_budget_categories(
    db: &DatabaseConnection,
    wedding_id: &str,
) -> Result<Vec<budget_category::Model>> {
    BudgetCategory::find()
        .filter(budget_category::Column::WeddingId.eq(wedding_id))
        .order_by_asc(budget_category::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetch one category by id
pub async fn get_budget_category_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<budget_category::Model>> {
    BudgetCategory::find_by_id(id.to_owned())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a category. A new category needs a name and an allocation above zero;
/// the spent amount may be zero but not negative.
#[instrument(skip(db))]
pub async fn create_budget_category(
    db: &DatabaseConnection,
    new: NewBudgetCategory,
) -> Result<budget_category::Model> {
    let name = validation::required_text("name", &new.name)?;
    let allocated_amount = validation::positive_amount("allocated_amount", new.allocated_amount)?;
    let spent_amount = validation::non_negative_amount("spent_amount", new.spent_amount)?;
    let color = validation::optional_text(new.color).unwrap_or_else(|| DEFAULT_COLOR.to_string());

    let now = Utc::now();
    let category = budget_category::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        wedding_id: Set(new.wedding_id),
        name: Set(name),
        allocated_amount: Set(allocated_amount),
        spent_amount: Set(spent_amount),
        color: Set(color),
        created_at: Set(now),
        updated_at: Set(now),
    };

    category.insert(db).await.map_err(Into::into)
}

/// Applies `patch` to the stored category and returns the updated row.
///
/// The patched row is validated as a whole; an unknown id is an error here,
/// unlike in the store.
#[instrument(skip(db))]
pub async fn update_budget_category(
    db: &DatabaseConnection,
    id: &str,
    patch: BudgetCategoryPatch,
) -> Result<budget_category::Model> {
    let mut category = get_budget_category_by_id(db, id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: budget_category::Model::KIND,
            id: id.to_string(),
        })?;

    category.apply(BudgetCategoryPatch {
        name: patch.name.map(|n| n.trim().to_string()),
        updated_at: Some(Utc::now()),
        ..patch
    });
    check(&category)?;

    category
        .into_active_model()
        .reset_all()
        .update(db)
        .await
        .map_err(Into::into)
}

/// Deletes a category; `Ok(false)` when there was nothing to delete.
#[instrument(skip(db))]
pub async fn delete_budget_category(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = BudgetCategory::delete_by_id(id.to_owned()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn new_category(wedding_id: &str, name: &str, allocated: f64) -> NewBudgetCategory {
        NewBudgetCategory {
            wedding_id: wedding_id.to_string(),
            name: name.to_string(),
            allocated_amount: allocated,
            ..NewBudgetCategory::default()
        }
    }

    #[tokio::test]
    async fn test_create_budget_category_validation() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;

        let blank = create_budget_category(&db, new_category(&wedding.id, " ", 100.0)).await;
        assert!(matches!(blank, Err(Error::Validation { field: "name", .. })));

        let zero = create_budget_category(&db, new_category(&wedding.id, "Venue", 0.0)).await;
        assert!(matches!(
            zero,
            Err(Error::Validation {
                field: "allocated_amount",
                ..
            })
        ));

        let negative_spent = create_budget_category(
            &db,
            NewBudgetCategory {
                spent_amount: -5.0,
                ..new_category(&wedding.id, "Venue", 100.0)
            },
        )
        .await;
        assert!(matches!(
            negative_spent,
            Err(Error::Validation {
                field: "spent_amount",
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_budget_category_defaults() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;

        let category =
            create_budget_category(&db, new_category(&wedding.id, "  Venue  ", 20_000_000.0))
                .await?;

        assert_eq!(category.name, "Venue");
        assert_eq!(category.spent_amount, 0.0);
        assert_eq!(category.color, DEFAULT_COLOR);
        assert_eq!(category.wedding_id, wedding.id);
        assert!(!category.id.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_wedding() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let other = create_test_wedding(&db, "someone_else").await?;

        create_budget_category(&db, new_category(&wedding.id, "Venue", 100.0)).await?;
        create_budget_category(&db, new_category(&wedding.id, "Catering", 100.0)).await?;
        create_budget_category(&db, new_category(&other.id, "Rings", 100.0)).await?;

        let mine = list_budget_categories(&db, &wedding.id).await?;
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|c| c.wedding_id == wedding.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_allows_over_budget() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let category = create_budget_category(&db, new_category(&wedding.id, "Venue", 100.0)).await?;

        let updated = update_budget_category(
            &db,
            &category.id,
            BudgetCategoryPatch {
                spent_amount: Some(150.0),
                ..BudgetCategoryPatch::default()
            },
        )
        .await?;

        assert_eq!(updated.spent_amount, 150.0);
        assert_eq!(updated.allocated_amount, 100.0);
        assert_eq!(updated.name, "Venue");
        assert!(updated.updated_at >= category.updated_at);

        let stored = get_budget_category_by_id(&db, &category.id).await?.unwrap();
        assert_eq!(stored, updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_patch() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let category = create_budget_category(&db, new_category(&wedding.id, "Venue", 100.0)).await?;

        let result = update_budget_category(
            &db,
            &category.id,
            BudgetCategoryPatch {
                spent_amount: Some(-1.0),
                ..BudgetCategoryPatch::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let stored = get_budget_category_by_id(&db, &category.id).await?.unwrap();
        assert_eq!(stored.spent_amount, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result =
            update_budget_category(&db, "missing", BudgetCategoryPatch::default()).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_budget_category() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let category = create_budget_category(&db, new_category(&wedding.id, "Venue", 100.0)).await?;

        assert!(delete_budget_category(&db, &category.id).await?);
        assert!(!delete_budget_category(&db, &category.id).await?);
        assert!(list_budget_categories(&db, &wedding.id).await?.is_empty());
        Ok(())
    }
}
