//! Wedding business logic - creating weddings and finding a user's default one.

use crate::{
    core::validation,
    entities::{Wedding, wedding},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::instrument;
use uuid::Uuid;

/// Input for a new wedding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewWedding {
    /// Owner of the wedding
    pub user_id: String,
    /// Display title
    pub title: String,
    /// Day of the wedding
    pub wedding_date: Option<NaiveDate>,
    /// Venue name
    pub venue: Option<String>,
    /// Overall budget
    pub budget_total: f64,
    /// Expected number of guests
    pub guest_count: i32,
}

/// Creates a wedding owned by `new.user_id`.
///
/// The title is required and trimmed; the budget total may not be negative.
#[instrument(skip(db))]
pub async fn create_wedding(db: &DatabaseConnection, new: NewWedding) -> Result<wedding::Model> {
    let title = validation::required_text("title", &new.title)?;
    let budget_total = validation::non_negative_amount("budget_total", new.budget_total)?;
    if new.guest_count < 0 {
        return Err(Error::validation("guest_count", "cannot be negative"));
    }

    let now = Utc::now();
    let wedding = wedding::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(new.user_id),
        title: Set(title),
        wedding_date: Set(new.wedding_date),
        venue: Set(validation::optional_text(new.venue)),
        budget_total: Set(budget_total),
        guest_count: Set(new.guest_count),
        created_at: Set(now),
        updated_at: Set(now),
    };

    wedding.insert(db).await.map_err(Into::into)
}

/// All weddings of a user, newest first.
pub async fn get_user_weddings(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<wedding::Model>> {
    Wedding::find()
        .filter(wedding::Column::UserId.eq(user_id))
        .order_by_desc(wedding::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The user's oldest wedding, which a new session opens by default.
pub async fn get_default_wedding(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<wedding::Model>> {
    Wedding::find()
        .filter(wedding::Column::UserId.eq(user_id))
        .order_by_asc(wedding::Column::CreatedAt)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetch one wedding by id
pub async fn get_wedding_by_id(
    db: &DatabaseConnection,
    wedding_id: &str,
) -> Result<Option<wedding::Model>> {
    Wedding::find_by_id(wedding_id.to_owned())
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_wedding_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let blank = create_wedding(
            &db,
            NewWedding {
                user_id: "u1".to_string(),
                title: "  ".to_string(),
                ..NewWedding::default()
            },
        )
        .await;
        assert!(matches!(blank, Err(Error::Validation { field: "title", .. })));

        let negative = create_wedding(
            &db,
            NewWedding {
                user_id: "u1".to_string(),
                title: "Ana & Budi".to_string(),
                budget_total: -1.0,
                ..NewWedding::default()
            },
        )
        .await;
        assert!(matches!(
            negative,
            Err(Error::Validation {
                field: "budget_total",
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_find_wedding() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_wedding(&db, "u1").await?;

        assert_eq!(created.title, "Ana & Budi");
        assert_eq!(created.budget_total, 70_000_000.0);
        let found = get_wedding_by_id(&db, &created.id).await?;
        assert_eq!(found, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn test_default_wedding_is_per_user() -> Result<()> {
        let db = setup_test_db().await?;
        let mine = create_test_wedding(&db, "u1").await?;
        create_test_wedding(&db, "u2").await?;

        let default = get_default_wedding(&db, "u1").await?;
        assert_eq!(default.map(|w| w.id), Some(mine.id));
        assert!(get_default_wedding(&db, "nobody").await?.is_none());
        assert_eq!(get_user_weddings(&db, "u1").await?.len(), 1);
        Ok(())
    }
}
