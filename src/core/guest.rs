//! Guest business logic - the backend side of the guest list.

use crate::{
    core::validation,
    entities::{Guest, RsvpStatus, guest},
    errors::{Error, Result},
    store::{GuestPatch, Record},
};
use chrono::Utc;
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::instrument;
use uuid::Uuid;

/// Input for a new guest. `rsvp_status` defaults to pending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewGuest {
    /// Owning wedding
    pub wedding_id: String,
    /// Guest name
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Initial RSVP answer
    pub rsvp_status: RsvpStatus,
    /// Extra people the guest brings
    pub plus_ones: i32,
    /// Dietary notes
    pub dietary_restrictions: Option<String>,
    /// Assigned table, 1-based
    pub table_number: Option<i32>,
}

fn check(guest: &guest::Model) -> Result<()> {
    validation::email(guest.email.as_deref())?;
    validation::plus_ones(guest.plus_ones)?;
    validation::table_number(guest.table_number)
}

/// All guests of a wedding, newest first.
pub async fn list_guests(db: &DatabaseConnection, wedding_id: &str) -> Result<Vec<guest::Model>> {
    Guest::find()
        .filter(guest::Column::WeddingId.eq(wedding_id))
        .order_by_desc(guest::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetch one guest by id
pub async fn get_guest_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<guest::Model>> {
    Guest::find_by_id(id.to_owned())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds a guest to the list.
///
/// # Errors
/// Returns `Error::Validation` when the name is blank, the email has no `@`,
/// `plus_ones` is negative or the table number is below 1.
#[instrument(skip(db))]
pub async fn create_guest(db: &DatabaseConnection, new: NewGuest) -> Result<guest::Model> {
    let now = Utc::now();
    let guest = guest::Model {
        id: Uuid::new_v4().to_string(),
        wedding_id: new.wedding_id,
        name: validation::required_text("name", &new.name)?,
        email: validation::optional_text(new.email),
        phone: validation::optional_text(new.phone),
        rsvp_status: new.rsvp_status,
        plus_ones: new.plus_ones,
        dietary_restrictions: validation::optional_text(new.dietary_restrictions),
        table_number: new.table_number,
        created_at: now,
        updated_at: now,
    };
    check(&guest)?;

    guest
        .into_active_model()
        .reset_all()
        .insert(db)
        .await
        .map_err(Into::into)
}

/// Applies `patch` to the stored guest and returns the updated row.
#[instrument(skip(db))]
pub async fn update_guest(
    db: &DatabaseConnection,
    id: &str,
    patch: GuestPatch,
) -> Result<guest::Model> {
    let mut guest = get_guest_by_id(db, id).await?.ok_or_else(|| Error::NotFound {
        entity: guest::Model::KIND,
        id: id.to_string(),
    })?;

    let name = patch
        .name
        .map(|name| validation::required_text("name", &name))
        .transpose()?;
    guest.apply(GuestPatch {
        name,
        email: patch.email.map(validation::optional_text),
        phone: patch.phone.map(validation::optional_text),
        dietary_restrictions: patch.dietary_restrictions.map(validation::optional_text),
        updated_at: Some(Utc::now()),
        ..patch
    });
    check(&guest)?;

    guest
        .into_active_model()
        .reset_all()
        .update(db)
        .await
        .map_err(Into::into)
}

/// Delete a guest. Returns false when no row matched.
#[instrument(skip(db))]
pub async fn delete_guest(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = Guest::delete_by_id(id.to_owned()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn new_guest(wedding_id: &str, name: &str) -> NewGuest {
        NewGuest {
            wedding_id: wedding_id.to_string(),
            name: name.to_string(),
            ..NewGuest::default()
        }
    }

    #[tokio::test]
    async fn test_create_guest_defaults_to_pending() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let guest = create_guest(&db, new_guest(&wedding.id, " Dewi ")).await?;

        assert_eq!(guest.name, "Dewi");
        assert_eq!(guest.rsvp_status, RsvpStatus::Pending);
        assert_eq!(guest.plus_ones, 0);
        assert_eq!(guest.table_number, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_guest_validation() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;

        let cases = [
            (
                NewGuest {
                    email: Some("dewi.example.com".to_string()),
                    ..new_guest(&wedding.id, "Dewi")
                },
                "email",
            ),
            (
                NewGuest {
                    plus_ones: -1,
                    ..new_guest(&wedding.id, "Dewi")
                },
                "plus_ones",
            ),
            (
                NewGuest {
                    table_number: Some(0),
                    ..new_guest(&wedding.id, "Dewi")
                },
                "table_number",
            ),
            (new_guest(&wedding.id, ""), "name"),
        ];

        for (input, expected_field) in cases {
            let result = create_guest(&db, input).await;
            assert!(
                matches!(result, Err(Error::Validation { field, .. }) if field == expected_field),
                "expected validation error on {expected_field}, got {result:?}"
            );
        }
        assert!(list_guests(&db, &wedding.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_rsvp_can_move_in_any_direction() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let guest = create_guest(&db, new_guest(&wedding.id, "Dewi")).await?;

        for status in [RsvpStatus::Yes, RsvpStatus::No, RsvpStatus::Pending, RsvpStatus::Yes] {
            let updated = update_guest(&db, &guest.id, GuestPatch::rsvp(status)).await?;
            assert_eq!(updated.rsvp_status, status);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_update_guest_rejects_negative_plus_ones() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let guest = create_guest(&db, new_guest(&wedding.id, "Dewi")).await?;

        let result = update_guest(
            &db,
            &guest.id,
            GuestPatch {
                plus_ones: Some(-2),
                ..GuestPatch::default()
            },
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { field: "plus_ones", .. })));
        assert_eq!(get_guest_by_id(&db, &guest.id).await?.unwrap().plus_ones, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_guest() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let guest = create_guest(&db, new_guest(&wedding.id, "Dewi")).await?;

        assert!(delete_guest(&db, &guest.id).await?);
        assert!(get_guest_by_id(&db, &guest.id).await?.is_none());
        assert!(!delete_guest(&db, "missing").await?);
        Ok(())
    }
}
