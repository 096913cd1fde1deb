//! Calendar event business logic - the backend side of the calendar page.

use crate::{
    core::validation,
    entities::{CalendarEvent, EventType, calendar_event},
    errors::{Error, Result},
    store::{CalendarEventPatch, Record},
};
use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, QueryOrder, prelude::*};
use tracing::instrument;
use uuid::Uuid;

/// Input for a new calendar event.
///
/// Use [`validation::event_start`] to build `start_date` from a form's date and
/// optional time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCalendarEvent {
    /// Owning wedding
    pub wedding_id: String,
    /// Event title
    pub title: String,
    /// Free-form notes
    pub description: Option<String>,
    /// Start of the event
    pub start_date: DateTime<Utc>,
    /// End of the event, if known
    pub end_date: Option<DateTime<Utc>>,
    /// Where it happens
    pub location: Option<String>,
    /// Kind of event
    pub event_type: EventType,
}

fn check(event: &calendar_event::Model) -> Result<()> {
    validation::event_range(event.start_date, event.end_date)
}

/// All events of a wedding in chronological order.
pub async fn list_calendar_events(
    db: &DatabaseConnection,
    wedding_id: &str,
) -> Result<Vec<calendar_event::Model>> {
    CalendarEvent::find()
        .filter(calendar_event::Column::WeddingId.eq(wedding_id))
        .order_by_asc(calendar_event::Column::StartDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetch one event by id
pub async fn get_calendar_event_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<calendar_event::Model>> {
    CalendarEvent::find_by_id(id.to_owned())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates an event. The title is required and the end may not precede the start.
#[instrument(skip(db))]
pub async fn create_calendar_event(
    db: &DatabaseConnection,
    new: NewCalendarEvent,
) -> Result<calendar_event::Model> {
    let now = Utc::now();
    let event = calendar_event::Model {
        id: Uuid::new_v4().to_string(),
        wedding_id: new.wedding_id,
        title: validation::required_text("title", &new.title)?,
        description: validation::optional_text(new.description),
        start_date: new.start_date,
        end_date: new.end_date,
        location: validation::optional_text(new.location),
        event_type: new.event_type,
        created_at: now,
        updated_at: now,
    };
    check(&event)?;

    event
        .into_active_model()
        .reset_all()
        .insert(db)
        .await
        .map_err(Into::into)
}

/// Applies `patch` to the stored event and returns the updated row.
///
/// Moving only the start past an existing end is rejected like any other
/// inverted range.
#[instrument(skip(db))]
pub async fn update_calendar_event(
    db: &DatabaseConnection,
    id: &str,
    patch: CalendarEventPatch,
) -> Result<calendar_event::Model> {
    let mut event = get_calendar_event_by_id(db, id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: calendar_event::Model::KIND,
            id: id.to_string(),
        })?;

    let title = patch
        .title
        .map(|title| validation::required_text("title", &title))
        .transpose()?;
    event.apply(CalendarEventPatch {
        title,
        description: patch.description.map(validation::optional_text),
        location: patch.location.map(validation::optional_text),
        updated_at: Some(Utc::now()),
        ..patch
    });
    check(&event)?;

    event
        .into_active_model()
        .reset_all()
        .update(db)
        .await
        .map_err(Into::into)
}

/// Delete an event. Returns false when no row matched.
#[instrument(skip(db))]
pub async fn delete_calendar_event(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = CalendarEvent::delete_by_id(id.to_owned()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn new_event(wedding_id: &str, title: &str, start: DateTime<Utc>) -> NewCalendarEvent {
        NewCalendarEvent {
            wedding_id: wedding_id.to_string(),
            title: title.to_string(),
            description: None,
            start_date: start,
            end_date: None,
            location: None,
            event_type: EventType::Appointment,
        }
    }

    #[tokio::test]
    async fn test_list_is_chronological() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;

        create_calendar_event(&db, new_event(&wedding.id, "Cake tasting", at(2026, 11, 20, 14)))
            .await?;
        create_calendar_event(&db, new_event(&wedding.id, "Venue visit", at(2026, 11, 3, 10)))
            .await?;
        create_calendar_event(&db, new_event(&wedding.id, "Dress fitting", at(2026, 11, 10, 9)))
            .await?;

        let titles: Vec<String> = list_calendar_events(&db, &wedding.id)
            .await?
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, ["Venue visit", "Dress fitting", "Cake tasting"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_end_before_start() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;

        let result = create_calendar_event(
            &db,
            NewCalendarEvent {
                end_date: Some(at(2026, 11, 3, 9)),
                ..new_event(&wedding.id, "Venue visit", at(2026, 11, 3, 10))
            },
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { field: "end_date", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_deadline_keeps_type_column() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let due = validation::event_start(day(2026, 12, 1), None, EventType::Deadline)?;

        let event = create_calendar_event(
            &db,
            NewCalendarEvent {
                event_type: EventType::Deadline,
                ..new_event(&wedding.id, "Send invitations", due)
            },
        )
        .await?;

        let stored = get_calendar_event_by_id(&db, &event.id).await?.unwrap();
        assert_eq!(stored.event_type, EventType::Deadline);
        assert_eq!(stored.start_date, at(2026, 12, 1, 23) + chrono::Duration::minutes(59));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_checks_merged_range() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let event = create_calendar_event(
            &db,
            NewCalendarEvent {
                end_date: Some(at(2026, 11, 3, 12)),
                ..new_event(&wedding.id, "Venue visit", at(2026, 11, 3, 10))
            },
        )
        .await?;

        let late_start = update_calendar_event(
            &db,
            &event.id,
            CalendarEventPatch {
                start_date: Some(at(2026, 11, 3, 13)),
                ..CalendarEventPatch::default()
            },
        )
        .await;
        assert!(matches!(late_start, Err(Error::Validation { .. })));

        let moved = update_calendar_event(
            &db,
            &event.id,
            CalendarEventPatch {
                start_date: Some(at(2026, 11, 3, 13)),
                end_date: Some(None),
                location: Some(Some(" Gedung Sate ".to_string())),
                ..CalendarEventPatch::default()
            },
        )
        .await?;
        assert_eq!(moved.start_date, at(2026, 11, 3, 13));
        assert_eq!(moved.end_date, None);
        assert_eq!(moved.location.as_deref(), Some("Gedung Sate"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_calendar_event() -> Result<()> {
        let (db, wedding) = setup_with_wedding().await?;
        let event =
            create_calendar_event(&db, new_event(&wedding.id, "Venue visit", at(2026, 11, 3, 10)))
                .await?;

        assert!(delete_calendar_event(&db, &event.id).await?);
        assert!(list_calendar_events(&db, &wedding.id).await?.is_empty());
        Ok(())
    }
}
