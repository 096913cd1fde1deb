//! Template configuration loading from config.toml
//!
//! Templates are the predefined budget categories, tasks and calendar events a
//! couple can pick from instead of typing everything. A copy of the default
//! config.toml is compiled in and used whenever the file is missing.

use crate::core::{
    budget::NewBudgetCategory, calendar::NewCalendarEvent, todo::NewTodo, validation,
};
use crate::entities::{EventType, Priority};
use crate::errors::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

const BUNDLED_TEMPLATES: &str = include_str!("../../config.toml");

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Templates {
    /// Categories offered by the budget form
    #[serde(default)]
    pub budget_categories: Vec<BudgetCategoryTemplate>,
    /// Tasks offered by the task form
    #[serde(default)]
    pub tasks: Vec<TaskTemplate>,
    /// Events offered by the calendar form
    #[serde(default)]
    pub events: Vec<EventTemplate>,
}

/// A predefined budget category
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BudgetCategoryTemplate {
    /// Category name
    pub name: String,
    /// Display color as a hex code
    pub color: String,
}

/// A predefined task
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TaskTemplate {
    /// Task title
    pub title: String,
    /// Suggested task category
    pub category: String,
    /// Priority given to the new task
    #[serde(default)]
    pub priority: Priority,
}

/// A predefined calendar event
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EventTemplate {
    /// Event title
    pub title: String,
    /// Kind of event
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Length of the event; 0 means no end time
    #[serde(default)]
    pub duration_hours: u32,
}

impl BudgetCategoryTemplate {
    /// Category input for `wedding_id` with the given allocation.
    #[must_use]
    pub fn to_new_category(&self, wedding_id: &str, allocated_amount: f64) -> NewBudgetCategory {
        NewBudgetCategory {
            wedding_id: wedding_id.to_string(),
            name: self.name.clone(),
            allocated_amount,
            spent_amount: 0.0,
            color: Some(self.color.clone()),
        }
    }
}

impl TaskTemplate {
    /// Create input for this task under `wedding_id`
    #[must_use]
    pub fn to_new_todo(&self, wedding_id: &str) -> NewTodo {
        NewTodo {
            wedding_id: wedding_id.to_string(),
            title: self.title.clone(),
            priority: self.priority,
            category: Some(self.category.clone()),
            ..NewTodo::default()
        }
    }
}

impl EventTemplate {
    /// Event input starting on `date` at `time`.
    ///
    /// Deadlines ignore the duration and default to 23:59 UTC when no time is
    /// given; other event types need a time and end `duration_hours` later.
    pub fn to_new_event(
        &self,
        wedding_id: &str,
        date: NaiveDate,
        time: Option<NaiveTime>,
    ) -> Result<NewCalendarEvent> {
        let start_date = validation::event_start(date, time, self.event_type)?;
        let end_date = (self.event_type != EventType::Deadline && self.duration_hours > 0)
            .then(|| start_date + Duration::hours(i64::from(self.duration_hours)));

        Ok(NewCalendarEvent {
            wedding_id: wedding_id.to_string(),
            title: self.title.clone(),
            description: None,
            start_date,
            end_date,
            location: None,
            event_type: self.event_type,
        })
    }
}

/// Parses templates from TOML text.
pub fn parse_templates(contents: &str) -> Result<Templates> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse templates: {e}"),
    })
}

/// The templates compiled into the binary.
pub fn bundled_templates() -> Result<Templates> {
    parse_templates(BUNDLED_TEMPLATES)
}

/// Loads templates from a TOML file, falling back to the bundled templates
/// when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_templates<P: AsRef<Path>>(path: P) -> Result<Templates> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No template file at {path:?}, using built-in templates");
        return bundled_templates();
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read template file: {e}"),
    })?;
    let templates = parse_templates(&contents)?;
    debug!(
        "Loaded {} category, {} task and {} event templates",
        templates.budget_categories.len(),
        templates.tasks.len(),
        templates.events.len()
    );
    Ok(templates)
}

/// Loads templates from the default location (./config.toml)
pub fn load_default_templates() -> Result<Templates> {
    load_templates("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{at, day};

    #[test]
    fn test_bundled_templates() {
        let templates = bundled_templates().unwrap();
        assert_eq!(templates.budget_categories.len(), 12);
        assert_eq!(templates.tasks.len(), 12);
        assert_eq!(templates.events.len(), 12);
        assert_eq!(templates.budget_categories[0].name, "Venue");
        assert_eq!(templates.budget_categories[0].color, "#E11D48");
        assert_eq!(templates.tasks[6].priority, Priority::Low);
    }

    #[test]
    fn test_parse_templates() {
        let toml_str = r#"
            [[tasks]]
            title = "Book photographer"
            category = "Photography"

            [[events]]
            title = "Venue Visit"
            type = "appointment"
            duration_hours = 2
        "#;

        let templates = parse_templates(toml_str).unwrap();
        assert!(templates.budget_categories.is_empty());
        assert_eq!(templates.tasks[0].priority, Priority::Medium);
        assert_eq!(templates.events[0].event_type, EventType::Appointment);
    }

    #[test]
    fn test_parse_templates_rejects_unknown_type() {
        let result = parse_templates("[[events]]\ntitle = \"Party\"\ntype = \"party\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let templates = load_templates(dir.path().join("config.toml")).unwrap();
        assert_eq!(templates.events.len(), 12);
    }

    #[test]
    fn test_load_templates_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[[budget_categories]]\nname = \"Henna\"\ncolor = \"#000000\"\n")
            .unwrap();

        let templates = load_templates(&path).unwrap();
        assert_eq!(templates.budget_categories.len(), 1);
        assert!(templates.tasks.is_empty());
    }

    #[test]
    fn test_event_template_durations() {
        let visit = EventTemplate {
            title: "Venue Visit".to_string(),
            event_type: EventType::Appointment,
            duration_hours: 2,
        };
        let new = visit
            .to_new_event("w1", day(2026, 11, 3), NaiveTime::from_hms_opt(10, 0, 0))
            .unwrap();
        assert_eq!(new.start_date, at(2026, 11, 3, 10));
        assert_eq!(new.end_date, Some(at(2026, 11, 3, 12)));

        let deadline = EventTemplate {
            title: "RSVP Deadline".to_string(),
            event_type: EventType::Deadline,
            duration_hours: 0,
        };
        let new = deadline.to_new_event("w1", day(2026, 12, 1), None).unwrap();
        assert_eq!(new.start_date, at(2026, 12, 1, 23) + Duration::minutes(59));
        assert_eq!(new.end_date, None);

        assert!(visit.to_new_event("w1", day(2026, 11, 3), None).is_err());
    }

    #[test]
    fn test_task_template_to_new_todo() {
        let task = TaskTemplate {
            title: "Plan honeymoon".to_string(),
            category: "Honeymoon".to_string(),
            priority: Priority::Low,
        };
        let new = task.to_new_todo("w1");
        assert_eq!(new.wedding_id, "w1");
        assert_eq!(new.priority, Priority::Low);
        assert_eq!(new.category.as_deref(), Some("Honeymoon"));
    }
}
