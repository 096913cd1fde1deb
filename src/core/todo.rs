//! Todo business logic - the backend side of the task list.

use crate::{
    core::validation,
    entities::{Priority, Todo, todo},
    errors::{Error, Result},
    store::{Record, TodoPatch},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::instrument;
use uuid::Uuid;

/// Input for a new task. Tasks always start out not completed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTodo {
    /// Owning wedding
    pub wedding_id: String,
    /// Task title
    pub title: String,
    /// Free-form notes
    pub description: Option<String>,
    /// Task priority
    pub priority: Priority,
    /// Deadline day
    pub due_date: Option<NaiveDate>,
    /// Grouping label
    pub category: Option<String>,
}

/// All tasks of a wedding, newest first.
pub async fn list_todos(db: &DatabaseConnection, wedding_id: &str) -> Result<Vec<todo::Model>> {
    Todo::find()
        .filter(todo::Column::WeddingId.eq(wedding_id))
        .order_by_desc(todo::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetch one task by id
pub async fn get_todo_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<todo::Model>> {
    Todo::find_by_id(id.to_owned())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a task with `completed = false`. The title is required.
#[instrument(skip(db))]
pub async fn create_todo(db: &DatabaseConnection, new: NewTodo) -> Result<todo::Model> {
    let title = validation::required_text("title", &new.title)?;

    let now = Utc::now();
    let todo = todo::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        wedding_id: Set(new.wedding_id),
        title: Set(title),
        description: Set(validation::optional_text(new.description)),
        completed: Set(false),
        priority: Set(new.priority),
        due_date: Set(new.due_date),
        category: Set(validation::optional_text(new.category)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    todo.insert(db).await.map_err(Into::into)
}

/// Applies `patch` to the stored task and returns the updated row.
#[instrument(skip(db))]
pub async fn update_todo(
    db: &DatabaseConnection,
    id: &str,
    patch: TodoPatch,
) -> Result<todo::Model> {
    let mut todo = get_todo_by_id(db, id).await?.ok_or_else(|| Error::NotFound {
        entity: todo::Model::KIND,
        id: id.to_string(),
    })?;

    let title = patch
        .title
        .map(|title| validation::required_text("title", &title))
        .transpose()?;
    todo.apply(TodoPatch {
        title,
        description: patch.description.map(validation::optional_text),
        category: patch.category.map(validation::optional_text),
        updated_at: Some(Utc::now()),
        ..patch
    });

    todo.into_active_model()
        .reset_all()
        .update(db)
        .await
        .map_err(Into::into)
}

/// Delete a task. Returns false when no row matched.
#[instrument(skip(db))]
pub async fn delete_todo(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = Todo::delete_by_id(id.to_owned()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
