use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::auth::ensure_owner;
use crate::db::DbPool;
use crate::error::AppError;
use crate::forms::TaskForm;
use crate::pagination::{self, Page};

/// Represents a task entity as stored in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    /// Database-assigned identifier, increasing in insertion order.
    pub id: i64,
    /// The title of the task.
    pub title: String,
    /// Free-form description; empty when none was given.
    pub description: String,
    /// Identifier of the user who owns the task.
    pub user_id: i64,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

const TASK_COLUMNS: &str = "id, title, description, user_id, created_at, updated_at";

pub async fn create_task(pool: &DbPool, form: &TaskForm, user_id: i64) -> Result<Task, AppError> {
    let now = Utc::now();
    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, description, user_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(form.title.trim())
    .bind(form.description.trim())
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

pub async fn get_task(pool: &DbPool, id: i64) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = ?",
        TASK_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(task)
}

/// Loads a task for `user_id`. Missing tasks and other users' tasks are both
/// reported as `AppError::NotFound`.
pub async fn get_owned_task(pool: &DbPool, id: i64, user_id: i64) -> Result<Task, AppError> {
    match get_task(pool, id).await? {
        Some(task) => ensure_owner(task, user_id),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Overwrites title and description of `task` and bumps `updated_at`.
pub async fn update_task(pool: &DbPool, task: &Task, form: &TaskForm) -> Result<Task, AppError> {
    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET title = ?, description = ?, updated_at = ? WHERE id = ? AND user_id = ? RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(form.title.trim())
    .bind(form.description.trim())
    .bind(Utc::now())
    .bind(task.id)
    .bind(task.user_id)
    .fetch_optional(pool)
    .await?;

    updated.ok_or_else(|| AppError::NotFound("Task not found".into()))
}

pub async fn delete_task(pool: &DbPool, task: &Task) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
        .bind(task.id)
        .bind(task.user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }
    Ok(())
}

/// Returns page `page` (1-based) of the tasks owned by `user_id`, oldest first.
pub async fn paginate_tasks(
    pool: &DbPool,
    user_id: i64,
    page: i64,
    per_page: i64,
) -> Result<Page<Task>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    let offset = pagination::offset_for(page, per_page, total)?;

    let items = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE user_id = ? ORDER BY id ASC LIMIT ? OFFSET ?",
        TASK_COLUMNS
    ))
    .bind(user_id)
    .bind(per_page)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(Page::new(items, page, per_page, total))
}
