use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::integrity_violation;
use super::IntegrityViolation;
use crate::domain::task::errors::TaskError;
use crate::domain::task::models::NewTask;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::pagination::PageRequest;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_task(row: &PgRow) -> Result<Task, TaskError> {
        let description: Option<String> = row.try_get("description").map_err(database_error)?;
        let status: String = row.try_get("status").map_err(database_error)?;

        Ok(Task {
            id: TaskId(row.try_get("id").map_err(database_error)?),
            title: TaskTitle::new(row.try_get("title").map_err(database_error)?)?,
            description: description.map(TaskDescription::new).transpose()?,
            status: TaskStatus::from_db_str(&status)?,
            owner_id: UserId(row.try_get("user_id").map_err(database_error)?),
        })
    }

    fn rows_to_tasks(rows: Vec<PgRow>) -> Result<Vec<Task>, TaskError> {
        rows.iter().map(Self::row_to_task).collect()
    }
}

fn database_error(e: sqlx::Error) -> TaskError {
    TaskError::DatabaseError(e.to_string())
}

/// Foreign-key failures mean the owner is gone; every other integrity
/// failure is a validation error.
fn write_error(e: sqlx::Error, owner: UserId) -> TaskError {
    match integrity_violation(&e) {
        Some(IntegrityViolation::ForeignKey) => TaskError::OwnerNotFound(owner),
        Some(_) => TaskError::Validation(
            e.as_database_error()
                .and_then(|db_err| db_err.constraint().map(str::to_string))
                .unwrap_or_else(|| "constraint violated".to_string()),
        ),
        None => database_error(e),
    }
}

fn count(row: &PgRow) -> Result<u64, TaskError> {
    let total: i64 = row.try_get("total").map_err(database_error)?;
    u64::try_from(total).map_err(|e| TaskError::DatabaseError(e.to_string()))
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task, TaskError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let row = sqlx::query(
            r#"
            INSERT INTO tasks (title, description, status, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, status, user_id
            "#,
        )
        .bind(task.title.as_str())
        .bind(task.description.as_ref().map(|d| d.as_str()))
        .bind(task.status.as_db_str())
        .bind(task.owner_id.0)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error(e, task.owner_id))?;

        let created = Self::row_to_task(&row)?;
        tx.commit().await.map_err(database_error)?;

        Ok(created)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, status, user_id
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_task).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> Result<Vec<Task>, TaskError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, status, user_id
            FROM tasks
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY id
            OFFSET $3
            LIMIT $4
            "#,
        )
        .bind(owner.0)
        .bind(status.map(|s| s.as_db_str()))
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Self::rows_to_tasks(rows)
    }

    async fn count_by_owner(
        &self,
        owner: UserId,
        status: Option<TaskStatus>,
    ) -> Result<u64, TaskError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM tasks
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
            "#,
        )
        .bind(owner.0)
        .bind(status.map(|s| s.as_db_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        count(&row)
    }

    async fn list_all(&self, page: PageRequest) -> Result<Vec<Task>, TaskError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, status, user_id
            FROM tasks
            ORDER BY id
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Self::rows_to_tasks(rows)
    }

    async fn count_all(&self) -> Result<u64, TaskError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM tasks")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        count(&row)
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let row = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $3, description = $4, status = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, status, user_id
            "#,
        )
        .bind(task.id.0)
        .bind(task.owner_id.0)
        .bind(task.title.as_str())
        .bind(task.description.as_ref().map(|d| d.as_str()))
        .bind(task.status.as_db_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| write_error(e, task.owner_id))?
        .ok_or(TaskError::NotFound(task.id))?;

        let updated = Self::row_to_task(&row)?;
        tx.commit().await.map_err(database_error)?;

        Ok(updated)
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> Result<(), TaskError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id));
        }

        tx.commit().await.map_err(database_error)?;

        Ok(())
    }
}
