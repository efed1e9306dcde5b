use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::NewTask;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::pagination::Page;
use crate::domain::task::pagination::PageRequest;
use crate::domain::user::models::UserId;

/// Port for task domain service operations.
///
/// Every operation that names a task id checks that `requester` owns it.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a task owned by `owner`.
    ///
    /// # Errors
    /// * `OwnerNotFound` - Owner row does not exist
    /// * `Validation` - Store rejected the row
    /// * `DatabaseError` - Database operation failed
    async fn create_task(&self, owner: UserId, command: CreateTaskCommand)
        -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `AccessDenied` - Task belongs to someone else
    async fn get_task(&self, id: TaskId, requester: UserId) -> Result<Task, TaskError>;

    /// Tasks owned by `requester`, optionally filtered by status.
    async fn list_tasks(
        &self,
        requester: UserId,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> Result<Page<Task>, TaskError>;

    /// Tasks of every owner. Performs no ownership filtering.
    async fn list_all_tasks(&self, page: PageRequest) -> Result<Page<Task>, TaskError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `AccessDenied` - Task belongs to someone else
    async fn update_task(
        &self,
        id: TaskId,
        requester: UserId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError>;

    /// Set status to `Completed`, whatever it was before.
    async fn complete_task(&self, id: TaskId, requester: UserId) -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `AccessDenied` - Task belongs to someone else
    async fn delete_task(&self, id: TaskId, requester: UserId) -> Result<(), TaskError>;
}

/// Persistence operations for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Insert a task atomically.
    ///
    /// # Errors
    /// * `OwnerNotFound` - Foreign-key violation on the owner
    /// * `Validation` - Any other integrity violation
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, task: NewTask) -> Result<Task, TaskError>;

    /// Retrieve task by identifier.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError>;

    /// Page of tasks owned by `owner`, optionally filtered by status, in id order.
    async fn list_by_owner(
        &self,
        owner: UserId,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> Result<Vec<Task>, TaskError>;

    /// Count matching `list_by_owner`'s filter.
    async fn count_by_owner(
        &self,
        owner: UserId,
        status: Option<TaskStatus>,
    ) -> Result<u64, TaskError>;

    /// Page of all tasks regardless of owner, in id order.
    async fn list_all(&self, page: PageRequest) -> Result<Vec<Task>, TaskError>;

    async fn count_all(&self) -> Result<u64, TaskError>;

    /// Persist title, description and status of `task`.
    ///
    /// The write is scoped to `task.owner_id`; nothing is written if the
    /// row is gone or changed hands.
    ///
    /// # Errors
    /// * `NotFound` - No row matched id and owner
    /// * `Validation` - Integrity violation
    async fn update(&self, task: Task) -> Result<Task, TaskError>;

    /// Delete the task if `owner` owns it.
    ///
    /// # Errors
    /// * `NotFound` - No row matched id and owner
    async fn delete(&self, id: TaskId, owner: UserId) -> Result<(), TaskError>;
}
