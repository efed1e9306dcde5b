use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::errors::TaskError;
use super::models::CreateTaskCommand;
use super::models::NewTask;
use super::models::Task;
use super::models::TaskId;
use super::models::TaskStatus;
use super::models::UpdateTaskCommand;
use super::pagination::Page;
use super::pagination::PageRequest;
use super::ports::TaskRepository;
use super::ports::TaskServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of TaskServicePort.
///
/// Status is a free-form field: no transition is refused. Ownership is the
/// only rule enforced here, through `with_owned_task`.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    task_repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(task_repository: Arc<TR>) -> Self {
        Self { task_repository }
    }

    /// Load `id`, require that `requester` owns it, then run `operation` on it.
    ///
    /// The check and the operation are separate statements; two requests
    /// from the same owner racing on one task are last-write-wins.
    async fn with_owned_task<T, F, Fut>(
        &self,
        id: TaskId,
        requester: UserId,
        operation: F,
    ) -> Result<T, TaskError>
    where
        F: FnOnce(Task) -> Fut + Send,
        Fut: Future<Output = Result<T, TaskError>> + Send,
        T: Send,
    {
        let task = self
            .task_repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        if task.owner_id != requester {
            tracing::warn!(
                task_id = %id,
                owner_id = %task.owner_id,
                requester_id = %requester,
                "Access to task denied"
            );
            return Err(TaskError::AccessDenied {
                task_id: id,
                user_id: requester,
            });
        }

        operation(task).await
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository + 'static,
{
    async fn create_task(
        &self,
        owner: UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError> {
        let task = self
            .task_repository
            .create(NewTask {
                title: command.title,
                description: command.description,
                status: command.status,
                owner_id: owner,
            })
            .await?;

        tracing::info!(task_id = %task.id, owner_id = %owner, "Task created");

        Ok(task)
    }

    async fn get_task(&self, id: TaskId, requester: UserId) -> Result<Task, TaskError> {
        self.with_owned_task(id, requester, |task| async move { Ok::<_, TaskError>(task) })
            .await
    }

    async fn list_tasks(
        &self,
        requester: UserId,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> Result<Page<Task>, TaskError> {
        let (items, total) = tokio::try_join!(
            self.task_repository.list_by_owner(requester, status, page),
            self.task_repository.count_by_owner(requester, status),
        )?;

        Ok(Page::new(items, total, page))
    }

    async fn list_all_tasks(&self, page: PageRequest) -> Result<Page<Task>, TaskError> {
        let (items, total) = tokio::try_join!(
            self.task_repository.list_all(page),
            self.task_repository.count_all(),
        )?;

        Ok(Page::new(items, total, page))
    }

    async fn update_task(
        &self,
        id: TaskId,
        requester: UserId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        let repository = &self.task_repository;

        self.with_owned_task(id, requester, move |task| async move {
            if command.is_empty() {
                return Ok(task);
            }

            let updated = repository.update(command.apply(task)).await?;
            tracing::info!(task_id = %updated.id, status = %updated.status, "Task updated");
            Ok::<_, TaskError>(updated)
        })
        .await
    }

    async fn complete_task(&self, id: TaskId, requester: UserId) -> Result<Task, TaskError> {
        self.update_task(
            id,
            requester,
            UpdateTaskCommand::status(TaskStatus::Completed),
        )
        .await
    }

    async fn delete_task(&self, id: TaskId, requester: UserId) -> Result<(), TaskError> {
        let repository = &self.task_repository;

        self.with_owned_task(id, requester, move |task| async move {
            repository.delete(task.id, task.owner_id).await?;
            tracing::info!(task_id = %task.id, "Task deleted");
            Ok::<_, TaskError>(())
        })
        .await
    }
}
