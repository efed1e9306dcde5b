pub mod complete_task;
pub mod create_task;
pub mod delete_task;
pub mod get_task;
pub mod list_all_tasks;
pub mod list_tasks;
pub mod update_task;

pub use complete_task::complete_task;
pub use create_task::create_task;
pub use delete_task::delete_task;
pub use get_task::get_task;
pub use list_all_tasks::list_all_tasks;
pub use list_tasks::list_tasks;
pub use update_task::update_task;

use axum::extract::rejection::PathRejection;
use axum::extract::Path;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::TaskId;
use crate::inbound::http::handlers::ApiError;

fn parse_task_id(path: Result<Path<String>, PathRejection>) -> Result<TaskId, ApiError> {
    let Path(task_id) = path?;
    TaskId::from_string(&task_id)
        .map_err(TaskError::from)
        .map_err(ApiError::from)
}
