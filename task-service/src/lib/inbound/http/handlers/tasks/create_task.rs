use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::task::errors::TaskDescriptionError;
use crate::domain::task::errors::TaskTitleError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TaskResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Create a task owned by the caller.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .task_service
        .create_task(user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTaskRequest {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: TaskStatus,
}

#[derive(Debug, Clone, Error)]
pub(super) enum ParseTaskRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TaskTitleError),

    #[error("Invalid description: {0}")]
    Description(#[from] TaskDescriptionError),
}

impl From<ParseTaskRequestError> for ApiError {
    fn from(err: ParseTaskRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, ParseTaskRequestError> {
        Ok(CreateTaskCommand {
            title: TaskTitle::new(self.title)?,
            description: self.description.map(TaskDescription::new).transpose()?,
            status: self.status,
        })
    }
}
