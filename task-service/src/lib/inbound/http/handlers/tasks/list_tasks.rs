use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::pagination::Page;
use crate::domain::task::pagination::PageRequest;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TaskResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Tasks owned by the caller, optionally filtered by status.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<ApiSuccess<Page<TaskResponseData>>, ApiError> {
    let Query(query) = query?;
    let page = PageRequest::from_query(query.page, query.size).map_err(TaskError::from)?;

    state
        .task_service
        .list_tasks(user.user_id, query.status, page)
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.map(TaskResponseData::from)))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<TaskStatus>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}
