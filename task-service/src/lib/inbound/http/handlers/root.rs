use axum::http::StatusCode;
use serde::Serialize;

use crate::inbound::http::handlers::ApiSuccess;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRootData {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoints {
    pub auth: &'static str,
    pub tasks: &'static str,
}

/// Welcome document listing the top-level resources.
pub async fn api_root() -> ApiSuccess<ApiRootData> {
    ApiSuccess::new(
        StatusCode::OK,
        ApiRootData {
            message: "Welcome to Task API",
            version: env!("CARGO_PKG_VERSION"),
            endpoints: Endpoints {
                auth: "/api/auth",
                tasks: "/api/tasks",
            },
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: &'static str,
}

pub async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(StatusCode::OK, HealthData { status: "ok" })
}
