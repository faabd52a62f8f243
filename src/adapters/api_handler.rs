//! REST API handlers for mock projects and generated data
//!
//! Every reply uses the `{success, data | error, timestamp}` envelope; mock data
//! replies also carry `metadata`.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::adapters::project_manager::ProjectManager;
use crate::domain::{
    ApiProject, CreateProjectRequest, ParsedInterface, ProjectError, ProjectStats, ProjectUpdate,
};

/// Largest `count` a client may request in one mock call
pub const MAX_MOCK_COUNT: i64 = 100;

const COUNT_ERROR: &str = "Count must be between 1 and 100";

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub projects: Arc<ProjectManager>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MockMetadata>,
}

#[derive(Serialize)]
pub struct MockMetadata {
    pub project_id: String,
    pub generated_count: usize,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: timestamp(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: MockMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: timestamp(),
            metadata: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            timestamp: timestamp(),
            metadata: None,
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl ProjectError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProjectError::NotFound(_) => StatusCode::NOT_FOUND,
            ProjectError::Validation(_) | ProjectError::InvalidInterface(_) => {
                StatusCode::BAD_REQUEST
            }
            ProjectError::LimitReached(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

impl From<JsonRejection> for ProjectError {
    fn from(rejection: JsonRejection) -> Self {
        ProjectError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ProjectError>;

// ============================================================================
// Projects
// ============================================================================

pub async fn create_project(
    State(state): State<ApiState>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ApiProject>>), ProjectError> {
    let Json(request) = payload?;
    let project = state.projects.create_project(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(project))))
}

pub async fn list_projects(State(state): State<ApiState>) -> Json<ApiResponse<Vec<ApiProject>>> {
    Json(ApiResponse::success(state.projects.list_active_projects().await))
}

pub async fn get_project(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<ApiProject> {
    let project = state
        .projects
        .get_project(&id)
        .await
        .ok_or_else(ProjectError::not_found)?;
    Ok(Json(ApiResponse::success(project)))
}

pub async fn update_project(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectUpdate>, JsonRejection>,
) -> ApiResult<ApiProject> {
    let Json(update) = payload?;
    let project = state
        .projects
        .update_project(&id, update)
        .await?
        .ok_or_else(ProjectError::not_found)?;
    Ok(Json(ApiResponse::success(project)))
}

pub async fn delete_project(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    if state.projects.deactivate_project(&id).await {
        Ok(Json(ApiResponse::ok()))
    } else {
        Err(ProjectError::not_found())
    }
}

pub async fn get_project_interface(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<ParsedInterface> {
    let parsed = state.projects.parsed_interface(&id).await?;
    Ok(Json(ApiResponse::success(parsed)))
}

pub async fn get_stats(State(state): State<ApiState>) -> Json<ApiResponse<ProjectStats>> {
    Json(ApiResponse::success(state.projects.stats().await))
}

/// Preview the structural model for raw interface text in the request body.
pub async fn parse_interface(body: Bytes) -> ApiResult<ParsedInterface> {
    let parsed = ParsedInterface::from_utf8(&body)?;
    Ok(Json(ApiResponse::success(parsed)))
}

// ============================================================================
// Mock data
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct MockQuery {
    pub count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MockRequestBody {
    #[serde(default)]
    count: Option<Value>,
}

pub async fn get_mock_data(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(query): Query<MockQuery>,
) -> ApiResult<Value> {
    let count = parse_count_param(query.count.as_deref())?;
    respond_with_mock(&state, &id, count).await
}

pub async fn post_mock_data(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Value> {
    let count = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let body: MockRequestBody = serde_json::from_slice(&body)
            .map_err(|e| ProjectError::Validation(format!("Invalid JSON body: {}", e)))?;
        parse_count_value(body.count.as_ref())?
    };
    respond_with_mock(&state, &id, count).await
}

async fn respond_with_mock(state: &ApiState, id: &str, count: Option<usize>) -> ApiResult<Value> {
    let data = state.projects.generate_mock_response(id, count).await?;
    let generated_count = data.as_array().map_or(1, Vec::len);
    debug!(project_id = %id, generated_count, "Served mock data");

    Ok(Json(ApiResponse::success(data).with_metadata(MockMetadata {
        project_id: id.to_string(),
        generated_count,
    })))
}

fn parse_count_param(raw: Option<&str>) -> Result<Option<usize>, ProjectError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => {
            let n = text
                .parse::<i64>()
                .map_err(|_| ProjectError::Validation(COUNT_ERROR.to_string()))?;
            check_count(n).map(Some)
        }
    }
}

fn parse_count_value(raw: Option<&Value>) -> Result<Option<usize>, ProjectError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            // Integral floats such as `5.0` count as integers
            let n = value
                .as_i64()
                .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .ok_or_else(|| ProjectError::Validation(COUNT_ERROR.to_string()))?;
            check_count(n).map(Some)
        }
    }
}

fn check_count(n: i64) -> Result<usize, ProjectError> {
    if (1..=MAX_MOCK_COUNT).contains(&n) {
        Ok(n as usize)
    } else {
        Err(ProjectError::Validation(COUNT_ERROR.to_string()))
    }
}
