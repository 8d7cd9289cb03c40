use axum::Json;
use axum::extract::Path;
use axum::http::HeaderMap;
use axum::routing::patch;
use axum::{Router, extract::State, http::StatusCode, routing::get, routing::post};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::tasks_for_day;
use crate::error::AppError;
use crate::models::*;
use crate::services::{DataService, SyncService};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .route("/classes", get(list_classes).post(create_class))
        .route("/classes/{id}", patch(update_class).delete(delete_class))
        .route("/task-types", get(list_task_types).post(create_task_type))
        .route(
            "/task-types/{id}",
            patch(update_task_type).delete(delete_task_type),
        )
        .route("/calendar/{date}", get(calendar_day))
        .route("/sync", post(sync_now))
        .with_state(state)
}

/// The authenticated identity, when the caller supplies one. Its presence
/// selects the remote data path; absence means local-only operation.
fn user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn data_service(state: &AppState, headers: &HeaderMap) -> DataService {
    DataService::new(state.local(), state.remote.clone(), user_id(headers))
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = data_service(&state, &headers).get_tasks().await?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let id = req
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let task = data_service(&state, &headers)
        .add_task(req.into_task(id))
        .await?;
    state.notify_calendar_update();
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<NewTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let task = data_service(&state, &headers)
        .update_task(&id, req.into_task(id.clone()))
        .await?;
    state.notify_calendar_update();
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    data_service(&state, &headers).delete_task(&id).await?;
    state.notify_calendar_update();
    Ok(StatusCode::NO_CONTENT)
}

async fn list_classes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = data_service(&state, &headers).get_classes().await?;
    Ok(Json(classes))
}

async fn create_class(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewClassRequest>,
) -> Result<Json<Class>, AppError> {
    let id = req
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let class = data_service(&state, &headers)
        .add_class(req.into_class(id))
        .await?;
    state.notify_calendar_update();
    Ok(Json(class))
}

async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<NewClassRequest>,
) -> Result<Json<Class>, AppError> {
    let class = data_service(&state, &headers)
        .update_class(&id, req.into_class(id.clone()))
        .await?;
    state.notify_calendar_update();
    Ok(Json(class))
}

async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    data_service(&state, &headers).delete_class(&id).await?;
    state.notify_calendar_update();
    Ok(StatusCode::NO_CONTENT)
}

async fn list_task_types(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TaskType>>, AppError> {
    let types = data_service(&state, &headers).get_task_types().await?;
    Ok(Json(types))
}

async fn create_task_type(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewTaskTypeRequest>,
) -> Result<Json<TaskType>, AppError> {
    let id = req
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let task_type = data_service(&state, &headers)
        .add_task_type(req.into_task_type(id))
        .await?;
    state.notify_calendar_update();
    Ok(Json(task_type))
}

async fn update_task_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<NewTaskTypeRequest>,
) -> Result<Json<TaskType>, AppError> {
    let task_type = data_service(&state, &headers)
        .update_task_type(&id, req.into_task_type(id.clone()))
        .await?;
    state.notify_calendar_update();
    Ok(Json(task_type))
}

async fn delete_task_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    data_service(&state, &headers).delete_task_type(&id).await?;
    state.notify_calendar_update();
    Ok(StatusCode::NO_CONTENT)
}

async fn calendar_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<Task>>, AppError> {
    let target = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date: {}", date)))?;
    let tasks = data_service(&state, &headers).get_tasks().await?;
    Ok(Json(tasks_for_day(&tasks, target)))
}

#[derive(Debug, Deserialize)]
struct SyncRequest {
    user_id: String,
}

#[derive(Debug, Serialize)]
struct SyncResponse {
    success: bool,
}

/// Sync failures stay silent to the client (logged server-side); the UI
/// keeps operating against whichever store it last read.
async fn sync_now(
    State(state): State<AppState>,
    Json(req): Json<SyncRequest>,
) -> Result<Json<SyncResponse>, AppError> {
    let service = SyncService::new(state.local(), state.remote.clone());
    let success = service.synchronize(&req.user_id).await;
    if success {
        state.notify_calendar_update();
    }
    Ok(Json(SyncResponse { success }))
}
