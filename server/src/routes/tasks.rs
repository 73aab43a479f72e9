//! Google Tasks passthrough
//!
//! Every route acts for the signed-in user with the access token from the
//! session. An upstream 401 triggers one token refresh and a retry.

use std::future::Future;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::Value;

use super::error::{AppError, AppResult};
use super::extract::CurrentUser;
use crate::domain::{completion_patch, NewTask};
use crate::google::{GoogleError, GoogleResult};
use crate::AppState;

/// Run `call` with the user's access token, refreshing it once if Google
/// rejects it.
async fn with_fresh_token<T, F, Fut>(state: &AppState, current: &CurrentUser, call: F) -> AppResult<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = GoogleResult<T>>,
{
    let tokens = &current.user.tokens;
    match call(tokens.access_token.clone()).await {
        Err(GoogleError::Unauthorized) => {
            let (Some(oauth), Some(refresh_token)) = (state.oauth.as_ref(), tokens.refresh_token.clone())
            else {
                return Err(GoogleError::Unauthorized.into());
            };
            tracing::info!("access token rejected for {}, refreshing", current.user.id);
            let refreshed = oauth
                .refresh(&refresh_token)
                .await?
                .into_tokens(Some(refresh_token), Utc::now());
            let access_token = refreshed.access_token.clone();
            state.sessions.update_tokens(&current.session_id, refreshed).await;
            Ok(call(access_token).await?)
        }
        other => Ok(other?),
    }
}

pub async fn list_task_lists(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<Value>> {
    let tasks = &*state.tasks;
    let lists = with_fresh_token(&state, &user, |token| async move { tasks.list_task_lists(&token).await }).await?;
    Ok(Json(lists))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<String>,
) -> AppResult<Json<Value>> {
    let tasks = &*state.tasks;
    let list_id = list_id.as_str();
    let items =
        with_fresh_token(&state, &user, |token| async move { tasks.list_tasks(&token, list_id).await }).await?;
    Ok(Json(items))
}

pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<String>,
    Json(task): Json<NewTask>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let tasks = &*state.tasks;
    let list_id = list_id.as_str();
    let task = &task;
    let created = with_fresh_token(&state, &user, |token| async move {
        tasks.insert_task(&token, list_id, task).await
    })
    .await?;
    tracing::info!("created task in list {}", list_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((list_id, task_id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> AppResult<Json<Value>> {
    if !patch.is_object() {
        return Err(AppError::BadRequest("task update must be a JSON object".to_string()));
    }
    let updated = patch_with_retry(&state, &user, &list_id, &task_id, &patch).await?;
    tracing::info!("updated task {}", task_id);
    Ok(Json(updated))
}

pub async fn complete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((list_id, task_id)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    let patch = completion_patch(Utc::now());
    let completed = patch_with_retry(&state, &user, &list_id, &task_id, &patch).await?;
    tracing::info!("completed task {}", task_id);
    Ok(Json(completed))
}

pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((list_id, task_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let tasks = &*state.tasks;
    let (list, task) = (list_id.as_str(), task_id.as_str());
    with_fresh_token(&state, &user, |token| async move { tasks.delete_task(&token, list, task).await }).await?;
    tracing::info!("deleted task {}", task_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn patch_with_retry(
    state: &AppState,
    user: &CurrentUser,
    list_id: &str,
    task_id: &str,
    patch: &Value,
) -> AppResult<Value> {
    let tasks = &*state.tasks;
    with_fresh_token(state, user, |token| async move {
        tasks.patch_task(&token, list_id, task_id, patch).await
    })
    .await
}
