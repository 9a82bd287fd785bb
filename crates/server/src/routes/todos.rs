use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use common::types::Message;

use crate::errors::ApiError;
use crate::routes::AppState;

const NO_TASK_FOUND: &str = "No Task found";

#[derive(Debug, Deserialize)]
pub struct CreateTodoInput {
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoInput {
    pub content: String,
    pub is_completed: bool,
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTodoInput>,
) -> Result<Json<models::todo::Model>, ApiError> {
    let todo = models::todo::create(&state.db, &input.content, input.is_completed).await?;
    info!(id = todo.id, "created todo");
    Ok(Json(todo))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<models::todo::Model>>, ApiError> {
    let todos = models::todo::list(&state.db).await?;
    if todos.is_empty() && state.empty_list_as_not_found {
        return Err(ApiError::not_found(NO_TASK_FOUND));
    }
    Ok(Json(todos))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<models::todo::Model>, ApiError> {
    match models::todo::get(&state.db, id).await? {
        Some(todo) => Ok(Json(todo)),
        None => Err(ApiError::not_found(NO_TASK_FOUND)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateTodoInput>,
) -> Result<Json<models::todo::Model>, ApiError> {
    match models::todo::update(&state.db, id, &input.content, input.is_completed).await? {
        Some(todo) => {
            info!(id = todo.id, "updated todo");
            Ok(Json(todo))
        }
        None => Err(ApiError::not_found(NO_TASK_FOUND)),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Message>, ApiError> {
    if models::todo::delete(&state.db, id).await? {
        info!(id, "deleted todo");
        Ok(Json(Message { message: "Task successfully deleted" }))
    } else {
        Err(ApiError::not_found(NO_TASK_FOUND))
    }
}
