use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;

use crate::api::{Context, Result, Router, error::Error};
use crate::model::{CreateTodo, Todo, TodoId, UpdateTodo};

pub fn router() -> Router {
    use axum::routing;

    Router::new()
        .route("/todos", routing::get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            routing::get(get_todo)
                .put(update_todo)
                .patch(update_todo)
                .delete(delete_todo),
        )
}

async fn list_todos(State(ctx): State<Context>) -> Result<Json<Vec<Todo>>> {
    let todos = ctx.store.list().await?;

    Ok(Json(todos))
}

async fn create_todo(
    State(ctx): State<Context>,
    payload: std::result::Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>)> {
    let Json(payload) = payload.map_err(|rejection| {
        Error::builder()
            .bad_request()
            .message(rejection.body_text())
            .build()
    })?;

    if payload.text.trim().is_empty() {
        return Err(Error::builder()
            .bad_request()
            .message("Todo text must not be empty")
            .build());
    }

    let todo = ctx.store.create(payload).await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(Path(id): Path<String>, State(ctx): State<Context>) -> Result<Json<Todo>> {
    let todo = match id.parse::<TodoId>() {
        Ok(id) => ctx.store.get(id).await?,
        // An id the store could never have produced is simply unknown.
        Err(_) => None,
    };

    let Some(todo) = todo else {
        return Err(Error::builder()
            .not_found()
            .message("Todo not found")
            .build());
    };

    Ok(Json(todo))
}

async fn update_todo(
    Path(id): Path<String>,
    State(ctx): State<Context>,
    payload: std::result::Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>> {
    let Json(payload) = payload.map_err(|rejection| {
        Error::builder()
            .bad_request()
            .message(rejection.body_text())
            .build()
    })?;

    if let Some(text) = &payload.text {
        if text.trim().is_empty() {
            return Err(Error::builder()
                .bad_request()
                .message("Todo text must not be empty")
                .build());
        }
    }

    let updated = match id.parse::<TodoId>() {
        Ok(id) => ctx.store.update(id, payload).await?,
        Err(_) => None,
    };

    let Some(todo) = updated else {
        return Err(Error::builder()
            .not_found()
            .message("Todo not found")
            .build());
    };

    Ok(Json(todo))
}

async fn delete_todo(Path(id): Path<String>, State(ctx): State<Context>) -> Result<StatusCode> {
    let removed = match id.parse::<TodoId>() {
        Ok(id) => ctx.store.delete(id).await?,
        Err(_) => false,
    };

    if !removed {
        tracing::debug!(todo.id = %id, "delete of unknown todo id");
    }

    // Delete is idempotent: already-absent answers 204 as well.
    Ok(StatusCode::NO_CONTENT)
}
