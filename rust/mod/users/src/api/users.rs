use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::warn;

use userbase_core::error::error_code;
use userbase_core::ServiceError;
use userbase_types::User;

use crate::api::AppState;
use crate::service::UserError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getusers", get(list_users))
        .route("/getusers/{id}", get(get_user))
        .route("/createusers", post(create_user))
        .route("/updateuser/{id}", put(update_user))
        .route("/deleteuser/{id}", delete(delete_user))
}

/// Unwrap a JSON body, turning axum's plain-text rejection into a
/// structured 400.
fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ServiceError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| ServiceError::BadRequest(e.body_text()))
}

fn to_json(user: &User) -> Result<Value, ServiceError> {
    serde_json::to_value(user).map_err(|e| ServiceError::Internal(e.to_string()))
}

async fn list_users(State(svc): State<AppState>) -> Result<Json<Value>, ServiceError> {
    let users = svc.list_users().map_err(ServiceError::from)?;
    Ok(Json(json!(users)))
}

async fn create_user(
    State(svc): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    let input = body(payload)?;
    let user = svc.create_user(&input).map_err(ServiceError::from)?;
    Ok((StatusCode::CREATED, Json(to_json(&user)?)))
}

async fn get_user(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    let user = svc.get_user(&id).map_err(ServiceError::from)?;
    Ok(Json(to_json(&user)?))
}

async fn update_user(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ServiceError> {
    let input = body(payload)?;
    let user = svc.update_user(&id, &input).map_err(ServiceError::from)?;
    Ok(Json(to_json(&user)?))
}

/// Delete answers with its own envelope rather than the shared error
/// body: `{success, result}` or `{success, error}`.
async fn delete_user(State(svc): State<AppState>, Path(id): Path<String>) -> Response {
    match svc.delete_user(&id) {
        Ok(user) => Json(json!({"success": true, "result": user})).into_response(),
        Err(UserError::NotFound(message)) => {
            let body = json!({"success": false, "error": message, "code": error_code::NOT_FOUND});
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
        Err(e) => {
            warn!("delete {} failed: {}", id, e);
            let err = ServiceError::from(e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": err.to_string(), "code": err.error_code()})),
            )
                .into_response()
        }
    }
}
