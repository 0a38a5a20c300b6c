use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use roster_core::{ListParams, ListResult, ServiceError};

use crate::model::{User, UserDraft};
use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users).post(create_user))
        .route(
            "/user/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

async fn list_users(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<User>>, ServiceError> {
    svc.list_users(&params).map(Json)
}

async fn get_user(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ServiceError> {
    svc.get_user(id).map(Json)
}

async fn create_user(
    State(svc): State<AppState>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = svc.create_user(draft)?;
    Ok(Json(serde_json::json!({"id": id})))
}

async fn update_user(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.update_user(id, draft)?;
    Ok(Json(serde_json::json!({"ok": true})))
}

async fn delete_user(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_user(id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
