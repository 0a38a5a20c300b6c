use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use roster_core::{ListParams, ListResult, ServiceError};

use crate::model::{Person, PersonDraft};
use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/person", get(list_persons).post(create_person))
        .route(
            "/person/{id}",
            get(get_person).put(update_person).delete(delete_person),
        )
}

async fn list_persons(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<Person>>, ServiceError> {
    svc.list_persons(&params).map(Json)
}

async fn get_person(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Person>, ServiceError> {
    svc.get_person(id).map(Json)
}

async fn create_person(
    State(svc): State<AppState>,
    Json(draft): Json<PersonDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = svc.create_person(draft)?;
    Ok(Json(serde_json::json!({"id": id})))
}

async fn update_person(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<PersonDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.update_person(id, draft)?;
    Ok(Json(serde_json::json!({"ok": true})))
}

async fn delete_person(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_person(id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
