//! POST /login — verify credentials, issue a signed access token.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use roster_core::ServiceError;

use crate::model::Credentials;
use crate::api::AppState;

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(
    State(svc): State<AppState>,
    Json(creds): Json<Credentials>,
) -> Result<Json<LoginResponse>, ServiceError> {
    let token = svc.login(&creds).map_err(ServiceError::from)?;
    Ok(Json(LoginResponse { token }))
}
