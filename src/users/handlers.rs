use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{handlers::is_valid_email, jwt::AuthUser},
    error::{on_conflict, ApiError},
    extract::JsonBody,
    state::AppState,
    users::{dto::EditUserRequest, repo::User},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_me))
        .route("/users", patch(edit_user))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id, "token refers to a missing user");
            ApiError::Unauthorized
        })?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn edit_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    JsonBody(mut payload): JsonBody<EditUserRequest>,
) -> Result<Json<User>, ApiError> {
    if let Some(email) = payload.email.as_mut() {
        *email = email.trim().to_lowercase();
        if !is_valid_email(email) {
            return Err(ApiError::Validation("invalid email".into()));
        }
    }

    let user = User::update(&state.db, user_id, &payload)
        .await
        .map_err(|e| on_conflict(e, ApiError::EmailTaken))?
        .ok_or_else(|| {
            warn!(user_id, "token refers to a missing user");
            ApiError::Unauthorized
        })?;

    info!(user_id, "user profile updated");
    Ok(Json(user))
}
