use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthRequest, TokenResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::{on_conflict, ApiError},
    extract::JsonBody,
    state::AppState,
    users::repo::User,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize(payload: &mut AuthRequest) -> Result<(), ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("invalid email".into()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("password must not be empty".into()));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(mut payload): JsonBody<AuthRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    normalize(&mut payload)?;

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.email, &hash)
        .await
        .map_err(|e| on_conflict(e, ApiError::EmailTaken))?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user.id, &user.email)?;

    info!(user_id = user.id, email = %user.email, "user signed up");
    Ok((StatusCode::CREATED, Json(TokenResponse { access_token })))
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    JsonBody(mut payload): JsonBody<AuthRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    normalize(&mut payload)?;

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "signin with unknown email");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "signin with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user.id, &user.email)?;

    info!(user_id = user.id, "user signed in");
    Ok(Json(TokenResponse { access_token }))
}
