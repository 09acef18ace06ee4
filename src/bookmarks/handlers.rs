use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    bookmarks::{
        dto::{CreateBookmarkRequest, EditBookmarkRequest},
        repo::Bookmark,
    },
    error::ApiError,
    extract::{JsonBody, PathId},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookmark", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmark/:id",
            get(get_bookmark)
                .patch(edit_bookmark)
                .delete(delete_bookmark),
        )
}

#[instrument(skip(state))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let bookmarks = Bookmark::list_by_owner(&state.db, user_id).await?;
    Ok(Json(bookmarks))
}

/// A miss is a 200 with a null body, and a bookmark owned by someone else
/// looks exactly like a miss.
#[instrument(skip(state))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    PathId(id): PathId,
) -> Result<Json<Option<Bookmark>>, ApiError> {
    let bookmark = Bookmark::find_for_owner(&state.db, user_id, id).await?;
    Ok(Json(bookmark))
}

#[instrument(skip(state, payload))]
pub async fn create_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    JsonBody(payload): JsonBody<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    if payload.link.trim().is_empty() {
        return Err(ApiError::Validation("link must not be empty".into()));
    }

    let bookmark = Bookmark::create(&state.db, user_id, &payload).await?;
    info!(user_id, bookmark_id = bookmark.id, "bookmark created");
    Ok((StatusCode::CREATED, Json(bookmark)))
}

#[instrument(skip(state, payload))]
pub async fn edit_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    PathId(id): PathId,
    JsonBody(payload): JsonBody<EditBookmarkRequest>,
) -> Result<Json<Bookmark>, ApiError> {
    let bookmark = Bookmark::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotOwner)?;
    bookmark.assert_owner(user_id)?;

    let updated = Bookmark::update(&state.db, id, &payload)
        .await?
        .ok_or(ApiError::NotOwner)?;
    info!(user_id, bookmark_id = id, "bookmark updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    PathId(id): PathId,
) -> Result<StatusCode, ApiError> {
    let bookmark = Bookmark::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotOwner)?;
    bookmark.assert_owner(user_id)?;

    Bookmark::delete(&state.db, id).await?;
    info!(user_id, bookmark_id = id, "bookmark deleted");
    Ok(StatusCode::NO_CONTENT)
}
