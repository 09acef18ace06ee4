use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::dto::{CreateBookmarkRequest, EditBookmarkRequest};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const BOOKMARK_COLUMNS: &str = "id, user_id, title, description, link, created_at, updated_at";

impl Bookmark {
    /// Repository-level ownership guard; every mutation checks this before
    /// touching the row.
    pub fn assert_owner(&self, user_id: i64) -> Result<(), ApiError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(ApiError::NotOwner)
        }
    }

    /// All bookmarks of one owner, in insertion order.
    pub async fn list_by_owner(db: &PgPool, user_id: i64) -> Result<Vec<Bookmark>, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Scoped to the owner: a foreign bookmark comes back as None, same as a
    /// nonexistent one.
    pub async fn find_for_owner(
        db: &PgPool,
        user_id: i64,
        id: i64,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    /// Unscoped lookup, for the mutation path where the caller runs
    /// `assert_owner` on the result.
    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<Bookmark>, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        user_id: i64,
        dto: &CreateBookmarkRequest,
    ) -> Result<Bookmark, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            INSERT INTO bookmarks (user_id, title, description, link)
            VALUES ($1, $2, $3, $4)
            RETURNING {BOOKMARK_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&dto.title)
        .bind(dto.description.as_deref())
        .bind(&dto.link)
        .fetch_one(db)
        .await
    }

    /// Partial update: unsupplied fields keep their prior values. None when
    /// the row vanished between the ownership check and the update.
    pub async fn update(
        db: &PgPool,
        id: i64,
        fields: &EditBookmarkRequest,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            UPDATE bookmarks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                link = COALESCE($4, link),
                updated_at = now()
            WHERE id = $1
            RETURNING {BOOKMARK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(fields.title.as_deref())
        .bind(fields.description.as_deref())
        .bind(fields.link.as_deref())
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
