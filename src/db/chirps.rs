/// Chirp table queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::with_timeout;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

/// Listing order, by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

pub async fn create_chirp(pool: &PgPool, body: &str, user_id: Uuid) -> Result<Chirp, AppError> {
    let now = Utc::now();

    with_timeout(
        sqlx::query_as::<_, Chirp>(
            r#"
            INSERT INTO chirps (id, created_at, updated_at, body, user_id)
            VALUES ($1, $2, $2, $3, $4)
            RETURNING id, created_at, updated_at, body, user_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(now)
        .bind(body)
        .bind(user_id)
        .fetch_one(pool),
    )
    .await
}

/// List chirps, optionally restricted to one author.
pub async fn list_chirps(
    pool: &PgPool,
    author_id: Option<Uuid>,
    order: SortOrder,
) -> Result<Vec<Chirp>, AppError> {
    let mut chirps = match author_id {
        Some(author_id) => {
            with_timeout(
                sqlx::query_as::<_, Chirp>(
                    r#"
                    SELECT id, created_at, updated_at, body, user_id
                    FROM chirps
                    WHERE user_id = $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(author_id)
                .fetch_all(pool),
            )
            .await?
        }
        None => {
            with_timeout(
                sqlx::query_as::<_, Chirp>(
                    r#"
                    SELECT id, created_at, updated_at, body, user_id
                    FROM chirps
                    ORDER BY created_at ASC
                    "#,
                )
                .fetch_all(pool),
            )
            .await?
        }
    };

    if order == SortOrder::Descending {
        chirps.reverse();
    }

    Ok(chirps)
}

pub async fn get_chirp(pool: &PgPool, id: Uuid) -> Result<Option<Chirp>, AppError> {
    with_timeout(
        sqlx::query_as::<_, Chirp>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool),
    )
    .await
}

pub async fn delete_chirp(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    with_timeout(
        sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(pool),
    )
    .await?;

    Ok(())
}
