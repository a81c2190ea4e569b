/// User table queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::with_timeout;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
    pub is_chirpy_red: bool,
}

pub async fn create_user(
    pool: &PgPool,
    email: &str,
    hashed_password: &str,
) -> Result<User, AppError> {
    let now = Utc::now();

    with_timeout(
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, created_at, updated_at, email, hashed_password)
            VALUES ($1, $2, $2, $3, $4)
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(now)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(pool),
    )
    .await
}

pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    with_timeout(
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool),
    )
    .await
}

pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
    with_timeout(
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool),
    )
    .await
}

/// Replace a user's email and password hash.
pub async fn update_user(
    pool: &PgPool,
    id: Uuid,
    email: &str,
    hashed_password: &str,
) -> Result<User, AppError> {
    with_timeout(
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $1, hashed_password = $2, updated_at = $3
            WHERE id = $4
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(pool),
    )
    .await
}

/// Flip the premium subscriber flag. Only the billing webhook calls this.
pub async fn set_chirpy_red(pool: &PgPool, id: Uuid, is_chirpy_red: bool) -> Result<(), AppError> {
    with_timeout(
        sqlx::query(
            r#"
            UPDATE users
            SET is_chirpy_red = $1, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(is_chirpy_red)
        .bind(Utc::now())
        .bind(id)
        .execute(pool),
    )
    .await?;

    Ok(())
}

/// Remove every user. Chirps and refresh tokens go with them via cascade.
/// Only the non-production admin reset calls this.
pub async fn delete_all_users(pool: &PgPool) -> Result<(), AppError> {
    with_timeout(sqlx::query("DELETE FROM users").execute(pool)).await?;

    Ok(())
}
