use chrono::{DateTime, Utc};
use sqlx::Row;
use vocab_deck_core::Word;

use super::{datetime_to_ms, ms_to_datetime, words};
use crate::db::DatabaseProxy;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub async fn find_user_by_email(
    proxy: &DatabaseProxy,
    email: &str,
) -> Result<Option<UserRecord>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT "id", "email", "passwordHash", "createdAt"
        FROM "users"
        WHERE "email" = $1
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_all(proxy.pool())
    .await?;

    let Some(row) = rows.into_iter().next() else {
        return Ok(None);
    };

    let created_at: i64 = row.try_get("createdAt")?;

    Ok(Some(UserRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("passwordHash")?,
        created_at: ms_to_datetime("createdAt", created_at)?,
    }))
}

/// Creates the account and its starter words together; neither exists without the other.
pub async fn insert_user_with_words(
    proxy: &DatabaseProxy,
    user: &NewUser,
    starter_words: &[Word],
) -> Result<(), sqlx::Error> {
    let mut tx = proxy.pool().begin().await?;

    sqlx::query(
        r#"
        INSERT INTO "users" ("id", "email", "passwordHash", "createdAt")
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(datetime_to_ms(user.created_at))
    .execute(&mut *tx)
    .await?;

    words::insert_many(&mut *tx, starter_words).await?;

    tx.commit().await
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
