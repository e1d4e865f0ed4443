use sqlx::SqlitePool;

pub const SQLITE_SCHEMA_SQL: &str = include_str!("../../sql/sqlite_schema.sql");
pub const SCHEMA_VERSION: &str = "1";

pub fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for ch in sql.chars() {
        match ch {
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
            }
            ';' if !in_single_quote && !in_double_quote => {
                let stmt = current.trim();
                if !stmt.is_empty() {
                    statements.push(stmt.to_string());
                }
                current.clear();
                continue;
            }
            _ => {}
        }

        current.push(ch);
    }

    let tail = current.trim();
    if !tail.is_empty() {
        statements.push(tail.to_string());
    }

    statements
}

fn strip_comment_lines(stmt: &str) -> String {
    stmt.lines()
        .filter(|line| !line.trim().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let version = applied_version(pool).await?;

    if version.as_deref() == Some(SCHEMA_VERSION) {
        tracing::debug!(version = SCHEMA_VERSION, "schema up to date");
        return Ok(());
    }

    tracing::info!(version = SCHEMA_VERSION, "applying sqlite schema");

    let mut tx = pool.begin().await?;
    for stmt in split_sql_statements(SQLITE_SCHEMA_SQL) {
        let sql = strip_comment_lines(&stmt);
        let trimmed = sql.trim();
        if trimmed.is_empty() {
            continue;
        }
        sqlx::query(trimmed).execute(&mut *tx).await?;
    }

    sqlx::query(
        r#"INSERT OR REPLACE INTO "_db_metadata" ("key", "value") VALUES ('schema_version', $1)"#,
    )
    .bind(SCHEMA_VERSION)
    .execute(&mut *tx)
    .await?;

    tx.commit().await
}

/// `None` before the first run, when the metadata table does not exist yet.
async fn applied_version(pool: &SqlitePool) -> Result<Option<String>, sqlx::Error> {
    let has_metadata: i64 = sqlx::query_scalar(
        r#"SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_db_metadata'"#,
    )
    .fetch_one(pool)
    .await?;
    if has_metadata == 0 {
        return Ok(None);
    }

    let versions: Vec<String> =
        sqlx::query_scalar(r#"SELECT "value" FROM "_db_metadata" WHERE "key" = 'schema_version'"#)
            .fetch_all(pool)
            .await?;
    Ok(versions.into_iter().next())
}
