use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use vocab_deck_core::{Difficulty, ReviewPatch, Word};

use super::{datetime_to_ms, ms_to_datetime};
use crate::db::DatabaseProxy;

const WORD_COLUMNS: &str = r#""id", "owner", "word", "meaning", "sentence", "reviewCount", "lastReviewed", "nextReviewDate", "difficulty""#;

pub async fn find_by_id(proxy: &DatabaseProxy, id: &str) -> Result<Option<Word>, sqlx::Error> {
    let sql = format!(r#"SELECT {WORD_COLUMNS} FROM "words" WHERE "id" = $1 LIMIT 1"#);
    let rows = sqlx::query(&sql).bind(id).fetch_all(proxy.pool()).await?;
    rows.first().map(map_word_row).transpose()
}

/// The owner's words in creation order, optionally narrowed to one difficulty.
pub async fn find_by_owner(
    proxy: &DatabaseProxy,
    owner: &str,
    difficulty: Option<Difficulty>,
) -> Result<Vec<Word>, sqlx::Error> {
    let rows = match difficulty {
        Some(difficulty) => {
            let sql = format!(
                r#"SELECT {WORD_COLUMNS} FROM "words" WHERE "owner" = $1 AND "difficulty" = $2 ORDER BY "seq""#
            );
            sqlx::query(&sql)
                .bind(owner)
                .bind(difficulty.as_str())
                .fetch_all(proxy.pool())
                .await?
        }
        None => {
            let sql =
                format!(r#"SELECT {WORD_COLUMNS} FROM "words" WHERE "owner" = $1 ORDER BY "seq""#);
            sqlx::query(&sql)
                .bind(owner)
                .fetch_all(proxy.pool())
                .await?
        }
    };

    rows.iter().map(map_word_row).collect()
}

/// Applies `patch` in one statement, only if `id` belongs to `owner`.
///
/// `None` covers both a missing id and someone else's word. The statement is
/// run to completion before returning, so the write is committed by the time
/// the caller sees the updated row.
pub async fn update_if_owner(
    proxy: &DatabaseProxy,
    id: &str,
    owner: &str,
    patch: &ReviewPatch,
) -> Result<Option<Word>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE "words"
        SET "difficulty" = $1,
            "reviewCount" = MIN("reviewCount" + 1, $5),
            "lastReviewed" = MAX(COALESCE("lastReviewed", $2), $2)
        WHERE "id" = $3 AND "owner" = $4
        RETURNING {WORD_COLUMNS}
        "#
    );

    let rows = sqlx::query(&sql)
        .bind(patch.difficulty.as_str())
        .bind(datetime_to_ms(patch.reviewed_at))
        .bind(id)
        .bind(owner)
        .bind(i64::from(u32::MAX))
        .fetch_all(proxy.pool())
        .await?;

    rows.first().map(map_word_row).transpose()
}

/// Inserts `words` in order on `conn`, so callers can run it inside their own transaction.
pub async fn insert_many(conn: &mut SqliteConnection, words: &[Word]) -> Result<(), sqlx::Error> {
    for word in words {
        sqlx::query(
            r#"
            INSERT INTO "words" (
                "id", "owner", "word", "meaning", "sentence",
                "reviewCount", "lastReviewed", "nextReviewDate", "difficulty"
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&word.id)
        .bind(&word.owner)
        .bind(&word.word)
        .bind(&word.meaning)
        .bind(&word.sentence)
        .bind(i64::from(word.review_count))
        .bind(word.last_reviewed.map(datetime_to_ms))
        .bind(datetime_to_ms(word.next_review_date))
        .bind(word.difficulty.as_str())
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

fn map_word_row(row: &SqliteRow) -> Result<Word, sqlx::Error> {
    let review_count: i64 = row.try_get("reviewCount")?;
    let review_count = u32::try_from(review_count).map_err(|err| sqlx::Error::ColumnDecode {
        index: "reviewCount".to_string(),
        source: Box::new(err),
    })?;

    let last_reviewed: Option<i64> = row.try_get("lastReviewed")?;
    let last_reviewed = last_reviewed
        .map(|ms| ms_to_datetime("lastReviewed", ms))
        .transpose()?;

    let next_review_date: i64 = row.try_get("nextReviewDate")?;

    let difficulty: String = row.try_get("difficulty")?;
    let difficulty = difficulty
        .parse::<Difficulty>()
        .map_err(|err| sqlx::Error::ColumnDecode {
            index: "difficulty".to_string(),
            source: Box::new(err),
        })?;

    Ok(Word {
        id: row.try_get("id")?,
        owner: row.try_get("owner")?,
        word: row.try_get("word")?,
        meaning: row.try_get("meaning")?,
        sentence: row.try_get("sentence")?,
        review_count,
        last_reviewed,
        next_review_date: ms_to_datetime("nextReviewDate", next_review_date)?,
        difficulty,
    })
}
