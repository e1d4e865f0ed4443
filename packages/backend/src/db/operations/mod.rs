pub mod user;
pub mod words;

use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn datetime_to_ms(value: DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

pub(crate) fn ms_to_datetime(column: &str, value: i64) -> Result<DateTime<Utc>, sqlx::Error> {
    Utc.timestamp_millis_opt(value)
        .single()
        .ok_or_else(|| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: format!("timestamp out of range: {value}").into(),
        })
}
