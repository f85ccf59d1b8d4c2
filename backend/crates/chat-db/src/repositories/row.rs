use crate::{DbError, Result as DbErrorResult};

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub(crate) fn parse_uuid(table: &'static str, column: &str, raw: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| DbError::corrupt(table, format!("{column} is not a UUID ({raw}): {e}")))
}

pub(crate) fn parse_millis(
    table: &'static str,
    column: &str,
    millis: i64,
) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| DbError::corrupt(table, format!("{column} out of range: {millis}")))
}

/// Current time truncated to what the schema stores, so a record read back
/// compares equal to the one returned at insert.
pub(crate) fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
