use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One activity report, owned by a user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Surrogate key assigned by the store
    pub id: i64,
    /// Owning user
    pub uuid: String,
    /// Amount reported
    pub activity: i64,
    /// Calendar day of the report, serialized as yyyy-MM-dd
    pub activity_date: NaiveDate,
}

/// Activity entry that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivityEntry {
    pub uuid: String,
    pub activity: i64,
    pub activity_date: NaiveDate,
}
