pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ActivityEntry, NewActivityEntry, UserRecord};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Store handle type (Arc-wrapped for sharing across handlers)
pub type Store = Arc<dyn UserStore>;

/// Persistence contract for user records and their activity history
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Point lookup by uuid
    async fn find_user(&self, uuid: &str) -> Result<Option<UserRecord>>;

    /// Persist the mutable fields of an existing record. `created_at` is never written.
    async fn save_user(&self, user: &UserRecord) -> Result<()>;

    /// Persist the record and append an activity entry atomically
    async fn save_activity(&self, user: &UserRecord, entry: &NewActivityEntry) -> Result<()>;

    /// Records in `country` ordered by money descending, at most `limit`
    async fn top_users_by_money(&self, country: &str, limit: i64) -> Result<Vec<UserRecord>>;

    /// Number of records in `country` created at or after `since`
    async fn count_users_created_since(&self, country: &str, since: DateTime<Utc>) -> Result<i64>;

    /// Entries of `uuid` dated on or after `since`, newest first, at most `limit`
    async fn activity_history(
        &self,
        uuid: &str,
        since: NaiveDate,
        limit: i64,
    ) -> Result<Vec<ActivityEntry>>;

    /// Connectivity probe for health checks
    async fn ping(&self) -> Result<()>;
}
