pub mod activity;
pub mod quota;
pub mod user;

pub use activity::{ActivityEntry, NewActivityEntry};
pub use quota::{DailyQuota, QuotaKind};
pub use user::{SyncPayload, UserRecord};
