/// Length of a quota window in milliseconds (24 hours)
/// A counter resets once strictly more than this has elapsed since its last touch
pub const QUOTA_WINDOW_MILLIS: i64 = 86_400_000;

/// Maximum sync submissions per user per window
pub const MAX_SYNCS_PER_DAY: i32 = 100;

/// Maximum user-data reads per user per window
/// Shares the sync counter, so any sync in the window also blocks a read
pub const MAX_READS_PER_DAY: i32 = 1;

/// Maximum activity reports per user per window
pub const MAX_STATS_PER_DAY: i32 = 10_000;

/// Maximum rows returned by the activity history query
pub const ACTIVITY_HISTORY_LIMIT: i64 = 10_000;

/// Default cache entry lifetime in seconds (24 hours)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

/// Maximum length of a country code
pub const COUNTRY_CODE_MAX_LEN: usize = 3;

// =============================================================================
// Cache Namespaces
// =============================================================================

pub const CACHE_USERS: &str = "users";
pub const CACHE_TOP_USERS: &str = "topUsers";
pub const CACHE_NEW_USERS_COUNT: &str = "newUsersCount";
pub const CACHE_ACTIVITY_HISTORY: &str = "userActivityHistory";

// =============================================================================
// Messages
// =============================================================================

pub const MSG_SYNC_OK: &str = "Data received successfully.";
pub const MSG_ACTIVITY_OK: &str = "Activity data received successfully.";

pub const ERR_USER_NOT_FOUND: &str = "User not found. Please register first.";
pub const ERR_SYNC_LIMIT: &str = "Sync limit exceeded for today.";
pub const ERR_READ_LIMIT: &str = "You have already received your data today.";
pub const ERR_ACTIVITY_LIMIT: &str = "Activity limit exceeded for today.";
pub const ERR_INVALID_JSON: &str = "Invalid JSON format.";
pub const ERR_JSON_PROCESSING: &str = "Error processing JSON";

pub const ERR_COUNTRY_REQUIRED: &str = "Country must not be null or empty.";
pub const ERR_USERS_COUNT: &str = "The number of users must be at least 1.";
pub const ERR_UUID_REQUIRED: &str = "User UUID must not be null or empty.";
pub const ERR_NEGATIVE_ACTIVITY: &str = "Activity must not be negative.";
pub const ERR_ACTIVITY_OVERFLOW: &str = "Activity total is out of range.";

pub const ERR_NO_USERS_FOR_COUNTRY: &str = "No users found for country: ";
pub const ERR_NO_ACTIVITY_FOR_USER: &str = "No activity history found for user: ";

pub const ERR_TOP_USERS: &str = "Failed to fetch top users. Please try again later";
pub const ERR_NEW_USERS: &str = "Failed to count new users. Please try again later";
pub const ERR_ACTIVITY_HISTORY: &str = "Failed to fetch activity history. Please try again later";
