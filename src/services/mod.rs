pub mod analytics;
pub mod user_data;

use crate::cache::{self, cache_key};
use crate::constants::CACHE_USERS;
use crate::error::{AppError, Result};
use crate::models::UserRecord;
use crate::AppState;

/// Write the current snapshot of a record to its per-user cache entry
pub(crate) async fn cache_user(state: &AppState, user: &UserRecord) {
    let key = cache_key(CACHE_USERS, &[&user.uuid]);
    cache::store(state.cache.as_ref(), &key, user, state.config.cache_ttl()).await;
}

/// Load a record from the store, failing with `UserNotFound` if absent
pub(crate) async fn load_user(state: &AppState, uuid: &str) -> Result<UserRecord> {
    state.store.find_user(uuid).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", uuid);
        AppError::UserNotFound
    })
}
