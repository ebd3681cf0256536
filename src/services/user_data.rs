//! Rate-limited mutations of the per-user record.
//!
//! Every operation loads the record, charges the relevant daily quota
//! (resetting a counter whose window has passed), mutates, persists and
//! then refreshes the `users::<uuid>` cache entry.

use crate::constants::{
    ERR_ACTIVITY_OVERFLOW, ERR_NEGATIVE_ACTIVITY, MSG_ACTIVITY_OK, MSG_SYNC_OK,
};
use crate::error::{AppError, Result};
use crate::models::{NewActivityEntry, QuotaKind, SyncPayload};
use crate::AppState;

use super::{cache_user, load_user};

/// Apply a client state sync
pub async fn process_sync(
    state: &AppState,
    uuid: &str,
    raw_payload: &[u8],
) -> Result<&'static str> {
    let now = state.clock.now_millis();
    tracing::info!("Processing sync data for user: {}", uuid);

    let mut user = load_user(state, uuid).await?;
    user.consume(QuotaKind::Sync, now)?;

    let payload = SyncPayload::parse(raw_payload)?;
    user.apply_sync(payload);

    state.store.save_user(&user).await?;
    cache_user(state, &user).await;

    tracing::info!("Sync data successfully processed for user: {}", uuid);
    Ok(MSG_SYNC_OK)
}

/// Return the full record as JSON. Allowed once per window and counted
/// against the sync counter.
pub async fn fetch_user_data(state: &AppState, uuid: &str) -> Result<String> {
    let now = state.clock.now_millis();
    tracing::info!("Fetching user data for UUID: {}", uuid);

    let mut user = load_user(state, uuid).await?;
    user.consume(QuotaKind::Read, now)?;

    state.store.save_user(&user).await?;
    cache_user(state, &user).await;

    let json = serde_json::to_string(&user).map_err(|e| {
        tracing::error!("Error serializing user data for UUID {}: {}", uuid, e);
        AppError::Serialization(e)
    })?;

    Ok(json)
}

/// Add an activity report to the running total and the history
pub async fn process_activity(state: &AppState, uuid: &str, activity: i64) -> Result<&'static str> {
    let now = state.clock.now_millis();
    tracing::info!("Processing activity data for user: {}, activity: {}", uuid, activity);

    let mut user = load_user(state, uuid).await?;

    if activity < 0 {
        return Err(AppError::InvalidArgument(ERR_NEGATIVE_ACTIVITY.to_string()));
    }
    user.consume(QuotaKind::Activity, now)?;

    user.activity_total = user
        .activity_total
        .checked_add(activity)
        .ok_or_else(|| AppError::InvalidArgument(ERR_ACTIVITY_OVERFLOW.to_string()))?;

    let entry = NewActivityEntry {
        uuid: user.uuid.clone(),
        activity,
        activity_date: state.clock.today(),
    };
    state.store.save_activity(&user, &entry).await?;
    cache_user(state, &user).await;

    Ok(MSG_ACTIVITY_OK)
}
