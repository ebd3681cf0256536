//! Read-side analytics over the user store.
//!
//! Each query validates its inputs, runs through the cache-aside helper
//! and converts unexpected store failures into a fixed `Store` message.
//! The underlying cause is logged only.

use chrono::{NaiveDate, NaiveTime};

use crate::cache::{cache_key, cached};
use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{ActivityEntry, UserRecord};
use crate::AppState;

use super::load_user;

/// Keep domain errors, replace anything else with the query's fixed message
fn store_failure(err: AppError, message: &'static str) -> AppError {
    match err {
        AppError::Database(_) | AppError::Internal(_) | AppError::Store(_) => {
            tracing::error!("{}: {:?}", message, err);
            AppError::Store(message)
        }
        other => other,
    }
}

fn require_country(country: &str) -> Result<()> {
    if country.trim().is_empty() {
        return Err(AppError::InvalidArgument(ERR_COUNTRY_REQUIRED.to_string()));
    }
    Ok(())
}

/// Richest users of a country, at most `limit`
pub async fn top_users_by_wealth(
    state: &AppState,
    country: &str,
    limit: i64,
) -> Result<Vec<UserRecord>> {
    if limit < 1 {
        return Err(AppError::InvalidArgument(ERR_USERS_COUNT.to_string()));
    }
    require_country(country)?;

    let key = cache_key(CACHE_TOP_USERS, &[&country, &limit]);
    cached(state.cache.as_ref(), &key, state.config.cache_ttl(), || async {
        tracing::info!("Fetching top {} users by money for country: {}", limit, country);

        let users = state
            .store
            .top_users_by_money(country, limit)
            .await
            .map_err(|e| store_failure(e, ERR_TOP_USERS))?;

        if users.is_empty() {
            tracing::warn!("No users found for country: {}", country);
            return Err(AppError::NoDataFound(format!(
                "{ERR_NO_USERS_FOR_COUNTRY}{country}"
            )));
        }
        Ok(users)
    })
    .await
}

/// Users of a country created on or after the start of `since` (UTC). Zero is a valid answer.
pub async fn count_new_users(state: &AppState, country: &str, since: NaiveDate) -> Result<i64> {
    require_country(country)?;

    let key = cache_key(CACHE_NEW_USERS_COUNT, &[&country, &since]);
    cached(state.cache.as_ref(), &key, state.config.cache_ttl(), || async {
        tracing::info!("Counting new users for country: {} from date: {}", country, since);

        let start = since.and_time(NaiveTime::MIN).and_utc();
        state
            .store
            .count_users_created_since(country, start)
            .await
            .map_err(|e| store_failure(e, ERR_NEW_USERS))
    })
    .await
}

/// Activity entries of one user dated on or after `since`, newest first
pub async fn activity_history(
    state: &AppState,
    uuid: &str,
    since: NaiveDate,
) -> Result<Vec<ActivityEntry>> {
    if uuid.trim().is_empty() {
        return Err(AppError::InvalidArgument(ERR_UUID_REQUIRED.to_string()));
    }

    let user_key = cache_key(CACHE_USERS, &[&uuid]);
    let user: UserRecord =
        cached(state.cache.as_ref(), &user_key, state.config.cache_ttl(), || {
            load_user(state, uuid)
        })
        .await
        .map_err(|e| store_failure(e, ERR_ACTIVITY_HISTORY))?;

    let key = cache_key(CACHE_ACTIVITY_HISTORY, &[&user.uuid, &since]);
    cached(state.cache.as_ref(), &key, state.config.cache_ttl(), || async {
        tracing::info!("Fetching activity history for user: {} from date: {}", user.uuid, since);

        let history = state
            .store
            .activity_history(&user.uuid, since, ACTIVITY_HISTORY_LIMIT)
            .await
            .map_err(|e| store_failure(e, ERR_ACTIVITY_HISTORY))?;

        if history.is_empty() {
            tracing::warn!("No activity history found for user: {}", user.uuid);
            return Err(AppError::NoDataFound(format!(
                "{ERR_NO_ACTIVITY_FOR_USER}{}",
                user.uuid
            )));
        }
        Ok(history)
    })
    .await
}
