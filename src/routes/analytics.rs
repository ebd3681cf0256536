use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{ActivityEntry, UserRecord};
use crate::services::analytics;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TopUsersParams {
    pub country: String,
    #[serde(rename = "usersCount")]
    pub users_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewUsersParams {
    pub country: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ActivityHistoryParams {
    pub uuid: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
}

/// GET /api/analytics/top-users-by-money?country=<code>&usersCount=<n>
pub async fn top_users_by_money(
    State(state): State<AppState>,
    params: std::result::Result<Query<TopUsersParams>, QueryRejection>,
) -> Result<Json<Vec<UserRecord>>> {
    let Query(params) = params?;

    let users = analytics::top_users_by_wealth(&state, &params.country, params.users_count).await?;
    Ok(Json(users))
}

/// GET /api/analytics/new-users-count?country=<code>&startDate=<yyyy-mm-dd>
pub async fn new_users_count(
    State(state): State<AppState>,
    params: std::result::Result<Query<NewUsersParams>, QueryRejection>,
) -> Result<Json<i64>> {
    let Query(params) = params?;

    let count = analytics::count_new_users(&state, &params.country, params.start_date).await?;
    Ok(Json(count))
}

/// GET /api/analytics/user-activity-history?uuid=<uuid>&startDate=<yyyy-mm-dd>
pub async fn user_activity_history(
    State(state): State<AppState>,
    params: std::result::Result<Query<ActivityHistoryParams>, QueryRejection>,
) -> Result<Json<Vec<ActivityEntry>>> {
    let Query(params) = params?;

    let history = analytics::activity_history(&state, &params.uuid, params.start_date).await?;
    Ok(Json(history))
}
