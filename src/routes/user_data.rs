use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::error::Result;
use crate::services::user_data;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UserParams {
    pub uuid: String,
}

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub uuid: String,
    pub activity: i64,
}

/// Accept a state sync from the client
///
/// POST /api/sync?uuid=<uuid> with body `{"money": <int>, "country": "<code>"}`
pub async fn sync_user_data(
    State(state): State<AppState>,
    params: std::result::Result<Query<UserParams>, QueryRejection>,
    body: Bytes,
) -> Result<&'static str> {
    let Query(params) = params?;
    tracing::info!("Syncing user data for uuid: {}", params.uuid);

    user_data::process_sync(&state, &params.uuid, &body).await
}

/// Return the stored record, once per day
///
/// GET /api/user-data?uuid=<uuid>
pub async fn get_user_data(
    State(state): State<AppState>,
    params: std::result::Result<Query<UserParams>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(params) = params?;

    let json = user_data::fetch_user_data(&state, &params.uuid).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}

/// Accept an activity report
///
/// POST /api/activity?uuid=<uuid>&activity=<int>
pub async fn process_activity(
    State(state): State<AppState>,
    params: std::result::Result<Query<ActivityParams>, QueryRejection>,
) -> Result<&'static str> {
    let Query(params) = params?;

    user_data::process_activity(&state, &params.uuid, params.activity).await
}
