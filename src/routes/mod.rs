pub mod analytics;
pub mod health;
pub mod user_data;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use analytics::{new_users_count, top_users_by_money, user_activity_history};
pub use health::health_check;
pub use user_data::{get_user_data, process_activity, sync_user_data};

/// Build the application router with all endpoints
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/sync", post(sync_user_data))
        // GET is canonical; POST is kept for older clients
        .route("/api/user-data", get(get_user_data).post(get_user_data))
        .route("/api/activity", post(process_activity))
        .route("/api/analytics/top-users-by-money", get(top_users_by_money))
        .route("/api/analytics/new-users-count", get(new_users_count))
        .route(
            "/api/analytics/user-activity-history",
            get(user_activity_history),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
