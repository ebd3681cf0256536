//! Game Sync Server Library
//!
//! Backend for game clients: state sync and activity submissions under
//! daily per-user quotas, plus cached analytics queries.

pub mod cache;
pub mod clock;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use cache::{Cache, SharedCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use db::{Store, UserStore};
pub use error::{AppError, Result};
pub use routes::router;

use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub cache: SharedCache,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given collaborators and configuration
    pub fn new(store: Store, cache: SharedCache, clock: Arc<dyn Clock>, config: Config) -> Self {
        Self {
            store,
            cache,
            clock,
            config,
        }
    }
}
