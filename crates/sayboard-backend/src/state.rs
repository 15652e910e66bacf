use std::path::PathBuf;

use sayboard_bridge::config::Config;

use crate::api::ApiClient;

/// The core application state that holds configuration and the HTTP client.
///
/// This struct contains all the data that needs to be shared across async
/// tasks in the application.
///
/// It is designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]) to allow safe concurrent reads and
/// occasional writes from multiple tasks.
#[derive(Debug, Clone)]
pub struct State {
    /// The loaded application configuration.
    pub config: Config,
    /// Where the configuration is persisted.
    pub config_path: PathBuf,
    /// Client for the content-management server, sharing one connection pool.
    pub api: ApiClient,
}

impl State {
    /// Client and active project slug for a request on the open project.
    pub fn project_api(&self) -> (ApiClient, Option<String>) {
        (self.api.clone(), self.config.active_project.clone())
    }
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
///
/// This is the recommended way to pass state into async handlers, background
/// tasks, or any context where multiple tasks need read access (and occasional
/// write access).
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
