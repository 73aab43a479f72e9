//! Task Matrix server
//!
//! Layered architecture:
//! - `domain`: request bodies and signed-in user data
//! - `google`: Tasks API and OAuth traits plus their reqwest implementations
//! - `session`: cookie handling and the session store
//! - `routes`: axum handlers wiring the layers together
//! - `config`: environment configuration

pub mod config;
pub mod domain;
pub mod google;
pub mod routes;
pub mod session;

use std::sync::Arc;

use config::Config;
use google::{GoogleOAuth, GoogleTasksClient, OAuthProvider, TasksApi};
use session::{MemorySessionStore, SessionStore};

pub use routes::build_router;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tasks: Arc<dyn TasksApi>,
    /// `None` when Google credentials are not configured
    pub oauth: Option<Arc<dyn OAuthProvider>>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Production wiring: reqwest clients and the in-memory session store
    pub fn from_config(config: Config) -> Self {
        let http = reqwest::Client::new();
        let oauth = config.google.clone().map(|credentials| {
            Arc::new(GoogleOAuth::new(http.clone(), credentials, config.redirect_uri()))
                as Arc<dyn OAuthProvider>
        });
        Self {
            tasks: Arc::new(GoogleTasksClient::new(http)),
            oauth,
            sessions: Arc::new(MemorySessionStore::new()),
            config: Arc::new(config),
        }
    }
}
