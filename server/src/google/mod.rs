//! Google Layer
//!
//! Abstract interfaces for the Tasks API and the OAuth provider, plus the
//! reqwest implementations used in production.

mod error;
mod oauth_client;
mod tasks_client;
mod traits;

pub use error::{GoogleError, GoogleResult};
pub use oauth_client::{GoogleOAuth, Profile, TokenGrant, OAUTH_AUTH_URL, SCOPES, TASKS_SCOPE};
pub use tasks_client::{GoogleTasksClient, TASKS_API};
pub use traits::{OAuthProvider, TasksApi};
