//! Domain Layer
//!
//! Request bodies and signed-in user data. Task resources themselves are
//! passed through as JSON.

mod task;
mod user;

pub use task::{completion_patch, NewTask};
pub use user::{OAuthTokens, SessionUser};
