//! Signed-in user

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// What the session keeps about the user after sign-in
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub tokens: OAuthTokens,
}
