//! Google OAuth 2.0 over reqwest

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use super::error::check_status;
use super::{GoogleResult, OAuthProvider};
use crate::config::GoogleCredentials;
use crate::domain::OAuthTokens;

pub const OAUTH_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

pub const TASKS_SCOPE: &str = "https://www.googleapis.com/auth/tasks";
pub const SCOPES: &str = "profile email https://www.googleapis.com/auth/tasks";

/// Token endpoint response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Space-separated scopes the user actually granted
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenGrant {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope
            .as_deref()
            .is_some_and(|granted| granted.split_whitespace().any(|s| s == scope))
    }

    /// Tokens to keep in the session. Refresh grants usually omit the
    /// refresh token, so the previous one is kept.
    pub fn into_tokens(self, previous_refresh: Option<String>, now: DateTime<Utc>) -> OAuthTokens {
        OAuthTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expires_at: self.expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }
}

/// Userinfo response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    http: Client,
    credentials: GoogleCredentials,
    redirect_uri: String,
}

impl GoogleOAuth {
    pub fn new(http: Client, credentials: GoogleCredentials, redirect_uri: impl Into<String>) -> Self {
        Self {
            http,
            credentials,
            redirect_uri: redirect_uri.into(),
        }
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> GoogleResult<TokenGrant> {
        let resp = self.http.post(OAUTH_TOKEN_URL).form(params).send().await?;
        Ok(check_status(resp).await?.json().await?)
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuth {
    fn authorize_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", SCOPES),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("state", state),
        ];
        match Url::parse_with_params(OAUTH_AUTH_URL, params) {
            Ok(url) => url.to_string(),
            // OAUTH_AUTH_URL is a valid absolute URL
            Err(_) => OAUTH_AUTH_URL.to_string(),
        }
    }

    async fn exchange_code(&self, code: &str) -> GoogleResult<TokenGrant> {
        self.token_request(&[
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> GoogleResult<TokenGrant> {
        self.token_request(&[
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .await
    }

    async fn fetch_profile(&self, access_token: &str) -> GoogleResult<Profile> {
        let resp = self.http.get(USERINFO_URL).bearer_auth(access_token).send().await?;
        Ok(check_status(resp).await?.json().await?)
    }
}
