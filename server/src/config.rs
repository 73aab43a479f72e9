//! Server configuration
//!
//! Read from the environment (a `.env` file is loaded first by `main`).
//! Missing Google credentials disable sign-in instead of failing startup.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` when GOOGLE_CLIENT_ID or GOOGLE_CLIENT_SECRET is unset
    pub google: Option<GoogleCredentials>,
    /// Public origin, no trailing slash
    pub base_url: String,
    pub port: u16,
    /// Secure cookies
    pub production: bool,
    pub public_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            port: DEFAULT_PORT,
            production: false,
            public_dir: PathBuf::from("public"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let google = match (get("GOOGLE_CLIENT_ID"), get("GOOGLE_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(GoogleCredentials { client_id, client_secret }),
            _ => None,
        };

        let base_url = get("BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let port = match get("PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => defaults.port,
        };

        let production = get("APP_ENV")
            .or_else(|| get("NODE_ENV"))
            .is_some_and(|env| env.eq_ignore_ascii_case("production"));

        Ok(Self {
            google,
            base_url,
            port,
            production,
            public_dir: get("PUBLIC_DIR").map(PathBuf::from).unwrap_or(defaults.public_dir),
            log_dir: get("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
        })
    }

    pub fn oauth_enabled(&self) -> bool {
        self.google.is_some()
    }

    /// Where Google sends the user back
    pub fn redirect_uri(&self) -> String {
        format!("{}/auth/google/callback", self.base_url)
    }
}
