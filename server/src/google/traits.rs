//! Google Layer - Core Traits
//!
//! Route handlers only see these traits, so tests can swap in fakes.

use async_trait::async_trait;
use serde_json::Value;

use super::{GoogleResult, Profile, TokenGrant};
use crate::domain::NewTask;

/// Google Tasks v1 calls made on behalf of a signed-in user.
/// Responses are returned as the raw resource JSON.
#[async_trait]
pub trait TasksApi: Send + Sync {
    /// `{ items: TaskList[] }`, at most 50 lists
    async fn list_task_lists(&self, access_token: &str) -> GoogleResult<Value>;

    /// `{ items: Task[] }`, completed tasks included
    async fn list_tasks(&self, access_token: &str, list_id: &str) -> GoogleResult<Value>;

    async fn insert_task(&self, access_token: &str, list_id: &str, task: &NewTask) -> GoogleResult<Value>;

    /// Partial update; fields absent from `patch` are left alone
    async fn patch_task(
        &self,
        access_token: &str,
        list_id: &str,
        task_id: &str,
        patch: &Value,
    ) -> GoogleResult<Value>;

    async fn delete_task(&self, access_token: &str, list_id: &str, task_id: &str) -> GoogleResult<()>;
}

/// Google OAuth 2.0 authorization-code flow
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Consent screen URL carrying the CSRF `state`
    fn authorize_url(&self, state: &str) -> String;

    async fn exchange_code(&self, code: &str) -> GoogleResult<TokenGrant>;

    async fn refresh(&self, refresh_token: &str) -> GoogleResult<TokenGrant>;

    async fn fetch_profile(&self, access_token: &str) -> GoogleResult<Profile>;
}
