//! Google Tasks v1 over reqwest

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Client;
use serde_json::Value;

use super::error::check_status;
use super::{GoogleResult, TasksApi};
use crate::domain::NewTask;

pub const TASKS_API: &str = "https://tasks.googleapis.com/tasks/v1";

/// Page size for the task list listing
const MAX_TASK_LISTS: &str = "50";

/// Characters escaped inside one path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

#[derive(Debug, Clone)]
pub struct GoogleTasksClient {
    http: Client,
    base_url: String,
}

impl Default for GoogleTasksClient {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl GoogleTasksClient {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, TASKS_API)
    }

    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn lists_url(&self) -> String {
        format!("{}/users/@me/lists", self.base_url)
    }

    fn tasks_url(&self, list_id: &str) -> String {
        format!("{}/lists/{}/tasks", self.base_url, segment(list_id))
    }

    fn task_url(&self, list_id: &str, task_id: &str) -> String {
        format!("{}/{}", self.tasks_url(list_id), segment(task_id))
    }
}

#[async_trait]
impl TasksApi for GoogleTasksClient {
    async fn list_task_lists(&self, access_token: &str) -> GoogleResult<Value> {
        let resp = self
            .http
            .get(self.lists_url())
            .bearer_auth(access_token)
            .query(&[("maxResults", MAX_TASK_LISTS)])
            .send()
            .await?;
        Ok(check_status(resp).await?.json().await?)
    }

    async fn list_tasks(&self, access_token: &str, list_id: &str) -> GoogleResult<Value> {
        let resp = self
            .http
            .get(self.tasks_url(list_id))
            .bearer_auth(access_token)
            .query(&[("showCompleted", "true")])
            .send()
            .await?;
        Ok(check_status(resp).await?.json().await?)
    }

    async fn insert_task(&self, access_token: &str, list_id: &str, task: &NewTask) -> GoogleResult<Value> {
        let resp = self
            .http
            .post(self.tasks_url(list_id))
            .bearer_auth(access_token)
            .json(task)
            .send()
            .await?;
        Ok(check_status(resp).await?.json().await?)
    }

    async fn patch_task(
        &self,
        access_token: &str,
        list_id: &str,
        task_id: &str,
        patch: &Value,
    ) -> GoogleResult<Value> {
        let resp = self
            .http
            .patch(self.task_url(list_id, task_id))
            .bearer_auth(access_token)
            .json(patch)
            .send()
            .await?;
        Ok(check_status(resp).await?.json().await?)
    }

    async fn delete_task(&self, access_token: &str, list_id: &str, task_id: &str) -> GoogleResult<()> {
        let resp = self
            .http
            .delete(self.task_url(list_id, task_id))
            .bearer_auth(access_token)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }
}
