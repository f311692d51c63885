//! `ClickUp` REST client implementing [`TaskBackend`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{CreateTaskBody, TaskCommentBody, TaskRecord, UpdateStatusBody};
use crate::sync::{
    domain::{NewTask, RemoteTask, RemoteTaskId, TaskListId},
    ports::{TaskBackend, TaskBackendError, TaskBackendResult},
};

/// Public `ClickUp` API root.
pub const DEFAULT_CLICKUP_API_URL: &str = "https://api.clickup.com/api/v2";

/// Connection settings for [`ClickUpClient`].
#[derive(Debug)]
pub struct ClickUpConfig {
    /// Personal or workspace API key, sent verbatim as `Authorization`.
    pub api_key: SecretString,
    /// API root, e.g. [`DEFAULT_CLICKUP_API_URL`].
    pub base_url: Url,
}

impl ClickUpConfig {
    /// Creates a config for the given key and API root.
    #[must_use]
    pub const fn new(api_key: SecretString, base_url: Url) -> Self {
        Self { api_key, base_url }
    }
}

/// `ClickUp` task backend.
#[derive(Debug)]
pub struct ClickUpClient {
    client: Client,
    config: ClickUpConfig,
}

impl ClickUpClient {
    /// Creates a client with a fresh connection pool.
    #[must_use]
    pub fn new(config: ClickUpConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    /// Creates a client that reuses an existing connection pool.
    #[must_use]
    pub const fn with_http_client(client: Client, config: ClickUpConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self, segments: &[&str]) -> TaskBackendResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TaskBackendError::Decode(format!(
                    "ClickUp base URL cannot carry a path: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", self.config.api_key.expose_secret())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        task_id: Option<&RemoteTaskId>,
    ) -> TaskBackendResult<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(TaskBackendError::transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if let Some(id) = task_id.filter(|_| status == reqwest::StatusCode::NOT_FOUND) {
            return Err(TaskBackendError::NotFound(id.clone()));
        }
        let body = response.text().await.unwrap_or_default();
        Err(TaskBackendError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> TaskBackendResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|err| TaskBackendError::Decode(err.to_string()))
    }

    async fn task_record(response: Response) -> TaskBackendResult<RemoteTask> {
        let record: TaskRecord = Self::decode(response).await?;
        RemoteTask::try_from(record).map_err(TaskBackendError::Decode)
    }
}

#[async_trait]
impl TaskBackend for ClickUpClient {
    async fn create_task(
        &self,
        list: &TaskListId,
        task: &NewTask,
    ) -> TaskBackendResult<RemoteTask> {
        let url = self.endpoint(&["list", list.as_str(), "task"])?;
        debug!(list = %list, name = %task.name, "creating ClickUp task");
        let request = self.client.post(url).json(&CreateTaskBody::from(task));
        let response = self.send(request, None).await?;
        Self::task_record(response).await
    }

    async fn add_tag(&self, task_id: &RemoteTaskId, tag: &str) -> TaskBackendResult<()> {
        let url = self.endpoint(&["task", task_id.as_str(), "tag", tag])?;
        debug!(task_id = %task_id, tag, "adding ClickUp tag");
        self.send(self.client.post(url), Some(task_id)).await?;
        Ok(())
    }

    async fn set_status(
        &self,
        task_id: &RemoteTaskId,
        status: &str,
    ) -> TaskBackendResult<RemoteTask> {
        let url = self.endpoint(&["task", task_id.as_str()])?;
        debug!(task_id = %task_id, status, "updating ClickUp task status");
        let request = self.client.put(url).json(&UpdateStatusBody { status });
        let response = self.send(request, Some(task_id)).await?;
        Self::task_record(response).await
    }

    async fn comment_on_task(&self, task_id: &RemoteTaskId, text: &str) -> TaskBackendResult<()> {
        let url = self.endpoint(&["task", task_id.as_str(), "comment"])?;
        let request = self
            .client
            .post(url)
            .json(&TaskCommentBody { comment_text: text });
        self.send(request, Some(task_id)).await?;
        Ok(())
    }
}
