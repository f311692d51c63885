//! In-memory task backend recording every remote call.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::sync::{
    domain::{NewTask, RemoteTask, RemoteTaskId, TaskListId, TaskStatus},
    ports::{TaskBackend, TaskBackendError, TaskBackendResult},
};

const DEFAULT_STATUS_COLOR: &str = "#d3d3d3";
const TASK_URL_BASE: &str = "https://app.clickup.com/t";

/// Remote call observed by [`InMemoryTaskBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedTaskCall {
    /// `create_task` call.
    CreateTask {
        /// Destination list.
        list: TaskListId,
        /// Requested task.
        task: NewTask,
    },
    /// `add_tag` call.
    AddTag {
        /// Target task.
        task_id: RemoteTaskId,
        /// Tag name.
        tag: String,
    },
    /// `set_status` call.
    SetStatus {
        /// Target task.
        task_id: RemoteTaskId,
        /// Status name.
        status: String,
    },
    /// `comment_on_task` call.
    CommentOnTask {
        /// Target task.
        task_id: RemoteTaskId,
        /// Comment text.
        text: String,
    },
}

/// In-memory task backend.
///
/// Tasks live in a map keyed by identifier; new identifiers are sequential.
/// Failures can be injected per operation to exercise best-effort paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskBackend {
    state: Arc<RwLock<InMemoryBackendState>>,
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    tasks: HashMap<RemoteTaskId, StoredTask>,
    status_colors: HashMap<String, String>,
    calls: Vec<RecordedTaskCall>,
    next_id: u64,
    fail_task_comments: bool,
    fail_tagging: bool,
}

#[derive(Debug, Clone)]
struct StoredTask {
    list: Option<TaskListId>,
    task: RemoteTask,
    comments: Vec<String>,
}

impl InMemoryTaskBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a pre-existing task in the given status.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn seed_task(&self, task_id: RemoteTaskId, status: &str) -> TaskBackendResult<()> {
        let mut state = self.write()?;
        let task = RemoteTask {
            url: format!("{TASK_URL_BASE}/{task_id}"),
            status: state.status(status),
            id: task_id.clone(),
            tags: Vec::new(),
        };
        state.tasks.insert(
            task_id,
            StoredTask {
                list: None,
                task,
                comments: Vec::new(),
            },
        );
        Ok(())
    }

    /// Sets the display color reported for a status name.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn set_status_color(&self, status: &str, color: &str) -> TaskBackendResult<()> {
        self.write()?
            .status_colors
            .insert(status.to_owned(), color.to_owned());
        Ok(())
    }

    /// Makes subsequent task comments fail.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_task_comments(&self) -> TaskBackendResult<()> {
        self.write()?.fail_task_comments = true;
        Ok(())
    }

    /// Makes subsequent tag additions fail.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_tagging(&self) -> TaskBackendResult<()> {
        self.write()?.fail_tagging = true;
        Ok(())
    }

    /// Returns every call observed so far, in order.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn calls(&self) -> TaskBackendResult<Vec<RecordedTaskCall>> {
        Ok(self.write()?.calls.clone())
    }

    /// Returns a task and the list it was created in, if known.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn task(
        &self,
        task_id: &RemoteTaskId,
    ) -> TaskBackendResult<Option<(Option<TaskListId>, RemoteTask)>> {
        Ok(self
            .write()?
            .tasks
            .get(task_id)
            .map(|stored| (stored.list.clone(), stored.task.clone())))
    }

    /// Returns the comments posted on a task.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn task_comments(&self, task_id: &RemoteTaskId) -> TaskBackendResult<Vec<String>> {
        Ok(self
            .write()?
            .tasks
            .get(task_id)
            .map(|stored| stored.comments.clone())
            .unwrap_or_default())
    }

    fn write(&self) -> TaskBackendResult<RwLockWriteGuard<'_, InMemoryBackendState>> {
        self.state
            .write()
            .map_err(|err| TaskBackendError::transport(std::io::Error::other(err.to_string())))
    }
}

impl InMemoryBackendState {
    fn status(&self, name: &str) -> TaskStatus {
        let color = self
            .status_colors
            .get(name)
            .map_or(DEFAULT_STATUS_COLOR, String::as_str);
        TaskStatus::new(name, color)
    }

    fn stored_mut(&mut self, task_id: &RemoteTaskId) -> TaskBackendResult<&mut StoredTask> {
        self.tasks
            .get_mut(task_id)
            .ok_or_else(|| TaskBackendError::NotFound(task_id.clone()))
    }
}

#[async_trait]
impl TaskBackend for InMemoryTaskBackend {
    async fn create_task(
        &self,
        list: &TaskListId,
        task: &NewTask,
    ) -> TaskBackendResult<RemoteTask> {
        let mut state = self.write()?;
        state.calls.push(RecordedTaskCall::CreateTask {
            list: list.clone(),
            task: task.clone(),
        });
        state.next_id += 1;
        let id = RemoteTaskId::new(format!("mem{}", state.next_id))
            .map_err(|err| TaskBackendError::Decode(err.to_string()))?;
        let created = RemoteTask {
            url: format!("{TASK_URL_BASE}/{id}"),
            status: state.status(&task.status),
            id: id.clone(),
            tags: task.tags.clone(),
        };
        state.tasks.insert(
            id,
            StoredTask {
                list: Some(list.clone()),
                task: created.clone(),
                comments: Vec::new(),
            },
        );
        Ok(created)
    }

    async fn add_tag(&self, task_id: &RemoteTaskId, tag: &str) -> TaskBackendResult<()> {
        let mut state = self.write()?;
        state.calls.push(RecordedTaskCall::AddTag {
            task_id: task_id.clone(),
            tag: tag.to_owned(),
        });
        if state.fail_tagging {
            return Err(TaskBackendError::Http {
                status: 400,
                body: "tagging disabled".to_owned(),
            });
        }
        let stored = state.stored_mut(task_id)?;
        if !stored.task.tags.iter().any(|existing| existing == tag) {
            stored.task.tags.push(tag.to_owned());
        }
        Ok(())
    }

    async fn set_status(
        &self,
        task_id: &RemoteTaskId,
        status: &str,
    ) -> TaskBackendResult<RemoteTask> {
        let mut state = self.write()?;
        state.calls.push(RecordedTaskCall::SetStatus {
            task_id: task_id.clone(),
            status: status.to_owned(),
        });
        let new_status = state.status(status);
        let stored = state.stored_mut(task_id)?;
        stored.task.status = new_status;
        Ok(stored.task.clone())
    }

    async fn comment_on_task(&self, task_id: &RemoteTaskId, text: &str) -> TaskBackendResult<()> {
        let mut state = self.write()?;
        state.calls.push(RecordedTaskCall::CommentOnTask {
            task_id: task_id.clone(),
            text: text.to_owned(),
        });
        if state.fail_task_comments {
            return Err(TaskBackendError::Http {
                status: 503,
                body: "task comments disabled".to_owned(),
            });
        }
        state.stored_mut(task_id)?.comments.push(text.to_owned());
        Ok(())
    }
}
