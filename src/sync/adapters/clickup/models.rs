//! `ClickUp` wire types.

use serde::{Deserialize, Serialize};

use crate::sync::domain::{NewTask, RemoteTask, RemoteTaskId, TaskStatus};

#[derive(Debug, Serialize)]
pub(super) struct CreateTaskBody<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub tags: &'a [String],
}

impl<'a> From<&'a NewTask> for CreateTaskBody<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            name: &task.name,
            description: task.description.as_deref(),
            status: &task.status,
            tags: &task.tags,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateStatusBody<'a> {
    pub status: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct TaskCommentBody<'a> {
    pub comment_text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskRecord {
    id: String,
    #[serde(default)]
    url: String,
    status: StatusRecord,
    #[serde(default)]
    tags: Vec<TagRecord>,
}

#[derive(Debug, Deserialize)]
struct StatusRecord {
    status: String,
    #[serde(default)]
    color: String,
}

#[derive(Debug, Deserialize)]
struct TagRecord {
    name: String,
}

impl TryFrom<TaskRecord> for RemoteTask {
    type Error = String;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let id = RemoteTaskId::new(record.id).map_err(|err| err.to_string())?;
        Ok(Self {
            id,
            url: record.url,
            status: TaskStatus::new(record.status.status, record.status.color),
            tags: record.tags.into_iter().map(|tag| tag.name).collect(),
        })
    }
}
