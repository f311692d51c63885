//! JSON-file link store.
//!
//! The file holds every recorded link as a JSON document. Writes go to a
//! sibling temporary file first and are renamed into place.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::{Arc, Mutex};

use crate::sync::{
    domain::{TaskLink, TicketRef},
    ports::{TaskLinkStore, TaskLinkStoreError, TaskLinkStoreResult},
};

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct LinkDocument {
    schema_version: u32,
    #[serde(default)]
    links: Vec<TaskLink>,
}

impl Default for LinkDocument {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            links: Vec::new(),
        }
    }
}

/// Link store persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileTaskLinkStore {
    dir: Arc<Dir>,
    file_name: String,
    guard: Arc<Mutex<()>>,
}

impl FileTaskLinkStore {
    /// Opens a store at the given file path.
    ///
    /// The parent directory must exist; the file itself is created on the
    /// first recorded link.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when the path has no file name or the
    /// parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> TaskLinkStoreResult<Self> {
        let file_name = path
            .file_name()
            .ok_or_else(|| {
                TaskLinkStoreError::persistence(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("link store path has no file name: {path}"),
                ))
            })?
            .to_owned();
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf);
        let dir = Dir::open_ambient_dir(&parent, ambient_authority())
            .map_err(TaskLinkStoreError::persistence)?;
        Ok(Self {
            dir: Arc::new(dir),
            file_name,
            guard: Arc::new(Mutex::new(())),
        })
    }

    fn load(&self) -> TaskLinkStoreResult<LinkDocument> {
        let raw = match self.dir.read_to_string(&self.file_name) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(LinkDocument::default());
            }
            Err(err) => return Err(TaskLinkStoreError::persistence(err)),
        };
        let document: LinkDocument =
            serde_json::from_str(&raw).map_err(TaskLinkStoreError::persistence)?;
        if document.schema_version != SCHEMA_VERSION {
            return Err(TaskLinkStoreError::persistence(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "unsupported link store schema: expected {SCHEMA_VERSION}, found {}",
                    document.schema_version
                ),
            )));
        }
        Ok(document)
    }

    fn save(&self, document: &LinkDocument) -> TaskLinkStoreResult<()> {
        let mut payload =
            serde_json::to_string_pretty(document).map_err(TaskLinkStoreError::persistence)?;
        payload.push('\n');
        let staging = format!(".{}.tmp", self.file_name);
        self.dir
            .write(&staging, payload)
            .map_err(TaskLinkStoreError::persistence)?;
        self.dir
            .rename(&staging, &self.dir, &self.file_name)
            .map_err(TaskLinkStoreError::persistence)
    }

    fn lock(&self) -> TaskLinkStoreResult<std::sync::MutexGuard<'_, ()>> {
        self.guard.lock().map_err(|err| {
            TaskLinkStoreError::persistence(io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskLinkStore for FileTaskLinkStore {
    async fn find(&self, ticket: &TicketRef) -> TaskLinkStoreResult<Option<TaskLink>> {
        let _held = self.lock()?;
        let document = self.load()?;
        Ok(document
            .links
            .into_iter()
            .find(|link| link.ticket() == ticket))
    }

    async fn record(&self, link: &TaskLink) -> TaskLinkStoreResult<()> {
        let _held = self.lock()?;
        let mut document = self.load()?;
        if document
            .links
            .iter()
            .any(|existing| existing.ticket() == link.ticket())
        {
            return Err(TaskLinkStoreError::AlreadyLinked(link.ticket().clone()));
        }
        document.links.push(link.clone());
        self.save(&document)
    }
}
