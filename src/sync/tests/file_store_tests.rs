//! Tests for the JSON-file link store.

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::rstest;
use tempfile::TempDir;

use super::fixtures::{number, repository, task_id};
use crate::sync::{
    adapters::file::FileTaskLinkStore,
    domain::{TaskLink, TicketRef},
    ports::{TaskLinkStore, TaskLinkStoreError},
};

fn store_path(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().join("links.json")).expect("utf-8 temp path")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recorded_link_survives_reopening() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = store_path(&temp);
    let ticket = TicketRef::new(repository(), number(12));
    let link = TaskLink::new(ticket.clone(), task_id("abc"), &DefaultClock);

    FileTaskLinkStore::open(&path)
        .expect("store should open")
        .record(&link)
        .await
        .expect("link should be recorded");
    let reopened = FileTaskLinkStore::open(&path).expect("store should reopen");
    let found = reopened.find(&ticket).await.expect("lookup should succeed");

    assert_eq!(found, Some(link));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_file_reads_as_empty_store() {
    let temp = tempfile::tempdir().expect("temp dir");
    let store = FileTaskLinkStore::open(&store_path(&temp)).expect("store should open");

    let found = store
        .find(&TicketRef::new(repository(), number(1)))
        .await
        .expect("lookup should succeed");

    assert_eq!(found, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_link_for_ticket_is_rejected() {
    let temp = tempfile::tempdir().expect("temp dir");
    let store = FileTaskLinkStore::open(&store_path(&temp)).expect("store should open");
    let ticket = TicketRef::new(repository(), number(12));
    store
        .record(&TaskLink::new(ticket.clone(), task_id("abc"), &DefaultClock))
        .await
        .expect("first link should be recorded");

    let result = store
        .record(&TaskLink::new(ticket, task_id("def"), &DefaultClock))
        .await;

    assert!(matches!(result, Err(TaskLinkStoreError::AlreadyLinked(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unsupported_schema_is_a_persistence_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = store_path(&temp);
    std::fs::write(&path, r#"{"schema_version": 99, "links": []}"#).expect("write document");
    let store = FileTaskLinkStore::open(&path).expect("store should open");

    let result = store.find(&TicketRef::new(repository(), number(12))).await;

    assert!(matches!(result, Err(TaskLinkStoreError::Persistence(_))));
}

#[rstest]
fn path_without_file_name_is_rejected() {
    let result = FileTaskLinkStore::open(camino::Utf8Path::new("/"));

    assert!(matches!(result, Err(TaskLinkStoreError::Persistence(_))));
}
