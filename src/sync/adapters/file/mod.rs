//! File-backed adapters for runners that keep state between invocations.

mod link_store;

pub use link_store::FileTaskLinkStore;
