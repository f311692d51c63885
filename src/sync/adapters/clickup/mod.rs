//! `ClickUp` task backend adapter.

mod client;
mod models;

pub use client::{ClickUpClient, ClickUpConfig, DEFAULT_CLICKUP_API_URL};
