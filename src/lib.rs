//! Tasklink: keeps `ClickUp` tasks in step with GitHub issues and pull
//! requests.
//!
//! Each GitHub Actions run processes one webhook event. An issue gets at most
//! one linked task: it is created once a type label is present, tagged as
//! `target:` and `platform:` labels arrive, and completed when the issue
//! closes. Pull requests on `feature/CU-<id>` branches move their task into
//! review and to done.
//!
//! # Architecture
//!
//! Tasklink follows hexagonal architecture principles:
//!
//! - **Domain**: Pure decision rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the issue host, task backend,
//!   link store and message templates
//! - **Adapters**: GitHub and `ClickUp` HTTP clients, templates, in-memory
//!   and file-backed stores
//!
//! # Modules
//!
//! - [`sync`]: Ticket-to-task synchronisation
//! - [`config`]: Action inputs
//! - [`telemetry`]: Log subscriber setup

pub mod config;
pub mod sync;
pub mod telemetry;
