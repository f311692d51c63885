//! Adapter implementations for synchronisation ports.

pub mod clickup;
pub mod file;
pub mod github;
pub mod memory;
pub mod templates;
