//! Ticket-to-task synchronisation for tasklink.
//!
//! This module keeps exactly one remote task per issue-tracker ticket in step
//! with the ticket's labels and lifecycle, and moves that task through review
//! and completion as the linked pull request progresses. The module follows
//! hexagonal architecture:
//!
//! - Domain types and pure decision rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
