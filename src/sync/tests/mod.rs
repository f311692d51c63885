//! Unit tests for ticket-to-task synchronisation.
//!
//! Tests are organised by concern: domain rules and planners first, then the
//! services over in-memory and mocked ports, then the adapters.

mod decision_tests;
mod file_store_tests;
mod fixtures;
