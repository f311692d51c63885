//! Step definitions shared by the synchronisation behaviour tests.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
