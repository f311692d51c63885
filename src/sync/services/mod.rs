//! Application services for ticket-to-task synchronisation.
//!
//! Handlers plan with the pure domain planners and then carry the decision
//! out through the ports. The router selects a handler per event.

mod effects;
mod error;
mod lifecycle;
mod review;
mod router;
mod ticket;

pub use effects::{BestEffortEffect, Diagnostic, SyncOutcome, SyncReport};
pub use error::{SyncServiceError, SyncServiceResult};
pub use lifecycle::{TagOutcome, TaskLifecycleManager, TaskQueues};
pub use review::ReviewRequestHandler;
pub use router::{EventRouter, SyncPorts, SyncSettings};
pub use ticket::TicketHandler;
