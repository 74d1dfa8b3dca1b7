//! Stall supervision
//!
//! The controller waits indefinitely for hardware acknowledgment. The
//! supervisor watches tick reports and flags when a wait has gone on too
//! long; reacting to it is up to the caller.

pub mod monitor;

pub use monitor::{StallKind, StallSupervisor, SupervisorStatus};
