//! Driver channel implementations

pub mod sim;

pub use sim::{IssuedCommand, SimulatedTlc, COMMAND_LOG_LEN};
