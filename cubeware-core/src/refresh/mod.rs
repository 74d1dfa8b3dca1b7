//! Refresh controller
//!
//! Sequences the driver bank through initialization, per-layer display
//! and layer rotation. The state machine is explicit, finite and
//! deterministic: every tick computes fresh outputs and the next register
//! values from the registers observed at the start of the tick.

pub mod controller;
pub mod opcode;
pub mod outputs;
pub mod runner;
pub mod state;

pub use controller::{next_outputs, Evaluation, RefreshController, Registers, TickInputs};
pub use opcode::{args_with, CommandArgs, TlcOpcode};
pub use outputs::{Outputs, TickOutputs};
pub use runner::{RefreshRunner, TickReport};
pub use state::RefreshState;
