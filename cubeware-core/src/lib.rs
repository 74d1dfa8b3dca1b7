//! Board-agnostic refresh sequencing core for multiplexed LED cubes
//!
//! This crate contains the control logic that does not depend on
//! specific hardware implementations:
//!
//! - Refresh controller state machine (driver command sequencing)
//! - Driver bank readiness aggregation
//! - Layer selection and rotation
//! - Collaborator traits (driver channel, layer reader, layer power)
//! - Runner wiring the controller to its collaborators
//! - Stall supervision for unresponsive hardware
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod layer;
pub mod readiness;
pub mod refresh;
pub mod supervisor;
pub mod traits;
