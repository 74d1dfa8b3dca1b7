//! Collaborator traits
//!
//! These traits define the interface between the refresh controller and
//! the hardware (or simulated) collaborators it drives.

pub mod driver;
pub mod power;
pub mod reader;

pub use driver::TlcChannel;
pub use power::LayerPower;
pub use reader::LayerReader;
