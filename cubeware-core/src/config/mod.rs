//! Configuration types
//!
//! The refresh configuration is polled by the controller every tick.
//! With the `serde` feature it can be stored as postcard binary data.

#[cfg(feature = "serde")]
pub mod store;
pub mod types;

pub use types::*;
