//! Layer reader implementations

pub mod latency;

pub use latency::LatencyReader;
