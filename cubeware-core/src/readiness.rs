//! Driver bank readiness aggregation
//!
//! Presents the bank of driver chips as a single ready signal: the bank
//! is ready only when every channel reports ready in the same tick.
//! Recomputed every tick and only ever used as a transition guard.

/// AND of every channel's ready bit
///
/// An empty bank is vacuously ready.
pub fn all_ready(channels: &[bool]) -> bool {
    all_ready_iter(channels.iter().copied())
}

/// AND over any collection of ready bits
pub fn all_ready_iter<I>(ready: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    ready.into_iter().fold(true, |acc, r| acc & r)
}
