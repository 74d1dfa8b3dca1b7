//! Layer reader trait

/// Source of per-layer pixel data
///
/// The controller pulses [`start`](LayerReader::start) to request a
/// layer and polls [`is_done`](LayerReader::is_done) before showing it.
pub trait LayerReader {
    /// Check if the requested layer's data is loaded
    fn is_done(&self) -> bool;

    /// Begin fetching `layer`
    fn start(&mut self, layer: u8);

    /// Advance the reader by one tick
    fn advance(&mut self) {}
}
