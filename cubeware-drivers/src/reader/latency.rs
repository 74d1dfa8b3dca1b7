//! Layer reader with a fixed fetch latency
//!
//! Stands in for a pixel-data source that takes a known number of ticks
//! to load a layer. `done` drops on every start pulse and rises again once
//! the fetch completes.

use cubeware_core::config::MAX_LAYERS;
use cubeware_core::traits::LayerReader;

/// Layer reader with a fixed fetch latency
#[derive(Debug, Clone)]
pub struct LatencyReader {
    /// Advances needed to complete a fetch (at least one)
    fetch_ticks: u32,
    /// Advances left on the current fetch
    remaining: Option<u32>,
    /// Requested data is loaded
    done: bool,
    /// Never completes while set
    held: bool,
    /// Last requested layer
    layer: Option<u8>,
    /// Start pulses received
    requests: u32,
    /// Start pulses per layer
    per_layer: [u32; MAX_LAYERS],
}

impl LatencyReader {
    /// Create a reader that needs `fetch_ticks` advances per layer
    pub fn new(fetch_ticks: u32) -> Self {
        Self {
            fetch_ticks,
            remaining: None,
            done: false,
            held: false,
            layer: None,
            requests: 0,
            per_layer: [0; MAX_LAYERS],
        }
    }

    /// Hold the current fetch open (models a reader that never finishes)
    pub fn hold(&mut self, held: bool) {
        self.held = held;
    }

    /// Last requested layer
    pub fn layer(&self) -> Option<u8> {
        self.layer
    }

    /// Start pulses received
    pub fn requests(&self) -> u32 {
        self.requests
    }

    /// Start pulses received for `layer`
    pub fn requests_for(&self, layer: u8) -> u32 {
        self.per_layer.get(layer as usize).copied().unwrap_or(0)
    }

    /// Check if a fetch is in progress
    pub fn is_busy(&self) -> bool {
        self.remaining.is_some()
    }
}

impl LayerReader for LatencyReader {
    fn is_done(&self) -> bool {
        self.done
    }

    fn start(&mut self, layer: u8) {
        self.layer = Some(layer);
        self.requests = self.requests.saturating_add(1);
        if let Some(count) = self.per_layer.get_mut(layer as usize) {
            *count = count.saturating_add(1);
        }
        self.done = false;
        self.remaining = Some(self.fetch_ticks.max(1));
    }

    fn advance(&mut self) {
        if self.held {
            return;
        }
        match self.remaining {
            Some(n) if n <= 1 => {
                self.remaining = None;
                self.done = true;
            }
            Some(n) => self.remaining = Some(n - 1),
            None => {}
        }
    }
}
