//! Layer selection and rotation
//!
//! The cube has up to [`MAX_LAYERS`] horizontal layers, multiplexed in
//! time. The layer counter tracks which layer is being prepared; the
//! layer mask is the only state describing which layer is powered.

use crate::config::MAX_LAYERS;

/// 3-bit layer counter, wraps modulo [`MAX_LAYERS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerCounter(u8);

impl LayerCounter {
    /// Counter at layer 0
    pub const ZERO: Self = Self(0);

    /// Create a counter, truncating to the register width
    pub const fn new(value: u8) -> Self {
        Self(value % MAX_LAYERS as u8)
    }

    /// Current layer index (0..MAX_LAYERS)
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Counter incremented by one, wrapping past the last layer
    pub const fn wrapping_next(self) -> Self {
        Self::new(self.0 + 1)
    }
}

/// Bitmask over the physical layers (bit i = layer i powered)
///
/// Holds at most one set bit when produced by [`select_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerMask(u8);

impl LayerMask {
    /// No layer powered
    pub const NONE: Self = Self(0);

    /// Mask with only `layer` set; indices past the last layer give NONE
    pub const fn one_hot(layer: u8) -> Self {
        if (layer as usize) < MAX_LAYERS {
            Self(1 << layer)
        } else {
            Self::NONE
        }
    }

    /// Wrap raw bits (may violate the one-hot invariant)
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw mask byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if no layer is powered
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Check if `layer` is powered
    pub const fn is_powered(self, layer: u8) -> bool {
        (layer as usize) < MAX_LAYERS && self.0 & (1 << layer) != 0
    }

    /// At most one bit set
    pub const fn is_valid(self) -> bool {
        self.0.count_ones() <= 1
    }

    /// The single powered layer, if exactly one is powered
    pub const fn active_layer(self) -> Option<u8> {
        if self.0.count_ones() == 1 {
            Some(self.0.trailing_zeros() as u8)
        } else {
            None
        }
    }
}

/// Decode the layer counter into the mask for the next powered layer
///
/// Tests the counter against every position and sets the matching bit.
pub fn select_layer(counter: LayerCounter) -> LayerMask {
    (0..MAX_LAYERS as u8)
        .find(|&i| counter.value() == i)
        .map_or(LayerMask::NONE, LayerMask::one_hot)
}
