//! Layer power output trait

use crate::layer::LayerMask;

/// Hardware that powers the selected layer
pub trait LayerPower {
    /// Error type of the underlying output
    type Error;

    /// Drive the outputs from `mask` (bit i = layer i powered)
    fn apply(&mut self, mask: LayerMask) -> Result<(), Self::Error>;
}
