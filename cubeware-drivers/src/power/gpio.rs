//! GPIO layer power output
//!
//! Drives one pin per layer (directly or via a transistor/MOSFET). Pin `i`
//! follows bit `i` of the layer mask, so boards wired top layer first
//! pass their pins in reverse order.

use embedded_hal::digital::OutputPin;

use cubeware_core::config::MAX_LAYERS;
use cubeware_core::layer::LayerMask;
use cubeware_core::traits::LayerPower;

/// Layer power output over `L` GPIO pins
pub struct GpioLayerPower<P, const L: usize> {
    pins: [P; L],
    /// If true, layer ON = pin LOW
    active_low: bool,
}

impl<P: OutputPin, const L: usize> GpioLayerPower<P, L> {
    const FITS_MASK: () = assert!(L <= MAX_LAYERS, "more pins than layers");

    /// Create a new layer power output with every layer off
    ///
    /// # Arguments
    /// - `pins`: One pin per layer, layer 0 first
    /// - `active_low`: If true, a layer is powered when its pin is LOW
    pub fn new(pins: [P; L], active_low: bool) -> Result<Self, P::Error> {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS_MASK;

        let mut power = Self { pins, active_low };
        power.apply(LayerMask::NONE)?;
        Ok(power)
    }

    /// Create a new output with active-high pins
    pub fn new_active_high(pins: [P; L]) -> Result<Self, P::Error> {
        Self::new(pins, false)
    }

    /// Create a new output with active-low pins
    pub fn new_active_low(pins: [P; L]) -> Result<Self, P::Error> {
        Self::new(pins, true)
    }

    /// Release the pins
    pub fn release(self) -> [P; L] {
        self.pins
    }
}

impl<P: OutputPin, const L: usize> LayerPower for GpioLayerPower<P, L> {
    type Error = P::Error;

    fn apply(&mut self, mask: LayerMask) -> Result<(), P::Error> {
        for (layer, pin) in self.pins.iter_mut().enumerate() {
            if mask.is_powered(layer as u8) != self.active_low {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        Ok(())
    }
}
