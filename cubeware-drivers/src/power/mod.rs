//! Layer power outputs

pub mod gpio;

pub use gpio::GpioLayerPower;
