//! Configuration type definitions
//!
//! These types represent the refresh configuration. The controller reads
//! it every tick, so updates take effect on the next tick.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of physical layers (sizes the layer mask and counter)
pub const MAX_LAYERS: usize = 8;

/// Number of argument lanes on the driver command bus
pub const ARG_LANES: usize = 16;

/// MODE1 register value written during initialization
pub const MODE1_INIT: u8 = 0x11;

/// MODE2 register value written during initialization
pub const MODE2_INIT: u8 = 0x00;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown control variable id
    UnknownVariable,
    /// Value does not fit the variable
    ValueOutOfRange,
    /// Serialization failed (buffer too small)
    Encode,
    /// Stored blob could not be decoded
    Decode,
}

/// Refresh configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefreshConfig {
    /// Run the refresh loop
    pub enable: bool,
    /// Current-reference setting written to every driver
    pub iref: u8,
    /// Ticks a layer stays lit
    pub disp_cycles: u32,
    /// Ticks held dark between layers
    pub delay_cycles: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enable: false,
            iref: 0xFF,
            disp_cycles: 1000,
            delay_cycles: 16,
        }
    }
}

impl RefreshConfig {
    /// Create a configuration with explicit timing
    pub const fn new(enable: bool, iref: u8, disp_cycles: u32, delay_cycles: u32) -> Self {
        Self {
            enable,
            iref,
            disp_cycles,
            delay_cycles,
        }
    }

    /// Same configuration with `enable` replaced
    pub const fn with_enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    /// Apply a runtime variable update
    ///
    /// Booleans are non-zero = true. `iref` must fit in a byte.
    pub fn set_var(&mut self, var: ControlVar, value: u32) -> Result<(), ConfigError> {
        match var {
            ControlVar::Enable => self.enable = value != 0,
            ControlVar::Iref => {
                self.iref = u8::try_from(value).map_err(|_| ConfigError::ValueOutOfRange)?;
            }
            ControlVar::DispCycles => self.disp_cycles = value,
            ControlVar::DelayCycles => self.delay_cycles = value,
        }
        Ok(())
    }

    /// Read back a variable as a raw value
    pub fn get_var(&self, var: ControlVar) -> u32 {
        match var {
            ControlVar::Enable => self.enable as u32,
            ControlVar::Iref => self.iref as u32,
            ControlVar::DispCycles => self.disp_cycles,
            ControlVar::DelayCycles => self.delay_cycles,
        }
    }

    /// Ticks spent in the lit and dark states for one layer
    ///
    /// Each phase counts up from zero and leaves on the tick its counter
    /// exceeds the setting, so it occupies `setting + 2` ticks.
    pub fn timed_ticks(&self) -> u64 {
        (self.disp_cycles as u64 + 2) + (self.delay_cycles as u64 + 2)
    }
}

/// Tunable variables, addressed by numeric id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ControlVar {
    Enable = 0,
    Iref = 1,
    DispCycles = 2,
    DelayCycles = 3,
}

impl ControlVar {
    /// Look up a variable by id
    pub fn from_id(id: u8) -> Result<Self, ConfigError> {
        match id {
            0 => Ok(ControlVar::Enable),
            1 => Ok(ControlVar::Iref),
            2 => Ok(ControlVar::DispCycles),
            3 => Ok(ControlVar::DelayCycles),
            _ => Err(ConfigError::UnknownVariable),
        }
    }

    /// Numeric id of this variable
    pub const fn id(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        let config = RefreshConfig::default();
        assert!(!config.enable);
        assert_eq!(config.iref, 0xFF);
    }

    #[test]
    fn test_set_var() {
        let mut config = RefreshConfig::default();

        config.set_var(ControlVar::Enable, 1).unwrap();
        assert!(config.enable);

        config.set_var(ControlVar::DispCycles, 250).unwrap();
        config.set_var(ControlVar::DelayCycles, 4).unwrap();
        assert_eq!(config.disp_cycles, 250);
        assert_eq!(config.delay_cycles, 4);

        config.set_var(ControlVar::Enable, 0).unwrap();
        assert!(!config.enable);
    }

    #[test]
    fn test_iref_out_of_range() {
        let mut config = RefreshConfig::default();
        config.set_var(ControlVar::Iref, 0x40).unwrap();
        assert_eq!(config.iref, 0x40);

        assert_eq!(
            config.set_var(ControlVar::Iref, 256),
            Err(ConfigError::ValueOutOfRange)
        );
        // Rejected update leaves the old value
        assert_eq!(config.iref, 0x40);
    }

    #[test]
    fn test_var_ids() {
        for id in 0..4u8 {
            let var = ControlVar::from_id(id).unwrap();
            assert_eq!(var.id(), id);
        }
        assert_eq!(ControlVar::from_id(4), Err(ConfigError::UnknownVariable));
    }

    #[test]
    fn test_get_var_reads_back() {
        let config = RefreshConfig::new(true, 0x20, 7, 3);
        assert_eq!(config.get_var(ControlVar::Enable), 1);
        assert_eq!(config.get_var(ControlVar::Iref), 0x20);
        assert_eq!(config.get_var(ControlVar::DispCycles), 7);
        assert_eq!(config.get_var(ControlVar::DelayCycles), 3);
    }

    #[test]
    fn test_timed_ticks() {
        let config = RefreshConfig::new(true, 0, 2, 1);
        // disp sees counter 0..=3, delay sees 0..=2
        assert_eq!(config.timed_ticks(), 7);

        let degenerate = RefreshConfig::new(true, 0, 0, 0);
        assert_eq!(degenerate.timed_ticks(), 4);
    }
}
