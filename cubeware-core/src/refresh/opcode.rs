//! Driver command opcodes
//!
//! Only the command identity lives here; the bus encoding of each
//! command belongs to the dispatcher.

use crate::config::ARG_LANES;

/// Argument lanes broadcast with every command
pub type CommandArgs = [u8; ARG_LANES];

/// Argument bus with only lane 0 set
pub const fn args_with(arg0: u8) -> CommandArgs {
    let mut args = [0u8; ARG_LANES];
    args[0] = arg0;
    args
}

/// Commands broadcast to every driver channel (4-bit command space)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TlcOpcode {
    /// No operation (inert default)
    #[default]
    Nop = 0,
    /// Software reset of every driver
    SoftReset = 1,
    /// Write MODE1 from arg lane 0
    SetMode1 = 2,
    /// Write MODE2 from arg lane 0
    SetMode2 = 3,
    /// Write the current-reference register from arg lane 0
    SetIref = 4,
    /// Start the oscillator
    OscOn = 5,
    /// Load the current layer's pixel data into the drivers
    WriteLeds = 6,
    /// Enable LED outputs
    EnableLeds = 7,
    /// Disable LED outputs
    DisableLeds = 8,
    /// Stop the oscillator
    OscOff = 9,
}

impl TlcOpcode {
    /// Raw command code
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a raw command code
    pub const fn from_bits(bits: u8) -> Option<Self> {
        use TlcOpcode::*;

        match bits {
            0 => Some(Nop),
            1 => Some(SoftReset),
            2 => Some(SetMode1),
            3 => Some(SetMode2),
            4 => Some(SetIref),
            5 => Some(OscOn),
            6 => Some(WriteLeds),
            7 => Some(EnableLeds),
            8 => Some(DisableLeds),
            9 => Some(OscOff),
            _ => None,
        }
    }

    /// Check if this is the inert opcode
    pub const fn is_nop(self) -> bool {
        matches!(self, TlcOpcode::Nop)
    }

    /// Check if this command takes its value from arg lane 0
    pub const fn carries_argument(self) -> bool {
        matches!(
            self,
            TlcOpcode::SetMode1 | TlcOpcode::SetMode2 | TlcOpcode::SetIref
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_fit_four_bits() {
        for bits in 0..16u8 {
            if let Some(op) = TlcOpcode::from_bits(bits) {
                assert_eq!(op.bits(), bits);
            }
        }
        assert_eq!(TlcOpcode::from_bits(10), None);
        assert_eq!(TlcOpcode::OscOff.bits(), 9);
    }

    #[test]
    fn test_argument_commands() {
        assert!(TlcOpcode::SetMode1.carries_argument());
        assert!(TlcOpcode::SetIref.carries_argument());
        assert!(!TlcOpcode::WriteLeds.carries_argument());
        assert!(!TlcOpcode::Nop.carries_argument());
    }

    #[test]
    fn test_default_is_nop() {
        assert!(TlcOpcode::default().is_nop());
        assert!(!TlcOpcode::SoftReset.is_nop());
    }

    #[test]
    fn test_args_with() {
        let args = args_with(0x11);
        assert_eq!(args[0], 0x11);
        assert!(args[1..].iter().all(|&b| b == 0));
    }
}
