//! Per-tick controller outputs
//!
//! Outputs are not latched. Every tick starts from [`Outputs::inert`] and
//! only the active state's logic overrides fields, so a command or pulse
//! is visible for exactly the tick that produced it.

use super::opcode::{CommandArgs, TlcOpcode};
use crate::config::ARG_LANES;
use crate::layer::LayerMask;

/// Outputs of one controller evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outputs {
    /// Command broadcast to every driver channel
    pub opcode: TlcOpcode,
    /// Argument lanes (only lane 0 is ever non-zero)
    pub args: CommandArgs,
    /// Command carries an explicit initialization argument
    pub override_args: bool,
    /// Start pulse to the layer reader
    pub reader_start: bool,
    /// Layer index presented to the reader
    pub reader_layer: u8,
    /// Layer mask register as seen this tick
    pub layer_mask: LayerMask,
}

impl Outputs {
    /// Inert outputs: NOP, zero arguments, no override, no start pulse
    pub const fn inert(reader_layer: u8, layer_mask: LayerMask) -> Self {
        Self {
            opcode: TlcOpcode::Nop,
            args: [0; ARG_LANES],
            override_args: false,
            reader_start: false,
            reader_layer,
            layer_mask,
        }
    }

    /// Check if this tick issues a real command
    pub fn issues_command(&self) -> bool {
        !self.opcode.is_nop()
    }
}

/// Outputs fanned out to a bank of `N` driver channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutputs<const N: usize> {
    /// The same opcode on every channel
    pub opcodes: [TlcOpcode; N],
    /// Shared outputs of the evaluation
    pub outputs: Outputs,
}

impl<const N: usize> TickOutputs<N> {
    /// Broadcast `outputs` to every channel
    pub fn broadcast(outputs: Outputs) -> Self {
        Self {
            opcodes: [outputs.opcode; N],
            outputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inert_outputs() {
        let out = Outputs::inert(3, LayerMask::one_hot(2));
        assert!(!out.issues_command());
        assert!(!out.override_args);
        assert!(!out.reader_start);
        assert_eq!(out.args, [0; ARG_LANES]);
        assert_eq!(out.reader_layer, 3);
        assert_eq!(out.layer_mask.bits(), 0x04);
    }

    #[test]
    fn test_broadcast() {
        let mut out = Outputs::inert(0, LayerMask::NONE);
        out.opcode = TlcOpcode::OscOn;
        let fanned = TickOutputs::<4>::broadcast(out);
        assert!(fanned.opcodes.iter().all(|&op| op == TlcOpcode::OscOn));
    }
}
