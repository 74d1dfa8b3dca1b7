//! Driver channel trait

use crate::refresh::{CommandArgs, TlcOpcode};

/// One channel of the driver command dispatcher
///
/// Every channel receives the same command every tick. The bus encoding
/// of each opcode is the implementation's concern.
pub trait TlcChannel {
    /// Check if the channel has consumed the previous command
    fn is_ready(&self) -> bool;

    /// Present this tick's command
    ///
    /// Called every tick, with [`TlcOpcode::Nop`] when nothing is issued.
    /// `override_args` is set when `args[0]` carries an initialization
    /// value rather than acting on loaded pixel data.
    fn issue(&mut self, opcode: TlcOpcode, args: &CommandArgs, override_args: bool);
}
