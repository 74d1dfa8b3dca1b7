//! Simulated TLC driver channel
//!
//! Models a driver chip that needs a number of ticks to consume each
//! command. Accepted commands are kept in a bounded log.

use heapless::Vec;

use cubeware_core::refresh::{CommandArgs, TlcOpcode};
use cubeware_core::traits::TlcChannel;

/// Capacity of the per-channel command log
pub const COMMAND_LOG_LEN: usize = 64;

/// A command accepted by the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IssuedCommand {
    pub opcode: TlcOpcode,
    /// Argument lane 0
    pub arg0: u8,
    pub override_args: bool,
}

/// Driver channel with per-command latency
#[derive(Debug, Clone)]
pub struct SimulatedTlc {
    /// Ticks the channel stays busy after accepting a command
    latency: u32,
    /// Remaining busy ticks
    busy_ticks: u32,
    /// Never becomes ready while set
    stalled: bool,
    /// Accepted commands, oldest first
    log: Vec<IssuedCommand, COMMAND_LOG_LEN>,
    /// Commands accepted after the log filled up
    dropped: u32,
    /// Commands presented while busy
    rejected: u32,
}

impl Default for SimulatedTlc {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SimulatedTlc {
    /// Create a channel that stays busy `latency` ticks per command
    pub fn new(latency: u32) -> Self {
        Self {
            latency,
            busy_ticks: 0,
            stalled: false,
            log: Vec::new(),
            dropped: 0,
            rejected: 0,
        }
    }

    /// Stop acknowledging commands
    pub fn stall(&mut self) {
        self.stalled = true;
    }

    /// Resume acknowledging commands
    pub fn release(&mut self) {
        self.stalled = false;
    }

    /// Accepted commands, oldest first
    pub fn log(&self) -> &[IssuedCommand] {
        &self.log
    }

    /// Opcodes of the accepted commands
    pub fn opcodes(&self) -> impl Iterator<Item = TlcOpcode> + '_ {
        self.log.iter().map(|c| c.opcode)
    }

    /// Commands accepted but not logged
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Commands presented while the channel was busy
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Forget the logged commands
    pub fn clear_log(&mut self) {
        self.log.clear();
        self.dropped = 0;
    }
}

impl TlcChannel for SimulatedTlc {
    fn is_ready(&self) -> bool {
        !self.stalled && self.busy_ticks == 0
    }

    fn issue(&mut self, opcode: TlcOpcode, args: &CommandArgs, override_args: bool) {
        if opcode.is_nop() {
            self.busy_ticks = self.busy_ticks.saturating_sub(1);
            return;
        }

        if !self.is_ready() {
            self.rejected = self.rejected.saturating_add(1);
            return;
        }

        let command = IssuedCommand {
            opcode,
            arg0: args[0],
            override_args,
        };
        if self.log.push(command).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
        self.busy_ticks = self.latency;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeware_core::refresh::args_with;

    const NO_ARGS: CommandArgs = args_with(0);

    #[test]
    fn test_zero_latency_always_ready() {
        let mut tlc = SimulatedTlc::new(0);
        tlc.issue(TlcOpcode::SoftReset, &NO_ARGS, false);
        assert!(tlc.is_ready());
        tlc.issue(TlcOpcode::SetMode1, &args_with(0x11), true);
        assert_eq!(tlc.log().len(), 2);
        assert_eq!(
            tlc.log()[1],
            IssuedCommand {
                opcode: TlcOpcode::SetMode1,
                arg0: 0x11,
                override_args: true,
            }
        );
    }

    #[test]
    fn test_latency_counts_down_on_nop() {
        let mut tlc = SimulatedTlc::new(3);
        tlc.issue(TlcOpcode::OscOn, &NO_ARGS, false);

        for _ in 0..3 {
            assert!(!tlc.is_ready());
            tlc.issue(TlcOpcode::Nop, &NO_ARGS, false);
        }
        assert!(tlc.is_ready());
    }

    #[test]
    fn test_busy_channel_rejects() {
        let mut tlc = SimulatedTlc::new(2);
        tlc.issue(TlcOpcode::OscOn, &NO_ARGS, false);
        tlc.issue(TlcOpcode::WriteLeds, &NO_ARGS, false);

        assert_eq!(tlc.rejected(), 1);
        assert!(tlc.opcodes().eq([TlcOpcode::OscOn]));
    }

    #[test]
    fn test_stall_and_release() {
        let mut tlc = SimulatedTlc::new(0);
        tlc.stall();
        assert!(!tlc.is_ready());
        tlc.issue(TlcOpcode::Nop, &NO_ARGS, false);
        assert!(!tlc.is_ready());

        tlc.release();
        assert!(tlc.is_ready());
    }

    #[test]
    fn test_log_overflow_counts_dropped() {
        let mut tlc = SimulatedTlc::new(0);
        for _ in 0..COMMAND_LOG_LEN + 5 {
            tlc.issue(TlcOpcode::WriteLeds, &NO_ARGS, false);
        }
        assert_eq!(tlc.log().len(), COMMAND_LOG_LEN);
        assert_eq!(tlc.dropped(), 5);

        tlc.clear_log();
        assert!(tlc.log().is_empty());
        assert_eq!(tlc.dropped(), 0);
    }
}
