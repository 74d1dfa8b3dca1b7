//! Refresh runner
//!
//! Wires a [`RefreshController`] to its collaborators: samples the driver
//! bank and reader, ticks the controller, then presents the outputs.

use super::controller::{RefreshController, TickInputs};
use super::opcode::TlcOpcode;
use super::state::RefreshState;
use crate::config::RefreshConfig;
use crate::layer::LayerMask;
use crate::traits::{LayerPower, LayerReader, TlcChannel};

/// What happened during one polled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// State at the start of the tick
    pub state: RefreshState,
    /// State committed at the end of the tick
    pub next_state: RefreshState,
    /// Command broadcast this tick
    pub opcode: TlcOpcode,
    /// Aggregate driver ready sampled this tick
    pub all_ready: bool,
    /// Reader done sampled this tick
    pub reader_done: bool,
    /// Layer requested from the reader, if a start pulse was issued
    pub reader_start: Option<u8>,
    /// Layer mask committed at the end of the tick
    pub layer_mask: LayerMask,
}

impl TickReport {
    /// Check if the controller left its state this tick
    pub fn changed_state(&self) -> bool {
        self.state != self.next_state
    }
}

/// Controller plus the collaborators it drives
pub struct RefreshRunner<C, R, P, const N: usize> {
    controller: RefreshController<N>,
    channels: [C; N],
    reader: R,
    power: P,
    applied_mask: Option<LayerMask>,
}

impl<C, R, P, const N: usize> RefreshRunner<C, R, P, N>
where
    C: TlcChannel,
    R: LayerReader,
    P: LayerPower,
{
    /// Create a runner with the controller in the power-on state
    pub fn new(channels: [C; N], reader: R, power: P) -> Self {
        Self {
            controller: RefreshController::new(),
            channels,
            reader,
            power,
            applied_mask: None,
        }
    }

    /// Run one tick
    ///
    /// The controller commits before the collaborators are driven, so an
    /// error from the power output does not undo the tick. The mask is
    /// only written when it changes.
    pub fn poll(&mut self, config: &RefreshConfig) -> Result<TickReport, P::Error> {
        let channels = &self.channels;
        let inputs = TickInputs::new(
            core::array::from_fn(|i| channels[i].is_ready()),
            self.reader.is_done(),
        );

        let state = self.controller.state();
        let out = self.controller.tick(config, &inputs).outputs;
        let next_state = self.controller.state();

        for channel in self.channels.iter_mut() {
            channel.issue(out.opcode, &out.args, out.override_args);
        }

        let reader_start = out.reader_start.then_some(out.reader_layer);
        if let Some(layer) = reader_start {
            self.reader.start(layer);
        }
        self.reader.advance();

        #[cfg(feature = "defmt")]
        {
            if out.issues_command() {
                defmt::debug!("refresh: issue {} in {}", out.opcode, state);
            }
            if state != next_state {
                defmt::trace!("refresh: {} -> {}", state, next_state);
            }
        }

        let layer_mask = self.controller.layer_mask();
        if self.applied_mask != Some(layer_mask) {
            self.power.apply(layer_mask)?;
            self.applied_mask = Some(layer_mask);
        }

        Ok(TickReport {
            state,
            next_state,
            opcode: out.opcode,
            all_ready: inputs.all_ready(),
            reader_done: inputs.reader_done,
            reader_start,
            layer_mask,
        })
    }

    /// Return the controller to its power-on state
    ///
    /// The layer mask is rewritten on the next poll.
    pub fn force_reset(&mut self) {
        self.controller.force_reset();
        self.applied_mask = None;
    }

    /// Get the controller
    pub fn controller(&self) -> &RefreshController<N> {
        &self.controller
    }

    /// Get the driver channels
    pub fn channels(&self) -> &[C; N] {
        &self.channels
    }

    /// Get mutable access to the driver channels
    pub fn channels_mut(&mut self) -> &mut [C; N] {
        &mut self.channels
    }

    /// Get the layer reader
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Get mutable access to the layer reader
    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Get the layer power output
    pub fn power(&self) -> &P {
        &self.power
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::CommandArgs;

    /// Channel that counts real commands
    #[derive(Default)]
    struct CountingChannel {
        commands: usize,
        last: TlcOpcode,
        ready: bool,
    }

    impl TlcChannel for CountingChannel {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn issue(&mut self, opcode: TlcOpcode, _args: &CommandArgs, _override_args: bool) {
            if !opcode.is_nop() {
                self.commands += 1;
                self.last = opcode;
            }
        }
    }

    /// Reader that completes instantly
    #[derive(Default)]
    struct InstantReader {
        starts: usize,
        last_layer: Option<u8>,
    }

    impl LayerReader for InstantReader {
        fn is_done(&self) -> bool {
            true
        }

        fn start(&mut self, layer: u8) {
            self.starts += 1;
            self.last_layer = Some(layer);
        }
    }

    #[derive(Default)]
    struct RecordingPower {
        writes: usize,
        mask: LayerMask,
        fail: bool,
    }

    impl LayerPower for RecordingPower {
        type Error = ();

        fn apply(&mut self, mask: LayerMask) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes += 1;
            self.mask = mask;
            Ok(())
        }
    }

    fn ready_channel() -> CountingChannel {
        CountingChannel {
            ready: true,
            ..Default::default()
        }
    }

    fn runner() -> RefreshRunner<CountingChannel, InstantReader, RecordingPower, 4> {
        RefreshRunner::new(
            core::array::from_fn(|_| ready_channel()),
            InstantReader::default(),
            RecordingPower::default(),
        )
    }

    #[test]
    fn test_broadcast_to_every_channel() {
        let mut runner = runner();
        let config = RefreshConfig::new(true, 0x10, 1, 1);

        // stopped -> reset, then SOFT_RESET
        runner.poll(&config).unwrap();
        let report = runner.poll(&config).unwrap();
        assert_eq!(report.opcode, TlcOpcode::SoftReset);

        for channel in runner.channels() {
            assert_eq!(channel.commands, 1);
            assert_eq!(channel.last, TlcOpcode::SoftReset);
        }
    }

    #[test]
    fn test_one_busy_channel_blocks_bank() {
        let mut runner = runner();
        let config = RefreshConfig::new(true, 0x10, 1, 1);
        runner.poll(&config).unwrap();

        runner.channels_mut()[2].ready = false;
        for _ in 0..5 {
            let report = runner.poll(&config).unwrap();
            assert!(!report.all_ready);
            assert_eq!(report.opcode, TlcOpcode::Nop);
            assert!(!report.changed_state());
        }
        assert!(runner.channels().iter().all(|c| c.commands == 0));
    }

    #[test]
    fn test_reader_start_pulses() {
        let mut runner = runner();
        let config = RefreshConfig::new(true, 0x10, 1, 1);

        let report = runner.poll(&config).unwrap();
        assert_eq!(report.reader_start, Some(0));

        while runner.controller().state() != RefreshState::Disp {
            runner.poll(&config).unwrap();
        }
        assert_eq!(runner.reader().starts, 2);
        assert_eq!(runner.reader().last_layer, Some(1));
    }

    #[test]
    fn test_mask_written_on_change_only() {
        let mut runner = runner();
        let disabled = RefreshConfig::default();

        for _ in 0..5 {
            runner.poll(&disabled).unwrap();
        }
        assert_eq!(runner.power().writes, 1);
        assert_eq!(runner.power().mask, LayerMask::NONE);

        let enabled = disabled.with_enable(true);
        let report = runner.poll(&enabled).unwrap();
        assert_eq!(report.layer_mask.bits(), 0x01);
        assert_eq!(runner.power().writes, 2);
        assert_eq!(runner.power().mask.bits(), 0x01);
    }

    #[test]
    fn test_power_error_propagates() {
        let mut runner = runner();
        runner.power.fail = true;

        let config = RefreshConfig::new(true, 0x10, 1, 1);
        assert_eq!(runner.poll(&config), Err(()));
        // The controller still advanced
        assert_eq!(runner.controller().state(), RefreshState::Reset);
    }

    #[test]
    fn test_force_reset_rewrites_mask() {
        let mut runner = runner();
        let config = RefreshConfig::new(true, 0x10, 1, 1);
        runner.poll(&config).unwrap();
        assert_eq!(runner.power().writes, 1);

        runner.force_reset();
        assert_eq!(runner.controller().state(), RefreshState::Stopped);

        let report = runner.poll(&config.with_enable(false)).unwrap();
        assert_eq!(report.layer_mask, LayerMask::NONE);
        assert_eq!(runner.power().writes, 2);
    }
}
