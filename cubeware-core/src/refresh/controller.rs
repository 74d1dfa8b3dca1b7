//! Refresh controller state machine
//!
//! Every output is a function of the registers observed at the start of
//! the tick and the current inputs. Registers commit together once per
//! tick.

use super::opcode::{args_with, TlcOpcode};
use super::outputs::{Outputs, TickOutputs};
use super::state::RefreshState;
use crate::config::{RefreshConfig, MODE1_INIT, MODE2_INIT};
use crate::layer::{select_layer, LayerCounter, LayerMask};
use crate::readiness::all_ready;

/// Inputs sampled from the collaborators for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInputs<const N: usize> {
    /// Ready bit of every driver channel
    pub ready: [bool; N],
    /// Layer reader has the requested data loaded
    pub reader_done: bool,
}

impl<const N: usize> TickInputs<N> {
    /// Create inputs from per-channel ready bits
    pub const fn new(ready: [bool; N], reader_done: bool) -> Self {
        Self { ready, reader_done }
    }

    /// Every channel ready, reader done
    pub const fn all_set() -> Self {
        Self::new([true; N], true)
    }

    /// Nothing ready, reader busy
    pub const fn all_clear() -> Self {
        Self::new([false; N], false)
    }

    /// Aggregate ready of the whole bank
    pub fn all_ready(&self) -> bool {
        all_ready(&self.ready)
    }
}

/// Controller registers, persisted across ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Registers {
    pub state: RefreshState,
    pub layer_counter: LayerCounter,
    pub layer_mask: LayerMask,
    /// Elapsed ticks within the lit or dark phase
    pub disp_counter: u32,
}

impl Default for Registers {
    fn default() -> Self {
        Self::RESET
    }
}

/// Result of evaluating one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Evaluation {
    /// Outputs visible during this tick
    pub outputs: Outputs,
    /// Register values committed at the end of this tick
    pub next: Registers,
}

impl Registers {
    /// Power-on register values
    pub const RESET: Self = Self {
        state: RefreshState::Stopped,
        layer_counter: LayerCounter::ZERO,
        layer_mask: LayerMask::NONE,
        disp_counter: 0,
    };

    /// Evaluate one tick
    ///
    /// This is the transition and output logic of the controller. It does
    /// not mutate `self`; the caller commits `next`.
    pub fn evaluate(
        &self,
        config: &RefreshConfig,
        all_ready: bool,
        reader_done: bool,
    ) -> Evaluation {
        use RefreshState::*;

        let mut out = Outputs::inert(self.layer_counter.value(), self.layer_mask);
        let mut next = *self;

        match self.state {
            Stopped => {
                if config.enable {
                    next.layer_counter = LayerCounter::ZERO;
                    next.layer_mask = LayerMask::one_hot(0);
                    next.state = Reset;
                    // The first frame shows layer 0, so request it
                    // regardless of where a previous run left the counter
                    out.reader_start = true;
                    out.reader_layer = 0;
                }
            }
            Reset => {
                if all_ready {
                    out.opcode = TlcOpcode::SoftReset;
                    next.state = InitMode1;
                }
            }
            InitMode1 => {
                if all_ready {
                    issue_init(&mut out, TlcOpcode::SetMode1, MODE1_INIT);
                    next.state = InitMode2;
                }
            }
            InitMode2 => {
                if all_ready {
                    issue_init(&mut out, TlcOpcode::SetMode2, MODE2_INIT);
                    next.state = InitIref;
                }
            }
            InitIref => {
                if all_ready {
                    issue_init(&mut out, TlcOpcode::SetIref, config.iref);
                    next.state = OscOn;
                }
            }
            OscOn => {
                if all_ready && reader_done {
                    out.opcode = TlcOpcode::OscOn;
                    next.state = WrLeds;
                }
            }
            WrLeds => {
                if all_ready {
                    out.opcode = TlcOpcode::WriteLeds;
                    next.layer_counter = self.layer_counter.wrapping_next();
                    next.state = EnLeds;
                }
            }
            EnLeds => {
                if all_ready {
                    out.opcode = TlcOpcode::EnableLeds;
                    out.reader_start = true;
                    next.disp_counter = 0;
                    next.state = Disp;
                }
            }
            Disp => {
                if self.disp_counter > config.disp_cycles {
                    next.disp_counter = 0;
                    next.layer_mask = LayerMask::NONE;
                    next.state = DisableLeds;
                } else {
                    next.disp_counter = self.disp_counter.wrapping_add(1);
                }
            }
            DisableLeds => {
                if all_ready {
                    out.opcode = TlcOpcode::DisableLeds;
                    next.state = OscOff;
                }
            }
            OscOff => {
                if all_ready {
                    out.opcode = TlcOpcode::OscOff;
                    next.state = Delay;
                }
            }
            Delay => {
                if self.disp_counter > config.delay_cycles {
                    next.disp_counter = 0;
                    next.state = NextLayer;
                } else {
                    next.disp_counter = self.disp_counter.wrapping_add(1);
                }
            }
            NextLayer => {
                if config.enable {
                    next.layer_mask = select_layer(self.layer_counter);
                    next.state = Reset;
                } else {
                    next.layer_mask = LayerMask::NONE;
                    next.state = Stopped;
                }
            }
        }

        Evaluation { outputs: out, next }
    }
}

fn issue_init(out: &mut Outputs, opcode: TlcOpcode, arg0: u8) {
    out.opcode = opcode;
    out.args = args_with(arg0);
    out.override_args = true;
}

/// Outputs for one tick, without committing anything
pub fn next_outputs(
    registers: &Registers,
    config: &RefreshConfig,
    all_ready: bool,
    reader_done: bool,
) -> Outputs {
    registers.evaluate(config, all_ready, reader_done).outputs
}

/// Refresh controller for a bank of `N` driver channels
#[derive(Debug, Clone)]
pub struct RefreshController<const N: usize> {
    registers: Registers,
}

impl<const N: usize> Default for RefreshController<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RefreshController<N> {
    /// Create a controller in the power-on state
    pub const fn new() -> Self {
        Self {
            registers: Registers::RESET,
        }
    }

    /// Advance one tick
    ///
    /// Aggregates readiness, evaluates, commits every register and returns
    /// the outputs visible during this tick.
    pub fn tick(&mut self, config: &RefreshConfig, inputs: &TickInputs<N>) -> TickOutputs<N> {
        let eval = self
            .registers
            .evaluate(config, inputs.all_ready(), inputs.reader_done);
        self.registers = eval.next;
        TickOutputs::broadcast(eval.outputs)
    }

    /// Return to the power-on state
    ///
    /// For supervisors that decide the hardware is lost. The normal abort
    /// path is deasserting `enable`.
    pub fn force_reset(&mut self) {
        self.registers = Registers::RESET;
    }

    /// Current registers
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Current state
    pub fn state(&self) -> RefreshState {
        self.registers.state
    }

    /// Current layer mask register
    pub fn layer_mask(&self) -> LayerMask {
        self.registers.layer_mask
    }

    /// Current layer counter register
    pub fn layer_counter(&self) -> LayerCounter {
        self.registers.layer_counter
    }
}
