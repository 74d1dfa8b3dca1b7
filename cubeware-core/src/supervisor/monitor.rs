//! Stall supervisor implementation
//!
//! Counts consecutive ticks the controller spends in one
//! acknowledgment-gated state. Timed states (`disp`, `delay`) and the
//! dormant `stopped` state never count.

use crate::refresh::{RefreshState, TickReport};

/// Default stall threshold in ticks
pub const DEFAULT_STALL_LIMIT_TICKS: u32 = 10_000;

/// What the controller is stuck waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StallKind {
    /// At least one driver channel never became ready
    DriverBank(RefreshState),
    /// Drivers ready, layer reader never signalled done
    Reader,
}

/// Supervision status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SupervisorStatus {
    /// Progressing normally
    Ok,
    /// Waited at least the configured limit
    Stalled(StallKind),
}

/// Liveness monitor for the refresh controller
#[derive(Debug, Clone)]
pub struct StallSupervisor {
    /// Ticks allowed in one gated state before reporting a stall
    limit_ticks: u32,
    /// Gated state currently being waited in
    waiting_in: Option<RefreshState>,
    /// Consecutive ticks spent waiting
    ticks_waiting: u32,
    /// Cause of the current wait
    kind: Option<StallKind>,
}

impl Default for StallSupervisor {
    fn default() -> Self {
        Self::new(DEFAULT_STALL_LIMIT_TICKS)
    }
}

impl StallSupervisor {
    /// Create a supervisor with a stall threshold in ticks
    pub const fn new(limit_ticks: u32) -> Self {
        Self {
            limit_ticks,
            waiting_in: None,
            ticks_waiting: 0,
            kind: None,
        }
    }

    /// Observe one tick report
    pub fn observe(&mut self, report: &TickReport) -> SupervisorStatus {
        if report.changed_state() || !report.state.awaits_drivers() {
            self.clear();
            return SupervisorStatus::Ok;
        }

        if self.waiting_in != Some(report.state) {
            self.waiting_in = Some(report.state);
            self.ticks_waiting = 0;
        }
        self.ticks_waiting = self.ticks_waiting.saturating_add(1);

        self.kind = Some(if report.all_ready {
            StallKind::Reader
        } else {
            StallKind::DriverBank(report.state)
        });

        #[cfg(feature = "defmt")]
        {
            if self.ticks_waiting == self.limit_ticks {
                defmt::warn!(
                    "refresh stalled in {} for {} ticks",
                    report.state,
                    self.ticks_waiting
                );
            }
        }

        self.check()
    }

    /// Current status without observing a new tick
    pub fn check(&self) -> SupervisorStatus {
        match self.kind {
            Some(kind) if self.ticks_waiting >= self.limit_ticks => SupervisorStatus::Stalled(kind),
            _ => SupervisorStatus::Ok,
        }
    }

    /// Forget the current wait
    pub fn clear(&mut self) {
        self.waiting_in = None;
        self.ticks_waiting = 0;
        self.kind = None;
    }

    /// Consecutive ticks spent in the current gated state
    pub fn ticks_waiting(&self) -> u32 {
        self.ticks_waiting
    }

    /// Configured threshold
    pub fn limit_ticks(&self) -> u32 {
        self.limit_ticks
    }
}
