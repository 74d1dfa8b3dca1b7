//! Refresh controller states

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshState {
    /// Dormant until enabled
    #[default]
    Stopped,
    /// Issue a software reset to every driver
    Reset,
    /// Write MODE1
    InitMode1,
    /// Write MODE2
    InitMode2,
    /// Write the current reference
    InitIref,
    /// Start oscillators once the first layer's data is loaded
    OscOn,
    /// Load the prepared layer into the drivers
    WrLeds,
    /// Light the layer and request the next one from the reader
    EnLeds,
    /// Layer lit for `disp_cycles`
    Disp,
    /// Turn the outputs off
    DisableLeds,
    /// Stop oscillators
    OscOff,
    /// Dark for `delay_cycles`
    Delay,
    /// Rotate to the next layer or stop
    NextLayer,
}

impl RefreshState {
    /// All states in refresh order
    pub const ALL: [RefreshState; 13] = [
        RefreshState::Stopped,
        RefreshState::Reset,
        RefreshState::InitMode1,
        RefreshState::InitMode2,
        RefreshState::InitIref,
        RefreshState::OscOn,
        RefreshState::WrLeds,
        RefreshState::EnLeds,
        RefreshState::Disp,
        RefreshState::DisableLeds,
        RefreshState::OscOff,
        RefreshState::Delay,
        RefreshState::NextLayer,
    ];

    /// Check if leaving this state requires every driver to be ready
    pub fn awaits_drivers(&self) -> bool {
        matches!(
            self,
            RefreshState::Reset
                | RefreshState::InitMode1
                | RefreshState::InitMode2
                | RefreshState::InitIref
                | RefreshState::OscOn
                | RefreshState::WrLeds
                | RefreshState::EnLeds
                | RefreshState::DisableLeds
                | RefreshState::OscOff
        )
    }

    /// Check if leaving this state requires the reader to be done
    pub fn awaits_reader(&self) -> bool {
        matches!(self, RefreshState::OscOn)
    }

    /// Check if this state is driven by the timing counter
    pub fn is_timed(&self) -> bool {
        matches!(self, RefreshState::Disp | RefreshState::Delay)
    }

    /// Check if the refresh loop is active
    pub fn is_running(&self) -> bool {
        !matches!(self, RefreshState::Stopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stopped() {
        assert_eq!(RefreshState::default(), RefreshState::Stopped);
        assert!(!RefreshState::Stopped.is_running());
    }

    #[test]
    fn test_gating_is_exclusive() {
        // A state is either ack-gated, timed, or neither; never both
        for state in RefreshState::ALL {
            assert!(!(state.awaits_drivers() && state.is_timed()));
        }
    }

    #[test]
    fn test_ungated_states() {
        assert!(!RefreshState::Stopped.awaits_drivers());
        assert!(!RefreshState::NextLayer.awaits_drivers());
        assert!(!RefreshState::Disp.awaits_drivers());
        assert!(RefreshState::Delay.is_timed());
    }

    #[test]
    fn test_reader_gate() {
        let gated: usize = RefreshState::ALL
            .iter()
            .filter(|s| s.awaits_reader())
            .count();
        assert_eq!(gated, 1);
        assert!(RefreshState::OscOn.awaits_drivers());
    }
}
