//! Arm/debounce state machine for the PMU's power-key latch.
//!
//! The chip latches "an edge happened since the last clear" bits; the poll
//! task reads and unconditionally clears them every tick, then feeds the
//! snapshot here. Register access is injected by the caller so the machine
//! can be driven with synthetic sequences in tests.

use log::debug;

/// Snapshot of the power-key status register, taken after the acknowledge
/// write that clears it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PowerKeyLatch {
    pub short_press: bool,
    pub long_press: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PowerKeyState {
    /// Boot default. The chip powers up with stale latch bits set; they
    /// must be observed and ignored exactly once before the key is live.
    Unarmed,
    /// Terminal for the session; presses now fire events.
    Armed,
}

/// Events produced by one tick. Both may fire in the same tick; callers
/// must process the long press first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PowerKeyEvents {
    pub long_press: bool,
    pub short_press: bool,
}

impl PowerKeyEvents {
    pub fn any(&self) -> bool {
        self.long_press || self.short_press
    }
}

pub struct PowerKeyMonitor {
    state: PowerKeyState,
}

impl PowerKeyMonitor {
    /// Poll period of the firmware task feeding this machine.
    pub const POLL_PERIOD_MS: u64 = 500;

    pub const fn new() -> Self {
        Self {
            state: PowerKeyState::Unarmed,
        }
    }

    pub fn state(&self) -> PowerKeyState {
        self.state
    }

    /// Consumes one latch snapshot. A tick whose register access failed
    /// must simply not call this; skipped ticks leave the state untouched.
    pub fn observe(&mut self, latch: PowerKeyLatch) -> PowerKeyEvents {
        match self.state {
            PowerKeyState::Unarmed => {
                if latch.short_press || latch.long_press {
                    // Stale bits from chip power-on; wait for a clean tick.
                    return PowerKeyEvents::default();
                }

                debug!("power-key: armed");
                self.state = PowerKeyState::Armed;
                PowerKeyEvents::default()
            }
            PowerKeyState::Armed => PowerKeyEvents {
                long_press: latch.long_press,
                short_press: latch.short_press,
            },
        }
    }
}

impl Default for PowerKeyMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH_SET: PowerKeyLatch = PowerKeyLatch {
        short_press: true,
        long_press: true,
    };
    const CLEAR: PowerKeyLatch = PowerKeyLatch {
        short_press: false,
        long_press: false,
    };

    #[test]
    fn stale_boot_bits_never_fire_and_never_arm() {
        let mut monitor = PowerKeyMonitor::new();

        for _ in 0..5 {
            assert!(!monitor.observe(BOTH_SET).any());
            assert_eq!(monitor.state(), PowerKeyState::Unarmed);
        }
    }

    #[test]
    fn first_clean_tick_arms_without_events() {
        let mut monitor = PowerKeyMonitor::new();
        let _ = monitor.observe(BOTH_SET);

        assert!(!monitor.observe(CLEAR).any());
        assert_eq!(monitor.state(), PowerKeyState::Armed);
    }

    #[test]
    fn armed_short_press_fires_exactly_short() {
        let mut monitor = PowerKeyMonitor::new();
        let _ = monitor.observe(CLEAR);

        let events = monitor.observe(PowerKeyLatch {
            short_press: true,
            long_press: false,
        });
        assert!(events.short_press);
        assert!(!events.long_press);
    }

    #[test]
    fn armed_both_bits_fire_both() {
        let mut monitor = PowerKeyMonitor::new();
        let _ = monitor.observe(CLEAR);

        let events = monitor.observe(BOTH_SET);
        assert!(events.long_press);
        assert!(events.short_press);
        assert_eq!(monitor.state(), PowerKeyState::Armed);
    }

    #[test]
    fn armed_is_terminal_even_after_idle_ticks() {
        let mut monitor = PowerKeyMonitor::new();
        let _ = monitor.observe(CLEAR);

        for _ in 0..3 {
            assert!(!monitor.observe(CLEAR).any());
        }
        assert_eq!(monitor.state(), PowerKeyState::Armed);
    }
}
