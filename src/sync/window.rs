//! Timed exclusion windows.
//!
//! A window models a controller-internal transition (software reset, sleep
//! in, sleep out) that must not be disturbed for a fixed settling time. It is
//! armed with two deadlines on a monotonic microsecond clock and closes on its
//! own once the clock passes them; nothing ever has to "release" it.

/// Settling times for one kind of transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowTiming {
    /// Time after which the controller accepts commands again (µs)
    pub short_us: u32,
    /// Time after which the controller accepts the opposite transition (µs)
    pub long_us: u32,
}

impl WindowTiming {
    /// Create a timing pair
    pub const fn new(short_us: u32, long_us: u32) -> Self {
        Self { short_us, long_us }
    }
}

/// Observable phase of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowState {
    /// No transition in progress
    #[default]
    Idle,
    /// Inside the short delay (includes the moment the command is issued)
    PendingShort,
    /// Short delay elapsed, long delay still running
    PendingLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Claimed by an initiator that is still sending the command
    Issuing,
    Armed {
        short_deadline: u64,
        long_deadline: u64,
    },
}

/// Deadline pair for one transition kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedWindow {
    phase: Phase,
}

impl TimedWindow {
    /// Create an idle window (const, suitable for static initialization)
    pub const fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    /// Phase at time `now_us`
    pub fn state(&self, now_us: u64) -> WindowState {
        match self.phase {
            Phase::Idle => WindowState::Idle,
            Phase::Issuing => WindowState::PendingShort,
            Phase::Armed {
                short_deadline,
                long_deadline,
            } => {
                if now_us < short_deadline {
                    WindowState::PendingShort
                } else if now_us < long_deadline {
                    WindowState::PendingLong
                } else {
                    WindowState::Idle
                }
            }
        }
    }

    /// Whether either deadline is still pending at `now_us`
    #[inline]
    pub fn is_busy(&self, now_us: u64) -> bool {
        self.state(now_us) != WindowState::Idle
    }

    /// Claim the window for a new transition.
    ///
    /// Returns `false` if a transition of this kind is still pending.
    pub fn try_claim(&mut self, now_us: u64) -> bool {
        if self.is_busy(now_us) {
            return false;
        }
        self.phase = Phase::Issuing;
        true
    }

    /// Start both delays, counted from `now_us`
    pub fn arm(&mut self, now_us: u64, timing: WindowTiming) {
        self.phase = Phase::Armed {
            short_deadline: now_us.saturating_add(u64::from(timing.short_us)),
            long_deadline: now_us.saturating_add(u64::from(timing.long_us)),
        };
    }

    /// Drop a claim whose command never reached the controller
    pub fn abandon(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Microseconds until the window is fully closed
    pub fn remaining_us(&self, now_us: u64) -> u64 {
        match self.phase {
            Phase::Idle | Phase::Issuing => 0,
            Phase::Armed { long_deadline, .. } => long_deadline.saturating_sub(now_us),
        }
    }
}

impl Default for TimedWindow {
    fn default() -> Self {
        Self::new()
    }
}
