//! Configuration types for the ST7789V driver

use crate::internal::constants::{
    DISPLAY_ID, INIT_BAUDRATE_HZ, READ_BAUDRATE_HZ, RESET_LONG_DELAY_US, RESET_SHORT_DELAY_US,
    SLEEP_LONG_DELAY_US, SLEEP_SHORT_DELAY_US, WRITE_BAUDRATE_HZ,
};

pub use crate::sync::window::WindowTiming;

/// Driver configuration
///
/// # Example
///
/// ```ignore
/// let config = DisplayConfig::new()
///     .with_write_baudrate(31_250_000)
///     .with_lock_spin_limit(Some(100_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Serial clock for writes and DMA transfers (Hz)
    pub write_baudrate_hz: u32,
    /// Serial clock for register reads (Hz)
    pub read_baudrate_hz: u32,
    /// Serial clock the peripheral is configured with at init (Hz)
    pub init_baudrate_hz: u32,
    /// RDDID value the bring-up handshake expects
    pub display_id: u32,
    /// Settling times after SWRESET
    pub reset_timing: WindowTiming,
    /// Settling times after SLPIN / SLPOUT
    pub sleep_timing: WindowTiming,
    /// Maximum spins on a contended bus lock before giving up with `Busy`.
    /// `None` waits indefinitely.
    pub lock_spin_limit: Option<u32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            write_baudrate_hz: WRITE_BAUDRATE_HZ,
            read_baudrate_hz: READ_BAUDRATE_HZ,
            init_baudrate_hz: INIT_BAUDRATE_HZ,
            display_id: DISPLAY_ID,
            reset_timing: WindowTiming::new(RESET_SHORT_DELAY_US, RESET_LONG_DELAY_US),
            sleep_timing: WindowTiming::new(SLEEP_SHORT_DELAY_US, SLEEP_LONG_DELAY_US),
            lock_spin_limit: None,
        }
    }

    /// Set the write clock
    #[must_use]
    pub const fn with_write_baudrate(mut self, hz: u32) -> Self {
        self.write_baudrate_hz = hz;
        self
    }

    /// Set the read clock
    #[must_use]
    pub const fn with_read_baudrate(mut self, hz: u32) -> Self {
        self.read_baudrate_hz = hz;
        self
    }

    /// Set the clock used while configuring the peripheral
    #[must_use]
    pub const fn with_init_baudrate(mut self, hz: u32) -> Self {
        self.init_baudrate_hz = hz;
        self
    }

    /// Set the expected display ID
    #[must_use]
    pub const fn with_display_id(mut self, id: u32) -> Self {
        self.display_id = id;
        self
    }

    /// Set the reset settling times
    #[must_use]
    pub const fn with_reset_timing(mut self, timing: WindowTiming) -> Self {
        self.reset_timing = timing;
        self
    }

    /// Set the sleep settling times
    #[must_use]
    pub const fn with_sleep_timing(mut self, timing: WindowTiming) -> Self {
        self.sleep_timing = timing;
        self
    }

    /// Bound how long a bus lock may be spun on
    #[must_use]
    pub const fn with_lock_spin_limit(mut self, limit: Option<u32>) -> Self {
        self.lock_spin_limit = limit;
        self
    }
}
