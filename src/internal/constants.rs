//! Internal constants for the ST7789V driver.
//!
//! Timing values come from the ST7789V datasheet (v1.6, section 9) and the
//! bus rates from the RP2040 SPI block, which tops out at `clk_peri / 2`.

// =============================================================================
// Serial Bus Rates
// =============================================================================

/// Baud rate used for writes (62.5 MHz, the controller's write cycle limit)
pub const WRITE_BAUDRATE_HZ: u32 = 62_500_000;

/// Baud rate used for reads (150 ns read cycle minimum)
pub const READ_BAUDRATE_HZ: u32 = 6_666_666;

/// Baud rate the peripheral is configured with at bring-up
pub const INIT_BAUDRATE_HZ: u32 = 62_500_000;

/// Byte clocked out on MOSI while reading
pub const READ_FILL_BYTE: u8 = 0xFF;

// =============================================================================
// Identification
// =============================================================================

/// Value returned by RDDID (0x04) for an ST7789V
pub const DISPLAY_ID: u32 = 0x0085_8552;

// =============================================================================
// Panel Geometry
// =============================================================================

/// Panel width in pixels (MV = 0)
pub const PANEL_WIDTH: u16 = 240;

/// Panel height in pixels (MV = 0)
pub const PANEL_HEIGHT: u16 = 320;

/// Frame memory line count, the required sum of a vertical scroll definition
pub const FRAME_MEMORY_LINES: u16 = 320;

// =============================================================================
// Timed Transitions
// =============================================================================

/// After SWRESET, no command may be sent for 5 ms
pub const RESET_SHORT_DELAY_US: u32 = 5_000;

/// After SWRESET, SLPOUT may not be sent for 120 ms
pub const RESET_LONG_DELAY_US: u32 = 120_000;

/// After SLPIN/SLPOUT, no command may be sent for 5 ms
pub const SLEEP_SHORT_DELAY_US: u32 = 5_000;

/// After SLPIN/SLPOUT, the opposite sleep command may not be sent for 120 ms
pub const SLEEP_LONG_DELAY_US: u32 = 120_000;

/// Granularity of blocking waits on a timed window
pub const SETTLE_STEP_US: u32 = 100;
