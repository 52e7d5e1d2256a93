//! Raspberry Pi Pico wiring (RP2040 + ST7789V on SPI0).
//!
//! Constants for the reference wiring used during bring-up. Pass them to the
//! HAL when building the [`Peripherals`](crate::hal::Peripherals) bundle.

use crate::driver::DisplayConfig;
use crate::internal::constants::WRITE_BAUDRATE_HZ;

/// Raspberry Pi Pico SPI0 wiring constants and helpers.
pub struct PicoSpi0;

impl PicoSpi0 {
    // =========================================================================
    // SPI Pins
    // =========================================================================

    /// SPI0 RX (controller in). Only used for register reads.
    pub const MISO_GPIO: u8 = 16;

    /// Chip-select, driven as a plain GPIO output.
    pub const CS_GPIO: u8 = 17;

    /// SPI0 SCK. Switched to GPIO briefly for the read turnaround clock.
    pub const SCK_GPIO: u8 = 18;

    /// SPI0 TX (controller out).
    pub const MOSI_GPIO: u8 = 19;

    /// Data/command select, driven as a plain GPIO output.
    pub const DC_GPIO: u8 = 20;

    // =========================================================================
    // Peripheral
    // =========================================================================

    /// SPI block index (SPI0).
    pub const SPI_INDEX: u8 = 0;

    /// Serial clock the peripheral is brought up at (Hz).
    pub const BAUDRATE_HZ: u32 = WRITE_BAUDRATE_HZ;

    // =========================================================================
    // Board Identification
    // =========================================================================

    /// Board name.
    pub const BOARD_NAME: &'static str = "Raspberry Pi Pico";

    /// Microcontroller on board.
    pub const MCU: &'static str = "RP2040";

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Pins in (MISO, CS, SCK, MOSI, DC) order.
    #[must_use]
    pub const fn pins() -> [u8; 5] {
        [
            Self::MISO_GPIO,
            Self::CS_GPIO,
            Self::SCK_GPIO,
            Self::MOSI_GPIO,
            Self::DC_GPIO,
        ]
    }

    /// Driver configuration for this wiring.
    #[must_use]
    pub const fn display_config() -> DisplayConfig {
        DisplayConfig::new()
            .with_init_baudrate(Self::BAUDRATE_HZ)
            .with_write_baudrate(Self::BAUDRATE_HZ)
    }

    /// Get a human-readable description of the board.
    #[must_use]
    pub const fn description() -> &'static str {
        "Raspberry Pi Pico: RP2040 + ST7789V (SPI0, GPIO16-20, 62.5 MHz)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_assignments_match_board() {
        assert_eq!(PicoSpi0::MISO_GPIO, 16);
        assert_eq!(PicoSpi0::CS_GPIO, 17);
        assert_eq!(PicoSpi0::SCK_GPIO, 18);
        assert_eq!(PicoSpi0::MOSI_GPIO, 19);
        assert_eq!(PicoSpi0::DC_GPIO, 20);
        assert_eq!(PicoSpi0::SPI_INDEX, 0);
    }

    #[test]
    fn pins_are_distinct() {
        let pins = PicoSpi0::pins();
        for (i, a) in pins.iter().enumerate() {
            for b in &pins[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_config_runs_bus_at_board_rate() {
        let config = PicoSpi0::display_config();
        assert_eq!(config.write_baudrate_hz, 62_500_000);
        assert_eq!(config.init_baudrate_hz, 62_500_000);
        assert_eq!(config.display_id, DisplayConfig::new().display_id);
    }
}
