//! GPIO seams.
//!
//! Chip-select and data/command are plain
//! [`OutputPin`](embedded_hal::digital::OutputPin)s. The clock line needs one
//! extra ability: for the read turnaround, the driver takes SCK away from the
//! serial peripheral, pulses it once by hand, and gives it back.

use embedded_hal::digital::OutputPin;

/// SCK pin that can be switched between the serial peripheral and GPIO.
///
/// While in GPIO mode the [`OutputPin`] methods drive the line directly.
pub trait ClockLine: OutputPin {
    /// Detach the pin from the serial peripheral and make it a GPIO output
    fn select_gpio(&mut self);

    /// Hand the pin back to the serial peripheral
    fn select_peripheral(&mut self);
}
