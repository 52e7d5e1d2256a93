//! Serial peripheral seam.
//!
//! The driver drives bytes through [`embedded_hal::spi::SpiBus`] and needs a
//! handful of extra controls that embedded-hal does not model: changing the
//! clock between transfers, and the register address and DREQ number a DMA
//! channel is paced against.

use embedded_hal::spi::{Mode, SpiBus};

/// SPI peripheral used as the display link.
///
/// `flush` from [`SpiBus`] must block until the peripheral is idle (shift
/// register empty, not just the FIFO).
pub trait SerialPort: SpiBus<u8> {
    /// Enable the peripheral with 8-bit frames, MSB first.
    fn configure(&mut self, baudrate_hz: u32, mode: Mode);

    /// Change the serial clock, returning the rate actually achieved.
    fn set_baudrate(&mut self, baudrate_hz: u32) -> u32;

    /// Read the data register once.
    ///
    /// Used after a DMA transfer to drain the receive side; the value is
    /// discarded.
    fn read_data_register(&mut self) -> u16;

    /// Address of the data register a DMA channel writes into.
    fn data_register_address(&self) -> *mut u8;

    /// DMA data request line paced by the transmit FIFO.
    fn tx_data_request(&self) -> u8;

    /// Disable the peripheral and return its pins to the default function.
    fn deconfigure(&mut self);
}
