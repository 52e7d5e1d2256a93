//! Hardware Abstraction Layer
//!
//! Traits the driver needs from the board. Where embedded-hal already has an
//! abstraction it is used directly; the rest are small traits here.
//!
//! # Modules
//!
//! - [`serial`]: SPI peripheral with clock and DMA pacing controls
//! - [`dma`]: DMA controller and channel
//! - [`gpio`]: SCK pin function switching
//! - [`clock`]: monotonic microsecond clock
//!
//! # Delay Integration
//!
//! Blocking waits use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL (e.g., `rp2040_hal::Timer`).

pub mod clock;
pub mod dma;
pub mod gpio;
pub mod serial;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

pub use clock::Monotonic;
pub use dma::{DmaChannel, DmaController, DmaWord, TransferWidth, WriteTransfer};
pub use gpio::ClockLine;
pub use serial::SerialPort;

/// Board-level bundle of peripheral types.
///
/// Implement this on a marker type to name the concrete HAL types once:
///
/// ```ignore
/// struct Board;
///
/// impl Hardware for Board {
///     type Serial = PicoSpi;
///     type Dma = PicoDma;
///     type ChipSelect = Pin<Gpio17, FunctionSioOutput, PullNone>;
///     type DataCommand = Pin<Gpio20, FunctionSioOutput, PullNone>;
///     type Clock = PicoSck;
///     type Time = PicoTimer;
///     type Delay = PicoTimer;
/// }
/// ```
pub trait Hardware {
    /// SPI peripheral
    type Serial: SerialPort;
    /// DMA controller
    type Dma: DmaController;
    /// Chip-select pin (active low)
    type ChipSelect: OutputPin;
    /// Data/command pin (low = command)
    type DataCommand: OutputPin;
    /// SCK pin
    type Clock: ClockLine;
    /// Monotonic clock
    type Time: Monotonic;
    /// Blocking delay
    type Delay: DelayNs;
}

/// Claimed channel type of a [`Hardware`] bundle
pub type ChannelOf<H> = <<H as Hardware>::Dma as DmaController>::Channel;

/// Owned peripherals handed to [`St7789v::init`](crate::St7789v::init) and
/// returned by [`St7789v::deinit`](crate::St7789v::deinit).
pub struct Peripherals<H: Hardware> {
    /// SPI peripheral
    pub serial: H::Serial,
    /// DMA controller
    pub dma: H::Dma,
    /// Chip-select pin
    pub cs: H::ChipSelect,
    /// Data/command pin
    pub dc: H::DataCommand,
    /// SCK pin
    pub sck: H::Clock,
    /// Monotonic clock
    pub time: H::Time,
    /// Blocking delay
    pub delay: H::Delay,
}
