//! Error types for the ST7789V driver
//!
//! Every public operation returns [`Result`]. The variants mirror what can go
//! wrong on a shared serial link:
//! - the link was never brought up ([`Error::NotConnected`])
//! - something else currently owns the bus or the controller ([`Error::Busy`])
//! - a parameter is outside the controller's documented bounds
//!   ([`Error::OutOfRange`])
//!
//! Retry policy is left to the caller; the driver never queues.

use embedded_hal::digital;
use embedded_hal::spi;

/// Driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Link not brought up, or the identity check failed
    NotConnected,
    /// A DMA transfer is in flight, a reset or sleep window is open, or a
    /// bus lock stayed contended past the configured spin limit
    Busy,
    /// No DMA channel could be claimed at init
    NoResourceAvailable,
    /// Address, scroll or scanline parameter outside the controller's bounds
    OutOfRange,
    /// Operation not valid in the current controller mode
    Unavailable,
    /// Empty DMA buffer
    InvalidLength,
    /// The serial peripheral reported an error
    Bus,
    /// A chip-select, data/command or clock pin reported an error
    Pin,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::NotConnected => "display not connected",
            Error::Busy => "display busy",
            Error::NoResourceAvailable => "no DMA channel available",
            Error::OutOfRange => "parameter out of range",
            Error::Unavailable => "unavailable in current mode",
            Error::InvalidLength => "invalid buffer length",
            Error::Bus => "serial bus error",
            Error::Pin => "GPIO error",
        }
    }

    /// Whether retrying the same call later can succeed without any other
    /// change
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Error::Busy)
    }
}

impl From<spi::ErrorKind> for Error {
    fn from(_: spi::ErrorKind) -> Self {
        Error::Bus
    }
}

impl From<digital::ErrorKind> for Error {
    fn from(_: digital::ErrorKind) -> Self {
        Error::Pin
    }
}

/// Map a serial peripheral error
#[inline]
pub(crate) fn bus_error<E: spi::Error>(e: E) -> Error {
    e.kind().into()
}

/// Map a pin error
#[inline]
pub(crate) fn pin_error<E: digital::Error>(e: E) -> Error {
    e.kind().into()
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Unit Tests
// =============================================================================
