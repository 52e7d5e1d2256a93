//! Core driver components for the ST7789V display controller.
//!
//! This module contains the building blocks for talking to the panel:
//!
//! - [`config`] - Clock rates, timing windows and lock bounds
//! - [`error`] - Error type and result alias
//! - [`St7789v`] - The driver itself: lifecycle, transaction framing,
//!   synchronous I/O, DMA writes with interrupt handoff, timed reset/sleep
//!   transitions and the command API
//!
//! # Example
//!
//! ```ignore
//! use st7789v::driver::{DisplayConfig, St7789v};
//!
//! static DISPLAY: St7789v<Board> = St7789v::new(
//!     DisplayConfig::new().with_write_baudrate(31_250_000),
//! );
//! ```

// Submodules
pub mod config;
pub mod error;

mod commands;
mod display;
mod dma;
mod transition;

// Re-exports for convenience
pub use config::{DisplayConfig, WindowTiming};
pub use display::St7789v;
pub use error::{Error, Result};
