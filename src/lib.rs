//! ST7789V Display Driver
//!
//! A `no_std`, `no_alloc` driver for the Sitronix ST7789V TFT controller over a
//! 4-wire serial interface (SCK, MOSI, MISO, chip-select, data/command).
//!
//! Small transfers (commands, parameters, register reads) are synchronous.
//! Bulk pixel data is streamed by DMA: the write returns immediately and the
//! DMA completion interrupt finishes the transaction.
//!
//! # Architecture
//!
//! The driver is organized into four layers:
//!
//! 1. **Driver** ([`driver`]): [`St7789v`] with lifecycle, transaction framing,
//!    DMA handoff, timed reset/sleep windows and the command API
//! 2. **Protocol** ([`protocol`]): command opcodes and typed register values
//! 3. **Sync** ([`sync`]): ISR-safe cells, the bus lock, completion signals
//!    and timed windows
//! 4. **HAL** ([`hal`]): traits the target HAL implements for the serial
//!    peripheral, DMA engine, SCK pin muxing and monotonic time
//!
//! # Concurrency Model
//!
//! [`St7789v`] is built with a `const fn` and every method takes `&self`, so
//! it lives in a `static` shared by thread mode and the DMA interrupt. All
//! state sits behind `critical-section`.
//!
//! Operations never queue. If a DMA transfer is pending, or a reset or sleep
//! window is still open, they fail immediately with [`Error::Busy`]. Only the
//! bus lock itself blocks, and only for the length of a synchronous transfer.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and log output
//! - `async`: Enable async waiting on DMA completion
//!
//! # Example
//!
//! ```ignore
//! use st7789v::{DisplayConfig, InterfacePixelFormat, St7789v};
//!
//! static DISPLAY: St7789v<Board> = St7789v::new(DisplayConfig::new());
//! static FRAME: [u16; 240 * 320] = [0xF800; 240 * 320];
//!
//! #[interrupt]
//! fn DMA_IRQ_0() {
//!     DISPLAY.on_dma_interrupt();
//! }
//!
//! DISPLAY.init(peripherals)?;
//! DISPLAY.sleep_out(true)?;
//! DISPLAY.set_interface_pixel_format(InterfacePixelFormat::RGB565)?;
//! DISPLAY.display(true)?;
//!
//! DISPLAY.set_column_address(0, 239)?;
//! DISPLAY.set_row_address(0, 319)?;
//! DISPLAY.memory_write_async(&FRAME, None)?;
//! DISPLAY.wait_for_dma_completion()?;
//! ```

#![no_std]
#![warn(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod boards;
pub mod driver;
pub mod hal;
pub mod protocol;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{DisplayConfig, WindowTiming};
pub use driver::error::{Error, Result};
pub use driver::St7789v;

pub use hal::{Hardware, Peripherals};

// Re-export protocol types
pub use protocol::{
    ColorEnhancement, Command, ContentAdaptiveMode, CtrlDisplay, DisplayOrientation,
    DisplayStatus, EnhancementLevel, GammaCurve, ImageMode, InterfacePixelFormat,
    MemoryDataAccessControl, PixelFormat, PowerMode, RgbInterfaceFormat, SelfDiagnostic,
    SignalMode, TearingEffectMode,
};

pub use sync::{CompletionSignal, WindowState};

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        // Identification
        DISPLAY_ID,
        // Geometry
        FRAME_MEMORY_LINES,
        // Clocks
        INIT_BAUDRATE_HZ,
        PANEL_HEIGHT,
        PANEL_WIDTH,
        READ_BAUDRATE_HZ,
        // Timing
        RESET_LONG_DELAY_US,
        RESET_SHORT_DELAY_US,
        SLEEP_LONG_DELAY_US,
        SLEEP_SHORT_DELAY_US,
        WRITE_BAUDRATE_HZ,
    };
}
