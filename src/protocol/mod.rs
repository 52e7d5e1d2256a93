//! ST7789V command/register protocol.
//!
//! - [`command`]: the level-1 command catalogue
//! - [`registers`]: bit-packed parameter and response registers
//!
//! The driver-side operations that put these on the wire live on
//! [`St7789v`](crate::St7789v).

pub mod command;
pub mod registers;

pub use command::Command;
pub use registers::{
    ColorEnhancement, ContentAdaptiveMode, CtrlDisplay, DisplayOrientation, DisplayStatus,
    EnhancementLevel, GammaCurve, ImageMode, InterfacePixelFormat, MemoryDataAccessControl,
    PixelFormat, PowerMode, RgbInterfaceFormat, SelfDiagnostic, SignalMode, TearingEffectMode,
};
