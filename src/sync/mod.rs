//! Synchronization and Concurrency Support
//!
//! Primitives shared between the caller context and the DMA completion
//! interrupt:
//!
//! - [`CriticalSectionCell`] - ISR-safe interior mutability
//! - [`BusLock`] - binary lock that one context may take and another release
//! - [`CompletionSignal`] - one-shot notification signalled by the interrupt
//! - [`TimedWindow`] - deadline-based exclusion for reset and sleep
//! - [`AtomicWaker`] - async waker storage (`async` feature)
//!
//! # Example
//!
//! ```ignore
//! static DISPLAY: St7789v<Board> = St7789v::new(DisplayConfig::new());
//! static DONE: CompletionSignal = CompletionSignal::new();
//!
//! #[interrupt]
//! fn DMA_IRQ_0() {
//!     DISPLAY.on_dma_interrupt();
//! }
//! ```

pub mod lock;
pub mod primitives;
pub mod signal;
pub mod window;

pub use lock::BusLock;
#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
pub use primitives::CriticalSectionCell;
pub use signal::CompletionSignal;
pub use window::{TimedWindow, WindowState, WindowTiming};
