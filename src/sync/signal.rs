//! Completion notification handed to a DMA write.
//!
//! The caller keeps a `static` signal and passes `&'static` to
//! [`St7789v::dma_write`](crate::St7789v::dma_write). The completion interrupt
//! signals it once the transfer has finished and the bus has been released.

use core::cell::Cell;

use critical_section::Mutex;

#[cfg(feature = "async")]
use super::primitives::AtomicWaker;

/// One-shot completion flag, settable from interrupt context.
///
/// # Example
///
/// ```ignore
/// static FRAME_DONE: CompletionSignal = CompletionSignal::new();
///
/// DISPLAY.memory_write_async(&FRAME, Some(&FRAME_DONE))?;
/// // ... other work ...
/// FRAME_DONE.wait();
/// ```
pub struct CompletionSignal {
    signaled: Mutex<Cell<bool>>,
    #[cfg(feature = "async")]
    waker: AtomicWaker,
}

impl CompletionSignal {
    /// Create an unsignaled signal (const, suitable for static initialization)
    pub const fn new() -> Self {
        Self {
            signaled: Mutex::new(Cell::new(false)),
            #[cfg(feature = "async")]
            waker: AtomicWaker::new(),
        }
    }

    /// Mark the signal as fired and wake any async waiter
    pub fn signal(&self) {
        critical_section::with(|cs| self.signaled.borrow(cs).set(true));
        #[cfg(feature = "async")]
        self.waker.wake();
    }

    /// Whether the signal has fired since the last reset
    pub fn is_signaled(&self) -> bool {
        critical_section::with(|cs| self.signaled.borrow(cs).get())
    }

    /// Clear the signal
    pub fn reset(&self) {
        critical_section::with(|cs| self.signaled.borrow(cs).set(false));
    }

    /// Clear the signal, returning whether it had fired
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.signaled.borrow(cs).replace(false))
    }

    /// Spin until signaled, then clear it
    pub fn wait(&self) {
        while !self.take() {
            core::hint::spin_loop();
        }
    }

    /// Wait asynchronously until signaled, then clear it
    #[cfg(feature = "async")]
    pub async fn wait_async(&self) {
        use core::future::poll_fn;
        use core::task::Poll;

        poll_fn(|cx| {
            if self.take() {
                return Poll::Ready(());
            }
            self.waker.register(cx.waker());
            if self.take() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await;
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}
