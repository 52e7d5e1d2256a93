//! Binary bus lock.
//!
//! Used for both "transaction open" (chip-select asserted) and "bus driving
//! bytes". A lock acquired in the caller context may be released from the
//! completion interrupt, which is how a DMA transfer hands its hold over.
//!
//! Cortex-M0+ has no compare-and-swap, so the flag lives behind a critical
//! section rather than in an `AtomicBool`.

use core::cell::Cell;

use critical_section::Mutex;

use crate::driver::error::{Error, Result};

/// Binary lock usable from the caller context and interrupt handlers.
pub struct BusLock {
    held: Mutex<Cell<bool>>,
}

impl BusLock {
    /// Create an unheld lock (const, suitable for static initialization)
    pub const fn new() -> Self {
        Self {
            held: Mutex::new(Cell::new(false)),
        }
    }

    /// Take the lock if it is free. Never blocks.
    pub fn try_acquire(&self) -> bool {
        critical_section::with(|cs| {
            let held = self.held.borrow(cs);
            if held.get() {
                false
            } else {
                held.set(true);
                true
            }
        })
    }

    /// Spin until the lock is taken.
    ///
    /// With `spin_limit` set, gives up with [`Error::Busy`] after that many
    /// failed attempts. Interrupts stay enabled between attempts, so an
    /// interrupt-side release is always observed.
    pub fn acquire(&self, spin_limit: Option<u32>) -> Result<()> {
        let mut spins: u32 = 0;
        loop {
            if self.try_acquire() {
                return Ok(());
            }
            if spin_limit.is_some_and(|limit| spins >= limit) {
                return Err(Error::Busy);
            }
            spins = spins.saturating_add(1);
            core::hint::spin_loop();
        }
    }

    /// Release the lock. Releasing an unheld lock is a no-op.
    pub fn release(&self) {
        critical_section::with(|cs| self.held.borrow(cs).set(false));
    }

    /// Whether the lock is currently held
    pub fn is_held(&self) -> bool {
        critical_section::with(|cs| self.held.borrow(cs).get())
    }
}

impl Default for BusLock {
    fn default() -> Self {
        Self::new()
    }
}
