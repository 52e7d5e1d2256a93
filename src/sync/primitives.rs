//! Cells shared by the caller context and the DMA completion interrupt.
//!
//! Every access runs inside `critical_section::with`, so closures passed in
//! here must stay short: no spinning, no waiting on hardware.

use core::cell::RefCell;
#[cfg(feature = "async")]
use core::task::Waker;
use critical_section::Mutex;

/// A value guarded by the global critical section.
///
/// The closure given to [`with`](Self::with) or [`with_ref`](Self::with_ref)
/// must not touch the same cell again; the inner `RefCell` panics on
/// re-entry.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Wrap `value`. Usable in a `static` initializer.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Mutate the value in place and return what `f` returns.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Inspect the value.
    #[inline]
    pub fn with_ref<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        critical_section::with(|cs| f(&self.inner.borrow_ref(cs)))
    }

    /// Swap in `value` and hand back the previous one.
    #[inline]
    pub fn replace(&self, value: T) -> T {
        critical_section::with(|cs| self.inner.replace(cs, value))
    }
}

impl<T: Copy> CriticalSectionCell<T> {
    /// Current value
    #[inline]
    pub fn get(&self) -> T {
        self.with_ref(|value| *value)
    }

    /// Overwrite the value.
    #[inline]
    pub fn set(&self, value: T) {
        self.replace(value);
    }
}

// SAFETY: all access is serialized by the critical section, and `T: Send`
// lets the value move between the caller context and the interrupt.
unsafe impl<T: Send> Sync for CriticalSectionCell<T> {}

/// Slot for the task waiting on DMA completion.
///
/// The waiting future registers itself; the interrupt takes the waker out and
/// wakes it.
#[cfg(feature = "async")]
pub struct AtomicWaker {
    waker: CriticalSectionCell<Option<Waker>>,
}

#[cfg(feature = "async")]
impl AtomicWaker {
    /// Empty slot. Usable in a `static` initializer.
    pub const fn new() -> Self {
        Self {
            waker: CriticalSectionCell::new(None),
        }
    }

    /// Store `waker`, replacing any waker for a different task.
    pub fn register(&self, waker: &Waker) {
        self.waker.with(|slot| {
            if !slot.as_ref().is_some_and(|stored| stored.will_wake(waker)) {
                *slot = Some(waker.clone());
            }
        });
    }

    /// Wake and forget the stored waker.
    #[inline]
    pub fn wake(&self) {
        if let Some(waker) = self.waker.with(Option::take) {
            waker.wake();
        }
    }

    /// Whether a task is waiting
    pub fn is_registered(&self) -> bool {
        self.waker.with_ref(Option::is_some)
    }
}

#[cfg(feature = "async")]
impl Default for AtomicWaker {
    fn default() -> Self {
        Self::new()
    }
}
