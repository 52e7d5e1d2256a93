//! Monotonic time source for timed windows.

/// Free-running microsecond clock.
///
/// Must never go backwards. On the RP2040 this is the 64-bit `TIMER`
/// peripheral.
pub trait Monotonic {
    /// Microseconds since an arbitrary fixed origin
    fn now_us(&self) -> u64;
}
