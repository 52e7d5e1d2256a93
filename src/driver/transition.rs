//! Software reset and sleep transitions.
//!
//! Each transition opens a [`TimedWindow`] after its command is sent. While
//! the window is open the advisory predicates report busy and every command
//! is refused; the window closes on its own once the monotonic clock passes
//! its deadlines.

use super::display::St7789v;
use super::error::{Error, Result};
use crate::hal::Hardware;
use crate::protocol::{Command, DisplayOrientation};
use crate::sync::{CriticalSectionCell, TimedWindow, WindowTiming};

impl<H: Hardware> St7789v<H> {
    /// Send SWRESET and open the reset window.
    ///
    /// With `sync_delay`, blocks until the window has fully closed.
    pub fn software_reset(&self, sync_delay: bool) -> Result<()> {
        self.transition(
            &self.reset_window,
            self.config.reset_timing,
            Command::SoftwareReset,
            sync_delay,
        )
    }

    /// Send SLPIN and open the sleep window.
    ///
    /// With `sync_delay`, blocks until the window has fully closed.
    pub fn sleep_in(&self, sync_delay: bool) -> Result<()> {
        self.transition(
            &self.sleep_window,
            self.config.sleep_timing,
            Command::SleepIn,
            sync_delay,
        )
    }

    /// Send SLPOUT and open the sleep window.
    ///
    /// With `sync_delay`, blocks until the window has fully closed.
    pub fn sleep_out(&self, sync_delay: bool) -> Result<()> {
        self.transition(
            &self.sleep_window,
            self.config.sleep_timing,
            Command::SleepOut,
            sync_delay,
        )
    }

    fn transition(
        &self,
        window: &CriticalSectionCell<TimedWindow>,
        timing: WindowTiming,
        command: Command,
        sync_delay: bool,
    ) -> Result<()> {
        self.ensure_ready()?;

        let now = self.now_us();
        if !window.with(|w| w.try_claim(now)) {
            return Err(Error::Busy);
        }

        if let Err(e) = self.issue(command, &[]) {
            window.with(TimedWindow::abandon);
            return Err(e);
        }

        let sent_at = self.now_us();
        window.with(|w| w.arm(sent_at, timing));

        // SWRESET clears MADCTL on the controller
        if command == Command::SoftwareReset {
            self.orientation.set(DisplayOrientation::portrait());
        }

        if sync_delay {
            self.settle(window);
        }
        Ok(())
    }
}
