//! ST7789V driver core.
//!
//! Holds all link state behind critical sections so a single `static`
//! instance can be used from the caller context and the DMA completion
//! interrupt. This file covers lifecycle, transaction framing, raw
//! synchronous I/O and the advisory busy predicates; DMA, timed transitions
//! and the command API are in sibling modules.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{MODE_0, SpiBus};

use super::config::DisplayConfig;
use super::error::{Error, Result, bus_error, pin_error};
use crate::hal::{
    ChannelOf, ClockLine, DmaChannel, DmaController, Hardware, Monotonic, Peripherals, SerialPort,
};
use crate::internal::constants::{READ_FILL_BYTE, SETTLE_STEP_US};
use crate::protocol::{Command, DisplayOrientation};
#[cfg(feature = "async")]
use crate::sync::AtomicWaker;
use crate::sync::{BusLock, CompletionSignal, CriticalSectionCell, TimedWindow, WindowState};

// =============================================================================
// Internal State
// =============================================================================

/// Peripherals owned while the driver is initialized.
///
/// `serial` and `sck` are lent out of the cell while blocking I/O runs, so
/// the critical section is never held across a transfer.
pub(super) struct Link<H: Hardware> {
    pub(super) serial: Option<H::Serial>,
    pub(super) dma: H::Dma,
    pub(super) channel: Option<ChannelOf<H>>,
    pub(super) cs: H::ChipSelect,
    pub(super) dc: H::DataCommand,
    pub(super) sck: Option<H::Clock>,
    pub(super) time: H::Time,
}

impl<H: Hardware> Link<H> {
    pub(super) fn serial_slot(&mut self) -> &mut Option<H::Serial> {
        &mut self.serial
    }

    fn sck_slot(&mut self) -> &mut Option<H::Clock> {
        &mut self.sck
    }
}

/// Bookkeeping for the DMA transfer currently owned by the interrupt.
#[derive(Clone, Copy)]
pub(super) struct TransferState {
    pub(super) pending: bool,
    pub(super) close_on_finish: bool,
    pub(super) notify: Option<&'static CompletionSignal>,
}

impl TransferState {
    pub(super) const fn idle() -> Self {
        Self {
            pending: false,
            close_on_finish: false,
            notify: None,
        }
    }
}

// =============================================================================
// Driver
// =============================================================================

/// ST7789V display driver.
///
/// Every method takes `&self`; place the driver in a `static` and call
/// [`on_dma_interrupt`](Self::on_dma_interrupt) from the DMA IRQ handler.
///
/// Two locks arbitrate the bus:
/// - the *communication* lock is held while chip-select is asserted
/// - the *busy* lock is held while bytes are moving, and is handed to the
///   interrupt for the duration of a DMA write
///
/// Every public operation first checks that the link is up, then fails fast
/// with [`Error::Busy`] if a DMA transfer is pending or a reset/sleep window
/// is open. Nothing is queued.
///
/// # Example
///
/// ```ignore
/// static DISPLAY: St7789v<Board> = St7789v::new(DisplayConfig::new());
///
/// DISPLAY.init(peripherals)?;
/// DISPLAY.sleep_out(true)?;
/// DISPLAY.set_interface_pixel_format(InterfacePixelFormat::RGB565)?;
/// DISPLAY.display(true)?;
/// ```
pub struct St7789v<H: Hardware> {
    pub(super) config: DisplayConfig,
    pub(super) link: CriticalSectionCell<Option<Link<H>>>,
    pub(super) delay: CriticalSectionCell<Option<H::Delay>>,
    pub(super) plugged: CriticalSectionCell<bool>,
    /// Chip-select asserted
    pub(super) comm: BusLock,
    /// Bus moving bytes
    pub(super) busy: BusLock,
    pub(super) transfer: CriticalSectionCell<TransferState>,
    pub(super) reset_window: CriticalSectionCell<TimedWindow>,
    pub(super) sleep_window: CriticalSectionCell<TimedWindow>,
    pub(super) orientation: CriticalSectionCell<DisplayOrientation>,
    #[cfg(feature = "async")]
    pub(super) dma_waker: AtomicWaker,
}

impl<H: Hardware> St7789v<H> {
    /// Create an uninitialized driver (const, suitable for static initialization)
    pub const fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            link: CriticalSectionCell::new(None),
            delay: CriticalSectionCell::new(None),
            plugged: CriticalSectionCell::new(false),
            comm: BusLock::new(),
            busy: BusLock::new(),
            transfer: CriticalSectionCell::new(TransferState::idle()),
            reset_window: CriticalSectionCell::new(TimedWindow::new()),
            sleep_window: CriticalSectionCell::new(TimedWindow::new()),
            orientation: CriticalSectionCell::new(DisplayOrientation::portrait()),
            #[cfg(feature = "async")]
            dma_waker: AtomicWaker::new(),
        }
    }

    /// Driver configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Bring the link up.
    ///
    /// Claims a DMA channel, configures the serial peripheral and pins, then
    /// performs a synchronous software reset and checks the display ID.
    ///
    /// - No free DMA channel: returns [`Error::NoResourceAvailable`] without
    ///   touching any peripheral. The peripherals are kept and can be taken
    ///   back with [`deinit`](Self::deinit).
    /// - ID mismatch: returns [`Error::NotConnected`] and stays unplugged.
    ///
    /// Calling `init` again replaces (and drops) previously handed over
    /// peripherals.
    pub fn init(&self, peripherals: Peripherals<H>) -> Result<()> {
        if self.link.with_ref(Option::is_some) {
            drop(self.deinit());
        }

        let Peripherals {
            serial,
            mut dma,
            cs,
            dc,
            sck,
            time,
            delay,
        } = peripherals;

        let channel = dma.claim_unused_channel();
        let claimed = channel.is_some();
        self.delay.replace(Some(delay));
        self.link.replace(Some(Link {
            serial: Some(serial),
            dma,
            channel,
            cs,
            dc,
            sck: Some(sck),
            time,
        }));

        if !claimed {
            #[cfg(feature = "defmt")]
            defmt::error!("no DMA channel available");
            return Err(Error::NoResourceAvailable);
        }

        let init_baudrate = self.config.init_baudrate_hz;
        self.with_link(|link| {
            if let Some(serial) = link.serial.as_mut() {
                serial.configure(init_baudrate, MODE_0);
            }
            link.cs.set_high().map_err(pin_error)?;
            link.dc.set_high().map_err(pin_error)?;
            if let Some(sck) = link.sck.as_mut() {
                sck.select_peripheral();
            }
            if let Some(channel) = link.channel.as_mut() {
                channel.set_interrupt_enabled(true);
                #[cfg(feature = "defmt")]
                defmt::debug!("claimed DMA channel {}", channel.id());
            }
            Ok(())
        })?;

        self.plugged.set(true);

        let id = match self
            .software_reset(true)
            .and_then(|()| self.read_display_id())
        {
            Ok(id) => id,
            Err(e) => {
                self.plugged.set(false);
                return Err(e);
            }
        };

        if id != self.config.display_id {
            #[cfg(feature = "defmt")]
            defmt::error!(
                "unexpected display id {=u32:#x}, expected {=u32:#x}",
                id,
                self.config.display_id
            );
            self.plugged.set(false);
            return Err(Error::NotConnected);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("display connected, id {=u32:#x}", id);

        // Refreshes the orientation cache
        let status = self
            .read_memory_data_access_control()
            .and_then(|_| self.read_display_status());
        match status {
            Ok(_status) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("display status {}", _status);
                Ok(())
            }
            Err(e) => {
                self.plugged.set(false);
                Err(e)
            }
        }
    }

    /// Tear the link down and return the peripherals.
    ///
    /// Disables the channel interrupt, aborts and releases the channel, and
    /// deconfigures the serial peripheral. Always succeeds; returns `None` if
    /// [`init`](Self::init) was never called.
    pub fn deinit(&self) -> Option<Peripherals<H>> {
        self.plugged.set(false);

        let link = self.link.with(Option::take);
        let delay = self.delay.with(Option::take);

        self.transfer.set(TransferState::idle());
        self.reset_window.set(TimedWindow::new());
        self.sleep_window.set(TimedWindow::new());
        self.orientation.set(DisplayOrientation::portrait());
        self.busy.release();
        self.comm.release();

        let Link {
            serial,
            mut dma,
            channel,
            cs,
            dc,
            sck,
            time,
        } = link?;

        if let Some(mut channel) = channel {
            channel.set_interrupt_enabled(false);
            channel.cleanup();
            dma.unclaim(channel);
        }
        let mut serial = serial?;
        serial.deconfigure();

        Some(Peripherals {
            serial,
            dma,
            cs,
            dc,
            sck: sck?,
            time,
            delay: delay?,
        })
    }

    // =========================================================================
    // Advisory Predicates
    // =========================================================================

    /// Whether the bring-up handshake succeeded
    pub fn is_plugged(&self) -> bool {
        self.plugged.get()
    }

    /// Whether a DMA transfer is in flight
    pub fn dma_busy(&self) -> bool {
        self.transfer.with_ref(|t| t.pending)
    }

    /// Whether a software reset window is open
    pub fn reset_busy(&self) -> bool {
        let now = self.now_us();
        self.reset_window.with_ref(|w| w.is_busy(now))
    }

    /// Whether a sleep-in/sleep-out window is open
    pub fn sleep_busy(&self) -> bool {
        let now = self.now_us();
        self.sleep_window.with_ref(|w| w.is_busy(now))
    }

    /// Current phase of the reset window
    pub fn reset_state(&self) -> WindowState {
        let now = self.now_us();
        self.reset_window.with_ref(|w| w.state(now))
    }

    /// Current phase of the sleep window
    pub fn sleep_state(&self) -> WindowState {
        let now = self.now_us();
        self.sleep_window.with_ref(|w| w.state(now))
    }

    /// Orientation cached from the last MADCTL read or write
    pub fn orientation(&self) -> DisplayOrientation {
        self.orientation.get()
    }

    pub(super) fn ensure_connected(&self) -> Result<()> {
        if self.is_plugged() {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    /// Link up and nothing in the way.
    pub(super) fn ensure_ready(&self) -> Result<()> {
        self.ensure_connected()?;
        if self.dma_busy() || self.reset_busy() || self.sleep_busy() {
            return Err(Error::Busy);
        }
        Ok(())
    }

    // =========================================================================
    // Transaction Framing
    // =========================================================================

    /// Assert chip-select, blocking until no other transaction is open.
    ///
    /// Refused with [`Error::Busy`] while a DMA transfer is pending or a
    /// reset/sleep window is open. The framing calls that follow only need
    /// the link to be up.
    pub fn begin_transaction(&self) -> Result<()> {
        self.ensure_ready()?;
        self.open_transaction()
    }

    /// Assert chip-select. No advisory checks.
    pub(super) fn open_transaction(&self) -> Result<()> {
        self.ensure_connected()?;
        self.comm.acquire(self.config.lock_spin_limit)?;
        let asserted = self.with_link(|link| link.cs.set_low().map_err(pin_error));
        if asserted.is_err() {
            self.comm.release();
        }
        asserted
    }

    /// Deassert chip-select and release the transaction.
    pub fn end_transaction(&self) -> Result<()> {
        self.ensure_connected()?;
        let deasserted = self.with_link(|link| link.cs.set_high().map_err(pin_error));
        self.comm.release();
        deasserted
    }

    /// Switch D/C to command. Only valid inside a transaction.
    pub fn begin_command(&self) -> Result<()> {
        self.ensure_connected()?;
        self.with_link(|link| link.dc.set_low().map_err(pin_error))
    }

    /// Switch D/C back to data.
    pub fn end_command(&self) -> Result<()> {
        self.ensure_connected()?;
        self.with_link(|link| link.dc.set_high().map_err(pin_error))
    }

    // =========================================================================
    // Synchronous I/O
    // =========================================================================

    /// Blocking write at the write clock.
    pub fn write_sync(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_ready()?;
        self.transmit(bytes)
    }

    /// Blocking read at the read clock, filling `buffer`.
    pub fn read_sync(&self, buffer: &mut [u8]) -> Result<()> {
        self.ensure_ready()?;
        self.receive(buffer)
    }

    /// Clock one SCK pulse by hand for the read turnaround.
    ///
    /// Does nothing while a DMA transfer is in flight.
    pub fn dummy_cycle(&self) -> Result<()> {
        self.ensure_connected()?;
        if self.dma_busy() {
            return Ok(());
        }
        self.busy.acquire(self.config.lock_spin_limit)?;
        let result = self
            .lend(Link::serial_slot, |serial| serial.flush().map_err(bus_error))
            .and_then(|()| {
                self.lend(Link::sck_slot, |sck| {
                    sck.select_gpio();
                    let pulse = sck.set_high().and_then(|()| sck.set_low()).map_err(pin_error);
                    sck.select_peripheral();
                    pulse
                })
            });
        self.busy.release();
        result
    }

    /// Write under the busy lock. No advisory checks.
    pub(super) fn transmit(&self, bytes: &[u8]) -> Result<()> {
        self.busy.acquire(self.config.lock_spin_limit)?;
        let baudrate = self.config.write_baudrate_hz;
        let result = self.lend(Link::serial_slot, |serial| {
            serial.set_baudrate(baudrate);
            serial.write(bytes).map_err(bus_error)?;
            serial.flush().map_err(bus_error)
        });
        self.busy.release();
        result
    }

    /// Read under the busy lock. No advisory checks.
    pub(super) fn receive(&self, buffer: &mut [u8]) -> Result<()> {
        self.busy.acquire(self.config.lock_spin_limit)?;
        let baudrate = self.config.read_baudrate_hz;
        buffer.fill(READ_FILL_BYTE);
        let result = self.lend(Link::serial_slot, |serial| {
            serial.set_baudrate(baudrate);
            serial.transfer_in_place(buffer).map_err(bus_error)?;
            serial.flush().map_err(bus_error)
        });
        self.busy.release();
        result
    }

    /// Send the opcode with D/C low. Must be inside a transaction.
    pub(super) fn write_opcode(&self, command: Command) -> Result<()> {
        self.begin_command()?;
        let sent = self.transmit(&[command.opcode()]);
        let restored = self.end_command();
        sent.and(restored)
    }

    /// One full command transaction. No advisory checks.
    pub(super) fn issue(&self, command: Command, params: &[u8]) -> Result<()> {
        self.open_transaction()?;
        let result = self.write_opcode(command).and_then(|()| {
            if params.is_empty() {
                Ok(())
            } else {
                self.transmit(params)
            }
        });
        let closed = self.end_transaction();
        result.and(closed)
    }

    /// One full read transaction. No advisory checks.
    pub(super) fn issue_read(&self, command: Command, response: &mut [u8]) -> Result<()> {
        self.open_transaction()?;
        let result = self.write_opcode(command).and_then(|()| {
            if command.needs_dummy_cycle() {
                self.dummy_cycle()?;
            }
            self.receive(response)
        });
        let closed = self.end_transaction();
        result.and(closed)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Run `f` on the owned peripherals inside a critical section.
    ///
    /// Must not be nested.
    pub(super) fn with_link<R>(&self, f: impl FnOnce(&mut Link<H>) -> Result<R>) -> Result<R> {
        self.link.with(|slot| match slot.as_mut() {
            Some(link) => f(link),
            None => Err(Error::NotConnected),
        })
    }

    /// Take one peripheral out of the link, run `f` on it with no critical
    /// section held, then put it back.
    ///
    /// The caller must hold the busy lock.
    pub(super) fn lend<P, R>(
        &self,
        slot: fn(&mut Link<H>) -> &mut Option<P>,
        f: impl FnOnce(&mut P) -> Result<R>,
    ) -> Result<R> {
        let mut part = self.with_link(|link| slot(link).take().ok_or(Error::Busy))?;
        let result = f(&mut part);
        self.link.with(|link| {
            if let Some(link) = link.as_mut() {
                *slot(link) = Some(part);
            }
        });
        result
    }

    pub(super) fn now_us(&self) -> u64 {
        self.link
            .with_ref(|slot| slot.as_ref().map_or(0, |link| link.time.now_us()))
    }

    /// Block until `window` is fully closed.
    pub(super) fn settle(&self, window: &CriticalSectionCell<TimedWindow>) {
        loop {
            let now = self.now_us();
            let remaining = window.with_ref(|w| w.remaining_us(now));
            if remaining == 0 {
                return;
            }
            let step = remaining.min(u64::from(SETTLE_STEP_US)) as u32;
            let Some(mut delay) = self.delay.with(Option::take) else {
                return;
            };
            delay.delay_us(step);
            self.delay.with(|slot| {
                slot.get_or_insert(delay);
            });
        }
    }
}
