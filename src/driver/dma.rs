//! DMA bulk writes and the completion handoff.
//!
//! A DMA write takes the busy lock in the caller context and leaves it held;
//! [`St7789v::on_dma_interrupt`] releases it once the channel finishes. The
//! pending flag is cleared last, so anyone who observes it clear also sees the
//! lock released, the transaction closed and the signal fired.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::display::{Link, St7789v, TransferState};
use super::error::{Error, Result, bus_error};
use crate::hal::{DmaChannel, DmaWord, Hardware, SerialPort, WriteTransfer};
use crate::sync::CompletionSignal;

impl<H: Hardware> St7789v<H> {
    /// Start a one-shot DMA write of `buffer` to the bus and return
    /// immediately.
    ///
    /// `notify` is reset now and signalled from the completion interrupt.
    /// With `close_on_finish`, the interrupt also ends the open transaction
    /// (deasserts chip-select).
    ///
    /// Fails with [`Error::Busy`] while another transfer is pending or a
    /// reset/sleep window is open, and with [`Error::InvalidLength`] for an
    /// empty buffer.
    pub fn dma_write<W: DmaWord>(
        &self,
        buffer: &'static [W],
        notify: Option<&'static CompletionSignal>,
        close_on_finish: bool,
    ) -> Result<()> {
        self.ensure_ready()?;
        if buffer.is_empty() {
            return Err(Error::InvalidLength);
        }

        self.busy.acquire(self.config.lock_spin_limit)?;

        if let Some(signal) = notify {
            signal.reset();
        }
        self.transfer.set(TransferState {
            pending: true,
            close_on_finish,
            notify,
        });

        let baudrate = self.config.write_baudrate_hz;
        let started = self.with_link(|link| {
            let channel = link.channel.as_mut().ok_or(Error::NoResourceAvailable)?;
            let serial = link.serial.as_mut().ok_or(Error::Busy)?;
            serial.set_baudrate(baudrate);
            let transfer = WriteTransfer {
                source: buffer.as_ptr().cast::<u8>(),
                count: buffer.len() as u32,
                width: W::WIDTH,
                destination: serial.data_register_address(),
                data_request: serial.tx_data_request(),
            };
            // SAFETY: `buffer` is `'static`, so it outlives the transfer.
            unsafe { channel.start_write(&transfer) };
            Ok(())
        });

        if started.is_err() {
            self.transfer.set(TransferState::idle());
            self.busy.release();
        }
        started
    }

    /// Block until the in-flight DMA write has fully completed.
    ///
    /// Returns once the channel is done, the bus is idle and the completion
    /// interrupt has run. Returns immediately if nothing is pending.
    pub fn wait_for_dma_completion(&self) -> Result<()> {
        self.ensure_connected()?;
        if !self.dma_busy() {
            return Ok(());
        }

        while self.with_link(|link| Ok(link.channel.as_ref().is_some_and(DmaChannel::is_busy)))? {
            core::hint::spin_loop();
        }
        while self.dma_busy() {
            core::hint::spin_loop();
        }

        // The handoff has released the bus; drain the TX FIFO under it
        self.busy.acquire(self.config.lock_spin_limit)?;
        let drained = self.lend(Link::serial_slot, |serial| serial.flush().map_err(bus_error));
        self.busy.release();
        drained
    }

    /// Wait asynchronously for the in-flight DMA write to complete.
    #[cfg(feature = "async")]
    pub async fn wait_for_dma_completion_async(&self) -> Result<()> {
        use core::future::poll_fn;
        use core::task::Poll;

        self.ensure_connected()?;

        poll_fn(|cx| {
            if !self.dma_busy() {
                return Poll::Ready(());
            }
            self.dma_waker.register(cx.waker());
            if self.dma_busy() {
                Poll::Pending
            } else {
                Poll::Ready(())
            }
        })
        .await;

        self.busy.acquire(self.config.lock_spin_limit)?;
        self.busy.release();
        Ok(())
    }

    /// DMA completion interrupt entry point.
    ///
    /// Call from the IRQ handler the claimed channel is routed to. Interrupts
    /// raised by other channels are left unacknowledged. Never blocks.
    pub fn on_dma_interrupt(&self) {
        let ours = self
            .with_link(|link| {
                let Some(channel) = link.channel.as_mut() else {
                    return Ok(false);
                };
                if !channel.interrupt_pending() {
                    return Ok(false);
                }
                channel.acknowledge_interrupt();
                // Settles the peripheral after single-byte transfers
                if let Some(serial) = link.serial.as_mut() {
                    let _ = serial.read_data_register();
                }
                Ok(true)
            })
            .unwrap_or(false);

        if !ours {
            #[cfg(feature = "defmt")]
            defmt::warn!("DMA irq received from unknown channel");
            return;
        }

        let (pending, close_on_finish, notify) = self
            .transfer
            .with(|t| (t.pending, t.close_on_finish, t.notify.take()));

        if !pending {
            #[cfg(feature = "defmt")]
            defmt::warn!("DMA completion without a pending transfer");
            return;
        }

        self.busy.release();

        if close_on_finish {
            let _ = self.with_link(|link| {
                let _ = link.cs.set_high();
                Ok(())
            });
            self.comm.release();
        }

        if let Some(signal) = notify {
            signal.signal();
        }

        self.transfer.set(TransferState::idle());

        #[cfg(feature = "async")]
        self.dma_waker.wake();
    }
}
