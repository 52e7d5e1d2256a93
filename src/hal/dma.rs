//! DMA engine seam.
//!
//! One channel is claimed at init and used for one-shot memory-to-peripheral
//! writes. Completion is reported through the channel interrupt, which the
//! application routes to [`St7789v::on_dma_interrupt`](crate::St7789v::on_dma_interrupt).

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// Element width of a DMA transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferWidth {
    /// 8-bit elements
    Byte,
    /// 16-bit elements
    HalfWord,
    /// 32-bit elements
    Word,
}

impl TransferWidth {
    /// Size of one element in bytes
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::HalfWord => 2,
            Self::Word => 4,
        }
    }
}

/// Element types a DMA write can move.
pub trait DmaWord: sealed::Sealed + Copy + 'static {
    /// Transfer width for this element type
    const WIDTH: TransferWidth;
}

impl DmaWord for u8 {
    const WIDTH: TransferWidth = TransferWidth::Byte;
}

impl DmaWord for u16 {
    const WIDTH: TransferWidth = TransferWidth::HalfWord;
}

impl DmaWord for u32 {
    const WIDTH: TransferWidth = TransferWidth::Word;
}

/// One-shot memory-to-peripheral transfer description.
///
/// The read address increments; the write address stays fixed on the
/// peripheral data register.
#[derive(Debug, Clone, Copy)]
pub struct WriteTransfer {
    /// First element to send
    pub source: *const u8,
    /// Number of elements
    pub count: u32,
    /// Element width
    pub width: TransferWidth,
    /// Peripheral data register
    pub destination: *mut u8,
    /// Data request line pacing the transfer
    pub data_request: u8,
}

/// DMA controller that hands out channels.
pub trait DmaController {
    /// Channel type
    type Channel: DmaChannel;

    /// Claim any free channel, or `None` if all are taken.
    fn claim_unused_channel(&mut self) -> Option<Self::Channel>;

    /// Return a channel to the pool.
    fn unclaim(&mut self, channel: Self::Channel);
}

/// A claimed DMA channel.
pub trait DmaChannel {
    /// Hardware channel number
    fn id(&self) -> u8;

    /// Configure and trigger a one-shot write.
    ///
    /// # Safety
    ///
    /// `transfer.source` must stay valid for `count` elements until the
    /// channel reports completion, and `transfer.destination` must be a
    /// peripheral register that accepts writes of `width`.
    unsafe fn start_write(&mut self, transfer: &WriteTransfer);

    /// Whether the channel is still moving data
    fn is_busy(&self) -> bool;

    /// Whether this channel has raised its completion interrupt
    fn interrupt_pending(&self) -> bool;

    /// Acknowledge this channel's completion interrupt
    fn acknowledge_interrupt(&mut self);

    /// Route (or stop routing) this channel's completion to the interrupt line
    fn set_interrupt_enabled(&mut self, enabled: bool);

    /// Abort anything in flight and reset the channel configuration
    fn cleanup(&mut self);
}
