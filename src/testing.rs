//! Testing utilities and mock implementations
//!
//! This module provides a simulated ST7789V panel and mock peripherals for
//! testing the driver on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::convert::Infallible;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, mpsc};
use std::time::Duration;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, Mode, SpiBus};

use crate::driver::config::DisplayConfig;
use crate::driver::St7789v;
use crate::hal::{
    ClockLine, DmaChannel, DmaController, Hardware, Monotonic, Peripherals, SerialPort,
    TransferWidth, WriteTransfer,
};
use crate::internal::constants::DISPLAY_ID;
use crate::protocol::Command;

type Shared<T> = Arc<Mutex<T>>;

fn lock<T>(shared: &Shared<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

// =============================================================================
// Mock Panel
// =============================================================================

/// Simulated controller plus a log of everything seen on the wire.
///
/// Decodes the CS/DC/byte stream into commands, applies writes to a small
/// register model and answers reads. Reads that need a turnaround clock come
/// back shifted by one bit if the clock was missing, like real hardware.
#[derive(Debug)]
pub struct PanelState {
    pub cs_low: bool,
    pub dc_low: bool,

    current: Option<u8>,
    params: Vec<u8>,
    response: VecDeque<u8>,
    response_ready: bool,
    turnaround_clocked: bool,

    /// Completed transactions: (opcode, parameters)
    pub commands: Vec<(u8, Vec<u8>)>,
    /// Every pin edge, byte and clock pulse
    pub bus_events: usize,
    /// Bytes clocked while chip-select was high
    pub stray_bytes: usize,
    /// Synchronous bus use while a DMA transfer was streaming
    pub overlaps: usize,
    pub dma_active: bool,
    pub baudrates: Vec<u32>,
    pub mode: Option<Mode>,
    pub configured: bool,
    pub sck_pulses: usize,
    pub data_register_reads: usize,
    /// MOSI bytes clocked out during reads
    pub fill_bytes: Vec<u8>,
    /// Fail the response phase of this opcode with a bus error
    pub fail_read_of: Option<u8>,
    /// Check at every blocking transfer that a critical section can still be
    /// entered from another thread
    pub watch_critical_sections: bool,
    pub watched_transfers: usize,
    /// Watched transfers during which the critical section was held
    pub masked_transfers: usize,

    pub id: u32,
    pub madctl: u8,
    pub colmod: u8,
    pub power: u8,
    pub image: u8,
    pub signal: u8,
    pub brightness: u8,
    pub ctrl: u8,
    pub cace: u8,
    pub cabc_min: u8,
    pub scanline: u16,
    pub ram: Vec<u8>,
}

impl PanelState {
    pub fn new() -> Self {
        let mut panel = Self {
            cs_low: false,
            dc_low: false,
            current: None,
            params: Vec::new(),
            response: VecDeque::new(),
            response_ready: false,
            turnaround_clocked: false,
            commands: Vec::new(),
            bus_events: 0,
            stray_bytes: 0,
            overlaps: 0,
            dma_active: false,
            baudrates: Vec::new(),
            mode: None,
            configured: false,
            sck_pulses: 0,
            data_register_reads: 0,
            fill_bytes: Vec::new(),
            fail_read_of: None,
            watch_critical_sections: false,
            watched_transfers: 0,
            masked_transfers: 0,
            id: DISPLAY_ID,
            madctl: 0,
            colmod: 0,
            power: 0,
            image: 0,
            signal: 0,
            brightness: 0,
            ctrl: 0,
            cace: 0,
            cabc_min: 0,
            scanline: 0x012A,
            ram: Vec::new(),
        };
        panel.reset_registers();
        panel
    }

    fn reset_registers(&mut self) {
        self.madctl = 0x00;
        self.colmod = 0x66;
        // Sleep in, normal mode on, display off
        self.power = 0x08;
        self.image = 0x00;
        self.signal = 0x00;
        self.brightness = 0x00;
        self.ctrl = 0x00;
        self.cace = 0x00;
        self.cabc_min = 0x00;
    }

    /// Opcodes of all completed transactions
    pub fn opcodes(&self) -> Vec<u8> {
        self.commands.iter().map(|(op, _)| *op).collect()
    }

    /// Parameters of the most recent transaction with `opcode`
    pub fn last_params(&self, opcode: u8) -> Option<Vec<u8>> {
        self.commands
            .iter()
            .rev()
            .find(|(op, _)| *op == opcode)
            .map(|(_, params)| params.clone())
    }

    fn set_cs(&mut self, low: bool) {
        self.bus_events += 1;
        if self.cs_low && !low {
            self.finish_command();
        }
        self.cs_low = low;
    }

    fn set_dc(&mut self, low: bool) {
        self.bus_events += 1;
        self.dc_low = low;
    }

    fn sck_pulse(&mut self) {
        self.bus_events += 1;
        self.sck_pulses += 1;
        if self.cs_low && self.current.is_some() && !self.response_ready {
            self.turnaround_clocked = true;
        }
    }

    fn write_byte(&mut self, byte: u8) {
        self.bus_events += 1;
        if self.dma_active {
            self.overlaps += 1;
        }
        self.accept_byte(byte);
    }

    fn dma_byte(&mut self, byte: u8) {
        self.accept_byte(byte);
    }

    fn accept_byte(&mut self, byte: u8) {
        if !self.cs_low {
            self.stray_bytes += 1;
            return;
        }
        if self.dc_low {
            self.finish_command();
            self.current = Some(byte);
            self.params.clear();
            self.response.clear();
            self.response_ready = false;
            self.turnaround_clocked = false;
        } else {
            self.params.push(byte);
        }
    }

    fn read_byte(&mut self, fill: u8) -> u8 {
        self.bus_events += 1;
        if self.dma_active {
            self.overlaps += 1;
        }
        self.fill_bytes.push(fill);
        if !self.cs_low {
            self.stray_bytes += 1;
            return 0;
        }
        if !self.response_ready {
            self.response = self.build_response().into();
            self.response_ready = true;
        }
        self.response.pop_front().unwrap_or(0)
    }

    fn finish_command(&mut self) {
        if let Some(op) = self.current.take() {
            let params = core::mem::take(&mut self.params);
            self.apply(op, &params);
            self.commands.push((op, params));
        }
    }

    fn status_word(&self) -> u32 {
        let mut status = u32::from(self.power & 0x80) << 24;
        status |= u32::from((self.madctl >> 2) & 0x3F) << 25;
        status |= u32::from(self.colmod & 0x07) << 20;
        status |= u32::from((self.power >> 3) & 0x0F) << 16;
        if self.power & 0x04 != 0 {
            status |= 1 << 10;
        }
        if self.image & 0x20 != 0 {
            status |= 1 << 13;
        }
        if self.signal & 0x80 != 0 {
            status |= 1 << 9;
        }
        if self.signal & 0x40 != 0 {
            status |= 1 << 5;
        }
        status |= u32::from(self.image & 0x07) << 6;
        status
    }

    fn build_response(&self) -> Vec<u8> {
        let Some(op) = self.current else {
            return Vec::new();
        };
        let [_, id1, id2, id3] = self.id.to_be_bytes();
        let bytes: Vec<u8> = match op {
            0x04 => std::vec![id1, id2, id3],
            0x09 => self.status_word().to_be_bytes().to_vec(),
            0x0A => std::vec![self.power],
            0x0B => std::vec![self.madctl],
            0x0C => std::vec![self.colmod],
            0x0D => std::vec![self.image],
            0x0E => std::vec![self.signal],
            0x0F | 0x68 => std::vec![0xC0],
            0x45 => self.scanline.to_be_bytes().to_vec(),
            0x52 => std::vec![self.brightness],
            0x54 => std::vec![self.ctrl],
            0x56 => std::vec![self.cace],
            0x5F => std::vec![self.cabc_min],
            0xDA => std::vec![id1],
            0xDB => std::vec![id2],
            0xDC => std::vec![id3],
            _ => Vec::new(),
        };

        let needs_turnaround = matches!(op, 0x04 | 0x09 | 0x2E | 0x3E | 0x45);
        if needs_turnaround == self.turnaround_clocked {
            return bytes;
        }
        // Clock phase is off by one: every bit arrives one position late
        let mut carry = 0u8;
        bytes
            .into_iter()
            .map(|b| {
                let shifted = (b >> 1) | (carry << 7);
                carry = b & 1;
                shifted
            })
            .collect()
    }

    fn apply(&mut self, op: u8, params: &[u8]) {
        let first = params.first().copied();
        match op {
            0x01 => self.reset_registers(),
            0x10 => self.power &= !0x10,
            0x11 => self.power |= 0x90,
            0x12 => self.power = (self.power | 0x20) & !0x08,
            0x13 => self.power = (self.power | 0x08) & !0x20,
            0x20 => self.image &= !0x20,
            0x21 => self.image |= 0x20,
            0x26 => {
                let index = match first {
                    Some(0x02) => 1,
                    Some(0x04) => 2,
                    Some(0x08) => 3,
                    _ => 0,
                };
                self.image = (self.image & !0x07) | index;
            }
            0x28 => self.power &= !0x04,
            0x29 => self.power |= 0x04,
            0x2C => self.ram = params.to_vec(),
            0x3C => self.ram.extend_from_slice(params),
            0x34 => self.signal = 0,
            0x35 => self.signal = 0x80 | if first.unwrap_or(0) & 1 != 0 { 0x40 } else { 0 },
            0x36 => self.madctl = first.unwrap_or(self.madctl),
            0x38 => self.power &= !0x40,
            0x39 => self.power |= 0x40,
            0x3A => self.colmod = first.unwrap_or(self.colmod),
            0x51 => self.brightness = first.unwrap_or(self.brightness),
            0x53 => self.ctrl = first.unwrap_or(self.ctrl),
            0x55 => self.cace = first.unwrap_or(self.cace),
            0x5E => self.cabc_min = first.unwrap_or(self.cabc_min),
            _ => {}
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Mock Serial
// =============================================================================

/// SPI peripheral wired to a [`PanelState`]
pub struct MockSerial {
    panel: Shared<PanelState>,
}

impl MockSerial {
    /// Record whether another thread could take the critical section while
    /// this transfer runs.
    fn watch(&self) {
        if !lock(&self.panel).watch_critical_sections {
            return;
        }
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            critical_section::with(|_| {
                let _ = tx.send(());
            });
        });
        let entered = rx.recv_timeout(Duration::from_millis(200)).is_ok();

        let mut panel = lock(&self.panel);
        panel.watched_transfers += 1;
        if !entered {
            panel.masked_transfers += 1;
        }
    }
}

impl spi::ErrorType for MockSerial {
    type Error = spi::ErrorKind;
}

impl SpiBus<u8> for MockSerial {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut panel = lock(&self.panel);
        for word in words.iter_mut() {
            *word = panel.read_byte(0x00);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.watch();
        let mut panel = lock(&self.panel);
        for &word in words {
            panel.write_byte(word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut panel = lock(&self.panel);
        for (i, word) in read.iter_mut().enumerate() {
            *word = panel.read_byte(write.get(i).copied().unwrap_or(0x00));
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.watch();
        let mut panel = lock(&self.panel);
        if panel.current.is_some() && panel.current == panel.fail_read_of {
            return Err(spi::ErrorKind::Other);
        }
        for word in words.iter_mut() {
            *word = panel.read_byte(*word);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.watch();
        Ok(())
    }
}

impl SerialPort for MockSerial {
    fn configure(&mut self, baudrate_hz: u32, mode: Mode) {
        let mut panel = lock(&self.panel);
        panel.configured = true;
        panel.mode = Some(mode);
        panel.baudrates.push(baudrate_hz);
    }

    fn set_baudrate(&mut self, baudrate_hz: u32) -> u32 {
        lock(&self.panel).baudrates.push(baudrate_hz);
        baudrate_hz
    }

    fn read_data_register(&mut self) -> u16 {
        lock(&self.panel).data_register_reads += 1;
        0
    }

    fn data_register_address(&self) -> *mut u8 {
        core::ptr::null_mut()
    }

    fn tx_data_request(&self) -> u8 {
        16
    }

    fn deconfigure(&mut self) {
        lock(&self.panel).configured = false;
    }
}

// =============================================================================
// Mock Pins
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    ChipSelect,
    DataCommand,
}

/// CS or D/C pin wired to a [`PanelState`]
pub struct MockPin {
    role: PinRole,
    panel: Shared<PanelState>,
}

impl MockPin {
    fn drive(&self, low: bool) {
        let mut panel = lock(&self.panel);
        match self.role {
            PinRole::ChipSelect => panel.set_cs(low),
            PinRole::DataCommand => panel.set_dc(low),
        }
    }
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }
}

/// SCK pin; edges only reach the panel while in GPIO mode
pub struct MockClockLine {
    panel: Shared<PanelState>,
    gpio: bool,
    high: bool,
}

impl digital::ErrorType for MockClockLine {
    type Error = Infallible;
}

impl OutputPin for MockClockLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.gpio && self.high {
            lock(&self.panel).sck_pulse();
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

impl ClockLine for MockClockLine {
    fn select_gpio(&mut self) {
        self.gpio = true;
    }

    fn select_peripheral(&mut self) {
        self.gpio = false;
    }
}

// =============================================================================
// Mock Time
// =============================================================================

/// Monotonic clock driven by the test (and by [`MockDelay`])
pub struct MockClock {
    now: Arc<AtomicU64>,
}

impl Monotonic for MockClock {
    fn now_us(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Delay that advances the shared mock clock instead of sleeping
pub struct MockDelay {
    now: Arc<AtomicU64>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.now
            .fetch_add(u64::from(ns.div_ceil(1_000)), Ordering::SeqCst);
    }
}

// =============================================================================
// Mock DMA
// =============================================================================

/// Shared DMA engine state
#[derive(Debug, Default)]
pub struct DmaState {
    pub available: bool,
    pub claimed: Option<u8>,
    pub irq_enabled: bool,
    pub busy: bool,
    pub irq_pending: bool,
    pub in_flight: Option<Vec<u8>>,
    pub starts: usize,
    pub acks: usize,
    pub cleanups: usize,
    pub unclaims: usize,
    /// (element count, width, data request) of the last transfer
    pub last_transfer: Option<(u32, TransferWidth, u8)>,
}

/// DMA controller with a single channel
pub struct MockDma {
    state: Shared<DmaState>,
    panel: Shared<PanelState>,
}

/// The one channel [`MockDma`] hands out
pub struct MockChannel {
    id: u8,
    state: Shared<DmaState>,
    panel: Shared<PanelState>,
}

impl DmaController for MockDma {
    type Channel = MockChannel;

    fn claim_unused_channel(&mut self) -> Option<MockChannel> {
        let mut state = lock(&self.state);
        if !state.available || state.claimed.is_some() {
            return None;
        }
        state.claimed = Some(3);
        Some(MockChannel {
            id: 3,
            state: self.state.clone(),
            panel: self.panel.clone(),
        })
    }

    fn unclaim(&mut self, channel: MockChannel) {
        let mut state = lock(&self.state);
        if state.claimed == Some(channel.id) {
            state.claimed = None;
        }
        state.unclaims += 1;
    }
}

impl DmaChannel for MockChannel {
    fn id(&self) -> u8 {
        self.id
    }

    unsafe fn start_write(&mut self, transfer: &WriteTransfer) {
        let len = transfer.count as usize * transfer.width.bytes();
        // SAFETY: the caller guarantees `source` is valid for `count` elements.
        let bytes = unsafe { core::slice::from_raw_parts(transfer.source, len) }.to_vec();

        let mut state = lock(&self.state);
        state.in_flight = Some(bytes);
        state.busy = true;
        state.starts += 1;
        state.last_transfer = Some((transfer.count, transfer.width, transfer.data_request));
        lock(&self.panel).dma_active = true;
    }

    fn is_busy(&self) -> bool {
        lock(&self.state).busy
    }

    fn interrupt_pending(&self) -> bool {
        lock(&self.state).irq_pending
    }

    fn acknowledge_interrupt(&mut self) {
        let mut state = lock(&self.state);
        state.irq_pending = false;
        state.acks += 1;
    }

    fn set_interrupt_enabled(&mut self, enabled: bool) {
        lock(&self.state).irq_enabled = enabled;
    }

    fn cleanup(&mut self) {
        let mut state = lock(&self.state);
        state.busy = false;
        state.in_flight = None;
        state.cleanups += 1;
        lock(&self.panel).dma_active = false;
    }
}

// =============================================================================
// Bench
// =============================================================================

/// Marker tying the mocks together
pub struct MockHardware;

impl Hardware for MockHardware {
    type Serial = MockSerial;
    type Dma = MockDma;
    type ChipSelect = MockPin;
    type DataCommand = MockPin;
    type Clock = MockClockLine;
    type Time = MockClock;
    type Delay = MockDelay;
}

/// Test fixture owning the shared mock state.
///
/// # Example
///
/// ```ignore
/// let bench = MockBench::new();
/// let display = connected_display(&bench);
/// display.send_command(Command::DisplayOn, &[]).unwrap();
/// assert!(bench.panel().power & 0x04 != 0);
/// ```
pub struct MockBench {
    pub panel: Shared<PanelState>,
    pub dma: Shared<DmaState>,
    pub now: Arc<AtomicU64>,
}

impl MockBench {
    pub fn new() -> Self {
        Self {
            panel: Arc::new(Mutex::new(PanelState::new())),
            dma: Arc::new(Mutex::new(DmaState {
                available: true,
                ..DmaState::default()
            })),
            now: Arc::new(AtomicU64::new(1_000)),
        }
    }

    /// Bench whose DMA controller has no free channel
    pub fn without_dma_channel() -> Self {
        let bench = Self::new();
        lock(&bench.dma).available = false;
        bench
    }

    pub fn peripherals(&self) -> Peripherals<MockHardware> {
        Peripherals {
            serial: MockSerial {
                panel: self.panel.clone(),
            },
            dma: MockDma {
                state: self.dma.clone(),
                panel: self.panel.clone(),
            },
            cs: MockPin {
                role: PinRole::ChipSelect,
                panel: self.panel.clone(),
            },
            dc: MockPin {
                role: PinRole::DataCommand,
                panel: self.panel.clone(),
            },
            sck: MockClockLine {
                panel: self.panel.clone(),
                gpio: false,
                high: false,
            },
            time: MockClock {
                now: self.now.clone(),
            },
            delay: MockDelay {
                now: self.now.clone(),
            },
        }
    }

    pub fn panel(&self) -> MutexGuard<'_, PanelState> {
        lock(&self.panel)
    }

    pub fn dma_state(&self) -> MutexGuard<'_, DmaState> {
        lock(&self.dma)
    }

    pub fn now_us(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    pub fn advance_us(&self, us: u64) {
        self.now.fetch_add(us, Ordering::SeqCst);
    }

    pub fn bus_events(&self) -> usize {
        self.panel().bus_events
    }

    /// Finish the in-flight DMA transfer: stream its bytes into the panel,
    /// drop the channel's busy flag and raise its interrupt.
    ///
    /// Returns `false` if nothing was in flight.
    pub fn complete_dma(&self) -> bool {
        let mut state = lock(&self.dma);
        let Some(bytes) = state.in_flight.take() else {
            return false;
        };
        {
            let mut panel = lock(&self.panel);
            panel.dma_active = false;
            for byte in bytes {
                panel.dma_byte(byte);
            }
        }
        state.busy = false;
        state.irq_pending = state.irq_enabled;
        true
    }
}

impl Default for MockBench {
    fn default() -> Self {
        Self::new()
    }
}

/// A driver brought up against `bench` with the default configuration
pub fn connected_display(bench: &MockBench) -> St7789v<MockHardware> {
    connected_display_with(bench, DisplayConfig::new())
}

/// A driver brought up against `bench` with `config`
pub fn connected_display_with(bench: &MockBench, config: DisplayConfig) -> St7789v<MockHardware> {
    let display = St7789v::new(config);
    display.init(bench.peripherals()).unwrap();
    bench.panel().commands.clear();
    display
}

/// Opcode of `command` for comparing against [`PanelState::commands`]
pub fn op(command: Command) -> u8 {
    command.opcode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_decodes_command_and_params() {
        let mut panel = PanelState::new();
        panel.set_cs(true);
        panel.set_dc(true);
        panel.write_byte(0x36);
        panel.set_dc(false);
        panel.write_byte(0x20);
        panel.set_cs(false);

        assert_eq!(panel.commands, std::vec![(0x36, std::vec![0x20])]);
        assert_eq!(panel.madctl, 0x20);
    }

    #[test]
    fn panel_shifts_reads_without_turnaround() {
        let mut panel = PanelState::new();
        panel.set_cs(true);
        panel.set_dc(true);
        panel.write_byte(0x04);
        panel.set_dc(false);
        let bytes = [panel.read_byte(0xFF), panel.read_byte(0xFF), panel.read_byte(0xFF)];
        assert_eq!(bytes, [0x42, 0xC2, 0xA9]);
    }

    #[test]
    fn panel_reads_cleanly_with_turnaround() {
        let mut panel = PanelState::new();
        panel.set_cs(true);
        panel.set_dc(true);
        panel.write_byte(0x04);
        panel.set_dc(false);
        panel.sck_pulse();
        let bytes = [panel.read_byte(0xFF), panel.read_byte(0xFF), panel.read_byte(0xFF)];
        assert_eq!(bytes, [0x85, 0x85, 0x52]);
    }

    #[test]
    fn delay_advances_clock() {
        let bench = MockBench::new();
        let mut delay = bench.peripherals().delay;
        let start = bench.now_us();
        delay.delay_us(250);
        assert_eq!(bench.now_us(), start + 250);
    }
}
