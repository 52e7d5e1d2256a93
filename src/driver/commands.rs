//! Command-level API.
//!
//! Thin wrappers that encode the level-1 command set on top of the
//! transaction and I/O primitives. All of them follow the same order of
//! checks: link up, nothing busy, then parameter validation.

use super::display::St7789v;
use super::error::{Error, Result};
use crate::hal::{DmaWord, Hardware};
use crate::internal::constants::{FRAME_MEMORY_LINES, PANEL_HEIGHT};
use crate::protocol::{
    ColorEnhancement, Command, CtrlDisplay, DisplayOrientation, DisplayStatus, GammaCurve,
    ImageMode, InterfacePixelFormat, MemoryDataAccessControl, PowerMode, SelfDiagnostic,
    SignalMode, TearingEffectMode,
};
use crate::sync::CompletionSignal;

/// Big-endian start/end pair used by CASET, RASET and PTLAR.
fn range_params(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

fn check_range(start: u16, end: u16, max: u16) -> Result<()> {
    if start > end || end > max {
        return Err(Error::OutOfRange);
    }
    Ok(())
}

impl<H: Hardware> St7789v<H> {
    // =========================================================================
    // Generic Commands
    // =========================================================================

    /// Send `command` followed by `params` in one transaction.
    pub fn send_command(&self, command: Command, params: &[u8]) -> Result<()> {
        self.ensure_ready()?;
        self.issue(command, params)
    }

    /// Send a read command and fill `response` with its reply.
    ///
    /// The read turnaround clock is inserted for commands that need it.
    pub fn read_command(&self, command: Command, response: &mut [u8]) -> Result<()> {
        self.ensure_ready()?;
        self.issue_read(command, response)
    }

    fn read_u8(&self, command: Command) -> Result<u8> {
        let mut response = [0u8; 1];
        self.read_command(command, &mut response)?;
        Ok(response[0])
    }

    // =========================================================================
    // Identification and Status
    // =========================================================================

    /// Read the 24-bit display ID (RDDID)
    pub fn read_display_id(&self) -> Result<u32> {
        let mut id = [0u8; 3];
        self.read_command(Command::ReadDisplayId, &mut id)?;
        Ok(u32::from_be_bytes([0, id[0], id[1], id[2]]))
    }

    /// Read the 32-bit display status (RDDST)
    pub fn read_display_status(&self) -> Result<DisplayStatus> {
        let mut status = [0u8; 4];
        self.read_command(Command::ReadDisplayStatus, &mut status)?;
        Ok(DisplayStatus::from_bytes(status))
    }

    /// Read the manufacturer ID (RDID1)
    pub fn read_id1(&self) -> Result<u8> {
        self.read_u8(Command::ReadId1)
    }

    /// Read the module/driver version ID (RDID2)
    pub fn read_id2(&self) -> Result<u8> {
        self.read_u8(Command::ReadId2)
    }

    /// Read the module/driver ID (RDID3)
    pub fn read_id3(&self) -> Result<u8> {
        self.read_u8(Command::ReadId3)
    }

    /// RDDPM
    pub fn read_display_power_mode(&self) -> Result<PowerMode> {
        self.read_u8(Command::ReadDisplayPowerMode)
            .map(PowerMode::from_raw)
    }

    /// Read MADCTL (RDDMADCTL) and refresh the cached orientation.
    pub fn read_memory_data_access_control(&self) -> Result<MemoryDataAccessControl> {
        let madctl = MemoryDataAccessControl::from_raw(
            self.read_u8(Command::ReadMemoryDataAccessControl)?,
        );
        self.orientation
            .set(DisplayOrientation::from_madctl(&madctl));
        Ok(madctl)
    }

    /// RDDCOLMOD
    pub fn read_interface_pixel_format(&self) -> Result<InterfacePixelFormat> {
        self.read_u8(Command::ReadInterfacePixelFormat)
            .map(InterfacePixelFormat::from_raw)
    }

    /// RDDIM
    pub fn read_display_image_mode(&self) -> Result<ImageMode> {
        self.read_u8(Command::ReadDisplayImageMode)
            .map(ImageMode::from_raw)
    }

    /// RDDSM
    pub fn read_display_signal_mode(&self) -> Result<SignalMode> {
        self.read_u8(Command::ReadDisplaySignalMode)
            .map(SignalMode::from_raw)
    }

    /// RDDSDR
    pub fn read_self_diagnostic(&self) -> Result<SelfDiagnostic> {
        self.read_u8(Command::ReadSelfDiagnostic)
            .map(SelfDiagnostic::from_raw)
    }

    /// RDDISBV
    pub fn read_display_brightness(&self) -> Result<u8> {
        self.read_u8(Command::ReadDisplayBrightness)
    }

    /// RDCTRLD
    pub fn read_ctrl_display(&self) -> Result<CtrlDisplay> {
        self.read_u8(Command::ReadCtrlDisplay)
            .map(CtrlDisplay::from_raw)
    }

    /// RDCABC
    pub fn read_content_adaptive_brightness(&self) -> Result<ColorEnhancement> {
        self.read_u8(Command::ReadContentAdaptiveBrightness)
            .map(ColorEnhancement::from_raw)
    }

    /// RDCABCMB
    pub fn read_cabc_minimum_brightness(&self) -> Result<u8> {
        self.read_u8(Command::ReadCabcMinimumBrightness)
    }

    /// RDABCSDR
    pub fn read_auto_brightness_self_diagnostic(&self) -> Result<SelfDiagnostic> {
        self.read_u8(Command::ReadAutoBrightnessSelfDiagnostic)
            .map(SelfDiagnostic::from_raw)
    }

    /// Read the scanline currently being refreshed (RDTESCAN)
    pub fn read_scanline(&self) -> Result<u16> {
        let mut line = [0u8; 2];
        self.read_command(Command::GetScanline, &mut line)?;
        Ok(u16::from_be_bytes(line))
    }

    // =========================================================================
    // Mode Switches
    // =========================================================================

    /// NOP
    pub fn nop(&self) -> Result<()> {
        self.send_command(Command::Nop, &[])
    }

    /// Enter partial mode (PTLON)
    pub fn partial_mode_on(&self) -> Result<()> {
        self.send_command(Command::PartialModeOn, &[])
    }

    /// Leave partial/scroll mode (NORON)
    pub fn normal_mode_on(&self) -> Result<()> {
        self.send_command(Command::NormalModeOn, &[])
    }

    /// INVON / INVOFF
    pub fn display_inversion(&self, on: bool) -> Result<()> {
        let command = if on {
            Command::InversionOn
        } else {
            Command::InversionOff
        };
        self.send_command(command, &[])
    }

    /// DISPON / DISPOFF
    pub fn display(&self, on: bool) -> Result<()> {
        let command = if on {
            Command::DisplayOn
        } else {
            Command::DisplayOff
        };
        self.send_command(command, &[])
    }

    /// IDMON / IDMOFF
    pub fn idle_mode(&self, on: bool) -> Result<()> {
        let command = if on {
            Command::IdleModeOn
        } else {
            Command::IdleModeOff
        };
        self.send_command(command, &[])
    }

    /// GAMSET
    pub fn set_gamma(&self, curve: GammaCurve) -> Result<()> {
        self.send_command(Command::GammaSet, &[curve.to_raw()])
    }

    // =========================================================================
    // Addressing
    // =========================================================================

    /// Set the column window (CASET), validated against the orientation.
    pub fn set_column_address(&self, start: u16, end: u16) -> Result<()> {
        self.ensure_ready()?;
        check_range(start, end, self.orientation().max_column())?;
        self.issue(Command::ColumnAddressSet, &range_params(start, end))
    }

    /// Set the row window (RASET), validated against the orientation.
    pub fn set_row_address(&self, start: u16, end: u16) -> Result<()> {
        self.ensure_ready()?;
        check_range(start, end, self.orientation().max_row())?;
        self.issue(Command::RowAddressSet, &range_params(start, end))
    }

    /// Set the partial display area rows (PTLAR)
    pub fn set_partial_area(&self, start: u16, end: u16) -> Result<()> {
        self.ensure_ready()?;
        check_range(start, end, PANEL_HEIGHT - 1)?;
        self.issue(Command::PartialArea, &range_params(start, end))
    }

    /// Define the vertical scroll areas (VSCRDEF).
    ///
    /// The three areas must cover all 320 lines of frame memory. Not
    /// available while rows and columns are exchanged.
    pub fn set_vertical_scroll_definition(
        &self,
        top_fixed: u16,
        scroll: u16,
        bottom_fixed: u16,
    ) -> Result<()> {
        self.ensure_ready()?;
        if self.orientation().row_column_exchange {
            return Err(Error::Unavailable);
        }
        let total = u32::from(top_fixed) + u32::from(scroll) + u32::from(bottom_fixed);
        if total != u32::from(FRAME_MEMORY_LINES) {
            return Err(Error::OutOfRange);
        }
        let [t_hi, t_lo] = top_fixed.to_be_bytes();
        let [s_hi, s_lo] = scroll.to_be_bytes();
        let [b_hi, b_lo] = bottom_fixed.to_be_bytes();
        self.issue(
            Command::VerticalScrollDefinition,
            &[t_hi, t_lo, s_hi, s_lo, b_hi, b_lo],
        )
    }

    /// Set the first line of the scroll area (VSCSAD)
    pub fn set_vertical_scroll_start(&self, line: u16) -> Result<()> {
        self.ensure_ready()?;
        if line > PANEL_HEIGHT - 1 {
            return Err(Error::OutOfRange);
        }
        self.issue(Command::VerticalScrollStartAddress, &line.to_be_bytes())
    }

    // =========================================================================
    // Tearing Effect
    // =========================================================================

    /// TEOFF
    pub fn tearing_effect_off(&self) -> Result<()> {
        self.send_command(Command::TearingEffectOff, &[])
    }

    /// TEON
    pub fn tearing_effect_on(&self, mode: TearingEffectMode) -> Result<()> {
        self.send_command(Command::TearingEffectOn, &[mode.to_raw()])
    }

    /// Line at which the tearing effect output fires (TESCAN)
    pub fn set_tear_scanline(&self, line: u16) -> Result<()> {
        self.ensure_ready()?;
        if line > PANEL_HEIGHT - 1 {
            return Err(Error::OutOfRange);
        }
        self.issue(Command::SetTearScanline, &line.to_be_bytes())
    }

    // =========================================================================
    // Memory Layout and Pixel Format
    // =========================================================================

    /// Write MADCTL and update the cached orientation.
    pub fn set_memory_data_access_control(&self, madctl: MemoryDataAccessControl) -> Result<()> {
        self.send_command(Command::MemoryDataAccessControl, &[madctl.to_raw()])?;
        self.orientation
            .set(DisplayOrientation::from_madctl(&madctl));
        Ok(())
    }

    /// COLMOD
    pub fn set_interface_pixel_format(&self, format: InterfacePixelFormat) -> Result<()> {
        self.send_command(Command::InterfacePixelFormat, &[format.to_raw()])
    }

    // =========================================================================
    // Brightness
    // =========================================================================

    /// WRDISBV
    pub fn set_display_brightness(&self, brightness: u8) -> Result<()> {
        self.send_command(Command::WriteDisplayBrightness, &[brightness])
    }

    /// WRCTRLD
    pub fn set_ctrl_display(&self, ctrl: CtrlDisplay) -> Result<()> {
        self.send_command(Command::WriteCtrlDisplay, &[ctrl.to_raw()])
    }

    /// WRCACE
    pub fn set_color_enhancement(&self, enhancement: ColorEnhancement) -> Result<()> {
        self.send_command(Command::WriteColorEnhancement, &[enhancement.to_raw()])
    }

    /// WRCABCMB
    pub fn set_cabc_minimum_brightness(&self, brightness: u8) -> Result<()> {
        self.send_command(Command::WriteCabcMinimumBrightness, &[brightness])
    }

    // =========================================================================
    // Memory Writes
    // =========================================================================

    /// Write pixel data at the start of the address window (RAMWR)
    pub fn memory_write(&self, data: &[u8]) -> Result<()> {
        self.send_command(Command::MemoryWrite, data)
    }

    /// Continue writing after the last written pixel (RAMWRC)
    pub fn memory_write_continue(&self, data: &[u8]) -> Result<()> {
        self.send_command(Command::MemoryWriteContinue, data)
    }

    /// RAMWR with the pixel data sent by DMA.
    ///
    /// Returns as soon as the transfer is started. The transaction is closed
    /// and `notify` signalled from the completion interrupt.
    pub fn memory_write_async<W: DmaWord>(
        &self,
        buffer: &'static [W],
        notify: Option<&'static CompletionSignal>,
    ) -> Result<()> {
        self.start_memory_write(Command::MemoryWrite, buffer, notify)
    }

    /// RAMWRC with the pixel data sent by DMA.
    pub fn memory_write_continue_async<W: DmaWord>(
        &self,
        buffer: &'static [W],
        notify: Option<&'static CompletionSignal>,
    ) -> Result<()> {
        self.start_memory_write(Command::MemoryWriteContinue, buffer, notify)
    }

    fn start_memory_write<W: DmaWord>(
        &self,
        command: Command,
        buffer: &'static [W],
        notify: Option<&'static CompletionSignal>,
    ) -> Result<()> {
        self.ensure_ready()?;
        if buffer.is_empty() {
            return Err(Error::InvalidLength);
        }

        self.open_transaction()?;
        let started = self
            .write_opcode(command)
            .and_then(|()| self.dma_write(buffer, notify, true));
        if started.is_err() {
            let _ = self.end_transaction();
        }
        started
    }
}
