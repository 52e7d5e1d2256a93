//! ST7789V level-1 command catalogue.

/// Level-1 command opcodes.
///
/// Opcodes follow the ST7789V datasheet, section 9.1. Names spell out the
/// datasheet mnemonic; [`Command::mnemonic`] returns the short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// NOP
    Nop = 0x00,
    /// SWRESET
    SoftwareReset = 0x01,
    /// RDDID
    ReadDisplayId = 0x04,
    /// RDDST
    ReadDisplayStatus = 0x09,
    /// RDDPM
    ReadDisplayPowerMode = 0x0A,
    /// RDDMADCTL
    ReadMemoryDataAccessControl = 0x0B,
    /// RDDCOLMOD
    ReadInterfacePixelFormat = 0x0C,
    /// RDDIM
    ReadDisplayImageMode = 0x0D,
    /// RDDSM
    ReadDisplaySignalMode = 0x0E,
    /// RDDSDR
    ReadSelfDiagnostic = 0x0F,
    /// SLPIN
    SleepIn = 0x10,
    /// SLPOUT
    SleepOut = 0x11,
    /// PTLON
    PartialModeOn = 0x12,
    /// NORON
    NormalModeOn = 0x13,
    /// INVOFF
    InversionOff = 0x20,
    /// INVON
    InversionOn = 0x21,
    /// GAMSET
    GammaSet = 0x26,
    /// DISPOFF
    DisplayOff = 0x28,
    /// DISPON
    DisplayOn = 0x29,
    /// CASET
    ColumnAddressSet = 0x2A,
    /// RASET
    RowAddressSet = 0x2B,
    /// RAMWR
    MemoryWrite = 0x2C,
    /// RAMRD
    MemoryRead = 0x2E,
    /// PTLAR
    PartialArea = 0x30,
    /// VSCRDEF
    VerticalScrollDefinition = 0x33,
    /// TEOFF
    TearingEffectOff = 0x34,
    /// TEON
    TearingEffectOn = 0x35,
    /// MADCTL
    MemoryDataAccessControl = 0x36,
    /// VSCSAD
    VerticalScrollStartAddress = 0x37,
    /// IDMOFF
    IdleModeOff = 0x38,
    /// IDMON
    IdleModeOn = 0x39,
    /// COLMOD
    InterfacePixelFormat = 0x3A,
    /// RAMWRC
    MemoryWriteContinue = 0x3C,
    /// RAMRDC
    MemoryReadContinue = 0x3E,
    /// TESCAN
    SetTearScanline = 0x44,
    /// RDTESCAN
    GetScanline = 0x45,
    /// WRDISBV
    WriteDisplayBrightness = 0x51,
    /// RDDISBV
    ReadDisplayBrightness = 0x52,
    /// WRCTRLD
    WriteCtrlDisplay = 0x53,
    /// RDCTRLD
    ReadCtrlDisplay = 0x54,
    /// WRCACE
    WriteColorEnhancement = 0x55,
    /// RDCABC
    ReadContentAdaptiveBrightness = 0x56,
    /// WRCABCMB
    WriteCabcMinimumBrightness = 0x5E,
    /// RDCABCMB
    ReadCabcMinimumBrightness = 0x5F,
    /// RDABCSDR
    ReadAutoBrightnessSelfDiagnostic = 0x68,
    /// RDID1
    ReadId1 = 0xDA,
    /// RDID2
    ReadId2 = 0xDB,
    /// RDID3
    ReadId3 = 0xDC,
}

impl Command {
    /// Opcode byte sent with D/C low.
    #[inline]
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    /// Whether a read of this command needs one clock of read turnaround
    /// between the opcode and the response.
    ///
    /// Only the multi-byte reads carry the dummy clock; single-byte register
    /// reads answer on the first clock.
    pub const fn needs_dummy_cycle(self) -> bool {
        matches!(
            self,
            Command::ReadDisplayId
                | Command::ReadDisplayStatus
                | Command::MemoryRead
                | Command::MemoryReadContinue
                | Command::GetScanline
        )
    }

    /// Datasheet mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Command::Nop => "NOP",
            Command::SoftwareReset => "SWRESET",
            Command::ReadDisplayId => "RDDID",
            Command::ReadDisplayStatus => "RDDST",
            Command::ReadDisplayPowerMode => "RDDPM",
            Command::ReadMemoryDataAccessControl => "RDDMADCTL",
            Command::ReadInterfacePixelFormat => "RDDCOLMOD",
            Command::ReadDisplayImageMode => "RDDIM",
            Command::ReadDisplaySignalMode => "RDDSM",
            Command::ReadSelfDiagnostic => "RDDSDR",
            Command::SleepIn => "SLPIN",
            Command::SleepOut => "SLPOUT",
            Command::PartialModeOn => "PTLON",
            Command::NormalModeOn => "NORON",
            Command::InversionOff => "INVOFF",
            Command::InversionOn => "INVON",
            Command::GammaSet => "GAMSET",
            Command::DisplayOff => "DISPOFF",
            Command::DisplayOn => "DISPON",
            Command::ColumnAddressSet => "CASET",
            Command::RowAddressSet => "RASET",
            Command::MemoryWrite => "RAMWR",
            Command::MemoryRead => "RAMRD",
            Command::PartialArea => "PTLAR",
            Command::VerticalScrollDefinition => "VSCRDEF",
            Command::TearingEffectOff => "TEOFF",
            Command::TearingEffectOn => "TEON",
            Command::MemoryDataAccessControl => "MADCTL",
            Command::VerticalScrollStartAddress => "VSCSAD",
            Command::IdleModeOff => "IDMOFF",
            Command::IdleModeOn => "IDMON",
            Command::InterfacePixelFormat => "COLMOD",
            Command::MemoryWriteContinue => "RAMWRC",
            Command::MemoryReadContinue => "RAMRDC",
            Command::SetTearScanline => "TESCAN",
            Command::GetScanline => "RDTESCAN",
            Command::WriteDisplayBrightness => "WRDISBV",
            Command::ReadDisplayBrightness => "RDDISBV",
            Command::WriteCtrlDisplay => "WRCTRLD",
            Command::ReadCtrlDisplay => "RDCTRLD",
            Command::WriteColorEnhancement => "WRCACE",
            Command::ReadContentAdaptiveBrightness => "RDCABC",
            Command::WriteCabcMinimumBrightness => "WRCABCMB",
            Command::ReadCabcMinimumBrightness => "RDCABCMB",
            Command::ReadAutoBrightnessSelfDiagnostic => "RDABCSDR",
            Command::ReadId1 => "RDID1",
            Command::ReadId2 => "RDID2",
            Command::ReadId3 => "RDID3",
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.opcode()
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (0x{:02X})", self.mnemonic(), self.opcode())
    }
}
