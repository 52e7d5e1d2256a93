//! Bit-packed ST7789V parameter and response registers.
//!
//! Each register is a plain struct of decoded fields with `from_raw` and
//! `to_raw` conversions. Bit positions live in `internal::register` and
//! follow the ST7789V datasheet, section 9.1.

use crate::internal::constants::{PANEL_HEIGHT, PANEL_WIDTH};
use crate::internal::register::{
    cace, colmod, ctrl_display, image_mode, madctl, power_mode, self_diagnostic, signal_mode,
    status, tearing_effect,
};

#[inline]
const fn bit(on: bool, mask: u8) -> u8 {
    if on { mask } else { 0 }
}

// =============================================================================
// Memory Data Access Control (MADCTL)
// =============================================================================

/// Memory data access control (MADCTL, 0x36 / RDDMADCTL, 0x0B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MemoryDataAccessControl {
    /// MY - page address order, bottom to top
    pub page_bottom_to_top: bool,
    /// MX - column address order, right to left
    pub column_right_to_left: bool,
    /// MV - row/column exchange
    pub row_column_exchange: bool,
    /// ML - line address order, bottom to top
    pub line_bottom_to_top: bool,
    /// BGR instead of RGB color order
    pub bgr: bool,
    /// MH - display data latch order, right to left
    pub latch_right_to_left: bool,
}

impl MemoryDataAccessControl {
    /// Decode a MADCTL byte
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            page_bottom_to_top: raw & madctl::MY != 0,
            column_right_to_left: raw & madctl::MX != 0,
            row_column_exchange: raw & madctl::MV != 0,
            line_bottom_to_top: raw & madctl::ML != 0,
            bgr: raw & madctl::BGR != 0,
            latch_right_to_left: raw & madctl::MH != 0,
        }
    }

    /// Encode as a MADCTL parameter byte
    pub const fn to_raw(&self) -> u8 {
        bit(self.page_bottom_to_top, madctl::MY)
            | bit(self.column_right_to_left, madctl::MX)
            | bit(self.row_column_exchange, madctl::MV)
            | bit(self.line_bottom_to_top, madctl::ML)
            | bit(self.bgr, madctl::BGR)
            | bit(self.latch_right_to_left, madctl::MH)
    }

    /// Set the row/column exchange flag (landscape when true)
    #[must_use]
    pub const fn with_row_column_exchange(mut self, enabled: bool) -> Self {
        self.row_column_exchange = enabled;
        self
    }

    /// Set BGR color order
    #[must_use]
    pub const fn with_bgr(mut self, enabled: bool) -> Self {
        self.bgr = enabled;
        self
    }
}

// =============================================================================
// Display Orientation
// =============================================================================

/// Cached addressing orientation, derived from the MV bit of MADCTL.
///
/// Address windows are validated against this before they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayOrientation {
    /// Rows and columns are exchanged (MV = 1)
    pub row_column_exchange: bool,
}

impl DisplayOrientation {
    /// Portrait orientation (MV = 0), the reset default
    pub const fn portrait() -> Self {
        Self {
            row_column_exchange: false,
        }
    }

    /// Orientation implied by a MADCTL value
    pub const fn from_madctl(madctl: &MemoryDataAccessControl) -> Self {
        Self {
            row_column_exchange: madctl.row_column_exchange,
        }
    }

    /// Last addressable column
    pub const fn max_column(&self) -> u16 {
        if self.row_column_exchange {
            PANEL_HEIGHT - 1
        } else {
            PANEL_WIDTH - 1
        }
    }

    /// Last addressable row
    pub const fn max_row(&self) -> u16 {
        if self.row_column_exchange {
            PANEL_WIDTH - 1
        } else {
            PANEL_HEIGHT - 1
        }
    }
}

// =============================================================================
// Display Power Mode (RDDPM)
// =============================================================================

/// Display power mode (RDDPM, 0x0A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerMode {
    /// Booster voltage on
    pub booster_on: bool,
    /// Idle mode on
    pub idle_mode: bool,
    /// Partial mode on
    pub partial_mode: bool,
    /// Sleep out (false while sleeping)
    pub sleep_out: bool,
    /// Normal display mode on
    pub normal_mode: bool,
    /// Display on
    pub display_on: bool,
}

impl PowerMode {
    /// Decode an RDDPM response byte
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            booster_on: raw & power_mode::BOOSTER_ON != 0,
            idle_mode: raw & power_mode::IDLE_MODE != 0,
            partial_mode: raw & power_mode::PARTIAL_MODE != 0,
            sleep_out: raw & power_mode::SLEEP_OUT != 0,
            normal_mode: raw & power_mode::NORMAL_MODE != 0,
            display_on: raw & power_mode::DISPLAY_ON != 0,
        }
    }

    /// Encode back into the response byte layout
    pub const fn to_raw(&self) -> u8 {
        bit(self.booster_on, power_mode::BOOSTER_ON)
            | bit(self.idle_mode, power_mode::IDLE_MODE)
            | bit(self.partial_mode, power_mode::PARTIAL_MODE)
            | bit(self.sleep_out, power_mode::SLEEP_OUT)
            | bit(self.normal_mode, power_mode::NORMAL_MODE)
            | bit(self.display_on, power_mode::DISPLAY_ON)
    }
}

// =============================================================================
// Interface Pixel Format (COLMOD)
// =============================================================================

/// Control interface color format (COLMOD bits 0-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 12 bits per pixel
    Bits12,
    /// 16 bits per pixel (RGB565)
    #[default]
    Bits16,
    /// 18 bits per pixel (RGB666)
    Bits18,
    /// 16M colors, truncated to 18 bits
    Bits16MTruncated,
    /// Reserved encoding, kept as read
    Reserved(u8),
}

impl PixelFormat {
    /// Decode the 3-bit field
    pub const fn from_bits(bits: u8) -> Self {
        match bits & colmod::CONTROL_MASK {
            colmod::FORMAT_12BIT => Self::Bits12,
            colmod::FORMAT_16BIT => Self::Bits16,
            colmod::FORMAT_18BIT => Self::Bits18,
            colmod::FORMAT_16M_TRUNCATED => Self::Bits16MTruncated,
            other => Self::Reserved(other),
        }
    }

    /// Encode the 3-bit field
    pub const fn bits(self) -> u8 {
        match self {
            Self::Bits12 => colmod::FORMAT_12BIT,
            Self::Bits16 => colmod::FORMAT_16BIT,
            Self::Bits18 => colmod::FORMAT_18BIT,
            Self::Bits16MTruncated => colmod::FORMAT_16M_TRUNCATED,
            Self::Reserved(bits) => bits & colmod::CONTROL_MASK,
        }
    }
}

/// RGB interface color format (COLMOD bits 4-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbInterfaceFormat {
    /// 65K colors
    #[default]
    Rgb65K,
    /// 262K colors
    Rgb262K,
    /// Reserved encoding, kept as read
    Reserved(u8),
}

impl RgbInterfaceFormat {
    /// Decode the 3-bit field
    pub const fn from_bits(bits: u8) -> Self {
        match bits & colmod::RGB_MASK {
            colmod::RGB_65K => Self::Rgb65K,
            colmod::RGB_262K => Self::Rgb262K,
            other => Self::Reserved(other),
        }
    }

    /// Encode the 3-bit field
    pub const fn bits(self) -> u8 {
        match self {
            Self::Rgb65K => colmod::RGB_65K,
            Self::Rgb262K => colmod::RGB_262K,
            Self::Reserved(bits) => bits & colmod::RGB_MASK,
        }
    }
}

/// Interface pixel format (COLMOD, 0x3A / RDDCOLMOD, 0x0C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfacePixelFormat {
    /// RGB interface color format
    pub rgb_interface: RgbInterfaceFormat,
    /// Control (serial) interface color format
    pub control_interface: PixelFormat,
}

impl InterfacePixelFormat {
    /// 65K colors, 16 bits per pixel (0x55)
    pub const RGB565: Self = Self {
        rgb_interface: RgbInterfaceFormat::Rgb65K,
        control_interface: PixelFormat::Bits16,
    };

    /// 262K colors, 18 bits per pixel (0x66), the reset default
    pub const RGB666: Self = Self {
        rgb_interface: RgbInterfaceFormat::Rgb262K,
        control_interface: PixelFormat::Bits18,
    };

    /// Decode a COLMOD byte
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            rgb_interface: RgbInterfaceFormat::from_bits(raw >> colmod::RGB_SHIFT),
            control_interface: PixelFormat::from_bits(raw >> colmod::CONTROL_SHIFT),
        }
    }

    /// Encode as a COLMOD parameter byte
    pub const fn to_raw(&self) -> u8 {
        (self.rgb_interface.bits() << colmod::RGB_SHIFT)
            | (self.control_interface.bits() << colmod::CONTROL_SHIFT)
    }
}

// =============================================================================
// Gamma / Image Mode
// =============================================================================

/// Predefined gamma curves (GAMSET, 0x26).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GammaCurve {
    /// Gamma curve 1 (G2.2)
    #[default]
    Curve1 = 0x01,
    /// Gamma curve 2 (G1.8)
    Curve2 = 0x02,
    /// Gamma curve 3 (G2.5)
    Curve3 = 0x04,
    /// Gamma curve 4 (G1.0)
    Curve4 = 0x08,
}

impl GammaCurve {
    /// GAMSET parameter byte
    pub const fn to_raw(self) -> u8 {
        self as u8
    }

    /// Decode the GC0..GC3 index reported by RDDIM and RDDST
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Curve1),
            1 => Some(Self::Curve2),
            2 => Some(Self::Curve3),
            3 => Some(Self::Curve4),
            _ => None,
        }
    }

    /// GC index as reported in status reads
    pub const fn index(self) -> u8 {
        match self {
            Self::Curve1 => 0,
            Self::Curve2 => 1,
            Self::Curve3 => 2,
            Self::Curve4 => 3,
        }
    }
}

/// Display image mode (RDDIM, 0x0D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageMode {
    /// Vertical scrolling on
    pub vertical_scrolling: bool,
    /// Inversion on
    pub inversion: bool,
    /// Selected gamma curve (`None` for a reserved index)
    pub gamma: Option<GammaCurve>,
}

impl ImageMode {
    /// Decode an RDDIM response byte
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            vertical_scrolling: raw & image_mode::VERTICAL_SCROLLING != 0,
            inversion: raw & image_mode::INVERSION != 0,
            gamma: GammaCurve::from_index((raw >> image_mode::GAMMA_SHIFT) & image_mode::GAMMA_MASK),
        }
    }

    /// Encode back into the response byte layout
    pub const fn to_raw(&self) -> u8 {
        let gamma = match self.gamma {
            Some(curve) => curve.index() << image_mode::GAMMA_SHIFT,
            None => 0,
        };
        bit(self.vertical_scrolling, image_mode::VERTICAL_SCROLLING)
            | bit(self.inversion, image_mode::INVERSION)
            | gamma
    }
}

// =============================================================================
// Tearing Effect / Signal Mode
// =============================================================================

/// Tearing effect output mode (TEON, 0x35).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TearingEffectMode {
    /// V-blanking information only
    #[default]
    VBlankOnly,
    /// V-blanking and H-blanking information
    VAndHBlank,
}

impl TearingEffectMode {
    /// TEON parameter byte
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::VBlankOnly => 0,
            Self::VAndHBlank => tearing_effect::TEM,
        }
    }
}

/// Display signal mode (RDDSM, 0x0E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalMode {
    /// Tearing effect line on
    pub tearing_effect_on: bool,
    /// Tearing effect output mode
    pub tearing_effect_mode: TearingEffectMode,
}

impl SignalMode {
    /// Decode an RDDSM response byte
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            tearing_effect_on: raw & signal_mode::TE_ON != 0,
            tearing_effect_mode: if raw & signal_mode::TE_MODE != 0 {
                TearingEffectMode::VAndHBlank
            } else {
                TearingEffectMode::VBlankOnly
            },
        }
    }

    /// Encode back into the response byte layout
    pub const fn to_raw(&self) -> u8 {
        bit(self.tearing_effect_on, signal_mode::TE_ON)
            | bit(
                matches!(self.tearing_effect_mode, TearingEffectMode::VAndHBlank),
                signal_mode::TE_MODE,
            )
    }
}

// =============================================================================
// Self Diagnostic
// =============================================================================

/// Self diagnostic result (RDDSDR, 0x0F / RDABCSDR, 0x68).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfDiagnostic {
    /// Register loading detection
    pub register_loading: bool,
    /// Functionality detection
    pub functionality_detection: bool,
}

impl SelfDiagnostic {
    /// Decode a self diagnostic byte
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            register_loading: raw & self_diagnostic::REGISTER_LOADING != 0,
            functionality_detection: raw & self_diagnostic::FUNCTIONALITY != 0,
        }
    }

    /// Encode back into the response byte layout
    pub const fn to_raw(&self) -> u8 {
        bit(self.register_loading, self_diagnostic::REGISTER_LOADING)
            | bit(self.functionality_detection, self_diagnostic::FUNCTIONALITY)
    }
}

// =============================================================================
// CTRL Display
// =============================================================================

/// CTRL display (WRCTRLD, 0x53 / RDCTRLD, 0x54).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CtrlDisplay {
    /// Brightness control block on
    pub brightness_control: bool,
    /// Display dimming on
    pub dimming: bool,
    /// Backlight control on
    pub backlight: bool,
}

impl CtrlDisplay {
    /// Decode a CTRL display byte
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            brightness_control: raw & ctrl_display::BCTRL != 0,
            dimming: raw & ctrl_display::DD != 0,
            backlight: raw & ctrl_display::BL != 0,
        }
    }

    /// Encode as a WRCTRLD parameter byte
    pub const fn to_raw(&self) -> u8 {
        bit(self.brightness_control, ctrl_display::BCTRL)
            | bit(self.dimming, ctrl_display::DD)
            | bit(self.backlight, ctrl_display::BL)
    }
}

// =============================================================================
// Color Enhancement / CABC
// =============================================================================

/// Color enhancement level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnhancementLevel {
    /// Low enhancement
    #[default]
    Low,
    /// Medium enhancement
    Medium,
    /// High enhancement
    High,
}

impl EnhancementLevel {
    /// Decode the 2-bit field; the reserved `0b10` reads as `High`
    pub const fn from_bits(bits: u8) -> Self {
        match bits & cace::LEVEL_MASK {
            0b00 => Self::Low,
            0b01 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Encode the 2-bit field
    pub const fn bits(self) -> u8 {
        match self {
            Self::Low => 0b00,
            Self::Medium => 0b01,
            Self::High => 0b11,
        }
    }
}

/// Content adaptive brightness control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ContentAdaptiveMode {
    /// CABC off
    #[default]
    Off = 0b00,
    /// User interface mode
    UserInterface = 0b01,
    /// Still picture mode
    StillPicture = 0b10,
    /// Moving image mode
    MovingImage = 0b11,
}

impl ContentAdaptiveMode {
    /// Decode the 2-bit field
    pub const fn from_bits(bits: u8) -> Self {
        match bits & cace::CABC_MASK {
            0b00 => Self::Off,
            0b01 => Self::UserInterface,
            0b10 => Self::StillPicture,
            _ => Self::MovingImage,
        }
    }
}

/// Color enhancement and content adaptive brightness (WRCACE, 0x55 / RDCABC, 0x56).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorEnhancement {
    /// Color enhancement on
    pub enabled: bool,
    /// Enhancement level
    pub level: EnhancementLevel,
    /// Content adaptive brightness mode
    pub content_adaptive: ContentAdaptiveMode,
}

impl ColorEnhancement {
    /// Decode a WRCACE / RDCABC byte
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            enabled: raw & cace::CECTRL != 0,
            level: EnhancementLevel::from_bits(raw >> cace::LEVEL_SHIFT),
            content_adaptive: ContentAdaptiveMode::from_bits(raw >> cace::CABC_SHIFT),
        }
    }

    /// Encode as a WRCACE parameter byte
    pub const fn to_raw(&self) -> u8 {
        bit(self.enabled, cace::CECTRL)
            | (self.level.bits() << cace::LEVEL_SHIFT)
            | ((self.content_adaptive as u8) << cace::CABC_SHIFT)
    }
}

// =============================================================================
// Display Status (RDDST)
// =============================================================================

/// 32-bit display status (RDDST, 0x09).
///
/// The four response bytes are packed big-endian, so the first byte
/// (booster and MADCTL bits) lands in bits 24-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayStatus {
    raw: u32,
}

impl DisplayStatus {
    /// Wrap a raw status word
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw }
    }

    /// Build from the four response bytes in wire order
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::from_raw(u32::from_be_bytes(bytes))
    }

    /// Raw status word
    pub const fn to_raw(&self) -> u32 {
        self.raw
    }

    #[inline]
    const fn flag(&self, mask: u32) -> bool {
        self.raw & mask != 0
    }

    /// Booster voltage on
    pub const fn booster_on(&self) -> bool {
        self.flag(status::BOOSTER_ON)
    }

    /// Memory access control bits mirrored from MADCTL
    pub const fn memory_access(&self) -> MemoryDataAccessControl {
        MemoryDataAccessControl {
            page_bottom_to_top: self.flag(status::MY),
            column_right_to_left: self.flag(status::MX),
            row_column_exchange: self.flag(status::MV),
            line_bottom_to_top: self.flag(status::ML),
            bgr: self.flag(status::BGR),
            latch_right_to_left: self.flag(status::MH),
        }
    }

    /// Control interface pixel format
    pub const fn pixel_format(&self) -> PixelFormat {
        PixelFormat::from_bits(
            ((self.raw >> status::PIXEL_FORMAT_SHIFT) & status::PIXEL_FORMAT_MASK) as u8,
        )
    }

    /// Idle mode on
    pub const fn idle_mode(&self) -> bool {
        self.flag(status::IDLE_MODE)
    }

    /// Partial mode on
    pub const fn partial_mode(&self) -> bool {
        self.flag(status::PARTIAL_MODE)
    }

    /// Sleep out
    pub const fn sleep_out(&self) -> bool {
        self.flag(status::SLEEP_OUT)
    }

    /// Normal display mode on
    pub const fn normal_mode(&self) -> bool {
        self.flag(status::NORMAL_MODE)
    }

    /// Inversion on
    pub const fn inversion(&self) -> bool {
        self.flag(status::INVERSION)
    }

    /// Display on
    pub const fn display_on(&self) -> bool {
        self.flag(status::DISPLAY_ON)
    }

    /// Tearing effect line on
    pub const fn tearing_effect_on(&self) -> bool {
        self.flag(status::TE_ON)
    }

    /// Selected gamma curve
    pub const fn gamma(&self) -> Option<GammaCurve> {
        GammaCurve::from_index(((self.raw >> status::GAMMA_SHIFT) & status::GAMMA_MASK) as u8)
    }

    /// Tearing effect mode
    pub const fn tearing_effect_mode(&self) -> TearingEffectMode {
        if self.flag(status::TE_MODE) {
            TearingEffectMode::VAndHBlank
        } else {
            TearingEffectMode::VBlankOnly
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
