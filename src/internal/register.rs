//! ST7789V register bit definitions.
//!
//! Bit positions for the parameter and response bytes of the level-1
//! command set. Multi-bit fields are expressed as `*_SHIFT` / `*_MASK` pairs.

// Allow unused constants - these are complete register definitions for reference
#![allow(dead_code)]

/// MADCTL (0x36 / 0x0B) memory data access control
pub mod madctl {
    /// Display data latch order, right to left
    pub const MH: u8 = 1 << 2;
    /// BGR color filter order
    pub const BGR: u8 = 1 << 3;
    /// Line address order, bottom to top
    pub const ML: u8 = 1 << 4;
    /// Row/column exchange
    pub const MV: u8 = 1 << 5;
    /// Column address order, right to left
    pub const MX: u8 = 1 << 6;
    /// Page address order, bottom to top
    pub const MY: u8 = 1 << 7;
}

/// RDDPM (0x0A) display power mode
pub mod power_mode {
    /// Display on
    pub const DISPLAY_ON: u8 = 1 << 2;
    /// Normal display mode on
    pub const NORMAL_MODE: u8 = 1 << 3;
    /// Sleep out
    pub const SLEEP_OUT: u8 = 1 << 4;
    /// Partial mode on
    pub const PARTIAL_MODE: u8 = 1 << 5;
    /// Idle mode on
    pub const IDLE_MODE: u8 = 1 << 6;
    /// Booster voltage on
    pub const BOOSTER_ON: u8 = 1 << 7;
}

/// COLMOD (0x3A / 0x0C) interface pixel format
pub mod colmod {
    /// Control interface color format
    pub const CONTROL_SHIFT: u8 = 0;
    /// Control interface color format mask
    pub const CONTROL_MASK: u8 = 0b0111;
    /// RGB interface color format
    pub const RGB_SHIFT: u8 = 4;
    /// RGB interface color format mask
    pub const RGB_MASK: u8 = 0b0111;

    /// 12 bits per pixel
    pub const FORMAT_12BIT: u8 = 0b011;
    /// 16 bits per pixel
    pub const FORMAT_16BIT: u8 = 0b101;
    /// 18 bits per pixel
    pub const FORMAT_18BIT: u8 = 0b110;
    /// 16M colors, truncated
    pub const FORMAT_16M_TRUNCATED: u8 = 0b111;

    /// 65K colors on the RGB interface
    pub const RGB_65K: u8 = 0b101;
    /// 262K colors on the RGB interface
    pub const RGB_262K: u8 = 0b110;
}

/// RDDIM (0x0D) display image mode
pub mod image_mode {
    /// Gamma curve index
    pub const GAMMA_SHIFT: u8 = 0;
    /// Gamma curve index mask
    pub const GAMMA_MASK: u8 = 0b0111;
    /// Inversion on
    pub const INVERSION: u8 = 1 << 5;
    /// Vertical scrolling on
    pub const VERTICAL_SCROLLING: u8 = 1 << 7;
}

/// RDDSM (0x0E) display signal mode
pub mod signal_mode {
    /// Tearing effect mode (V-blank and H-blank)
    pub const TE_MODE: u8 = 1 << 6;
    /// Tearing effect line on
    pub const TE_ON: u8 = 1 << 7;
}

/// TEON (0x35) parameter
pub mod tearing_effect {
    /// Output both V-blank and H-blank information
    pub const TEM: u8 = 1 << 0;
}

/// RDDSDR (0x0F) / RDABCSDR (0x68) self diagnostic result
pub mod self_diagnostic {
    /// Functionality detection passed
    pub const FUNCTIONALITY: u8 = 1 << 6;
    /// Register loading passed
    pub const REGISTER_LOADING: u8 = 1 << 7;
}

/// WRCTRLD (0x53) / RDCTRLD (0x54) CTRL display
pub mod ctrl_display {
    /// Backlight control on
    pub const BL: u8 = 1 << 2;
    /// Display dimming on
    pub const DD: u8 = 1 << 3;
    /// Brightness control block on
    pub const BCTRL: u8 = 1 << 5;
}

/// WRCACE (0x55) / RDCABC (0x56) color enhancement and CABC
pub mod cace {
    /// Content adaptive brightness control mode
    pub const CABC_SHIFT: u8 = 0;
    /// Content adaptive brightness control mask
    pub const CABC_MASK: u8 = 0b11;
    /// Color enhancement level
    pub const LEVEL_SHIFT: u8 = 4;
    /// Color enhancement level mask
    pub const LEVEL_MASK: u8 = 0b11;
    /// Color enhancement on
    pub const CECTRL: u8 = 1 << 7;
}

/// RDDST (0x09) 32-bit display status, first byte in the top bits
pub mod status {
    /// Tearing effect mode
    pub const TE_MODE: u32 = 1 << 5;
    /// Gamma curve index
    pub const GAMMA_SHIFT: u32 = 6;
    /// Gamma curve index mask
    pub const GAMMA_MASK: u32 = 0b111;
    /// Tearing effect line on
    pub const TE_ON: u32 = 1 << 9;
    /// Display on
    pub const DISPLAY_ON: u32 = 1 << 10;
    /// Inversion on
    pub const INVERSION: u32 = 1 << 13;
    /// Normal display mode on
    pub const NORMAL_MODE: u32 = 1 << 16;
    /// Sleep out
    pub const SLEEP_OUT: u32 = 1 << 17;
    /// Partial mode on
    pub const PARTIAL_MODE: u32 = 1 << 18;
    /// Idle mode on
    pub const IDLE_MODE: u32 = 1 << 19;
    /// Interface pixel format
    pub const PIXEL_FORMAT_SHIFT: u32 = 20;
    /// Interface pixel format mask
    pub const PIXEL_FORMAT_MASK: u32 = 0b111;
    /// Display data latch order
    pub const MH: u32 = 1 << 25;
    /// BGR order
    pub const BGR: u32 = 1 << 26;
    /// Line address order
    pub const ML: u32 = 1 << 27;
    /// Row/column exchange
    pub const MV: u32 = 1 << 28;
    /// Column address order
    pub const MX: u32 = 1 << 29;
    /// Page address order
    pub const MY: u32 = 1 << 30;
    /// Booster voltage on
    pub const BOOSTER_ON: u32 = 1 << 31;
}
