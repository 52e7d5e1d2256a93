//! Board-specific helpers and pin mappings.
//!
//! This module provides wiring constants for common ST7789V setups to reduce
//! bring-up boilerplate.
//!
//! # Overview
//!
//! A board helper records which pins and which serial peripheral the panel
//! is wired to, plus a matching [`DisplayConfig`](crate::DisplayConfig). The
//! HAL crate still owns pin muxing; these constants only say where to look.
//!
//! # Supported Boards
//!
//! - Raspberry Pi Pico (RP2040, SPI0 on GPIO16..=20)

pub mod pico;
