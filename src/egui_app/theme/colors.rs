//! Color Constants
//!
//! Indigo and amber palette used throughout the revision UI.

use eframe::egui::Color32;

/// Main background - Deep indigo
pub const BG_DARK: Color32 = Color32::from_rgb(0x1E, 0x1B, 0x4B);

/// Top bar background - Darker indigo
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x17, 0x14, 0x3A);

/// Card background - Muted indigo
pub const CARD_BG: Color32 = Color32::from_rgb(0x2E, 0x2A, 0x6B);

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0x4F, 0x46, 0xA5);

/// Hovered widget background
pub const HOVER_ITEM: Color32 = Color32::from_rgb(0x3F, 0x39, 0x8A);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xEE, 0xF2, 0xFF);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xA5, 0xB4, 0xFC);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x1E, 0x1B, 0x4B);

/// Accent color for headings and highlights - Amber
pub const ACCENT: Color32 = Color32::from_rgb(0xFB, 0xBF, 0x24);

/// Button primary background - Pink
pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0xDB, 0x27, 0x77);

/// Button secondary background
pub const BUTTON_SECONDARY: Color32 = Color32::from_rgb(0x43, 0x38, 0xCA);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4A, 0xDE, 0x80);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xF8, 0x71, 0x71);

/// Warning color - Orange
pub const WARNING: Color32 = Color32::from_rgb(0xFB, 0x92, 0x3C);

/// Separator/divider color
pub const SEPARATOR: Color32 = Color32::from_rgb(0x4F, 0x46, 0xA5);

/// Alert window background
pub const ALERT_BG: Color32 = Color32::from_rgb(0xFF, 0xF7, 0xED);
