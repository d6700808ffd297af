//! Theme Module
//!
//! Color scheme and styling helpers for the revision client:
//!
//! - Color constants for the indigo/amber theme
//! - Frame builders and text styles shared by the pages
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     ui.label(styles::subheading("Your progress"));
//! });
//! ```

pub mod colors;
pub mod styles;
