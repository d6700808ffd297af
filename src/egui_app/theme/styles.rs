//! Theme Styling Functions
//!
//! Helpers that apply the palette consistently across pages.

use eframe::egui::{self, Color32, CornerRadius, RichText, Stroke};
use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.window_fill = colors::ALERT_BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::CARD_BORDER);
    style.visuals.panel_fill = colors::BG_DARK;
    style.visuals.override_text_color = Some(colors::TEXT_LIGHT);

    style.visuals.widgets.noninteractive.bg_fill = colors::CARD_BG;
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.widgets.inactive.bg_fill = colors::BUTTON_SECONDARY;
    style.visuals.widgets.inactive.weak_bg_fill = colors::BUTTON_SECONDARY;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.widgets.hovered.bg_fill = colors::HOVER_ITEM;
    style.visuals.widgets.hovered.weak_bg_fill = colors::HOVER_ITEM;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.widgets.active.bg_fill = colors::BUTTON_PRIMARY;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.extreme_bg_color = colors::TOP_BAR_BG;
    style.visuals.selection.bg_fill = colors::BUTTON_PRIMARY;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Create a frame style for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame style for the page area
pub fn page_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(24))
}

/// Rounded panel grouping related content
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::CARD_BORDER))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(egui::Margin::same(16))
}

/// Create a frame for modal dialogs
pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::ALERT_BG)
        .stroke(Stroke::new(2.0, colors::WARNING))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(egui::Margin::same(20))
        .shadow(egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(60),
        })
}

pub fn heading(text: impl Into<String>) -> RichText {
    RichText::new(text).size(28.0).strong().color(colors::ACCENT)
}

pub fn subheading(text: impl Into<String>) -> RichText {
    RichText::new(text).size(18.0).strong().color(colors::TEXT_LIGHT)
}

/// Wide filled button used for the main action of a page
pub fn primary_button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(RichText::new(text).size(16.0).color(colors::TEXT_LIGHT))
        .fill(colors::BUTTON_PRIMARY)
        .corner_radius(CornerRadius::same(6))
        .min_size(egui::vec2(160.0, 32.0))
}

/// Inline error or success line. Errors win when both are set.
pub fn status_line(ui: &mut egui::Ui, error: Option<&str>, notice: Option<&str>) {
    if let Some(error) = error {
        ui.label(RichText::new(error).color(colors::ERROR));
    } else if let Some(notice) = notice {
        ui.label(RichText::new(notice).color(colors::SUCCESS));
    }
}

/// Color for an accuracy percentage
pub fn accuracy_color(accuracy: f64) -> Color32 {
    if accuracy >= 80.0 {
        colors::SUCCESS
    } else if accuracy >= 50.0 {
        colors::WARNING
    } else {
        colors::ERROR
    }
}
