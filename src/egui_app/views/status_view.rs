//! Static pages (about, 403, 404) and the connection check.

use eframe::egui;

use crate::egui_app::api::ApiError;
use crate::egui_app::routes::Route;
use crate::egui_app::state::Services;
use crate::egui_app::tasks::Pending;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{loading_row, ViewContext};
use crate::shared::models::Subject;

pub struct ConnectionPage {
    request: Pending<Result<Vec<Subject>, ApiError>>,
    result: Option<Result<usize, String>>,
}

impl ConnectionPage {
    pub fn open(services: &Services) -> Self {
        Self {
            request: services.spawn(|api| async move { api.health().await }),
            result: None,
        }
    }

    fn poll(&mut self) {
        if let Some(result) = self.request.poll() {
            self.result = Some(result.map(|subjects| subjects.len()).map_err(|e| e.to_string()));
        }
    }
}

pub fn render_connection(ui: &mut egui::Ui, page: &mut ConnectionPage, cx: &mut ViewContext) {
    page.poll();

    ui.label(styles::heading("Connection Check"));
    ui.add_space(8.0);
    ui.colored_label(colors::TEXT_SECONDARY, format!("Server: {}", cx.services.config.server_url()));
    ui.add_space(16.0);

    match &page.result {
        None => loading_row(ui, "subjects"),
        Some(Ok(count)) => {
            ui.colored_label(colors::SUCCESS, format!("✅ Connected. {} subjects available.", count));
        }
        Some(Err(e)) => {
            ui.colored_label(colors::ERROR, format!("❌ {}", e));
        }
    }

    ui.add_space(16.0);
    if ui.add_enabled(!page.request.is_loading(), egui::Button::new("Retry")).clicked() {
        *page = ConnectionPage::open(cx.services);
    }
}

pub fn render_about(ui: &mut egui::Ui) {
    ui.label(styles::heading("About ReviseWise"));
    ui.add_space(12.0);
    styles::card_frame().show(ui, |ui| {
        ui.colored_label(
            colors::TEXT_LIGHT,
            "ReviseWise helps students from Class 1 to 12 revise with short practice quizzes.",
        );
        ui.add_space(8.0);
        ui.colored_label(colors::TEXT_SECONDARY, "• Students pick a subject and topic and take a timed quiz.");
        ui.colored_label(colors::TEXT_SECONDARY, "• Teachers upload questions and follow their students' progress.");
        ui.colored_label(colors::TEXT_SECONDARY, "• Admins manage subjects, questions and accounts.");
    });
}

pub fn render_forbidden(ui: &mut egui::Ui, cx: &mut ViewContext) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(egui::RichText::new("403").size(64.0).strong().color(colors::ERROR));
        ui.label(styles::subheading("You don't have permission to view this page."));
        ui.add_space(20.0);
        if ui.add(styles::primary_button("Back to home")).clicked() {
            cx.navigate(Route::Landing);
        }
    });
}

pub fn render_not_found(ui: &mut egui::Ui, path: &str, cx: &mut ViewContext) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(egui::RichText::new("404").size(64.0).strong().color(colors::WARNING));
        ui.label(styles::subheading(format!("No page at {}", path)));
        ui.add_space(20.0);
        if ui.add(styles::primary_button("Back to home")).clicked() {
            cx.navigate(Route::Landing);
        }
    });
}
