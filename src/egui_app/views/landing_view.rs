use eframe::egui;

use crate::egui_app::routes::{home_for, Route};
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::ViewContext;

pub fn render(ui: &mut egui::Ui, cx: &mut ViewContext) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(egui::RichText::new("📚 ReviseWise").size(48.0).strong().color(colors::ACCENT));
        ui.add_space(10.0);
        ui.colored_label(
            colors::TEXT_LIGHT,
            egui::RichText::new("Practice, revise and track your progress, Class 1 to 12.").size(18.0),
        );
        ui.add_space(40.0);

        match &cx.session.user {
            Some(user) if cx.session.is_logged_in => {
                ui.colored_label(colors::TEXT_SECONDARY, format!("Welcome back, {}!", user.name));
                ui.add_space(20.0);
                if ui.add(styles::primary_button("Go to my dashboard")).clicked() {
                    cx.navigate(home_for(user.role));
                }
            }
            _ => {
                if ui.add(styles::primary_button("Login")).clicked() {
                    cx.navigate(Route::Login);
                }
                ui.add_space(12.0);
                if ui.add(styles::primary_button("Create Account").fill(colors::BUTTON_SECONDARY)).clicked() {
                    cx.navigate(Route::Signup);
                }
            }
        }

        ui.add_space(30.0);
        ui.horizontal(|ui| {
            ui.add_space((ui.available_width() - 320.0).max(0.0) / 2.0);
            if ui.link("Browse the syllabus").clicked() {
                cx.navigate(Route::Syllabus);
            }
            ui.add_space(20.0);
            if ui.link("Check server connection").clicked() {
                cx.navigate(Route::ConnectionCheck);
            }
        });
    });
}
