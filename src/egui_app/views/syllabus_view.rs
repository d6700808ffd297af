use eframe::egui;

use crate::egui_app::routes::{home_for, Route};
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::ViewContext;
use crate::shared::syllabus::{class_label, classes, subjects_for};

pub struct SyllabusPage {
    pub selected_class: String,
}

impl Default for SyllabusPage {
    fn default() -> Self {
        Self {
            selected_class: class_label(1),
        }
    }
}

pub fn render(ui: &mut egui::Ui, page: &mut SyllabusPage, cx: &mut ViewContext) {
    ui.label(styles::heading("🎓 Syllabus"));
    ui.add_space(12.0);

    ui.horizontal_wrapped(|ui| {
        for class in classes() {
            let selected = page.selected_class == class;
            if ui.selectable_label(selected, class.as_str()).clicked() {
                page.selected_class = class;
            }
        }
    });
    ui.add_space(16.0);

    styles::card_frame().show(ui, |ui| {
        ui.label(styles::subheading(format!("Subjects in {}", page.selected_class)));
        ui.add_space(8.0);
        for subject in subjects_for(&page.selected_class) {
            ui.colored_label(colors::TEXT_LIGHT, format!("📖 {}", subject));
        }
    });

    ui.add_space(16.0);
    match cx.session.role() {
        Some(role) if cx.session.is_logged_in => {
            if ui.add(styles::primary_button("Start practising")).clicked() {
                cx.navigate(home_for(role));
            }
        }
        _ => {
            ui.colored_label(colors::TEXT_SECONDARY, "Log in to take practice quizzes.");
            if ui.link("Login").clicked() {
                cx.navigate(Route::Login);
            }
        }
    }
}
