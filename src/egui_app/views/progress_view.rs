use std::collections::HashSet;

use eframe::egui;

use crate::egui_app::api::ApiError;
use crate::egui_app::quiz::{practice_history, PracticeResult};
use crate::egui_app::session::Session;
use crate::egui_app::state::Services;
use crate::egui_app::tasks::Pending;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{loading_row, ViewContext};
use crate::shared::models::{Subject, SubjectPerformance};

pub struct ProgressPage {
    subjects: Option<Vec<Subject>>,
    performance: Vec<SubjectPerformance>,
    history: Vec<PracticeResult>,
    error: Option<String>,
    subjects_req: Pending<Result<Vec<Subject>, ApiError>>,
    performance_req: Pending<Result<Vec<SubjectPerformance>, ApiError>>,
}

impl ProgressPage {
    pub fn open(services: &Services, session: &Session) -> Self {
        let mut page = Self {
            subjects: None,
            performance: Vec::new(),
            history: practice_history(services.store().as_ref()),
            error: None,
            subjects_req: Pending::idle(),
            performance_req: Pending::idle(),
        };

        let Some(user) = session.user.clone() else {
            page.error = Some("Your profile could not be read. Please login again.".to_string());
            return page;
        };
        if let Some(class) = user.student_class.clone() {
            page.subjects_req = services.spawn(move |api| async move { api.subjects(&class).await });
        }
        page.performance_req = services.spawn(move |api| async move { api.subject_progress(user.id).await });
        page
    }

    fn poll(&mut self) {
        if let Some(result) = self.subjects_req.poll() {
            match result {
                Ok(subjects) => self.subjects = Some(subjects),
                Err(e) => tracing::warn!(target: "revisewise::ui", error = %e, "subjects unavailable"),
            }
        }
        if let Some(result) = self.performance_req.poll() {
            match result {
                Ok(rows) => self.performance = rows,
                Err(e) => self.error = Some(format!("Failed to load progress data: {}", e)),
            }
        }
    }
}

/// Rows for subjects the student is enrolled in. Without a subject list
/// every row is kept.
pub fn visible_performance<'a>(
    rows: &'a [SubjectPerformance],
    subjects: Option<&[Subject]>,
) -> Vec<&'a SubjectPerformance> {
    match subjects {
        Some(subjects) => {
            let allowed: HashSet<&str> = subjects.iter().map(|s| s.name.as_str()).collect();
            rows.iter().filter(|row| allowed.contains(row.subject.as_str())).collect()
        }
        None => rows.iter().collect(),
    }
}

/// Mean score of the practice history, as a percentage
pub fn practice_average(history: &[PracticeResult]) -> Option<f64> {
    if history.is_empty() {
        None
    } else {
        Some(history.iter().map(|r| r.score).sum::<f64>() / history.len() as f64)
    }
}

pub fn render(ui: &mut egui::Ui, page: &mut ProgressPage, _cx: &mut ViewContext) {
    page.poll();

    ui.label(styles::heading("📈 My Progress"));
    ui.add_space(12.0);

    if let Some(error) = &page.error {
        ui.colored_label(colors::ERROR, error.as_str());
        ui.add_space(8.0);
    }

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(styles::subheading("Subject-wise accuracy"));
        ui.add_space(8.0);

        if page.performance_req.is_loading() {
            loading_row(ui, "progress");
            return;
        }
        let rows = visible_performance(&page.performance, page.subjects.as_deref());
        if rows.is_empty() {
            ui.colored_label(colors::TEXT_SECONDARY, "No attempts recorded yet.");
        }
        egui::Grid::new("subject_progress").num_columns(3).spacing([16.0, 6.0]).show(ui, |ui| {
            for row in rows {
                ui.label(row.subject.as_str());
                ui.add(
                    egui::ProgressBar::new((row.accuracy / 100.0).clamp(0.0, 1.0) as f32)
                        .desired_width(240.0)
                        .fill(styles::accuracy_color(row.accuracy))
                        .text(format!("{:.0}%", row.accuracy)),
                );
                ui.colored_label(colors::TEXT_SECONDARY, format!("{} attempts", row.attempts));
                ui.end_row();
            }
        });
    });

    ui.add_space(16.0);
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(styles::subheading("Practice history"));
        if let Some(average) = practice_average(&page.history) {
            ui.colored_label(
                styles::accuracy_color(average),
                format!("Average {:.0}% over {} quizzes", average, page.history.len()),
            );
        }
        ui.add_space(8.0);

        if page.history.is_empty() {
            ui.colored_label(colors::TEXT_SECONDARY, "Take a practice quiz to see it here.");
            return;
        }
        egui::Grid::new("practice_history").striped(true).num_columns(4).show(ui, |ui| {
            for result in page.history.iter().rev() {
                match &result.chapter_info {
                    Some(chapter) => {
                        ui.label(chapter.subject_name.as_str());
                        ui.label(chapter.chapter_name.as_str());
                    }
                    None => {
                        ui.label("Practice");
                        ui.label("");
                    }
                }
                ui.colored_label(styles::accuracy_color(result.score), format!("{:.0}%", result.score));
                ui.colored_label(colors::TEXT_SECONDARY, result.completed_at.format("%d %b %Y %H:%M").to_string());
                ui.end_row();
            }
        });
    });
}
