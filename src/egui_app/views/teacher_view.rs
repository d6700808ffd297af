//! Teacher dashboard and the per-student progress overview.

use eframe::egui;

use crate::egui_app::api::ApiError;
use crate::egui_app::routes::Route;
use crate::egui_app::session::Session;
use crate::egui_app::state::Services;
use crate::egui_app::tasks::Pending;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{loading_row, ViewContext};
use crate::shared::models::{Question, StudentPerformance, StudentProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeacherSection {
    Questions,
    Performance,
}

type DashboardData = (Vec<Question>, Vec<StudentPerformance>);

pub struct TeacherPage {
    pub section: TeacherSection,
    questions: Vec<Question>,
    performance: Vec<StudentPerformance>,
    error: Option<String>,
    request: Pending<Result<DashboardData, ApiError>>,
}

impl TeacherPage {
    pub fn open(services: &Services, session: &Session) -> Self {
        let mut page = Self {
            section: TeacherSection::Questions,
            questions: Vec::new(),
            performance: Vec::new(),
            error: None,
            request: Pending::idle(),
        };
        match session.user.as_ref().map(|u| u.id) {
            Some(teacher_id) => {
                page.request = services.spawn(move |api| async move {
                    tokio::try_join!(api.questions_uploaded_by(teacher_id), api.performance_summary())
                });
            }
            None => page.error = Some("Access Denied: Teachers only.".to_string()),
        }
        page
    }

    fn poll(&mut self) {
        if let Some(result) = self.request.poll() {
            match result {
                Ok((questions, performance)) => {
                    self.questions = questions;
                    self.performance = performance;
                }
                Err(e) => self.error = Some(format!("Failed to load data: {}", e)),
            }
        }
    }
}

pub fn render_dashboard(ui: &mut egui::Ui, page: &mut TeacherPage, cx: &mut ViewContext) {
    page.poll();

    ui.horizontal(|ui| {
        ui.label(styles::heading("👩‍🏫 Teacher Dashboard"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Student Progress Details").clicked() {
                cx.navigate(Route::StudentProgressOverview);
            }
            if ui.button("Upload New Question").clicked() {
                cx.navigate(Route::UploadQuestion);
            }
        });
    });
    ui.add_space(12.0);

    if page.request.is_loading() {
        loading_row(ui, "dashboard");
        return;
    }
    if let Some(error) = &page.error {
        ui.colored_label(colors::ERROR, error.as_str());
        return;
    }

    ui.horizontal(|ui| {
        ui.selectable_value(
            &mut page.section,
            TeacherSection::Questions,
            format!("Your Uploaded Questions ({})", page.questions.len()),
        );
        ui.selectable_value(&mut page.section, TeacherSection::Performance, "Student Performance");
    });
    ui.add_space(8.0);

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        match page.section {
            TeacherSection::Questions => questions_table(ui, &page.questions, cx),
            TeacherSection::Performance => performance_table(ui, &page.performance),
        }
    });
}

fn questions_table(ui: &mut egui::Ui, questions: &[Question], cx: &mut ViewContext) {
    if questions.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "You have not uploaded any questions yet.");
        return;
    }
    egui::Grid::new("teacher_questions").striped(true).num_columns(6).show(ui, |ui| {
        for header in ["ID", "Question", "Type", "Options", "Answer", ""] {
            ui.strong(header);
        }
        ui.end_row();
        for q in questions {
            ui.label(q.id.to_string());
            ui.label(q.question.as_str());
            ui.label(q.kind.label());
            ui.label(q.options.as_deref().unwrap_or("-"));
            ui.label(q.correct_ans.as_str());
            if ui.small_button("✏ Edit").clicked() {
                cx.navigate(Route::EditQuestion(q.id));
            }
            ui.end_row();
        }
    });
}

fn performance_table(ui: &mut egui::Ui, rows: &[StudentPerformance]) {
    if rows.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No performance data yet.");
        return;
    }
    egui::Grid::new("teacher_performance").striped(true).num_columns(5).show(ui, |ui| {
        for header in ["Student ID", "Subject", "Topic", "Accuracy", "Time Spent"] {
            ui.strong(header);
        }
        ui.end_row();
        for row in rows {
            ui.label(row.student_id.to_string());
            ui.label(row.subject_name.as_str());
            ui.label(row.topic_name.as_str());
            ui.colored_label(styles::accuracy_color(row.accuracy), format!("{:.1}%", row.accuracy));
            ui.label(format!("{}s", row.time_spent));
            ui.end_row();
        }
    });
}

/// One student's rows in the progress overview
#[derive(Debug, Clone, PartialEq)]
pub struct StudentGroup {
    pub student_id: i64,
    pub name: String,
    pub class_name: String,
    pub records: Vec<StudentProgress>,
}

impl StudentGroup {
    pub fn average_accuracy(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.records.iter().map(|r| r.accuracy).sum::<f64>() / self.records.len() as f64
        }
    }
}

/// Group rows by student, keeping the order in which students first appear.
pub fn group_by_student(rows: &[StudentProgress]) -> Vec<StudentGroup> {
    let mut groups: Vec<StudentGroup> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|g| g.student_id == row.student_id) {
            Some(group) => group.records.push(row.clone()),
            None => groups.push(StudentGroup {
                student_id: row.student_id,
                name: row.student_name.clone(),
                class_name: row.class_name.clone(),
                records: vec![row.clone()],
            }),
        }
    }
    groups
}

pub struct StudentProgressPage {
    pub filter: String,
    groups: Vec<StudentGroup>,
    error: Option<String>,
    request: Pending<Result<Vec<StudentProgress>, ApiError>>,
}

impl StudentProgressPage {
    pub fn open(services: &Services) -> Self {
        Self {
            filter: String::new(),
            groups: Vec::new(),
            error: None,
            request: services.spawn(|api| async move { api.all_progress().await }),
        }
    }

    fn poll(&mut self) {
        if let Some(result) = self.request.poll() {
            match result {
                Ok(rows) => self.groups = group_by_student(&rows),
                Err(e) => self.error = Some(format!("Failed to load student progress data: {}", e)),
            }
        }
    }
}

pub fn render_student_progress(ui: &mut egui::Ui, page: &mut StudentProgressPage, _cx: &mut ViewContext) {
    page.poll();

    ui.label(styles::heading("📊 Student Progress Overview"));
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Filter by name:");
        ui.text_edit_singleline(&mut page.filter);
    });
    ui.add_space(12.0);

    if page.request.is_loading() {
        loading_row(ui, "student progress");
        return;
    }
    if let Some(error) = &page.error {
        ui.colored_label(colors::ERROR, error.as_str());
        return;
    }
    if page.groups.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No student progress recorded yet.");
        return;
    }

    let filter = page.filter.trim().to_lowercase();
    for group in page
        .groups
        .iter()
        .filter(|g| filter.is_empty() || g.name.to_lowercase().contains(&filter))
    {
        styles::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(styles::subheading(format!(
                    "{} (Class {}) · ID: {}",
                    group.name, group.class_name, group.student_id
                )));
                let average = group.average_accuracy();
                ui.colored_label(styles::accuracy_color(average), format!("avg {:.1}%", average));
            });
            egui::Grid::new(("student_progress", group.student_id))
                .striped(true)
                .num_columns(4)
                .show(ui, |ui| {
                    for header in ["Subject", "Topic", "Accuracy", "Time Spent"] {
                        ui.strong(header);
                    }
                    ui.end_row();
                    for record in &group.records {
                        ui.label(record.subject.as_str());
                        ui.label(record.topic.as_str());
                        ui.colored_label(styles::accuracy_color(record.accuracy), format!("{:.1}%", record.accuracy));
                        ui.label(format!("{}s", record.time_spent));
                        ui.end_row();
                    }
                });
        });
        ui.add_space(8.0);
    }
}
