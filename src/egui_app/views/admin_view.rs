use eframe::egui;

use crate::egui_app::api::ApiError;
use crate::egui_app::routes::Route;
use crate::egui_app::state::Services;
use crate::egui_app::tasks::Pending;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{loading_row, ViewContext};
use crate::shared::models::{Question, Subject, SubjectPayload, UserSummary};
use crate::shared::syllabus::{class_label, class_number, classes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    Subjects,
    Questions,
    Users,
}

/// Completed admin write, used to decide what to refresh
#[derive(Debug, Clone, PartialEq)]
enum AdminWrite {
    SubjectAdded,
    SubjectRenamed,
    SubjectDeleted(i64),
    QuestionDeleted(i64),
}

pub struct AdminPage {
    pub section: AdminSection,
    pub class_name: String,
    pub new_subject: String,
    subjects: Vec<Subject>,
    questions: Vec<Question>,
    users: Vec<UserSummary>,
    /// Subject being renamed and its draft name
    editing: Option<(i64, String)>,
    confirm_delete: Option<i64>,
    error: Option<String>,
    notice: Option<String>,
    subjects_req: Pending<Result<Vec<Subject>, ApiError>>,
    questions_req: Pending<Result<Vec<Question>, ApiError>>,
    users_req: Pending<Result<Vec<UserSummary>, ApiError>>,
    write_req: Pending<Result<AdminWrite, ApiError>>,
}

impl AdminPage {
    pub fn open(services: &Services) -> Self {
        let mut page = Self {
            section: AdminSection::Subjects,
            class_name: class_label(1),
            new_subject: String::new(),
            subjects: Vec::new(),
            questions: Vec::new(),
            users: Vec::new(),
            editing: None,
            confirm_delete: None,
            error: None,
            notice: None,
            subjects_req: Pending::idle(),
            questions_req: Pending::idle(),
            users_req: Pending::idle(),
            write_req: Pending::idle(),
        };
        page.load_subjects(services);
        page.load_questions(services);
        page.users_req = services.spawn(|api| async move { api.users().await });
        page
    }

    fn load_subjects(&mut self, services: &Services) {
        let class = self.class_name.clone();
        self.subjects_req = services.spawn(move |api| async move { api.subjects(&class).await });
    }

    fn load_questions(&mut self, services: &Services) {
        self.questions_req = services.spawn(|api| async move { api.all_questions().await });
    }

    fn add_subject(&mut self, services: &Services) {
        let name = self.new_subject.trim().to_string();
        if name.is_empty() {
            self.error = Some("Subject name is required".to_string());
            return;
        }
        let payload = SubjectPayload {
            name,
            class_name: class_number(&self.class_name).to_string(),
        };
        self.write_req = services.spawn(move |api| async move {
            api.add_subject(&payload).await.map(|_| AdminWrite::SubjectAdded)
        });
    }

    fn rename_subject(&mut self, services: &Services, id: i64, name: String) {
        let payload = SubjectPayload {
            name,
            class_name: class_number(&self.class_name).to_string(),
        };
        self.write_req = services.spawn(move |api| async move {
            api.update_subject(id, &payload).await.map(|_| AdminWrite::SubjectRenamed)
        });
    }

    fn delete_subject(&mut self, services: &Services, id: i64) {
        self.write_req = services.spawn(move |api| async move {
            api.delete_subject(id).await.map(|_| AdminWrite::SubjectDeleted(id))
        });
    }

    fn delete_question(&mut self, services: &Services, id: i64) {
        self.write_req = services.spawn(move |api| async move {
            api.delete_question(id).await.map(|_| AdminWrite::QuestionDeleted(id))
        });
    }

    fn poll(&mut self, services: &Services) {
        if let Some(result) = self.subjects_req.poll() {
            match result {
                Ok(subjects) => self.subjects = subjects,
                Err(e) => self.error = Some(format!("Failed to load subjects: {}", e)),
            }
        }
        if let Some(result) = self.questions_req.poll() {
            match result {
                Ok(questions) => self.questions = questions,
                Err(e) => self.error = Some(format!("Failed to load questions: {}", e)),
            }
        }
        if let Some(result) = self.users_req.poll() {
            match result {
                Ok(users) => self.users = users,
                Err(e) => tracing::warn!(target: "revisewise::ui", error = %e, "users unavailable"),
            }
        }
        if let Some(result) = self.write_req.poll() {
            self.error = None;
            match result {
                Ok(AdminWrite::SubjectAdded) => {
                    self.new_subject.clear();
                    self.notice = Some("Subject added.".to_string());
                    self.load_subjects(services);
                }
                Ok(AdminWrite::SubjectRenamed) => {
                    self.editing = None;
                    self.notice = Some("Subject renamed.".to_string());
                    self.load_subjects(services);
                }
                Ok(AdminWrite::SubjectDeleted(id)) => {
                    self.subjects.retain(|s| s.id != id);
                    self.notice = Some("Subject deleted.".to_string());
                }
                Ok(AdminWrite::QuestionDeleted(id)) => {
                    self.questions.retain(|q| q.id != id);
                    self.notice = Some("🗑️ Question deleted.".to_string());
                }
                Err(e) => {
                    self.notice = None;
                    self.error = Some(format!("Update failed: {}", e));
                }
            }
        }
    }
}

pub fn render(ui: &mut egui::Ui, page: &mut AdminPage, cx: &mut ViewContext) {
    page.poll(cx.services);

    ui.horizontal(|ui| {
        ui.label(styles::heading("👑 Admin Dashboard"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Upload New Question").clicked() {
                cx.navigate(Route::UploadQuestion);
            }
        });
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.selectable_value(&mut page.section, AdminSection::Subjects, "Subjects");
        ui.selectable_value(
            &mut page.section,
            AdminSection::Questions,
            format!("All Uploaded Questions ({})", page.questions.len()),
        );
        ui.selectable_value(
            &mut page.section,
            AdminSection::Users,
            format!("Registered Users ({})", page.users.len()),
        );
    });
    ui.add_space(8.0);
    styles::status_line(ui, page.error.as_deref(), page.notice.as_deref());
    ui.add_space(8.0);

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        match page.section {
            AdminSection::Subjects => subjects_section(ui, page, cx),
            AdminSection::Questions => questions_section(ui, page, cx),
            AdminSection::Users => users_section(ui, page),
        }
    });
}

fn subjects_section(ui: &mut egui::Ui, page: &mut AdminPage, cx: &mut ViewContext) {
    let busy = page.write_req.is_loading();

    ui.horizontal(|ui| {
        ui.label("Class");
        let before = page.class_name.clone();
        egui::ComboBox::from_id_salt("admin_class")
            .selected_text(page.class_name.clone())
            .show_ui(ui, |ui| {
                for class in classes() {
                    let label = class.clone();
                    ui.selectable_value(&mut page.class_name, class, label);
                }
            });
        if page.class_name != before {
            page.editing = None;
            page.load_subjects(cx.services);
        }
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut page.new_subject).hint_text("Subject Name (e.g. Math)"));
        if ui.add_enabled(!busy, egui::Button::new("Add")).clicked() {
            page.add_subject(cx.services);
        }
    });
    ui.add_space(12.0);

    ui.label(styles::subheading("Existing Subjects"));
    if page.subjects_req.is_loading() {
        loading_row(ui, "subjects");
        return;
    }
    if page.subjects.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No subjects available.");
        return;
    }

    let mut rename = None;
    let mut delete = None;
    egui::Grid::new("admin_subjects").striped(true).num_columns(2).show(ui, |ui| {
        for subject in &page.subjects {
            let draft = page
                .editing
                .as_mut()
                .filter(|(id, _)| *id == subject.id)
                .map(|(_, draft)| draft);
            match draft {
                Some(draft) => {
                    ui.text_edit_singleline(draft);
                    ui.horizontal(|ui| {
                        if ui.add_enabled(!busy, egui::Button::new("Save")).clicked() {
                            rename = Some((subject.id, draft.trim().to_string()));
                        }
                        if ui.button("Cancel").clicked() {
                            rename = Some((subject.id, String::new()));
                        }
                    });
                }
                None => {
                    ui.label(subject.name.as_str());
                    ui.horizontal(|ui| {
                        if ui.small_button("Edit").clicked() {
                            page.editing = Some((subject.id, subject.name.clone()));
                        }
                        if ui.add_enabled(!busy, egui::Button::new("Delete").small()).clicked() {
                            delete = Some(subject.id);
                        }
                    });
                }
            }
            ui.end_row();
        }
    });

    match rename {
        Some((_, name)) if name.is_empty() => page.editing = None,
        Some((id, name)) => {
            let unchanged = page.subjects.iter().any(|s| s.id == id && s.name == name);
            if unchanged {
                page.editing = None;
            } else {
                page.rename_subject(cx.services, id, name);
            }
        }
        None => {}
    }
    if let Some(id) = delete {
        page.delete_subject(cx.services, id);
    }
}

fn questions_section(ui: &mut egui::Ui, page: &mut AdminPage, cx: &mut ViewContext) {
    if page.questions_req.is_loading() {
        loading_row(ui, "questions");
        return;
    }
    if page.questions.is_empty() {
        ui.colored_label(colors::WARNING, "⚠️ No questions available. Please upload some.");
        return;
    }

    let mut delete = None;
    egui::Grid::new("admin_questions").striped(true).num_columns(6).show(ui, |ui| {
        for header in ["ID", "Question", "Type", "Options", "Answer", ""] {
            ui.strong(header);
        }
        ui.end_row();
        for q in &page.questions {
            ui.label(q.id.to_string());
            ui.label(q.question.as_str());
            ui.label(q.kind.label());
            ui.label(q.options.as_deref().unwrap_or("-"));
            ui.label(q.correct_ans.as_str());
            ui.horizontal(|ui| {
                if ui.small_button("✏️ Edit").clicked() {
                    cx.navigate(Route::EditQuestion(q.id));
                }
                if page.confirm_delete == Some(q.id) {
                    if ui.small_button("Confirm delete").clicked() {
                        delete = Some(q.id);
                    }
                } else if ui.small_button("🗑️ Delete").clicked() {
                    page.confirm_delete = Some(q.id);
                }
            });
            ui.end_row();
        }
    });

    if let Some(id) = delete {
        page.confirm_delete = None;
        page.delete_question(cx.services, id);
    }
}

fn users_section(ui: &mut egui::Ui, page: &AdminPage) {
    if page.users.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No users found.");
        return;
    }
    egui::Grid::new("admin_users").striped(true).num_columns(4).show(ui, |ui| {
        for header in ["ID", "Name", "Email", "Role"] {
            ui.strong(header);
        }
        ui.end_row();
        for user in &page.users {
            ui.label(user.id.to_string());
            ui.label(user.name.as_str());
            ui.label(user.email.as_str());
            ui.label(user.role.as_deref().unwrap_or("-"));
            ui.end_row();
        }
    });
}
