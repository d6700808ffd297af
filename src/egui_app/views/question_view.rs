//! Question upload and editing forms for staff.

use std::path::Path;

use eframe::egui;

use crate::egui_app::api::ApiError;
use crate::egui_app::routes::{home_for, Route};
use crate::egui_app::state::Services;
use crate::egui_app::tasks::Pending;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{loading_row, ViewContext};
use crate::shared::bulk;
use crate::shared::error::require;
use crate::shared::models::{
    split_options, BulkQuestionRow, Question, QuestionUpdate, Subject, UploadQuestionRequest, UploadQuestionResponse,
};
use crate::shared::syllabus::classes;
use crate::shared::{QuestionType, SharedError};

pub const MCQ_OPTION_COUNT: usize = 4;
const TRUE_FALSE: [&str; 2] = ["True", "False"];

fn check_true_false(answer: &str) -> Result<(), SharedError> {
    if TRUE_FALSE.iter().any(|v| v.eq_ignore_ascii_case(answer.trim())) {
        Ok(())
    } else {
        Err(SharedError::validation("correct_answer", "Answer must be True or False"))
    }
}

#[derive(Debug, Clone)]
pub struct QuestionForm {
    pub class_name: String,
    pub subject: String,
    pub topic: String,
    pub kind: QuestionType,
    pub question: String,
    pub options: [String; MCQ_OPTION_COUNT],
    pub correct_answer: String,
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            subject: String::new(),
            topic: String::new(),
            kind: QuestionType::Mcq,
            question: String::new(),
            options: Default::default(),
            correct_answer: String::new(),
        }
    }
}

impl QuestionForm {
    /// Switching type discards options and the answer.
    pub fn set_kind(&mut self, kind: QuestionType) {
        if self.kind != kind {
            self.kind = kind;
            self.options = Default::default();
            self.correct_answer.clear();
        }
    }

    pub fn validate(&self) -> Result<(), SharedError> {
        require("Question", &self.question)?;
        require("Class", &self.class_name)?;
        require("Subject", &self.subject)?;
        require("Topic", &self.topic)?;
        require("Correct answer", &self.correct_answer)?;

        match self.kind {
            QuestionType::Mcq => {
                if self.options.iter().any(|o| o.trim().is_empty()) {
                    return Err(SharedError::validation("options", "All four options are required"));
                }
                let answer = self.correct_answer.trim();
                if !self.options.iter().any(|o| o.trim() == answer) {
                    return Err(SharedError::validation(
                        "correct_answer",
                        "Correct answer must be one of the options",
                    ));
                }
                Ok(())
            }
            QuestionType::TrueFalse => check_true_false(&self.correct_answer),
            _ => Ok(()),
        }
    }

    pub fn to_request(&self, uploaded_by: i64) -> UploadQuestionRequest {
        let options = if self.kind == QuestionType::Mcq {
            self.options.iter().map(|o| o.trim().to_string()).collect()
        } else {
            Vec::new()
        };
        UploadQuestionRequest {
            class_name: self.class_name.clone(),
            subject: self.subject.clone(),
            topic: self.topic.trim().to_string(),
            kind: self.kind,
            question: self.question.trim().to_string(),
            options,
            correct_answer: self.correct_answer.trim().to_string(),
            uploaded_by,
        }
    }
}

#[derive(Default)]
pub struct UploadPage {
    pub form: QuestionForm,
    subjects: Vec<Subject>,
    error: Option<String>,
    notice: Option<String>,
    subjects_req: Pending<Result<Vec<Subject>, ApiError>>,
    upload_req: Pending<Result<UploadQuestionResponse, ApiError>>,
    pub bulk: BulkUploadPanel,
}

impl UploadPage {
    fn poll(&mut self) {
        if let Some(result) = self.subjects_req.poll() {
            match result {
                Ok(subjects) => self.subjects = subjects,
                Err(e) => {
                    tracing::warn!(target: "revisewise::ui", error = %e, "subjects unavailable");
                    self.subjects.clear();
                }
            }
        }
        if let Some(result) = self.upload_req.poll() {
            match result {
                Ok(response) => {
                    let message = if response.message.is_empty() {
                        "Question uploaded successfully!".to_string()
                    } else {
                        response.message
                    };
                    self.notice = Some(format!("✅ {}", message));
                    self.error = None;
                    self.form = QuestionForm::default();
                    self.subjects.clear();
                }
                Err(e) => {
                    self.notice = None;
                    self.error = Some(format!("Failed to upload question: {}", e));
                }
            }
        }
    }

    fn submit(&mut self, cx: &ViewContext) {
        if let Err(e) = self.form.validate() {
            self.notice = None;
            self.error = Some(e.to_string());
            return;
        }
        let Some(user) = &cx.session.user else {
            self.error = Some("Your profile could not be read. Please login again.".to_string());
            return;
        };
        let request = self.form.to_request(user.id);
        self.error = None;
        self.upload_req = cx.services.spawn(move |api| async move { api.upload_question(&request).await });
    }
}

/// CSV import shown under the single-question form
#[derive(Default)]
pub struct BulkUploadPanel {
    pub file_name: Option<String>,
    rows: Vec<BulkQuestionRow>,
    error: Option<String>,
    notice: Option<String>,
    request: Pending<Result<usize, ApiError>>,
}

impl BulkUploadPanel {
    /// Parse `path`, replacing whatever was loaded before.
    pub fn load(&mut self, path: &Path) {
        self.file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        self.notice = None;
        match bulk::parse_file(path) {
            Ok(rows) => {
                tracing::debug!(target: "revisewise::ui", count = rows.len(), "question file loaded");
                self.rows = rows;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(target: "revisewise::ui", error = %e, "question file rejected");
                self.rows.clear();
                self.error = Some(format!("❌ Error parsing the CSV file: {}", e));
            }
        }
    }

    pub fn rows(&self) -> &[BulkQuestionRow] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn send(&mut self, services: &Services) {
        let rows = self.rows.clone();
        self.error = None;
        self.request = services.spawn(move |api| async move { api.bulk_upload(&rows).await });
    }

    fn poll(&mut self) {
        if let Some(result) = self.request.poll() {
            match result {
                Ok(count) => {
                    self.notice = Some(format!("✅ Successfully uploaded {} questions.", count));
                    self.rows.clear();
                }
                Err(e) => {
                    self.notice = None;
                    self.error = Some(format!("❌ Upload failed. Check CSV format or server. ({})", e));
                }
            }
        }
    }
}

fn bulk_upload_section(ui: &mut egui::Ui, panel: &mut BulkUploadPanel, cx: &ViewContext) {
    panel.poll();

    let dropped = ui.ctx().input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
    if let Some(path) = dropped {
        panel.load(&path);
    }

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(styles::subheading("📥 Bulk Upload Questions via CSV"));
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if ui.button("Select CSV File…").clicked() {
                if let Some(path) = rfd::FileDialog::new().add_filter("csv", &["csv"]).pick_file() {
                    panel.load(&path);
                }
            }
            ui.colored_label(colors::TEXT_SECONDARY, "or drop a file on the window");
        });
        if let Some(name) = &panel.file_name {
            ui.label(format!("📄 {} ({} questions)", name, panel.rows.len()));
        }

        if !panel.rows.is_empty() {
            egui::Grid::new("bulk_preview").striped(true).num_columns(4).show(ui, |ui| {
                for header in ["Topic", "Question", "Type", "Answer"] {
                    ui.strong(header);
                }
                ui.end_row();
                for row in panel.rows.iter().take(5) {
                    ui.label(row.topic_id.to_string());
                    ui.label(row.question.as_str());
                    ui.label(row.kind.label());
                    ui.label(row.correct_ans.as_str());
                    ui.end_row();
                }
            });
            ui.add_space(8.0);
            let busy = panel.request.is_loading();
            if ui.add_enabled(!busy, styles::primary_button("Upload All")).clicked() {
                panel.send(cx.services);
            }
            if busy {
                loading_row(ui, "bulk upload");
            }
        }

        styles::status_line(ui, panel.error.as_deref(), panel.notice.as_deref());
        ui.colored_label(
            colors::TEXT_SECONDARY,
            format!("Make sure the file contains columns: {}", bulk::COLUMNS.join(", ")),
        );
    });
}

pub fn render_upload(ui: &mut egui::Ui, page: &mut UploadPage, cx: &mut ViewContext) {
    page.poll();

    ui.label(styles::heading("⬆ Upload New Question"));
    ui.add_space(8.0);
    styles::status_line(ui, page.error.as_deref(), page.notice.as_deref());
    ui.add_space(8.0);

    styles::card_frame().show(ui, |ui| {
        egui::Grid::new("upload_form").num_columns(2).spacing([16.0, 10.0]).show(ui, |ui| {
            ui.label("Class");
            let before = page.form.class_name.clone();
            let selected = if page.form.class_name.is_empty() {
                "-- Select Class --".to_string()
            } else {
                page.form.class_name.clone()
            };
            egui::ComboBox::from_id_salt("upload_class")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for class in classes() {
                        let label = class.clone();
                        ui.selectable_value(&mut page.form.class_name, class, label);
                    }
                });
            if page.form.class_name != before {
                page.form.subject.clear();
                page.subjects.clear();
                let class = page.form.class_name.clone();
                page.subjects_req = cx.services.spawn(move |api| async move { api.subjects(&class).await });
            }
            ui.end_row();

            ui.label("Subject");
            let selected = if page.form.subject.is_empty() {
                "-- Select Subject --".to_string()
            } else {
                page.form.subject.clone()
            };
            egui::ComboBox::from_id_salt("upload_subject")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for subject in &page.subjects {
                        ui.selectable_value(&mut page.form.subject, subject.name.clone(), subject.name.as_str());
                    }
                });
            ui.end_row();

            ui.label("Topic");
            ui.text_edit_singleline(&mut page.form.topic);
            ui.end_row();

            ui.label("Type");
            ui.horizontal(|ui| {
                let mut kind = page.form.kind;
                for option in QuestionType::SELECTABLE {
                    ui.radio_value(&mut kind, option, option.label());
                }
                page.form.set_kind(kind);
            });
            ui.end_row();

            ui.label("Question");
            ui.add(egui::TextEdit::multiline(&mut page.form.question).desired_rows(3));
            ui.end_row();

            if page.form.kind == QuestionType::Mcq {
                for (index, option) in page.form.options.iter_mut().enumerate() {
                    ui.label(format!("Option {}", index + 1));
                    ui.text_edit_singleline(option);
                    ui.end_row();
                }
            }

            ui.label("Correct answer");
            if page.form.kind == QuestionType::TrueFalse {
                ui.horizontal(|ui| {
                    for value in TRUE_FALSE {
                        ui.radio_value(&mut page.form.correct_answer, value.to_string(), value);
                    }
                });
            } else {
                ui.text_edit_singleline(&mut page.form.correct_answer);
            }
            ui.end_row();
        });

        if page.subjects_req.is_loading() {
            loading_row(ui, "subjects");
        }
        ui.add_space(12.0);
        let busy = page.upload_req.is_loading();
        if ui.add_enabled(!busy, styles::primary_button("Upload Question")).clicked() {
            page.submit(cx);
        }
        if busy {
            loading_row(ui, "upload");
        }
    });

    ui.add_space(12.0);
    bulk_upload_section(ui, &mut page.bulk, cx);
}

/// Editable copy of a stored question
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub question: String,
    pub kind: QuestionType,
    /// Comma separated
    pub options: String,
    pub correct_ans: String,
    pub topic_id: i64,
}

impl From<&Question> for EditForm {
    fn from(q: &Question) -> Self {
        Self {
            question: q.question.clone(),
            kind: q.kind,
            options: q.options.clone().unwrap_or_default(),
            correct_ans: q.correct_ans.clone(),
            topic_id: q.topic_id,
        }
    }
}

impl EditForm {
    pub fn validate(&self) -> Result<(), SharedError> {
        require("Question", &self.question)?;
        require("Correct answer", &self.correct_ans)?;
        match self.kind {
            QuestionType::Mcq if split_options(&self.options).len() < 2 => Err(SharedError::validation(
                "options",
                "Multiple choice questions need at least two options",
            )),
            QuestionType::TrueFalse => check_true_false(&self.correct_ans),
            _ => Ok(()),
        }
    }

    pub fn to_update(&self) -> QuestionUpdate {
        QuestionUpdate {
            question: self.question.trim().to_string(),
            kind: self.kind,
            options: split_options(&self.options).join(", "),
            correct_ans: self.correct_ans.trim().to_string(),
            topic_id: self.topic_id,
        }
    }
}

pub struct EditQuestionPage {
    pub id: i64,
    form: Option<EditForm>,
    error: Option<String>,
    load_req: Pending<Result<Vec<Question>, ApiError>>,
    save_req: Pending<Result<(), ApiError>>,
}

impl EditQuestionPage {
    pub fn open(id: i64, services: &Services) -> Self {
        Self {
            id,
            form: None,
            error: None,
            load_req: services.spawn(|api| async move { api.all_questions().await }),
            save_req: Pending::idle(),
        }
    }

    fn poll(&mut self, cx: &mut ViewContext) {
        if let Some(result) = self.load_req.poll() {
            match result {
                Ok(questions) => match questions.iter().find(|q| q.id == self.id) {
                    Some(question) => self.form = Some(EditForm::from(question)),
                    None => self.error = Some("Question not found.".to_string()),
                },
                Err(e) => self.error = Some(format!("Failed to load question: {}", e)),
            }
        }
        if let Some(result) = self.save_req.poll() {
            match result {
                Ok(()) => {
                    tracing::info!(target: "revisewise::ui", question_id = self.id, "question updated");
                    let back = cx.session.role().map(home_for).unwrap_or(Route::Landing);
                    cx.navigate(back);
                    cx.flash("✅ Question updated!");
                }
                Err(e) => self.error = Some(format!("Failed to update: {}", e)),
            }
        }
    }
}

pub fn render_edit(ui: &mut egui::Ui, page: &mut EditQuestionPage, cx: &mut ViewContext) {
    page.poll(cx);

    ui.label(styles::heading(format!("✏️ Edit Question #{}", page.id)));
    ui.add_space(8.0);
    if let Some(error) = &page.error {
        ui.colored_label(colors::ERROR, error.as_str());
        ui.add_space(8.0);
    }

    if page.load_req.is_loading() {
        loading_row(ui, "question");
        return;
    }
    let Some(form) = page.form.as_mut() else {
        return;
    };

    let mut save = false;
    styles::card_frame().show(ui, |ui| {
        egui::Grid::new("edit_form").num_columns(2).spacing([16.0, 10.0]).show(ui, |ui| {
            ui.label("Question");
            ui.add(egui::TextEdit::multiline(&mut form.question).desired_rows(3));
            ui.end_row();

            ui.label("Type");
            ui.horizontal(|ui| {
                for option in QuestionType::SELECTABLE {
                    ui.radio_value(&mut form.kind, option, option.label());
                }
            });
            ui.end_row();

            ui.label("Options (comma separated)");
            ui.text_edit_singleline(&mut form.options);
            ui.end_row();

            ui.label("Correct answer");
            ui.text_edit_singleline(&mut form.correct_ans);
            ui.end_row();

            ui.label("Topic ID");
            ui.add(egui::DragValue::new(&mut form.topic_id).range(1..=i64::MAX));
            ui.end_row();
        });

        ui.add_space(12.0);
        let busy = page.save_req.is_loading();
        if ui.add_enabled(!busy, styles::primary_button("Update Question")).clicked() {
            save = true;
        }
        if busy {
            loading_row(ui, "update");
        }
    });

    if save {
        match form.validate() {
            Ok(()) => {
                let id = page.id;
                let update = form.to_update();
                page.error = None;
                page.save_req = cx.services.spawn(move |api| async move { api.update_question(id, &update).await });
            }
            Err(e) => page.error = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();
        file
    }

    #[test]
    fn test_bulk_panel_loads_and_replaces_file() {
        let mut panel = BulkUploadPanel::default();
        let good = csv_file("topic_id,question,type,options,correct_ans\n2,Is ice cold?,true-false,,True\n");
        panel.load(good.path());

        assert_eq!(panel.rows().len(), 1);
        assert_eq!(panel.error(), None);
        assert!(panel.file_name.is_some());

        let bad = csv_file("topic_id,question\n2,Is ice cold?\n");
        panel.load(bad.path());

        assert!(panel.rows().is_empty());
        assert!(panel.error().unwrap_or_default().contains("missing column: type"));
    }

    fn mcq_form() -> QuestionForm {
        QuestionForm {
            class_name: "Class 6".to_string(),
            subject: "Science".to_string(),
            topic: " Light ".to_string(),
            kind: QuestionType::Mcq,
            question: "Which travels fastest?".to_string(),
            options: ["Sound".into(), "Light".into(), "Water".into(), "Air".into()],
            correct_answer: "Light".to_string(),
        }
    }

    #[test]
    fn test_mcq_form_valid() {
        let form = mcq_form();
        assert!(form.validate().is_ok());

        let request = form.to_request(12);
        assert_eq!(request.topic, "Light");
        assert_eq!(request.options.len(), 4);
        assert_eq!(request.uploaded_by, 12);
    }

    #[test]
    fn test_mcq_requires_all_options() {
        let mut form = mcq_form();
        form.options[2] = "  ".to_string();
        assert_eq!(form.validate().unwrap_err().field(), "options");
    }

    #[test]
    fn test_mcq_answer_must_be_an_option() {
        let mut form = mcq_form();
        form.correct_answer = "Sunlight".to_string();
        assert_eq!(form.validate().unwrap_err().field(), "correct_answer");
    }

    #[test]
    fn test_true_false_answer() {
        let mut form = mcq_form();
        form.set_kind(QuestionType::TrueFalse);
        assert!(form.options.iter().all(String::is_empty));
        assert!(form.correct_answer.is_empty());

        form.correct_answer = "maybe".to_string();
        assert!(form.validate().is_err());
        form.correct_answer = "true".to_string();
        assert!(form.validate().is_ok());
        assert!(form.to_request(1).options.is_empty());
    }

    #[test]
    fn test_missing_topic() {
        let mut form = mcq_form();
        form.topic.clear();
        assert_eq!(form.validate().unwrap_err().to_string(), "Topic is required");
    }

    #[test]
    fn test_edit_form_round_trip() {
        let question = Question {
            id: 4,
            topic_id: 9,
            question: "2 + 2 = ?".to_string(),
            kind: QuestionType::Mcq,
            options: Some("3,4, 5".to_string()),
            correct_ans: "4".to_string(),
        };
        let form = EditForm::from(&question);
        assert!(form.validate().is_ok());

        let update = form.to_update();
        assert_eq!(update.options, "3, 4, 5");
        assert_eq!(update.topic_id, 9);
    }

    #[test]
    fn test_edit_form_needs_options_for_mcq() {
        let form = EditForm {
            question: "Pick one".to_string(),
            kind: QuestionType::Mcq,
            options: "only".to_string(),
            correct_ans: "only".to_string(),
            topic_id: 1,
        };
        assert_eq!(form.validate().unwrap_err().field(), "options");
    }
}
