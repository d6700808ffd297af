//! Quiz set-up: pick subject, topic and question type, fetch the questions,
//! hand them to the quiz page through local storage.

use eframe::egui;

use crate::egui_app::api::ApiError;
use crate::egui_app::quiz::{practice_history, save_pending_quiz, ChapterInfo, PracticeResult};
use crate::egui_app::routes::Route;
use crate::egui_app::session::Session;
use crate::egui_app::state::Services;
use crate::egui_app::tasks::Pending;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{loading_row, ViewContext};
use crate::shared::models::{QuizQuery, QuizQuestion, Subject, Topic};
use crate::shared::syllabus::{class_label, classes};
use crate::shared::{QuestionType, Role};

const RECENT_RESULTS: usize = 5;

pub struct QuizSetupPage {
    pub class_name: String,
    /// Students are bound to their enrolled class
    pub class_locked: bool,
    pub subjects: Vec<Subject>,
    pub topics: Vec<Topic>,
    pub subject_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub kind: QuestionType,
    pub error: Option<String>,
    pub history: Vec<PracticeResult>,
    subjects_req: Pending<Result<Vec<Subject>, ApiError>>,
    topics_req: Pending<Result<Vec<Topic>, ApiError>>,
    questions_req: Pending<Result<Vec<QuizQuestion>, ApiError>>,
}

impl QuizSetupPage {
    pub fn new(class_name: String, class_locked: bool) -> Self {
        Self {
            class_name,
            class_locked,
            subjects: Vec::new(),
            topics: Vec::new(),
            subject_id: None,
            topic_id: None,
            kind: QuestionType::Mcq,
            error: None,
            history: Vec::new(),
            subjects_req: Pending::idle(),
            topics_req: Pending::idle(),
            questions_req: Pending::idle(),
        }
    }

    pub fn open(services: &Services, session: &Session) -> Self {
        let user = session.user.as_ref();
        let enrolled = user.and_then(|u| u.student_class.clone());
        let is_student = session.role() == Some(Role::Student);

        let mut page = match enrolled {
            Some(class) => Self::new(class, is_student),
            None => Self::new(class_label(1), false),
        };
        page.history = practice_history(services.store().as_ref());

        if is_student && !page.class_locked {
            page.error = Some("Student class not found. Please login again.".to_string());
        } else {
            page.load_subjects(services);
        }
        page
    }

    fn load_subjects(&mut self, services: &Services) {
        self.subjects.clear();
        self.topics.clear();
        self.subject_id = None;
        self.topic_id = None;
        let class = self.class_name.clone();
        self.subjects_req = services.spawn(move |api| async move { api.subjects(&class).await });
    }

    fn select_subject(&mut self, subject_id: i64, services: &Services) {
        self.subject_id = Some(subject_id);
        self.topic_id = None;
        self.topics.clear();
        self.topics_req = services.spawn(move |api| async move { api.topics(subject_id).await });
    }

    /// Query for the current selection
    pub fn quiz_query(&self) -> Result<QuizQuery, &'static str> {
        match (self.subject_id, self.topic_id) {
            (Some(subject_id), Some(topic_id)) if !self.class_name.is_empty() => Ok(QuizQuery {
                class: self.class_name.clone(),
                subject_id,
                topic_id,
                kind: self.kind,
            }),
            _ => Err("Please select subject, topic, and question type."),
        }
    }

    /// Syllabus context stored alongside the questions
    pub fn chapter_info(&self) -> Option<ChapterInfo> {
        let subject = self.subjects.iter().find(|s| Some(s.id) == self.subject_id)?;
        let topic = self.topics.iter().find(|t| Some(t.id) == self.topic_id)?;
        Some(ChapterInfo {
            class_name: self.class_name.clone(),
            subject_name: subject.name.clone(),
            chapter_name: topic.name.clone(),
            description: format!("{} practice", self.kind.label()),
        })
    }

    fn start(&mut self, services: &Services) {
        match self.quiz_query() {
            Ok(query) => {
                self.error = None;
                self.questions_req = services.spawn(move |api| async move { api.quiz_questions(&query).await });
            }
            Err(message) => self.error = Some(message.to_string()),
        }
    }

    fn poll(&mut self, cx: &mut ViewContext) {
        if let Some(result) = self.subjects_req.poll() {
            match result {
                Ok(subjects) => self.subjects = subjects,
                Err(e) => self.error = Some(format!("Failed to load subjects for your class: {}", e)),
            }
        }
        if let Some(result) = self.topics_req.poll() {
            match result {
                Ok(topics) => self.topics = topics,
                Err(e) => self.error = Some(format!("Failed to load topics: {}", e)),
            }
        }
        if let Some(result) = self.questions_req.poll() {
            match result {
                Ok(questions) if questions.is_empty() => {
                    self.error = Some("No questions found for this selection.".to_string());
                }
                Ok(questions) => {
                    let chapter = self.chapter_info();
                    match save_pending_quiz(cx.services.store().as_ref(), &questions, chapter.as_ref()) {
                        Ok(()) => cx.navigate(Route::Quiz),
                        Err(e) => {
                            tracing::error!(target: "revisewise::ui", error = %e, "cannot store quiz");
                            self.error = Some(format!("Could not prepare the quiz: {}", e));
                        }
                    }
                }
                Err(e) => self.error = Some(format!("Failed to load questions: {}", e)),
            }
        }
    }
}

pub fn render(ui: &mut egui::Ui, page: &mut QuizSetupPage, cx: &mut ViewContext) {
    page.poll(cx);

    ui.label(styles::heading("🎓 Student Dashboard"));
    if let Some(user) = &cx.session.user {
        ui.colored_label(colors::TEXT_SECONDARY, format!("Hello, {}!", user.name));
    }
    ui.add_space(12.0);

    if let Some(error) = &page.error {
        ui.colored_label(colors::ERROR, error.as_str());
        ui.add_space(8.0);
    }

    styles::card_frame().show(ui, |ui| {
        egui::Grid::new("quiz_setup").num_columns(2).spacing([16.0, 10.0]).show(ui, |ui| {
            ui.label("Class");
            if page.class_locked {
                ui.label(page.class_name.as_str());
            } else {
                let before = page.class_name.clone();
                egui::ComboBox::from_id_salt("setup_class")
                    .selected_text(page.class_name.clone())
                    .show_ui(ui, |ui| {
                        for class in classes() {
                            let label = class.clone();
                            ui.selectable_value(&mut page.class_name, class, label);
                        }
                    });
                if page.class_name != before {
                    page.load_subjects(cx.services);
                }
            }
            ui.end_row();

            ui.label("Subject");
            let current = page
                .subjects
                .iter()
                .find(|s| Some(s.id) == page.subject_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "-- Choose Subject --".to_string());
            let mut picked = None;
            egui::ComboBox::from_id_salt("setup_subject")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for subject in &page.subjects {
                        if ui.selectable_label(page.subject_id == Some(subject.id), subject.name.as_str()).clicked() {
                            picked = Some(subject.id);
                        }
                    }
                });
            if let Some(id) = picked {
                page.select_subject(id, cx.services);
            }
            ui.end_row();

            ui.label("Topic");
            let current = page
                .topics
                .iter()
                .find(|t| Some(t.id) == page.topic_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "-- Choose Topic --".to_string());
            ui.add_enabled_ui(page.subject_id.is_some(), |ui| {
                egui::ComboBox::from_id_salt("setup_topic")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for topic in &page.topics {
                            ui.selectable_value(&mut page.topic_id, Some(topic.id), topic.name.as_str());
                        }
                    });
            });
            ui.end_row();

            ui.label("Question type");
            ui.horizontal(|ui| {
                for kind in QuestionType::SELECTABLE {
                    ui.radio_value(&mut page.kind, kind, kind.label());
                }
            });
            ui.end_row();
        });

        if page.subjects_req.is_loading() {
            loading_row(ui, "subjects");
        } else if page.topics_req.is_loading() {
            loading_row(ui, "topics");
        }

        ui.add_space(12.0);
        let busy = page.questions_req.is_loading();
        if ui.add_enabled(!busy, styles::primary_button("🚀 Start Quiz")).clicked() {
            page.start(cx.services);
        }
        if busy {
            loading_row(ui, "questions");
        }
    });

    if !page.history.is_empty() {
        ui.add_space(16.0);
        styles::card_frame().show(ui, |ui| {
            ui.label(styles::subheading("Recent practice"));
            for result in page.history.iter().rev().take(RECENT_RESULTS) {
                let chapter = result
                    .chapter_info
                    .as_ref()
                    .map(|c| format!("{} · {}", c.subject_name, c.chapter_name))
                    .unwrap_or_else(|| "Practice quiz".to_string());
                ui.horizontal(|ui| {
                    ui.colored_label(colors::TEXT_LIGHT, chapter);
                    ui.colored_label(styles::accuracy_color(result.score), format!("{:.0}%", result.score));
                    ui.colored_label(colors::TEXT_SECONDARY, result.completed_at.format("%d %b %Y %H:%M").to_string());
                });
            }
            if ui.link("See all progress").clicked() {
                cx.navigate(Route::Progress);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_selection() -> QuizSetupPage {
        let mut page = QuizSetupPage::new("Class 6".to_string(), true);
        page.subjects = vec![Subject {
            id: 3,
            name: "Science".to_string(),
            class_name: Some("6".to_string()),
        }];
        page.topics = vec![Topic {
            id: 11,
            name: "Light".to_string(),
            subject_id: 3,
        }];
        page.subject_id = Some(3);
        page.topic_id = Some(11);
        page
    }

    #[test]
    fn test_query_requires_subject_and_topic() {
        let mut page = page_with_selection();
        page.topic_id = None;
        assert!(page.quiz_query().is_err());

        page.topic_id = Some(11);
        let query = page.quiz_query().unwrap();
        assert_eq!(query.class, "Class 6");
        assert_eq!(query.subject_id, 3);
        assert_eq!(query.topic_id, 11);
        assert_eq!(query.kind, QuestionType::Mcq);
    }

    #[test]
    fn test_chapter_info_from_selection() {
        let mut page = page_with_selection();
        page.kind = QuestionType::Fill;
        let chapter = page.chapter_info().unwrap();
        assert_eq!(chapter.subject_name, "Science");
        assert_eq!(chapter.chapter_name, "Light");

        page.topic_id = Some(99);
        assert!(page.chapter_info().is_none());
    }
}
