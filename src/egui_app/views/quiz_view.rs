use std::time::{Duration, Instant};

use chrono::Utc;
use eframe::egui;

use crate::egui_app::quiz::{append_practice_result, load_pending_quiz, Feedback, QuizSession};
use crate::egui_app::routes::Route;
use crate::egui_app::state::Services;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::ViewContext;
use crate::shared::QuestionType;

pub struct QuizPage {
    quiz: Option<QuizSession>,
    recorded: bool,
    error: Option<String>,
}

impl QuizPage {
    pub fn open(services: &Services) -> Self {
        let quiz = load_pending_quiz(services.store().as_ref())
            .map(|(questions, chapter)| QuizSession::new(questions, chapter, Instant::now()));
        Self {
            quiz,
            recorded: false,
            error: None,
        }
    }

    /// Save the result once the quiz has been submitted.
    fn record(&mut self, services: &Services) {
        let Some(quiz) = &self.quiz else { return };
        if self.recorded {
            return;
        }
        if let Some(result) = quiz.practice_result(Utc::now()) {
            self.recorded = true;
            tracing::info!(target: "revisewise::quiz", score = result.score, questions = result.questions, "quiz completed");
            if let Err(e) = append_practice_result(services.store().as_ref(), result) {
                tracing::error!(target: "revisewise::quiz", error = %e, "cannot save practice result");
                self.error = Some(format!("Your result could not be saved: {}", e));
            }
        }
    }
}

fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn render(ui: &mut egui::Ui, page: &mut QuizPage, cx: &mut ViewContext) {
    let now = Instant::now();
    let Some(quiz) = page.quiz.as_mut() else {
        cx.navigate(Route::Syllabus);
        cx.flash("No quiz in progress. Pick a topic to start one.");
        return;
    };

    quiz.tick(now);
    if !quiz.is_submitted() {
        ui.ctx().request_repaint_after(Duration::from_millis(250));
    }

    ui.horizontal(|ui| {
        ui.label(styles::heading("📝 Practice Quiz"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let remaining = quiz.remaining(now);
            let color = if remaining < Duration::from_secs(60) {
                colors::ERROR
            } else {
                colors::ACCENT
            };
            ui.label(egui::RichText::new(format!("⏱ {}", format_remaining(remaining))).size(22.0).color(color));
        });
    });
    if let Some(chapter) = quiz.chapter() {
        ui.colored_label(
            colors::TEXT_SECONDARY,
            format!("{} · {} · {}", chapter.class_name, chapter.subject_name, chapter.chapter_name),
        );
    }
    ui.add_space(12.0);

    let submitted = quiz.is_submitted();
    let questions = quiz.questions().to_vec();
    for (index, question) in questions.iter().enumerate() {
        styles::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(styles::subheading(format!("{}. {}", index + 1, question.question)));
            ui.add_space(6.0);

            ui.add_enabled_ui(!submitted, |ui| match question.kind {
                QuestionType::Mcq | QuestionType::TrueFalse => {
                    let mut options = question.option_list();
                    if options.is_empty() && question.kind == QuestionType::TrueFalse {
                        options = vec!["True".to_string(), "False".to_string()];
                    }
                    for option in options {
                        let selected = quiz.answer(question.id) == Some(option.as_str());
                        if ui.radio(selected, option.as_str()).clicked() {
                            quiz.set_answer(question.id, option);
                        }
                    }
                }
                QuestionType::Short => {
                    ui.add(egui::TextEdit::multiline(quiz.answer_mut(question.id)).desired_rows(3));
                }
                QuestionType::Fill | QuestionType::Other => {
                    ui.text_edit_singleline(quiz.answer_mut(question.id));
                }
            });

            if let Some(response) = quiz.outcome().and_then(|o| o.response_for(question.id)) {
                ui.add_space(6.0);
                let feedback = Feedback::for_score(response.score);
                ui.colored_label(styles::accuracy_color(response.score * 100.0), feedback.label());
                if let Some(correct) = question.correct_answer.as_deref() {
                    ui.colored_label(colors::TEXT_SECONDARY, format!("Answer: {}", correct));
                }
            }
        });
        ui.add_space(8.0);
    }

    if !submitted {
        if ui.add(styles::primary_button("Submit Quiz")).clicked() {
            quiz.submit();
        }
    } else if let Some(outcome) = quiz.outcome() {
        styles::card_frame().show(ui, |ui| {
            ui.label(styles::subheading("Your Result"));
            ui.label(
                egui::RichText::new(format!("{:.0}%", outcome.accuracy))
                    .size(36.0)
                    .strong()
                    .color(styles::accuracy_color(outcome.accuracy)),
            );
            ui.colored_label(
                colors::TEXT_SECONDARY,
                format!("Answered {} of {} questions", outcome.attempted, outcome.responses.len()),
            );
        });
    }

    let finished = quiz.is_submitted();
    if finished {
        page.record(cx.services);
    }
    if let Some(error) = &page.error {
        ui.colored_label(colors::ERROR, error.as_str());
    }

    if finished {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Back to Syllabus").clicked() {
                cx.navigate(Route::Syllabus);
            }
            if ui.button("Dashboard").clicked() {
                cx.navigate(Route::Dashboard);
            }
            if ui.button("My Progress").clicked() {
                cx.navigate(Route::Progress);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::from_secs(300)), "05:00");
        assert_eq!(format_remaining(Duration::from_secs(61)), "01:01");
        assert_eq!(format_remaining(Duration::ZERO), "00:00");
    }
}
