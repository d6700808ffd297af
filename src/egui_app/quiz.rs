//! # Practice Quiz
//!
//! A quiz is prepared on the dashboard: the selected questions and their
//! syllabus context are stored locally, then the quiz page picks them up.
//! Scoring is local; results are appended to the practice history.
//!
//! ## Scoring
//!
//! - unanswered: 0
//! - answer equal to the question's correct answer (trimmed,
//!   case-insensitive): 1
//! - anything else: 0
//!
//! Accuracy is the mean score as a percentage. An empty quiz scores 0.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::egui_app::storage::{
    KeyValueStore, StorageError, CURRENT_CHAPTER_KEY, PRACTICE_HISTORY_KEY, QUIZ_QUESTIONS_KEY,
};
use crate::shared::models::QuizQuestion;

/// Time allowed for one practice quiz
pub const QUIZ_DURATION: Duration = Duration::from_secs(300);

/// Syllabus context shown above the quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterInfo {
    pub class_name: String,
    pub subject_name: String,
    pub chapter_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Excellent,
    Review,
    NeedsImprovement,
}

impl Feedback {
    pub fn for_score(score: f64) -> Self {
        if score >= 0.8 {
            Feedback::Excellent
        } else if score >= 0.5 {
            Feedback::Review
        } else {
            Feedback::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feedback::Excellent => "Excellent!",
            Feedback::Review => "Review this.",
            Feedback::NeedsImprovement => "Needs improvement",
        }
    }
}

pub fn score_answer(question: &QuizQuestion, answer: Option<&str>) -> f64 {
    let answer = match answer.map(str::trim) {
        Some(a) if !a.is_empty() => a,
        _ => return 0.0,
    };
    match question.correct_answer.as_deref().map(str::trim) {
        Some(correct) if correct.eq_ignore_ascii_case(answer) => 1.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResponse {
    pub question_id: i64,
    pub answer: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub responses: Vec<ScoredResponse>,
    /// Percentage, 0 to 100
    pub accuracy: f64,
    /// Questions with a non-blank answer
    pub attempted: usize,
}

impl QuizOutcome {
    pub fn response_for(&self, question_id: i64) -> Option<&ScoredResponse> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }
}

/// One entry of the practice history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeResult {
    pub id: Uuid,
    pub chapter_info: Option<ChapterInfo>,
    pub questions: usize,
    pub score: f64,
    pub completed_at: DateTime<Utc>,
}

/// Quiz in progress
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    chapter: Option<ChapterInfo>,
    answers: HashMap<i64, String>,
    started_at: Instant,
    duration: Duration,
    outcome: Option<QuizOutcome>,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>, chapter: Option<ChapterInfo>, started_at: Instant) -> Self {
        Self {
            questions,
            chapter,
            answers: HashMap::new(),
            started_at,
            duration: QUIZ_DURATION,
            outcome: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn chapter(&self) -> Option<&ChapterInfo> {
        self.chapter.as_ref()
    }

    pub fn answer(&self, question_id: i64) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    /// Mutable answer slot for text inputs. Creates an empty answer.
    pub fn answer_mut(&mut self, question_id: i64) -> &mut String {
        self.answers.entry(question_id).or_default()
    }

    /// Ignored once the quiz is submitted.
    pub fn set_answer(&mut self, question_id: i64, answer: impl Into<String>) {
        if self.outcome.is_none() {
            self.answers.insert(question_id, answer.into());
        }
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.started_at))
    }

    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.outcome.is_some()
    }

    /// Auto-submit when time is up. Returns the outcome only on the tick
    /// that submitted.
    pub fn tick(&mut self, now: Instant) -> Option<&QuizOutcome> {
        if self.outcome.is_none() && self.remaining(now).is_zero() {
            tracing::info!(target: "revisewise::quiz", "time is up, submitting");
            return Some(self.submit());
        }
        None
    }

    /// Score every question. Submitting twice returns the first outcome.
    pub fn submit(&mut self) -> &QuizOutcome {
        let questions = &self.questions;
        let answers = &self.answers;
        self.outcome.get_or_insert_with(|| score_quiz(questions, answers))
    }

    /// History entry for the submitted quiz
    pub fn practice_result(&self, completed_at: DateTime<Utc>) -> Option<PracticeResult> {
        self.outcome.as_ref().map(|outcome| PracticeResult {
            id: Uuid::new_v4(),
            chapter_info: self.chapter.clone(),
            questions: self.questions.len(),
            score: outcome.accuracy,
            completed_at,
        })
    }
}

fn score_quiz(questions: &[QuizQuestion], answers: &HashMap<i64, String>) -> QuizOutcome {
    let responses: Vec<ScoredResponse> = questions
        .iter()
        .map(|q| {
            let answer = answers.get(&q.id).cloned().unwrap_or_default();
            ScoredResponse {
                question_id: q.id,
                score: score_answer(q, Some(&answer)),
                answer,
            }
        })
        .collect();

    let attempted = responses.iter().filter(|r| !r.answer.trim().is_empty()).count();
    let accuracy = if responses.is_empty() {
        0.0
    } else {
        responses.iter().map(|r| r.score).sum::<f64>() / responses.len() as f64 * 100.0
    };

    QuizOutcome {
        responses,
        accuracy,
        attempted,
    }
}

/// Store questions and context for the quiz page.
pub fn save_pending_quiz(
    store: &dyn KeyValueStore,
    questions: &[QuizQuestion],
    chapter: Option<&ChapterInfo>,
) -> Result<(), StorageError> {
    store.set(QUIZ_QUESTIONS_KEY, &serde_json::to_string(questions)?)?;
    match chapter {
        Some(chapter) => store.set(CURRENT_CHAPTER_KEY, &serde_json::to_string(chapter)?),
        None => store.remove(CURRENT_CHAPTER_KEY),
    }
}

/// Load the pending quiz. `None` when nothing usable is stored.
pub fn load_pending_quiz(store: &dyn KeyValueStore) -> Option<(Vec<QuizQuestion>, Option<ChapterInfo>)> {
    let questions: Vec<QuizQuestion> = read_json(store, QUIZ_QUESTIONS_KEY)?;
    if questions.is_empty() {
        return None;
    }
    let chapter = read_json(store, CURRENT_CHAPTER_KEY);
    Some((questions, chapter))
}

pub fn practice_history(store: &dyn KeyValueStore) -> Vec<PracticeResult> {
    read_json(store, PRACTICE_HISTORY_KEY).unwrap_or_default()
}

pub fn append_practice_result(store: &dyn KeyValueStore, result: PracticeResult) -> Result<(), StorageError> {
    let mut history = practice_history(store);
    history.push(result);
    store.set(PRACTICE_HISTORY_KEY, &serde_json::to_string(&history)?)
}

fn read_json<T: serde::de::DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(target: "revisewise::quiz", key, error = %e, "cannot read");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(target: "revisewise::quiz", key, error = %e, "ignoring malformed value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::storage::MemoryStore;
    use crate::shared::QuestionType;
    use pretty_assertions::assert_eq;

    fn question(id: i64, kind: QuestionType, correct: &str) -> QuizQuestion {
        QuizQuestion {
            id,
            question: format!("Question {}", id),
            kind,
            options: Some("A, B, C, D".to_string()),
            correct_answer: Some(correct.to_string()),
            class_name: None,
            subject: None,
            topic: None,
        }
    }

    fn chapter() -> ChapterInfo {
        ChapterInfo {
            class_name: "Class 6".to_string(),
            subject_name: "Science".to_string(),
            chapter_name: "Light".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_score_answer() {
        let q = question(1, QuestionType::Fill, "Photosynthesis");
        assert_eq!(score_answer(&q, None), 0.0);
        assert_eq!(score_answer(&q, Some("   ")), 0.0);
        assert_eq!(score_answer(&q, Some(" photosynthesis ")), 1.0);
        assert_eq!(score_answer(&q, Some("respiration")), 0.0);
    }

    #[test]
    fn test_score_without_key_is_zero() {
        let mut q = question(1, QuestionType::Short, "x");
        q.correct_answer = None;
        assert_eq!(score_answer(&q, Some("anything")), 0.0);
    }

    #[test]
    fn test_feedback_bands() {
        assert_eq!(Feedback::for_score(1.0), Feedback::Excellent);
        assert_eq!(Feedback::for_score(0.8), Feedback::Excellent);
        assert_eq!(Feedback::for_score(0.5), Feedback::Review);
        assert_eq!(Feedback::for_score(0.49), Feedback::NeedsImprovement);
    }

    #[test]
    fn test_submit_scores_quiz() {
        let start = Instant::now();
        let mut quiz = QuizSession::new(
            vec![
                question(1, QuestionType::Mcq, "B"),
                question(2, QuestionType::TrueFalse, "True"),
                question(3, QuestionType::Fill, "Delhi"),
                question(4, QuestionType::Short, "Gravity"),
            ],
            Some(chapter()),
            start,
        );
        quiz.set_answer(1, "B");
        quiz.set_answer(2, "False");
        quiz.set_answer(3, "delhi");

        let outcome = quiz.submit().clone();
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.accuracy, 50.0);
        assert_eq!(outcome.response_for(2).unwrap().score, 0.0);
        assert_eq!(outcome.response_for(4).unwrap().answer, "");

        quiz.set_answer(2, "True");
        assert_eq!(quiz.submit(), &outcome);
    }

    #[test]
    fn test_empty_quiz_scores_zero() {
        let mut quiz = QuizSession::new(vec![], None, Instant::now());
        assert_eq!(quiz.submit().accuracy, 0.0);
    }

    #[test]
    fn test_tick_auto_submits_once() {
        let start = Instant::now();
        let mut quiz = QuizSession::new(vec![question(1, QuestionType::Mcq, "A")], None, start)
            .with_duration(Duration::from_secs(60));

        assert_eq!(quiz.remaining(start + Duration::from_secs(20)), Duration::from_secs(40));
        assert!(quiz.tick(start + Duration::from_secs(59)).is_none());
        assert!(quiz.tick(start + Duration::from_secs(60)).is_some());
        assert!(quiz.tick(start + Duration::from_secs(61)).is_none());
        assert!(quiz.is_submitted());
    }

    #[test]
    fn test_pending_quiz_round_trip() {
        let store = MemoryStore::new();
        assert!(load_pending_quiz(&store).is_none());

        let questions = vec![question(1, QuestionType::Mcq, "A")];
        save_pending_quiz(&store, &questions, Some(&chapter())).unwrap();

        let (loaded, loaded_chapter) = load_pending_quiz(&store).unwrap();
        assert_eq!(loaded, questions);
        assert_eq!(loaded_chapter, Some(chapter()));

        save_pending_quiz(&store, &questions, None).unwrap();
        assert_eq!(load_pending_quiz(&store).unwrap().1, None);
    }

    #[test]
    fn test_malformed_pending_quiz_is_ignored() {
        let store = MemoryStore::new();
        store.set(QUIZ_QUESTIONS_KEY, "[{\"id\":").unwrap();
        assert!(load_pending_quiz(&store).is_none());
    }

    #[test]
    fn test_practice_history_appends() {
        let store = MemoryStore::new();
        let mut quiz = QuizSession::new(vec![question(1, QuestionType::Mcq, "A")], Some(chapter()), Instant::now());
        assert!(quiz.practice_result(Utc::now()).is_none());

        quiz.set_answer(1, "A");
        quiz.submit();
        let result = quiz.practice_result(Utc::now()).unwrap();
        assert_eq!(result.score, 100.0);

        append_practice_result(&store, result.clone()).unwrap();
        append_practice_result(&store, result).unwrap();
        assert_eq!(practice_history(&store).len(), 2);
    }
}
