/**
 * API Data Model
 *
 * Typed mirrors of the JSON records exchanged with the revision API:
 * user profiles and roles, the login/signup contract, subjects, topics,
 * questions and performance summaries.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role. Matching is exact, with no hierarchy.
///
/// Any role string outside the known three decodes as [`Role::Unknown`],
/// which no route allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Profile of the logged-in user, as returned by `/login` and kept in the
/// session store. Only `id` is required to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    /// Class label, only set for students
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_class: Option<String>,
}

impl UserProfile {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            student_class: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.student_class = Some(class.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response. `access_token` and `user` are checked by the client
/// before a session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub student_class: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user_id: i64,
}

/// Generic `{message}` acknowledgement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub class_name: Option<String>,
}

/// Body of `POST /subjects` and `PUT /subjects/<id>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectPayload {
    pub name: String,
    /// Class number without the "Class " prefix
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
    pub subject_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "mcq")]
    Mcq,
    #[serde(rename = "true-false")]
    TrueFalse,
    #[serde(rename = "fill")]
    Fill,
    #[serde(rename = "short")]
    Short,
    #[serde(other)]
    Other,
}

impl QuestionType {
    pub const SELECTABLE: [QuestionType; 4] = [
        QuestionType::Mcq,
        QuestionType::TrueFalse,
        QuestionType::Fill,
        QuestionType::Short,
    ];

    /// Wire name used in query strings and request bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::TrueFalse => "true-false",
            QuestionType::Fill => "fill",
            QuestionType::Short => "short",
            QuestionType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "Multiple choice",
            QuestionType::TrueFalse => "True / False",
            QuestionType::Fill => "Fill in the blank",
            QuestionType::Short => "Short answer",
            QuestionType::Other => "Other",
        }
    }

    /// Whether answers are picked from a fixed option list
    pub fn is_objective(&self) -> bool {
        matches!(self, QuestionType::Mcq | QuestionType::TrueFalse)
    }
}

/// Question served to students by `GET /questions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Comma separated option labels
    #[serde(default)]
    pub options: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

impl QuizQuestion {
    /// Options split on commas, trimmed, blanks dropped
    pub fn option_list(&self) -> Vec<String> {
        split_options(self.options.as_deref().unwrap_or_default())
    }
}

pub(crate) fn split_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|opt| opt.trim().to_string())
        .filter(|opt| !opt.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionsResponse {
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

/// Filters for `GET /questions`
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuery {
    pub class: String,
    pub subject_id: i64,
    pub topic_id: i64,
    #[serde(rename = "type")]
    pub kind: QuestionType,
}

/// Question bank record, as listed by `/questions/all` and
/// `/questions/uploaded-by/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    #[serde(default)]
    pub topic_id: i64,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub options: Option<String>,
    #[serde(default)]
    pub correct_ans: String,
}

/// Body of `PUT /questions/<id>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionUpdate {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: String,
    pub correct_ans: String,
    pub topic_id: i64,
}

/// Body of `POST /api/questions/upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadQuestionRequest {
    #[serde(rename = "className")]
    pub class_name: String,
    pub subject: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    pub uploaded_by: i64,
}

/// One CSV row of a bulk question file, and one element of the
/// `POST /bulk-upload` body. Column names are the wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkQuestionRow {
    pub topic_id: i64,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Comma separated, empty for non-MCQ questions
    #[serde(default)]
    pub options: String,
    pub correct_ans: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadQuestionResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub question_id: Option<i64>,
}

/// Account listed by `GET /users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    #[serde(alias = "username")]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Row of `GET /performance/summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPerformance {
    pub student_id: i64,
    pub subject_name: String,
    pub topic_name: String,
    pub accuracy: f64,
    #[serde(default)]
    pub time_spent: f64,
}

/// Row of `GET /performance/all-progress`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProgress {
    pub student_id: i64,
    pub student_name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub subject: String,
    pub topic: String,
    pub accuracy: f64,
    #[serde(default)]
    pub time_spent: f64,
}

/// Row of `GET /progress/subject/<student_id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectPerformance {
    pub subject: String,
    pub accuracy: f64,
    #[serde(default)]
    pub attempts: u32,
}
