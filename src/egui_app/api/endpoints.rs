//! Typed wrappers for the revision API endpoints.
//!
//! Every call goes through [`ApiClient::send`], so credentials and failure
//! classification apply uniformly.

use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::shared::models::{
    BulkQuestionRow, LoginRequest, LoginResponse, Question, QuestionUpdate, QuestionsResponse, QuizQuery,
    QuizQuestion, SignupRequest, SignupResponse, StudentPerformance, StudentProgress, Subject,
    SubjectPerformance, SubjectPayload, Topic, UploadQuestionRequest, UploadQuestionResponse,
    UserSummary,
};
use crate::shared::syllabus::class_number;
use crate::shared::UserProfile;

impl ApiClient {
    /// Exchange credentials for a token and profile. Uses the login timeout
    /// instead of the default request timeout.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, UserProfile), ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let builder = self
            .request(Method::POST, "/login")
            .timeout(self.config().login_timeout())
            .json(&request);

        let response: LoginResponse = Self::decode(self.send(builder).await?).await?;
        match response.user {
            Some(user) if !response.access_token.is_empty() => {
                tracing::info!(target: "revisewise::api", user_id = user.id, role = %user.role, "login accepted");
                Ok((response.access_token, user))
            }
            _ => Err(ApiError::Decode("login response lacks token or user".to_string())),
        }
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        self.post_json("/signup", request).await
    }

    /// Subjects taught in a class. Accepts "Class 7" or "7".
    pub async fn subjects(&self, class: &str) -> Result<Vec<Subject>, ApiError> {
        self.get_json(&format!("/subjects/{}", class_number(class))).await
    }

    pub async fn add_subject(&self, subject: &SubjectPayload) -> Result<(), ApiError> {
        self.execute(Method::POST, "/subjects", Some(subject)).await
    }

    pub async fn update_subject(&self, id: i64, subject: &SubjectPayload) -> Result<(), ApiError> {
        self.execute(Method::PUT, &format!("/subjects/{}", id), Some(subject)).await
    }

    pub async fn delete_subject(&self, id: i64) -> Result<(), ApiError> {
        self.execute(Method::DELETE, &format!("/subjects/{}", id), None::<&()>).await
    }

    pub async fn topics(&self, subject_id: i64) -> Result<Vec<Topic>, ApiError> {
        self.get_json(&format!("/topics/{}", subject_id)).await
    }

    /// Quiz questions for a class, subject, topic and question type.
    pub async fn quiz_questions(&self, query: &QuizQuery) -> Result<Vec<QuizQuestion>, ApiError> {
        let response: QuestionsResponse = self.get_json_with_query("/questions", query).await?;
        Ok(response.questions)
    }

    pub async fn all_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.get_json("/questions/all").await
    }

    pub async fn questions_uploaded_by(&self, teacher_id: i64) -> Result<Vec<Question>, ApiError> {
        self.get_json(&format!("/questions/uploaded-by/{}", teacher_id)).await
    }

    pub async fn update_question(&self, id: i64, update: &QuestionUpdate) -> Result<(), ApiError> {
        self.execute(Method::PUT, &format!("/questions/{}", id), Some(update)).await
    }

    pub async fn delete_question(&self, id: i64) -> Result<(), ApiError> {
        self.execute(Method::DELETE, &format!("/questions/{}", id), None::<&()>).await
    }

    pub async fn upload_question(
        &self,
        request: &UploadQuestionRequest,
    ) -> Result<UploadQuestionResponse, ApiError> {
        self.post_json("/api/questions/upload", request).await
    }

    /// Send a parsed question file as one JSON array. Returns the number of
    /// questions sent.
    pub async fn bulk_upload(&self, rows: &[BulkQuestionRow]) -> Result<usize, ApiError> {
        self.execute(Method::POST, "/bulk-upload", Some(rows)).await?;
        tracing::info!(target: "revisewise::api", count = rows.len(), "bulk upload accepted");
        Ok(rows.len())
    }

    pub async fn users(&self) -> Result<Vec<UserSummary>, ApiError> {
        self.get_json("/users").await
    }

    /// Students see their own rows, staff see every student.
    pub async fn performance_summary(&self) -> Result<Vec<StudentPerformance>, ApiError> {
        self.get_json("/performance/summary").await
    }

    pub async fn all_progress(&self) -> Result<Vec<StudentProgress>, ApiError> {
        self.get_json("/performance/all-progress").await
    }

    pub async fn subject_progress(&self, student_id: i64) -> Result<Vec<SubjectPerformance>, ApiError> {
        self.get_json(&format!("/progress/subject/{}", student_id)).await
    }

    /// Connectivity probe: lists every subject.
    pub async fn health(&self) -> Result<Vec<Subject>, ApiError> {
        self.get_json("/subjects").await
    }
}
