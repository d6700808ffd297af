//! Client-side routes, their access policies and guard-aware navigation.

use std::fmt;

use crate::egui_app::guards::{decide, AccessPolicy, GuardDecision};
use crate::egui_app::session::Session;
use crate::shared::Role;

const ANY_ROLE: &[Role] = &[Role::Student, Role::Teacher, Role::Admin];
const STUDENT_ONLY: &[Role] = &[Role::Student];
const TEACHER_ONLY: &[Role] = &[Role::Teacher];
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const STAFF: &[Role] = &[Role::Admin, Role::Teacher];

/// Every screen of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Signup,
    Syllabus,
    About,
    ConnectionCheck,
    Forbidden,
    Dashboard,
    StudentDashboard,
    TeacherDashboard,
    StudentProgressOverview,
    AdminDashboard,
    UploadQuestion,
    EditQuestion(i64),
    Quiz,
    Progress,
    NotFound(String),
}

impl Route {
    /// Parse a path. Unknown paths map to [`Route::NotFound`].
    pub fn parse(path: &str) -> Route {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match trimmed {
            "" | "/" => Route::Landing,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/syllabus" => Route::Syllabus,
            "/about" => Route::About,
            "/check" => Route::ConnectionCheck,
            "/403" => Route::Forbidden,
            "/dashboard" => Route::Dashboard,
            "/student" => Route::StudentDashboard,
            "/teacher" => Route::TeacherDashboard,
            "/teacher-student-progress" => Route::StudentProgressOverview,
            "/admin" => Route::AdminDashboard,
            "/upload-question" => Route::UploadQuestion,
            "/quiz" => Route::Quiz,
            "/progress" => Route::Progress,
            other => match other
                .strip_prefix("/edit-question/")
                .and_then(|id| id.parse::<i64>().ok())
            {
                Some(id) => Route::EditQuestion(id),
                None => Route::NotFound(other.to_string()),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Syllabus => "/syllabus".to_string(),
            Route::About => "/about".to_string(),
            Route::ConnectionCheck => "/check".to_string(),
            Route::Forbidden => "/403".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::StudentDashboard => "/student".to_string(),
            Route::TeacherDashboard => "/teacher".to_string(),
            Route::StudentProgressOverview => "/teacher-student-progress".to_string(),
            Route::AdminDashboard => "/admin".to_string(),
            Route::UploadQuestion => "/upload-question".to_string(),
            Route::EditQuestion(id) => format!("/edit-question/{}", id),
            Route::Quiz => "/quiz".to_string(),
            Route::Progress => "/progress".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn policy(&self) -> AccessPolicy {
        match self {
            Route::Landing
            | Route::Login
            | Route::Signup
            | Route::Syllabus
            | Route::About
            | Route::ConnectionCheck
            | Route::Forbidden
            | Route::NotFound(_) => AccessPolicy::Public,
            Route::Dashboard => AccessPolicy::Roles(ANY_ROLE),
            Route::StudentDashboard => AccessPolicy::Roles(STUDENT_ONLY),
            Route::TeacherDashboard => AccessPolicy::Roles(TEACHER_ONLY),
            Route::AdminDashboard => AccessPolicy::Roles(ADMIN_ONLY),
            Route::StudentProgressOverview | Route::UploadQuestion | Route::EditQuestion(_) => {
                AccessPolicy::Roles(STAFF)
            }
            Route::Quiz | Route::Progress => AccessPolicy::Authenticated,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Home",
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::Syllabus => "Syllabus",
            Route::About => "About",
            Route::ConnectionCheck => "Connection Check",
            Route::Forbidden => "Access Denied",
            Route::Dashboard => "Dashboard",
            Route::StudentDashboard => "Student Dashboard",
            Route::TeacherDashboard => "Teacher Dashboard",
            Route::StudentProgressOverview => "Student Progress",
            Route::AdminDashboard => "Admin Dashboard",
            Route::UploadQuestion => "Upload Question",
            Route::EditQuestion(_) => "Edit Question",
            Route::Quiz => "Practice Quiz",
            Route::Progress => "Progress",
            Route::NotFound(_) => "Not Found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Apply the target route's guard and return the route that is shown.
pub fn resolve(target: Route, session: &Session) -> Route {
    match decide(session, target.policy()) {
        GuardDecision::Render => target,
        GuardDecision::RedirectHome => {
            tracing::info!(target: "revisewise::guard", path = %target, "not logged in, redirecting home");
            Route::Landing
        }
        GuardDecision::RedirectForbidden => {
            tracing::info!(target: "revisewise::guard", path = %target, "role not allowed");
            Route::Forbidden
        }
    }
}

/// Where a user lands right after logging in. An unrecognised role has no
/// dashboard.
pub fn home_for(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminDashboard,
        Role::Teacher => Route::TeacherDashboard,
        Role::Student => Route::Dashboard,
        Role::Unknown => Route::Forbidden,
    }
}
