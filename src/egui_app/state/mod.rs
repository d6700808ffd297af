use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::egui_app::api::{ApiClient, ApiError};
use crate::egui_app::config::Config;
use crate::egui_app::notifications::{Notification, NotificationHub};
use crate::egui_app::routes::{resolve, Route};
use crate::egui_app::session::{Session, SessionContext, SessionEvent};
use crate::egui_app::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::egui_app::tasks::Pending;
use crate::egui_app::views::admin_view::AdminPage;
use crate::egui_app::views::auth_view::{LoginPage, SignupPage};
use crate::egui_app::views::dashboard_view::QuizSetupPage;
use crate::egui_app::views::progress_view::ProgressPage;
use crate::egui_app::views::question_view::{EditQuestionPage, UploadPage};
use crate::egui_app::views::quiz_view::QuizPage;
use crate::egui_app::views::status_view::ConnectionPage;
use crate::egui_app::views::syllabus_view::SyllabusPage;
use crate::egui_app::views::teacher_view::{StudentProgressPage, TeacherPage};
use crate::egui_app::views::Actions;
use crate::shared::ConfigError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Long-lived handles shared by every page.
#[derive(Clone)]
pub struct Services {
    pub config: Config,
    pub session: SessionContext,
    pub notifications: NotificationHub,
    pub api: ApiClient,
    runtime: Arc<Runtime>,
}

impl Services {
    /// Services over the configured storage file.
    pub fn new(config: Config) -> Result<Self, StartupError> {
        let store = FileStore::new(config.storage_path());
        tracing::info!(target: "revisewise::ui", path = %store.path().display(), "using storage file");
        Self::with_store(config, Arc::new(store))
    }

    /// Services over an in-process store
    pub fn in_memory(config: Config) -> Result<Self, StartupError> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self, StartupError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("revisewise-io")
            .enable_all()
            .build()
            .map_err(StartupError::Runtime)?;

        let session = SessionContext::new(store);
        let notifications = NotificationHub::new();
        let api = ApiClient::new(config.clone(), session.clone(), notifications.clone())?;

        Ok(Self {
            config,
            session,
            notifications,
            api,
            runtime: Arc::new(runtime),
        })
    }

    /// Run an API call in the background.
    pub fn spawn<T, F, Fut>(&self, task: F) -> Pending<T>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        Pending::spawn(&self.runtime, task(self.api.clone()))
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.session.store()
    }
}

/// State of the page currently shown. Replaced on every navigation, which
/// also drops the receivers of requests the old page started.
pub enum Page {
    Landing,
    Login(LoginPage),
    Signup(SignupPage),
    Syllabus(SyllabusPage),
    About,
    ConnectionCheck(ConnectionPage),
    Forbidden,
    NotFound(String),
    Dashboard(QuizSetupPage),
    StudentDashboard(QuizSetupPage),
    TeacherDashboard(TeacherPage),
    StudentProgressOverview(StudentProgressPage),
    AdminDashboard(AdminPage),
    UploadQuestion(UploadPage),
    EditQuestion(EditQuestionPage),
    Quiz(QuizPage),
    Progress(ProgressPage),
}

impl Page {
    /// Fresh state for `route`. Pages that need data start fetching here.
    pub fn open(route: &Route, services: &Services, session: &Session) -> Page {
        match route {
            Route::Landing => Page::Landing,
            Route::Login => Page::Login(LoginPage::default()),
            Route::Signup => Page::Signup(SignupPage::default()),
            Route::Syllabus => Page::Syllabus(SyllabusPage::default()),
            Route::About => Page::About,
            Route::ConnectionCheck => Page::ConnectionCheck(ConnectionPage::open(services)),
            Route::Forbidden => Page::Forbidden,
            Route::NotFound(path) => Page::NotFound(path.clone()),
            Route::Dashboard => Page::Dashboard(QuizSetupPage::open(services, session)),
            Route::StudentDashboard => Page::StudentDashboard(QuizSetupPage::open(services, session)),
            Route::TeacherDashboard => Page::TeacherDashboard(TeacherPage::open(services, session)),
            Route::StudentProgressOverview => {
                Page::StudentProgressOverview(StudentProgressPage::open(services))
            }
            Route::AdminDashboard => Page::AdminDashboard(AdminPage::open(services)),
            Route::UploadQuestion => Page::UploadQuestion(UploadPage::default()),
            Route::EditQuestion(id) => Page::EditQuestion(EditQuestionPage::open(*id, services)),
            Route::Quiz => Page::Quiz(QuizPage::open(services)),
            Route::Progress => Page::Progress(ProgressPage::open(services, session)),
        }
    }
}

/// Central application state shared across egui views.
pub struct AppState {
    pub services: Services,
    /// Session snapshot, refreshed on navigation and session events
    pub session: Session,
    pub route: Route,
    pub page: Page,
    /// Blocking alerts, oldest first
    pub alerts: VecDeque<String>,
    /// One-line message shown above the page until the next navigation
    pub flash: Option<String>,
    session_events: broadcast::Receiver<SessionEvent>,
    notifications: broadcast::Receiver<Notification>,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        let session_events = services.session.subscribe();
        let notifications = services.notifications.subscribe();
        let session = services.session.get_session();

        let mut state = Self {
            services,
            session,
            route: Route::Landing,
            page: Page::Landing,
            alerts: VecDeque::new(),
            flash: None,
            session_events,
            notifications,
        };
        state.navigate(Route::Landing);
        state
    }

    /// Guard `target` against the current session and open the page that
    /// is actually shown.
    pub fn navigate(&mut self, target: Route) {
        self.session = self.services.session.get_session();
        let shown = resolve(target, &self.session);
        tracing::debug!(target: "revisewise::ui", from = %self.route, to = %shown, "navigate");

        self.page = Page::open(&shown, &self.services, &self.session);
        self.route = shown;
        self.flash = None;
    }

    /// Drain session events and notifications. Called once per frame.
    pub fn poll_events(&mut self) {
        let mut changed = false;
        let mut cleared = false;
        loop {
            match self.session_events.try_recv() {
                Ok(SessionEvent::Cleared) => cleared = true,
                Ok(SessionEvent::Started { .. }) => changed = true,
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(target: "revisewise::ui", skipped, "missed session events");
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        if cleared {
            self.reset();
        } else if changed {
            self.session = self.services.session.get_session();
            let shown = resolve(self.route.clone(), &self.session);
            if shown != self.route {
                self.navigate(shown);
            }
        }

        loop {
            match self.notifications.try_recv() {
                Ok(notification) => self.alerts.push_back(notification.alert_text()),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(target: "revisewise::ui", skipped, "missed notifications");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Apply what a view asked for during the frame.
    pub fn apply(&mut self, actions: Actions) {
        if actions.logout {
            self.logout();
            return;
        }
        if let Some(route) = actions.navigate {
            self.navigate(route);
        }
        if actions.flash.is_some() {
            self.flash = actions.flash;
        }
    }

    /// Clear the session. The page reset follows from the session event.
    pub fn logout(&mut self) {
        if let Err(e) = self.services.session.clear_session() {
            tracing::error!(target: "revisewise::ui", error = %e, "failed to clear session");
        }
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    /// Drop everything derived from the old session and show the landing page.
    /// Alerts already shown and notifications still queued belong to the old
    /// session, so both are discarded.
    fn reset(&mut self) {
        tracing::info!(target: "revisewise::ui", dropped_alerts = self.alerts.len(), "session ended, resetting");
        self.alerts.clear();
        self.notifications = self.services.notifications.subscribe();
        self.navigate(Route::Landing);
    }
}
