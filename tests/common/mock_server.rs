//! Mock server helpers for integration tests
//!
//! Starts a `wiremock` server standing in for the revision API and builds
//! clients pointed at it.

use revisewise::egui_app::api::ApiClient;
use revisewise::egui_app::notifications::NotificationHub;
use revisewise::egui_app::session::SessionContext;
use revisewise::egui_app::Config;
use revisewise::shared::AppConfig;
use wiremock::MockServer;

/// Mock API plus a client wired to it
pub struct TestApi {
    pub server: MockServer,
    pub api: ApiClient,
}

impl TestApi {
    /// Start a server with an empty session
    pub async fn start() -> Self {
        Self::with_session(SessionContext::in_memory()).await
    }

    /// Start a server with the given session store
    pub async fn with_session(session: SessionContext) -> Self {
        let server = MockServer::start().await;
        let api = client_for(&server.uri(), session);
        Self { server, api }
    }

    /// Requests the server has seen so far
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// Configuration pointing at `uri`
pub fn config_for(uri: &str) -> Config {
    Config::with_builder(AppConfig::builder().server_url(uri)).expect("Failed to build test config")
}

/// Client for `uri` with a fresh notification hub
pub fn client_for(uri: &str, session: SessionContext) -> ApiClient {
    ApiClient::new(config_for(uri), session, NotificationHub::new()).expect("Failed to build test client")
}
