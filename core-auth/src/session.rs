//! Session lifecycle management.
//!
//! [`SessionManager`] owns the in-memory identity and the observable session
//! state. It starts in `Bootstrapping`, resolves to `Authenticated` or
//! `Anonymous` during [`SessionManager::bootstrap`], and moves between those
//! two on login and logout. Credential persistence and refresh are delegated
//! to the [`AuthPipeline`]; this type never touches raw credentials beyond
//! handing a freshly issued pair to the store.

use bridge_traits::{Navigator, Route};
use core_runtime::events::{CoreEvent, EventBus, SessionEvent};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::pipeline::AuthPipeline;
use crate::request::ApiRequest;
use crate::types::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SessionState, TokenPair, User,
};

/// Authenticated session state machine.
pub struct SessionManager {
    pipeline: Arc<AuthPipeline>,
    navigator: Arc<dyn Navigator>,
    event_bus: EventBus,
    user: RwLock<Option<User>>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(
        pipeline: Arc<AuthPipeline>,
        navigator: Arc<dyn Navigator>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            pipeline,
            navigator,
            event_bus,
            user: RwLock::new(None),
            state: RwLock::new(SessionState::Bootstrapping),
        }
    }

    /// Resolve the initial session state from stored credentials.
    ///
    /// Without an access credential this settles to `Anonymous` with zero
    /// network traffic. With one, the identity is fetched through the
    /// pipeline (so an expired credential is refreshed transparently); any
    /// failure clears stored credentials and settles to `Anonymous` rather
    /// than propagating an error.
    #[instrument(skip_all)]
    pub async fn bootstrap(&self) {
        if !self.pipeline.credentials().has_access_credential().await {
            self.settle(SessionState::Anonymous, None).await;
            return;
        }

        match self.pipeline.dispatch_json::<User>(ApiRequest::get("/me")).await {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored from stored credentials");
                self.event_bus
                    .emit(CoreEvent::Session(SessionEvent::SignedIn {
                        user_id: user.id.to_string(),
                    }))
                    .ok();
                self.settle(SessionState::Authenticated, Some(user)).await;
            }
            Err(e) => {
                warn!(error = %e, "Session bootstrap failed, starting anonymous");
                self.pipeline.credentials().clear().await;
                self.event_bus
                    .emit(CoreEvent::Session(SessionEvent::SessionError {
                        message: e.to_string(),
                        // A failed bootstrap only costs the stored session;
                        // the user can sign in again.
                        recoverable: true,
                    }))
                    .ok();
                self.settle(SessionState::Anonymous, None).await;
            }
        }
    }

    /// Authenticate with the backend and establish a session.
    ///
    /// On success the issued credential pair is persisted, the identity is
    /// installed, and the host is navigated to the todo view. On failure
    /// nothing about the current session changes.
    #[instrument(skip_all, fields(tenant_slug = %tenant_slug))]
    pub async fn login(&self, email: &str, password: &str, tenant_slug: &str) -> Result<User> {
        let request = ApiRequest::post_json(
            "/auth/login",
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
                tenant_slug: tenant_slug.to_string(),
            },
        )?;
        let response: LoginResponse = self.pipeline.dispatch_json(request).await?;

        self.pipeline
            .credentials()
            .set(&TokenPair::new(response.access_token, response.refresh_token))
            .await;
        let user = response.user;
        info!(user_id = %user.id, "User signed in");

        self.settle(SessionState::Authenticated, Some(user.clone())).await;
        self.navigator.navigate(Route::Todos);
        self.event_bus
            .emit(CoreEvent::Session(SessionEvent::SignedIn {
                user_id: user.id.to_string(),
            }))
            .ok();
        Ok(user)
    }

    /// Create a new tenant account.
    ///
    /// Registration does not establish a session; the caller signs in
    /// afterwards using the returned tenant slug, derived from the email
    /// local part and the issued tenant id.
    #[instrument(skip_all)]
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<String> {
        let request = ApiRequest::post_json(
            "/auth/register",
            &RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
                name: name.to_string(),
            },
        )?;
        let response: RegisterResponse = self.pipeline.dispatch_json(request).await?;
        info!(user_id = %response.user_id, "Account registered");

        let local_part = email.split('@').next().unwrap_or(email);
        let tenant_id = response.tenant_id.to_string();
        let prefix = &tenant_id[..8.min(tenant_id.len())];
        Ok(format!("{}-{}", local_part, prefix))
    }

    /// End the session locally.
    ///
    /// Always succeeds: credentials are cleared, the identity is dropped,
    /// and the host is navigated to the login entry point regardless of
    /// prior state. No backend call is made.
    #[instrument(skip_all)]
    pub async fn logout(&self) {
        self.pipeline.credentials().clear().await;
        self.settle(SessionState::Anonymous, None).await;
        self.navigator.navigate(Route::Login);
        self.event_bus
            .emit(CoreEvent::Session(SessionEvent::SignedOut))
            .ok();
        info!("User signed out");
    }

    /// Replace the in-memory identity after a profile update.
    pub async fn update_user(&self, user: User) {
        *self.user.write().await = Some(user);
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state().await.is_authenticated()
    }

    async fn settle(&self, state: SessionState, user: Option<User>) {
        *self.user.write().await = user;
        *self.state.write().await = state;
    }
}
