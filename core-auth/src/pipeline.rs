//! Request authenticator and refresh coordinator.
//!
//! Every authenticated API call flows through [`AuthPipeline::dispatch`]:
//!
//! 1. The stored access credential (if any) is attached as a bearer header.
//! 2. The request is sent over the transport bridge.
//! 3. On a 401 for a request that has not been replayed yet, the pipeline
//!    performs one refresh exchange and replays the request exactly once
//!    with the freshly stored credential.
//! 4. If refresh is impossible or fails, or the replay is rejected again,
//!    the pipeline clears stored credentials, navigates to the login entry
//!    point, and surfaces the failure to the caller.
//!
//! The refresh exchange itself bypasses step 1: it authenticates with the
//! refresh credential in its body, never with a bearer header.

use bridge_traits::{HttpClient, HttpMethod, HttpRequest, HttpResponse, Navigator, Route};
use core_runtime::events::{CoreEvent, EventBus, SessionEvent};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::credential_store::{CredentialKind, CredentialStore};
use crate::error::{AuthError, Result};
use crate::request::ApiRequest;
use crate::types::{ErrorResponse, RefreshRequest, RefreshResponse, TokenPair};

/// Authenticated dispatch over a plain HTTP transport.
///
/// Cheap to clone via `Arc`; all state lives in the credential store and the
/// transport.
pub struct AuthPipeline {
    http_client: Arc<dyn HttpClient>,
    credentials: CredentialStore,
    base_url: String,
    navigator: Arc<dyn Navigator>,
    event_bus: EventBus,
}

impl AuthPipeline {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        credentials: CredentialStore,
        base_url: &Url,
        navigator: Arc<dyn Navigator>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            http_client,
            credentials,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            navigator,
            event_bus,
        }
    }

    /// The credential store backing this pipeline.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Dispatch a request with bearer authentication and refresh-on-401.
    ///
    /// Returns the final transport response; non-2xx statuses other than the
    /// handled 401 are returned to the caller for interpretation.
    #[instrument(skip_all, fields(method = request.method.as_str(), path = %request.path))]
    pub async fn dispatch(&self, request: ApiRequest) -> Result<HttpResponse> {
        let mut request = request;
        loop {
            let response = self.send(&request).await?;

            if !response.is_unauthorized() {
                return Ok(response);
            }
            if request.retried() {
                // The replayed request was rejected with the fresh
                // credential: the session is dead.
                return Err(self
                    .force_logout("Replayed request was rejected again".to_string())
                    .await);
            }

            debug!("Authorization failure, attempting credential refresh");
            request = request.into_retried();
            self.refresh().await?;
            // Loop around: the replay re-reads the rotated credential.
        }
    }

    /// Dispatch and decode a 2xx JSON response body.
    pub async fn dispatch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.dispatch(request).await?;
        if !response.is_success() {
            return Err(api_error(&response));
        }
        response
            .json()
            .map_err(|e| AuthError::Decode(e.to_string()))
    }

    /// Dispatch and require a 2xx response, discarding the body.
    pub async fn dispatch_unit(&self, request: ApiRequest) -> Result<()> {
        let response = self.dispatch(request).await?;
        if !response.is_success() {
            return Err(api_error(&response));
        }
        Ok(())
    }

    async fn send(&self, request: &ApiRequest) -> Result<HttpResponse> {
        let mut outbound = request.to_http(&self.base_url);
        if let Some(token) = self.credentials.get(CredentialKind::Access).await {
            outbound = outbound.bearer_token(token);
        }
        self.http_client
            .execute(outbound)
            .await
            .map_err(|e| AuthError::Network(e.to_string()))
    }

    /// Exchange the refresh credential for a new pair.
    ///
    /// Any failure here is irrecoverable for the current session: the store
    /// is cleared, the host is navigated to the login entry point, and the
    /// error carries the underlying reason.
    async fn refresh(&self) -> Result<()> {
        let Some(refresh_token) = self.credentials.get(CredentialKind::Refresh).await else {
            return Err(self
                .force_logout("No refresh credential available".to_string())
                .await);
        };

        // Built directly on the transport: no bearer header.
        let exchange = HttpRequest::new(HttpMethod::Post, format!("{}/auth/refresh", self.base_url))
            .json(&RefreshRequest { refresh_token })
            .map_err(|e| AuthError::Decode(e.to_string()))?;

        match self.http_client.execute(exchange).await {
            Ok(response) if response.is_success() => match response.json::<RefreshResponse>() {
                Ok(rotated) => {
                    self.credentials
                        .set(&TokenPair::new(rotated.access_token, rotated.refresh_token))
                        .await;
                    info!("Credential pair rotated");
                    self.event_bus
                        .emit(CoreEvent::Session(SessionEvent::TokenRefreshed))
                        .ok();
                    Ok(())
                }
                Err(e) => Err(self
                    .force_logout(format!("Malformed refresh response: {}", e))
                    .await),
            },
            Ok(response) => Err(self
                .force_logout(format!(
                    "Refresh endpoint returned status {}",
                    response.status
                ))
                .await),
            Err(e) => Err(self
                .force_logout(format!("Refresh request failed: {}", e))
                .await),
        }
    }

    /// Clear credentials, send the host to the login entry point, and build
    /// the error the original caller receives.
    async fn force_logout(&self, reason: String) -> AuthError {
        warn!(reason = %reason, "Session irrecoverable, forcing logout");
        self.credentials.clear().await;
        self.navigator.navigate(Route::Login);
        self.event_bus
            .emit(CoreEvent::Session(SessionEvent::SessionError {
                message: reason.clone(),
                recoverable: false,
            }))
            .ok();
        self.event_bus
            .emit(CoreEvent::Session(SessionEvent::SignedOut))
            .ok();
        AuthError::RefreshExhausted { reason }
    }
}

/// Map a non-2xx response to an API error, extracting the backend's message
/// envelope when present.
fn api_error(response: &HttpResponse) -> AuthError {
    let message = response
        .json::<ErrorResponse>()
        .map(|e| e.message)
        .or_else(|_| response.text())
        .unwrap_or_default();
    AuthError::Api {
        status: response.status,
        message,
    }
}
