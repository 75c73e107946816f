//! # Core Service Facade
//!
//! Single entry point for hosts embedding the todo platform core. Wires the
//! configured bridges into the auth pipeline, session manager, and todo
//! client, and exposes them behind one handle.
//!
//! ## Usage
//!
//! ```ignore
//! use core_service::CoreService;
//! use core_runtime::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .api_base_url("https://api.example.com")
//!     .navigator(navigator)
//!     .build()?;
//!
//! let core = CoreService::new(config)?;
//! core.bootstrap().await;
//!
//! if core.session().is_authenticated().await {
//!     let todos = core.todos().list().await?;
//! }
//! ```

pub mod error;

pub use error::{Result, ServiceError};

// Host-facing re-exports so embedders depend on one crate.
pub use core_auth::{AuthError, SessionManager, SessionState, User};
pub use core_runtime::{CoreConfig, CoreEvent, EventBus, SessionEvent};
pub use core_todos::{NewTodo, Todo, TodoClient, TodoPatch};

use core_auth::{AuthPipeline, CredentialStore};
use core_runtime::Error as RuntimeError;
use std::sync::Arc;
use tracing::info;

/// The assembled core: session lifecycle, authenticated transport, and todo
/// access sharing one credential store and event bus.
pub struct CoreService {
    session: Arc<SessionManager>,
    todos: TodoClient,
    event_bus: EventBus,
}

impl CoreService {
    /// Assemble the core from a validated configuration.
    pub fn new(config: CoreConfig) -> Result<Self> {
        let http_client = config.http_client.ok_or_else(|| {
            RuntimeError::CapabilityMissing {
                capability: "HttpClient".to_string(),
                message: "Configuration was built without an HTTP client".to_string(),
            }
        })?;
        let secure_store = config.secure_store.ok_or_else(|| {
            RuntimeError::CapabilityMissing {
                capability: "SecureStore".to_string(),
                message: "Configuration was built without a secure store".to_string(),
            }
        })?;
        let navigator = config.navigator.ok_or_else(|| {
            RuntimeError::CapabilityMissing {
                capability: "Navigator".to_string(),
                message: "Configuration was built without a navigator".to_string(),
            }
        })?;

        let event_bus = EventBus::new(config.event_buffer_size);
        let credentials = CredentialStore::new(secure_store);
        let pipeline = Arc::new(AuthPipeline::new(
            http_client,
            credentials,
            &config.api_base_url,
            navigator.clone(),
            event_bus.clone(),
        ));
        let session = Arc::new(SessionManager::new(
            pipeline.clone(),
            navigator,
            event_bus.clone(),
        ));
        let todos = TodoClient::new(pipeline);

        info!(api_base_url = %config.api_base_url, "Core service assembled");
        Ok(Self {
            session,
            todos,
            event_bus,
        })
    }

    /// Resolve the initial session state from stored credentials.
    pub async fn bootstrap(&self) {
        self.session.bootstrap().await;
    }

    /// Session lifecycle operations and identity.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Authenticated todo access.
    pub fn todos(&self) -> &TodoClient {
        &self.todos
    }

    /// Event bus shared by all core components.
    pub fn events(&self) -> &EventBus {
        &self.event_bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::{
        BridgeError, HttpClient, HttpRequest, HttpResponse, Navigator, Route, SecureStore,
    };
    use bytes::Bytes;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    struct ScriptedHttpClient {
        script: Mutex<VecDeque<HttpResponse>>,
    }

    impl ScriptedHttpClient {
        fn new() -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
            }
        }

        fn push_json(&self, status: u16, body: serde_json::Value) {
            self.script.lock().unwrap().push_back(HttpResponse {
                status,
                headers: HashMap::new(),
                body: Bytes::from(body.to_string()),
            });
        }
    }

    #[async_trait]
    impl HttpClient for ScriptedHttpClient {
        async fn execute(&self, _request: HttpRequest) -> bridge_traits::Result<HttpResponse> {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| BridgeError::OperationFailed("No scripted response".to_string()))
        }
    }

    struct MemoryStore {
        secrets: Mutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl SecureStore for MemoryStore {
        async fn set_secret(&self, key: &str, value: &[u8]) -> bridge_traits::Result<()> {
            self.secrets
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn get_secret(&self, key: &str) -> bridge_traits::Result<Option<Vec<u8>>> {
            Ok(self.secrets.lock().unwrap().get(key).cloned())
        }

        async fn delete_secret(&self, key: &str) -> bridge_traits::Result<()> {
            self.secrets.lock().unwrap().remove(key);
            Ok(())
        }
    }

    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    fn service_fixture() -> (CoreService, Arc<ScriptedHttpClient>, Arc<RecordingNavigator>) {
        let http = Arc::new(ScriptedHttpClient::new());
        let navigator = Arc::new(RecordingNavigator {
            routes: Mutex::new(Vec::new()),
        });
        let config = CoreConfig::builder()
            .api_base_url("https://api.example.com")
            .http_client(http.clone())
            .secure_store(Arc::new(MemoryStore {
                secrets: Mutex::new(HashMap::new()),
            }))
            .navigator(navigator.clone())
            .build()
            .unwrap();
        (CoreService::new(config).unwrap(), http, navigator)
    }

    fn user_json() -> serde_json::Value {
        json!({
            "id": "0d9cb3c5-7d51-4f9a-9bcd-111111111111",
            "tenant_id": "22222222-2222-4222-8222-222222222222",
            "email": "ana@example.com",
            "name": "Ana",
            "role": "member",
            "email_verified": true
        })
    }

    #[tokio::test]
    async fn test_bootstrap_without_credentials_settles_anonymous() {
        let (core, _http, _navigator) = service_fixture();
        assert!(core.session().state().await.is_loading());

        core.bootstrap().await;

        assert_eq!(core.session().state().await, SessionState::Anonymous);
        assert!(!core.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_login_then_list_todos_end_to_end() {
        let (core, http, navigator) = service_fixture();
        core.bootstrap().await;

        http.push_json(
            200,
            json!({
                "access_token": "A1",
                "refresh_token": "R1",
                "user": user_json()
            }),
        );
        let user = core
            .session()
            .login("ana@example.com", "pw", "acme")
            .await
            .unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert!(core.session().is_authenticated().await);
        assert_eq!(navigator.routes.lock().unwrap().last(), Some(&Route::Todos));

        http.push_json(200, json!({"todos": []}));
        let todos = core.todos().list().await.unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_components_share_one_event_bus() {
        let (core, http, _navigator) = service_fixture();
        let mut rx = core.events().subscribe();
        core.bootstrap().await;

        http.push_json(
            200,
            json!({
                "access_token": "A1",
                "refresh_token": "R1",
                "user": user_json()
            }),
        );
        core.session()
            .login("ana@example.com", "pw", "acme")
            .await
            .unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            CoreEvent::Session(SessionEvent::SignedIn { .. })
        ));
    }
}
