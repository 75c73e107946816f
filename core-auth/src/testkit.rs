//! Shared hand-rolled test doubles for the auth crate's unit tests.

use async_trait::async_trait;
use bridge_traits::{
    BridgeError, HttpClient, HttpRequest, HttpResponse, Navigator, Route, SecureStore,
};
use bytes::Bytes;
use core_runtime::events::EventBus;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use url::Url;

use crate::credential_store::CredentialStore;
use crate::pipeline::AuthPipeline;

/// Transport double that replays a scripted sequence of responses and
/// records every request it was asked to execute.
pub(crate) struct ScriptedHttpClient {
    script: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        let response = HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        };
        self.script.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_status(&self, status: u16) {
        let response = HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        };
        self.script.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn execute(&self, request: HttpRequest) -> bridge_traits::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(BridgeError::OperationFailed(message)),
            None => Err(BridgeError::OperationFailed(
                "No scripted response left".to_string(),
            )),
        }
    }
}

/// In-memory secure store.
pub(crate) struct MemoryStore {
    secrets: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            secrets: Mutex::new(HashMap::new()),
        }
    }
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

/// Secure store that fails in configurable ways.
pub(crate) struct FailingStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes_after: Option<usize>,
    writes: Mutex<usize>,
}

impl FailingStore {
    /// Every read errors; writes and deletes succeed.
    pub fn reads() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_reads: true,
            fail_writes_after: None,
            writes: Mutex::new(0),
        }
    }

    /// The second write errors; everything else succeeds.
    pub fn second_write() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_reads: false,
            fail_writes_after: Some(1),
            writes: Mutex::new(0),
        }
    }
}

#[async_trait]
impl SecureStore for FailingStore {
    async fn set_secret(&self, key: &str, value: &[u8]) -> bridge_traits::Result<()> {
        // Guard scoped in a block so the boxed future stays Send.
        let seen = {
            let mut writes = self.writes.lock().unwrap();
            let seen = *writes;
            *writes += 1;
            seen
        };

        if matches!(self.fail_writes_after, Some(limit) if seen >= limit) {
            return Err(BridgeError::OperationFailed("store is full".to_string()));
        }
        self.inner.set_secret(key, value).await
    }

    async fn get_secret(&self, key: &str) -> bridge_traits::Result<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(BridgeError::OperationFailed("store unavailable".to_string()));
        }
        self.inner.get_secret(key).await
    }

    async fn delete_secret(&self, key: &str) -> bridge_traits::Result<()> {
        self.inner.delete_secret(key).await
    }
}

/// Navigator double that records requested routes.
pub(crate) struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
        }
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Fully wired pipeline over test doubles.
pub(crate) struct Fixture {
    pub pipeline: Arc<AuthPipeline>,
    pub http: Arc<ScriptedHttpClient>,
    pub navigator: Arc<RecordingNavigator>,
    pub store: Arc<MemoryStore>,
    pub events: EventBus,
}

pub(crate) async fn pipeline_fixture() -> Fixture {
    let http = Arc::new(ScriptedHttpClient::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryStore::new());
    let events = EventBus::new(16);

    let base_url: Url = "https://api.example.com".parse().unwrap();
    let pipeline = Arc::new(AuthPipeline::new(
        http.clone(),
        CredentialStore::new(store.clone()),
        &base_url,
        navigator.clone(),
        events.clone(),
    ));

    Fixture {
        pipeline,
        http,
        navigator,
        store,
        events,
    }
}
