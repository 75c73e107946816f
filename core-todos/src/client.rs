//! Typed client for the todo endpoints.

use core_auth::{ApiRequest, AuthPipeline, Result};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::types::{NewTodo, Todo, TodoListResponse, TodoPatch};

/// CRUD access to the authenticated user's todos.
///
/// Each method is a single pipeline dispatch; authentication failures,
/// refresh, and forced logout are handled below this layer and surface as
/// `core-auth` errors unchanged.
pub struct TodoClient {
    pipeline: Arc<AuthPipeline>,
}

impl TodoClient {
    pub fn new(pipeline: Arc<AuthPipeline>) -> Self {
        Self { pipeline }
    }

    /// Fetch all todos visible to the current user.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Todo>> {
        let response: TodoListResponse = self
            .pipeline
            .dispatch_json(ApiRequest::get("/todos"))
            .await?;
        Ok(response.todos)
    }

    /// Create a todo and return it as stored by the backend.
    #[instrument(skip_all, fields(title = %todo.title))]
    pub async fn create(&self, todo: &NewTodo) -> Result<Todo> {
        self.pipeline
            .dispatch_json(ApiRequest::post_json("/todos", todo)?)
            .await
    }

    /// Replace a todo's mutable fields and return the updated item.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: Uuid, patch: &TodoPatch) -> Result<Todo> {
        self.pipeline
            .dispatch_json(ApiRequest::put_json(format!("/todos/{}", id), patch)?)
            .await
    }

    /// Delete a todo.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.pipeline
            .dispatch_unit(ApiRequest::delete(format!("/todos/{}", id)))
            .await
    }
}
