use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::backend::BackendClient;
use crate::errors::{ToolError, ToolResult};
use crate::models::tool::{Tool, ToolCall};

pub mod appointments;
pub mod medical_history;
pub mod patients;

pub use appointments::{GetAppointments, ScheduleAppointment};
pub use medical_history::GetMedicalHistory;
pub use patients::RegisterPatient;

/// A tool the agent runtime can invoke. Each one performs at most a single
/// outbound call per invocation.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Definition offered to the agent runtime
    fn tool(&self) -> &Tool;

    /// Run the tool with the given input and return its result unmodified
    async fn call(&self, input: Value) -> ToolResult<Value>;
}

/// Decode tool input into its declared shape
pub(crate) fn parse_input<T: DeserializeOwned>(tool: &str, input: Value) -> ToolResult<T> {
    serde_json::from_value(input)
        .map_err(|e| ToolError::InvalidParameters(format!("{}: {}", tool, e)))
}

/// Tools by name, in registration order
#[derive(Clone, Default)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard set of clinic tools backed by `backend`
    pub fn with_defaults(backend: BackendClient) -> Self {
        let mut registry = Self::new();
        registry.register(GetAppointments::new(backend.clone()));
        registry.register(GetMedicalHistory::new(backend.clone()));
        registry.register(RegisterPatient::new(backend));
        registry.register(ScheduleAppointment::new());
        registry
    }

    /// Add a tool, replacing any earlier tool with the same name
    pub fn register<H: ToolHandler + 'static>(&mut self, handler: H) {
        let name = handler.tool().name.clone();
        self.handlers.retain(|existing| existing.tool().name != name);
        self.handlers.push(Arc::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolHandler> {
        self.handlers
            .iter()
            .find(|handler| handler.tool().name == name)
            .map(|handler| handler.as_ref())
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.handlers.iter().map(|h| h.tool().clone()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.tool().name.as_str()).collect()
    }

    pub async fn call(&self, call: ToolCall) -> ToolResult<Value> {
        let handler = self
            .get(&call.name)
            .ok_or_else(|| ToolError::ToolNotFound(call.name.clone()))?;
        tracing::info!(tool = %call.name, "dispatching tool call");
        handler.call(call.arguments).await
    }

    /// Like [`call`](Self::call), but failures come back as an
    /// `{"error": "..."}` object for the agent runtime to relay.
    pub async fn dispatch(&self, call: ToolCall) -> Value {
        let name = call.name.clone();
        match self.call(call).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(tool = %name, error = %e, "tool call failed");
                json!({ "error": e.to_string() })
            }
        }
    }

    /// Whether `output` has the success shape `name` declares
    pub fn is_success(&self, name: &str, output: &Value) -> bool {
        self.get(name)
            .map(|handler| handler.tool().is_success(output))
            .unwrap_or(false)
    }
}
