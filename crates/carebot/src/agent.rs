use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tera::{Context, Tera};

use crate::backend::BackendClient;
use crate::components::{ComponentDefinition, ComponentRegistry, Rendered};
use crate::config::Settings;
use crate::errors::{ComponentResult, ToolError, ToolResult};
use crate::models::records::Appointment;
use crate::models::role::Role;
use crate::models::tool::{Tool, ToolCall};
use crate::payload;
use crate::session::{Persona, Session, SessionContext};
use crate::tools::ToolRegistry;

const SYSTEM_PROMPT: &str = include_str!("prompts/system.md");

#[derive(Serialize)]
struct PromptContext {
    persona: Persona,
    tools: Vec<Tool>,
    components: Vec<ComponentDefinition>,
    user: Value,
}

impl PromptContext {
    /// Render a tera template against the persona, tools and components
    fn render(&self, template: &str) -> ToolResult<String> {
        let context = Context::from_serialize(self).map_err(prompt_error)?;
        Tera::one_off(template, &context, false).map_err(prompt_error)
    }
}

fn prompt_error(e: tera::Error) -> ToolError {
    ToolError::Internal(format!("Failed to render prompt: {}", e))
}

/// A tool result together with the component chosen to display it
#[derive(Debug)]
pub struct Reply {
    pub output: Value,
    pub component: Option<&'static str>,
    pub rendered: Option<Rendered>,
}

/// Assistant exposes the clinic's tools and components to an agent runtime
/// on behalf of the current session.
pub struct Assistant {
    tools: ToolRegistry,
    components: ComponentRegistry,
    session: Session,
}

impl Assistant {
    pub fn new(tools: ToolRegistry, components: ComponentRegistry, session: Session) -> Self {
        Self {
            tools,
            components,
            session,
        }
    }

    /// Standard tools and components against the configured backend
    pub fn from_settings(settings: &Settings, role: Role) -> Self {
        let backend = BackendClient::new(settings.backend.clone());
        Self::new(
            ToolRegistry::with_defaults(backend),
            ComponentRegistry::with_defaults(),
            Session::new(role),
        )
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn context(&self) -> Arc<SessionContext> {
        self.session.context()
    }

    pub fn switch_role(&mut self, role: Role) {
        self.session.switch_role(role);
    }

    fn prompt_context(&self) -> PromptContext {
        let context = self.session.context();
        PromptContext {
            persona: context.persona,
            tools: self.tools.tools(),
            components: self.components.definitions(),
            user: context.user_context(),
        }
    }

    /// The bundled system prompt for the current persona
    pub fn system_prompt(&self) -> ToolResult<String> {
        self.prompt_context().render(SYSTEM_PROMPT)
    }

    /// Render a custom prompt template with the same context as the bundled one
    pub fn system_prompt_from(&self, template: impl AsRef<Path>) -> ToolResult<String> {
        let path = template.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            ToolError::Internal(format!(
                "Failed to read prompt template {}: {}",
                path.display(),
                e
            ))
        })?;
        self.prompt_context().render(&source)
    }

    pub async fn call_tool(&self, call: ToolCall) -> ToolResult<Value> {
        self.tools.call(call).await
    }

    /// Run several tool calls concurrently. Failures come back as error
    /// objects in the matching position.
    pub async fn call_tools(&self, calls: Vec<ToolCall>) -> Vec<Value> {
        let futures: Vec<_> = calls
            .into_iter()
            .map(|call| self.tools.dispatch(call))
            .collect();
        futures::future::join_all(futures).await
    }

    pub fn render(&self, component: &str, props: &Value) -> ComponentResult<Rendered> {
        self.components
            .render(component, props, &self.session.context())
    }

    /// Call a tool, then render whichever component should follow it
    pub async fn respond(&self, call: ToolCall) -> ToolResult<Reply> {
        let arguments = call.arguments.clone();
        let name = call.name.clone();
        let output = self.call_tool(call).await?;

        let follow_up = if self.tools.is_success(&name, &output) {
            follow_up(&name, &arguments, &output)
        } else {
            tracing::warn!(tool = %name, "tool result lacks declared success fields");
            None
        };

        let (component, rendered) = match follow_up {
            Some((component, props)) => {
                let rendered = self
                    .render(component, &props)
                    .map_err(|e| ToolError::Internal(e.to_string()))?;
                (Some(component), Some(rendered))
            }
            None => (None, None),
        };

        Ok(Reply {
            output,
            component,
            rendered,
        })
    }

    /// Hand a submitted form draft to the tool that stores it. Forms without
    /// a backing tool return `None`.
    pub async fn submit_form(&self, component: &str, draft: Value) -> ToolResult<Option<Value>> {
        match submission_tool(component) {
            Some(tool) => self.call_tool(ToolCall::new(tool, draft)).await.map(Some),
            None => {
                tracing::debug!(form = component, "no tool stores this form");
                Ok(None)
            }
        }
    }
}

/// The tool that persists drafts from `component`
pub fn submission_tool(component: &str) -> Option<&'static str> {
    match component {
        "AppointmentForm" => Some("scheduleAppointment"),
        "NewPatientForm" => Some("registerPatient"),
        _ => None,
    }
}

/// Which component follows a tool result, and the props to give it. Empty
/// results lead to a form for adding the missing data.
pub fn follow_up(tool: &str, arguments: &Value, output: &Value) -> Option<(&'static str, Value)> {
    let patient_name = arguments.get("patientName").cloned().unwrap_or(Value::Null);
    match tool {
        "getAppointments" => {
            let appointments =
                payload::collect::<Appointment, _>(output, Appointment::has_identity);
            if appointments.is_empty() {
                Some(("AppointmentForm", json!({ "patientName": patient_name })))
            } else {
                Some(("AppointmentList", json!({ "appointments": output })))
            }
        }
        "getMedicalHistory" => {
            let history = payload::normalize(output);
            if history.iter().all(Value::is_null) {
                Some(("MedicalRecordForm", json!({ "patientName": patient_name })))
            } else {
                Some(("MedicalHistory", output.clone()))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Rendered;
    use crate::config::BackendConfig;
    use crate::forms::FormState;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn assistant_with(endpoint: &str, body: Value) -> (MockServer, Assistant) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/functions/v1/{}", endpoint)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let settings = Settings {
            backend: BackendConfig::new(mock_server.uri(), "anon"),
            agent: crate::config::AgentConfig {
                api_key: crate::config::PLACEHOLDER_AGENT_KEY.to_string(),
            },
        };
        (mock_server, Assistant::from_settings(&settings, Role::Doctor))
    }

    #[test]
    fn test_follow_up_rules() {
        let args = json!({"role": "doctor"});
        assert_eq!(
            follow_up("getAppointments", &args, &json!({"appointments": []})).unwrap().0,
            "AppointmentForm"
        );
        assert_eq!(
            follow_up("getAppointments", &args, &json!({"appointments": [{"id": "1"}]}))
                .unwrap()
                .0,
            "AppointmentList"
        );

        let args = json!({"patientName": "John Doe"});
        let (component, props) =
            follow_up("getMedicalHistory", &args, &json!({"history": []})).unwrap();
        assert_eq!(component, "MedicalRecordForm");
        assert_eq!(props, json!({"patientName": "John Doe"}));
        assert_eq!(
            follow_up("getMedicalHistory", &args, &json!({"history": [{}]}))
                .unwrap()
                .0,
            "MedicalHistory"
        );

        assert!(follow_up("registerPatient", &json!({}), &json!({})).is_none());
    }

    #[tokio::test]
    async fn test_respond_renders_list() -> anyhow::Result<()> {
        let (_server, assistant) = assistant_with(
            "appointments",
            json!({"appointments": [{"id": "1", "patientName": "John Doe", "status": "scheduled"}]}),
        )
        .await;

        let reply = assistant
            .respond(ToolCall::new("getAppointments", json!({"role": "Doctor"})))
            .await?;
        assert_eq!(reply.component, Some("AppointmentList"));
        match reply.rendered {
            Some(Rendered::AppointmentList(view)) => {
                assert_eq!(view.count_label, "1 Entry");
                assert!(view.entries[0].has_action("Check History"));
            }
            other => panic!("Expected appointment list, got {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_respond_with_empty_history_offers_form() -> anyhow::Result<()> {
        let (_server, assistant) = assistant_with(
            "medical-history",
            json!({"patientName": "John Doe", "history": []}),
        )
        .await;

        let reply = assistant
            .respond(ToolCall::new("getMedicalHistory", json!({"patientName": "John Doe"})))
            .await?;
        assert_eq!(reply.component, Some("MedicalRecordForm"));

        let mut form = reply.rendered.and_then(Rendered::into_form).unwrap();
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(form.value("patientName").as_deref(), Some("John Doe"));
        assert_eq!(form.value("doctor").as_deref(), Some("Sarah"));
        form.set("diagnosis", "Flu").unwrap();
        form.set("notes", "Rest and fluids").unwrap();
        assert!(form.submit().is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_respond_without_success_shape_renders_nothing() -> anyhow::Result<()> {
        let (_server, assistant) =
            assistant_with("appointments", json!({"error": "Internal server error"})).await;

        let reply = assistant
            .respond(ToolCall::new("getAppointments", json!({"role": "nurse"})))
            .await?;
        assert!(reply.component.is_none());
        assert!(reply.rendered.is_none());
        assert_eq!(reply.output, json!({"error": "Internal server error"}));
        Ok(())
    }

    #[tokio::test]
    async fn test_submitted_registration_goes_to_backend() -> anyhow::Result<()> {
        let (_server, assistant) = assistant_with(
            "register-patient",
            json!({"success": true, "message": "Patient registered", "patientId": "p-7"}),
        )
        .await;

        let mut form = assistant
            .render("NewPatientForm", &json!({}))?
            .into_form()
            .unwrap();
        form.set("name", "Jane Roe").unwrap();
        form.set("dob", "1990-04-02").unwrap();
        form.set("gender", "female").unwrap();
        let draft = form.submit().unwrap();

        let stored = assistant.submit_form(form.component(), draft).await?;
        assert_eq!(stored.unwrap()["patientId"], "p-7");

        let none = assistant
            .submit_form("VitalsForm", json!({"bp": "120/80"}))
            .await?;
        assert!(none.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_call_tools_keeps_order() {
        let (_server, assistant) =
            assistant_with("appointments", json!({"appointments": []})).await;

        let outputs = assistant
            .call_tools(vec![
                ToolCall::new("getAppointments", json!({"role": "doctor"})),
                ToolCall::new("unknownTool", json!({})),
            ])
            .await;
        assert_eq!(outputs[0], json!({"appointments": []}));
        assert_eq!(outputs[1], json!({"error": "Tool not found: unknownTool"}));
    }

    #[test]
    fn test_system_prompt_follows_role() {
        let settings = Settings {
            backend: BackendConfig::new("http://localhost", "anon"),
            agent: crate::config::AgentConfig {
                api_key: "key".to_string(),
            },
        };
        let mut assistant = Assistant::from_settings(&settings, Role::Doctor);

        let prompt = assistant.system_prompt().unwrap();
        assert!(prompt.contains("assisting Dr. Sarah who is a doctor"));
        assert!(prompt.contains("- getAppointments:"));
        assert!(prompt.contains("- NewPatientForm:"));

        assistant.switch_role(Role::Nurse);
        let prompt = assistant.system_prompt().unwrap();
        assert!(prompt.contains("assisting Nurse Mike who is a nurse"));
    }

    #[test]
    fn test_custom_prompt_template() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("short.md");
        std::fs::write(&file_path, "{{ user.name }} ({{ user.id }}): {{ tools | length }} tools").unwrap();

        let settings = Settings {
            backend: BackendConfig::new("http://localhost", "anon"),
            agent: crate::config::AgentConfig {
                api_key: "key".to_string(),
            },
        };
        let assistant = Assistant::from_settings(&settings, Role::Patient);
        let prompt = assistant.system_prompt_from(&file_path).unwrap();
        assert_eq!(prompt, "John Doe (patient): 4 tools");

        std::fs::write(&file_path, "Hello {{ clinic.name }}").unwrap();
        assert!(matches!(
            assistant.system_prompt_from(&file_path),
            Err(ToolError::Internal(_))
        ));

        let missing = temp_dir.path().join("absent.md");
        match assistant.system_prompt_from(&missing) {
            Err(ToolError::Internal(msg)) => assert!(msg.starts_with("Failed to read prompt template")),
            other => panic!("Expected a read failure, got {:?}", other),
        }

        temp_dir.close().unwrap();
    }
}
