use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{parse_input, ToolHandler};
use crate::backend::BackendClient;
use crate::errors::{ToolError, ToolResult};
use crate::models::tool::Tool;

pub const APPOINTMENTS_ENDPOINT: &str = "appointments";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAppointmentsInput {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
}

/// Fetches the appointments visible to a role
pub struct GetAppointments {
    tool: Tool,
    backend: BackendClient,
}

impl GetAppointments {
    pub fn new(backend: BackendClient) -> Self {
        let tool = Tool::new(
            "getAppointments",
            "Fetches appointments based on user role and context from the clinic backend.",
            json!({
                "type": "object",
                "required": ["role"],
                "properties": {
                    "role": {
                        "type": "string",
                        "description": "Role of the current user: doctor, nurse or patient."
                    },
                    "patientName": {
                        "type": "string",
                        "default": null,
                        "description": "Only for patients to see their own"
                    }
                }
            }),
            json!({
                "type": "object",
                "required": ["appointments"],
                "properties": {
                    "appointments": {"type": "array", "items": {}}
                }
            }),
        );
        Self { tool, backend }
    }
}

#[async_trait]
impl ToolHandler for GetAppointments {
    fn tool(&self) -> &Tool {
        &self.tool
    }

    async fn call(&self, input: Value) -> ToolResult<Value> {
        let mut input: GetAppointmentsInput = parse_input(&self.tool.name, input)?;
        input.role = input.role.to_lowercase();
        let body = serde_json::to_value(&input).map_err(|e| ToolError::Internal(e.to_string()))?;
        self.backend.invoke(APPOINTMENTS_ENDPOINT, &body).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAppointmentInput {
    pub patient_name: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

/// Books an appointment. The backend has no booking function yet, so this
/// only records the request and reports success.
pub struct ScheduleAppointment {
    tool: Tool,
}

impl ScheduleAppointment {
    pub fn new() -> Self {
        let tool = Tool::new(
            "scheduleAppointment",
            "Schedules a new appointment in the system.",
            json!({
                "type": "object",
                "required": ["patientName", "date", "time", "reason"],
                "properties": {
                    "patientName": {"type": "string"},
                    "date": {"type": "string"},
                    "time": {"type": "string"},
                    "reason": {"type": "string"}
                }
            }),
            json!({
                "type": "object",
                "required": ["success", "message"],
                "properties": {
                    "success": {"type": "boolean"},
                    "message": {"type": "string"}
                }
            }),
        );
        Self { tool }
    }
}

impl Default for ScheduleAppointment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for ScheduleAppointment {
    fn tool(&self) -> &Tool {
        &self.tool
    }

    async fn call(&self, input: Value) -> ToolResult<Value> {
        let input: ScheduleAppointmentInput = parse_input(&self.tool.name, input)?;
        tracing::info!(
            patient = %input.patient_name,
            date = %input.date,
            time = %input.time,
            "scheduling appointment"
        );
        Ok(json!({
            "success": true,
            "message": "Appointment scheduled successfully"
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_role_is_lower_cased() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/appointments"))
            .and(body_json(json!({"role": "doctor"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"appointments": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = GetAppointments::new(BackendClient::new(BackendConfig::new(
            mock_server.uri(),
            "anon",
        )));
        let output = tool.call(json!({"role": "DOCTOR"})).await?;

        assert_eq!(output, json!({"appointments": []}));
        assert!(tool.tool().is_success(&output));
        Ok(())
    }

    #[tokio::test]
    async fn test_patient_name_is_forwarded() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/appointments"))
            .and(body_json(json!({"role": "patient", "patientName": "John Doe"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"appointments": [{"id": "1"}]})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = GetAppointments::new(BackendClient::new(BackendConfig::new(
            mock_server.uri(),
            "anon",
        )));
        tool.call(json!({"role": "Patient", "patientName": "John Doe"}))
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_role_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let tool = GetAppointments::new(BackendClient::new(BackendConfig::new(
            mock_server.uri(),
            "anon",
        )));
        let err = tool.call(json!({"patientName": "John"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[tokio::test]
    async fn test_schedule_appointment_is_mocked() {
        let tool = ScheduleAppointment::new();
        let output = tool
            .call(json!({
                "patientName": "John Doe",
                "date": "2026-10-20",
                "time": "09:00",
                "reason": "Follow-up"
            }))
            .await
            .unwrap();
        assert_eq!(output["success"], json!(true));
        assert!(tool.tool().is_success(&output));

        let err = tool.call(json!({"patientName": "John Doe"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }
}
