use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{parse_input, ToolHandler};
use crate::backend::BackendClient;
use crate::errors::{ToolError, ToolResult};
use crate::models::tool::Tool;

pub const REGISTER_PATIENT_ENDPOINT: &str = "register-patient";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterPatientInput {
    pub name: String,
    pub dob: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub struct RegisterPatient {
    tool: Tool,
    backend: BackendClient,
}

impl RegisterPatient {
    pub fn new(backend: BackendClient) -> Self {
        let tool = Tool::new(
            "registerPatient",
            "Registers a new patient in the medical system using the clinic backend.",
            json!({
                "type": "object",
                "required": ["name", "dob"],
                "properties": {
                    "name": {"type": "string"},
                    "dob": {"type": "string", "description": "Date of birth"},
                    "notes": {"type": "string", "default": null}
                }
            }),
            json!({
                "type": "object",
                "required": ["success", "message", "patientId"],
                "properties": {
                    "success": {"type": "boolean"},
                    "message": {"type": "string"},
                    "patientId": {"type": "string"}
                }
            }),
        );
        Self { tool, backend }
    }
}

#[async_trait]
impl ToolHandler for RegisterPatient {
    fn tool(&self) -> &Tool {
        &self.tool
    }

    async fn call(&self, input: Value) -> ToolResult<Value> {
        let input: RegisterPatientInput = parse_input(&self.tool.name, input)?;
        let body = serde_json::to_value(&input).map_err(|e| ToolError::Internal(e.to_string()))?;
        self.backend.invoke(REGISTER_PATIENT_ENDPOINT, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_register_patient() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/register-patient"))
            .and(body_json(json!({"name": "Jane Doe", "dob": "1990-01-01"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Patient registered",
                "patientId": "p-100"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = RegisterPatient::new(BackendClient::new(BackendConfig::new(
            mock_server.uri(),
            "anon",
        )));
        let output = tool
            .call(json!({"name": "Jane Doe", "dob": "1990-01-01", "gender": "Female"}))
            .await?;
        assert_eq!(output["patientId"], json!("p-100"));
        assert!(tool.tool().is_success(&output));
        Ok(())
    }

    #[tokio::test]
    async fn test_error_body_is_not_success() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/register-patient"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "duplicate patient"})),
            )
            .mount(&mock_server)
            .await;

        let tool = RegisterPatient::new(BackendClient::new(BackendConfig::new(
            mock_server.uri(),
            "anon",
        )));
        let output = tool
            .call(json!({"name": "Jane Doe", "dob": "1990-01-01", "notes": "new"}))
            .await?;
        assert!(!tool.tool().is_success(&output));
        Ok(())
    }
}
