use async_trait::async_trait;
use indoc::indoc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{parse_input, ToolHandler};
use crate::backend::BackendClient;
use crate::errors::{ToolError, ToolResult};
use crate::models::tool::Tool;

pub const MEDICAL_HISTORY_ENDPOINT: &str = "medical-history";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMedicalHistoryInput {
    pub patient_name: String,
}

pub struct GetMedicalHistory {
    tool: Tool,
    backend: BackendClient,
}

impl GetMedicalHistory {
    pub fn new(backend: BackendClient) -> Self {
        let tool = Tool::new(
            "getMedicalHistory",
            indoc! {"
                Fetches medical history for a patient from the clinic backend.
                ONLY accessible by DOCTORS."},
            json!({
                "type": "object",
                "required": ["patientName"],
                "properties": {
                    "patientName": {"type": "string"}
                }
            }),
            json!({
                "type": "object",
                "required": ["patientName", "history"],
                "properties": {
                    "patientName": {"type": "string"},
                    "history": {"type": "array", "items": {}}
                }
            }),
        );
        Self { tool, backend }
    }
}

#[async_trait]
impl ToolHandler for GetMedicalHistory {
    fn tool(&self) -> &Tool {
        &self.tool
    }

    async fn call(&self, input: Value) -> ToolResult<Value> {
        let input: GetMedicalHistoryInput = parse_input(&self.tool.name, input)?;
        let body = serde_json::to_value(&input).map_err(|e| ToolError::Internal(e.to_string()))?;
        self.backend.invoke(MEDICAL_HISTORY_ENDPOINT, &body).await
    }
}
