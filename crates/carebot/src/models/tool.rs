use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool that can be offered to the agent runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// JSON schema of the accepted input
    pub input_schema: Value,
    /// JSON schema of a successful result
    pub output_schema: Value,
}

impl Tool {
    pub fn new<N, D>(name: N, description: D, input_schema: Value, output_schema: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            input_schema,
            output_schema,
        }
    }

    /// Fields a successful result must carry
    pub fn required_outputs(&self) -> Vec<&str> {
        self.output_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether a result has the declared success shape. Anything else,
    /// including an `{"error": ...}` object, is treated as a failure.
    pub fn is_success(&self, output: &Value) -> bool {
        match output.as_object() {
            Some(obj) => self
                .required_outputs()
                .iter()
                .all(|field| obj.get(*field).is_some_and(|v| !v.is_null())),
            None => false,
        }
    }
}

/// A request from the agent runtime to run a tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// The name of the tool to execute
    pub name: String,
    /// The input for the execution
    pub arguments: Value,
}

impl ToolCall {
    pub fn new<S: Into<String>>(name: S, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register_tool() -> Tool {
        Tool::new(
            "registerPatient",
            "Registers a patient",
            json!({"type": "object"}),
            json!({
                "type": "object",
                "required": ["success", "message", "patientId"],
                "properties": {}
            }),
        )
    }

    #[test]
    fn test_is_success() {
        let tool = register_tool();
        assert!(tool.is_success(&json!({
            "success": true,
            "message": "ok",
            "patientId": "p-1"
        })));
        assert!(!tool.is_success(&json!({"error": "Internal server error"})));
        assert!(!tool.is_success(&json!({"success": true, "message": "ok", "patientId": null})));
        assert!(!tool.is_success(&json!([1, 2, 3])));
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(register_tool()).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("outputSchema").is_some());
    }
}
