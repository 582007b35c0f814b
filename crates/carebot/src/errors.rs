use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidChoice { field: String, value: String },

    #[error("Form has already been submitted")]
    AlreadySubmitted,
}

pub type FormResult<T> = Result<T, FormError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Component not found: {0}")]
    ComponentNotFound(String),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Map a dotted config key like `backend.url` to the variable that sets it.
pub fn to_env_var(field: &str) -> String {
    format!("CAREBOT_{}", field.replace('.', "__").to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = FormError::MissingFields(vec!["date".into(), "time".into()]);
        assert_eq!(err.to_string(), "Missing required fields: date, time");
    }

    #[test]
    fn test_to_env_var() {
        assert_eq!(to_env_var("backend.url"), "CAREBOT_BACKEND__URL");
        assert_eq!(to_env_var("agent.api_key"), "CAREBOT_AGENT__API_KEY");
    }
}
