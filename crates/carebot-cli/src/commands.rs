pub mod call;
pub mod catalog;
pub mod configure;
pub mod form;
pub mod prompt;

use anyhow::{Context, Result};
use serde_json::Value;

/// Parse a JSON argument from the command line
pub fn parse_json(what: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("{} must be valid JSON", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json() {
        assert_eq!(
            parse_json("--input", r#"{"role": "nurse"}"#).unwrap(),
            json!({"role": "nurse"})
        );

        let err = parse_json("--props", "{role:").unwrap_err();
        assert_eq!(err.to_string(), "--props must be valid JSON");
    }
}
