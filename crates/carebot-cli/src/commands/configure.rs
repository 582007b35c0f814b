use anyhow::Result;
use console::style;

use carebot::config::Settings;
use carebot::errors::to_env_var;

/// Show enough of a secret to tell keys apart
fn mask(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{}****", prefix)
}

pub fn handle_config() -> Result<()> {
    let settings = Settings::new()?;

    let rows = [
        ("backend.url", settings.backend.url.clone()),
        ("backend.anon_key", mask(&settings.backend.anon_key)),
        ("agent.api_key", mask(&settings.agent.api_key)),
    ];
    for (key, value) in rows {
        println!(
            "{:<18} {}  {}",
            style(key).cyan(),
            value,
            style(to_env_var(key)).dim()
        );
    }

    if settings.agent.is_placeholder() {
        println!(
            "{}",
            style("Agent key is the placeholder; the agent runtime will not authenticate").yellow()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(""), "(not set)");
        assert_eq!(mask("eyJhbGciOi"), "eyJh****");
        assert_eq!(mask("ab"), "ab****");
    }
}
