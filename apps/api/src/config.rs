use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::layout::FontFamily;

/// Application configuration loaded from environment variables.
/// Every field has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Simulated generation latency before the letter is composed.
    pub generation_delay: Duration,
    /// How long the copy control reads "Copied!" after a successful copy.
    pub copy_feedback: Duration,
    /// Secondary clipboard mechanism: a command that reads the text on stdin.
    pub clipboard_fallback_command: Vec<String>,
    /// Upper bound on one run of the fallback command.
    pub clipboard_timeout: Duration,
    /// Base font of the exported document.
    pub export_font: FontFamily,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            generation_delay: parse_millis("GENERATION_DELAY_MS", "2000")?,
            copy_feedback: parse_millis("COPY_FEEDBACK_MS", "2000")?,
            clipboard_fallback_command: parse_command(&optional_env(
                "CLIPBOARD_FALLBACK_COMMAND",
                "xclip -selection clipboard",
            )),
            clipboard_timeout: parse_millis("CLIPBOARD_TIMEOUT_MS", "5000")?,
            export_font: parse_font(&optional_env("EXPORT_FONT", "helvetica"))?,
        })
    }
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_millis(key: &str, default: &str) -> Result<Duration> {
    let millis = optional_env(key, default)
        .parse::<u64>()
        .with_context(|| format!("{key} must be a whole number of milliseconds"))?;
    Ok(Duration::from_millis(millis))
}

/// Splits a command line on whitespace. No quoting support.
fn parse_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

fn parse_font(raw: &str) -> Result<FontFamily> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "helvetica" => Ok(FontFamily::Helvetica),
        "courier" => Ok(FontFamily::Courier),
        other => bail!("EXPORT_FONT must be helvetica or courier, got {other:?}"),
    }
}
