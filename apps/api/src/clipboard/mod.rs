//! Clipboard: copies the current letter with a primary and a fallback mechanism.
//!
//! Primary: the system clipboard through `arboard`.
//! Fallback: pipe the text into a clipboard command (`xclip`, `wl-copy`, `pbcopy`).
//! Copy failure never touches the letter or the view state.

pub mod feedback;

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{info, warn};

use crate::errors::AppError;

pub use feedback::CopyFeedback;

/// Alert text shown when both mechanisms fail.
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard command failed: {0}")]
    Command(String),

    #[error("clipboard I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single mechanism for placing text on the clipboard.
#[async_trait]
pub trait ClipboardSink: Send + Sync {
    fn name(&self) -> &'static str;

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

// ────────────────────────────────────────────────────────────────────────────
// SystemClipboard: arboard
// ────────────────────────────────────────────────────────────────────────────

/// The OS clipboard. Created fresh per copy so no handle outlives the call.
pub struct SystemClipboard;

#[async_trait]
impl ClipboardSink for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Unavailable(format!("clipboard task panicked: {e}")))?
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CommandClipboard: external program reading stdin
// ────────────────────────────────────────────────────────────────────────────

/// Pipes the text into a command's stdin and requires a zero exit status
/// within `timeout`. The child is killed if the copy is abandoned.
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandClipboard {
    /// Builds from a pre-split command line. Returns `None` for an empty command.
    pub fn from_argv(argv: &[String], timeout: Duration) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }
}

#[async_trait]
impl ClipboardSink for CommandClipboard {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let run = async {
            let mut child = Command::new(&self.program)
                .args(&self.args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn()?;

            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes()).await?;
                stdin.shutdown().await?;
            }

            Ok::<_, ClipboardError>(child.wait().await?)
        };

        let status = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| {
                ClipboardError::Command(format!(
                    "{} timed out after {} ms",
                    self.program,
                    self.timeout.as_millis()
                ))
            })??;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Command(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Primary + fallback chain
// ────────────────────────────────────────────────────────────────────────────

/// Tries the primary sink, then the fallback. Carried in `AppState`.
#[derive(Clone)]
pub struct ClipboardChain {
    primary: Arc<dyn ClipboardSink>,
    fallback: Option<Arc<dyn ClipboardSink>>,
}

impl ClipboardChain {
    pub fn new(primary: Arc<dyn ClipboardSink>, fallback: Option<Arc<dyn ClipboardSink>>) -> Self {
        Self { primary, fallback }
    }

    /// Copies `text` verbatim. Returns `AppError::Copy` only when every mechanism fails.
    pub async fn copy(&self, text: &str) -> Result<(), AppError> {
        match self.primary.write_text(text).await {
            Ok(()) => {
                info!("Copied letter via {} clipboard", self.primary.name());
                return Ok(());
            }
            Err(e) => warn!("Failed to copy via {} clipboard: {e}", self.primary.name()),
        }

        if let Some(fallback) = &self.fallback {
            match fallback.write_text(text).await {
                Ok(()) => {
                    info!("Copied letter via {} clipboard (fallback)", fallback.name());
                    return Ok(());
                }
                Err(e) => warn!("Fallback copy via {} failed: {e}", fallback.name()),
            }
        }

        Err(AppError::Copy(COPY_FAILED_MESSAGE.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
