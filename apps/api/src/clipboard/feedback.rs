use std::time::Duration;

use tokio::time::Instant;

pub const COPY_LABEL: &str = "Copy to Clipboard";
pub const COPIED_LABEL: &str = "Copied!";

/// Copy control label state. Reads "Copied!" for `window` after a successful copy.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    window: Duration,
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            copied_at: None,
        }
    }

    pub fn mark_copied(&mut self) {
        self.copied_at = Some(Instant::now());
    }

    pub fn reset(&mut self) {
        self.copied_at = None;
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn label(&self) -> &'static str {
        match self.copied_at {
            Some(at) if at.elapsed() < self.window => COPIED_LABEL,
            _ => COPY_LABEL,
        }
    }
}
