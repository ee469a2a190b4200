use std::sync::Arc;

use tokio::sync::Mutex;

use crate::clipboard::ClipboardChain;
use crate::form::FormSession;
use crate::generation::generator::LetterGenerator;
use crate::layout::PageConfig;
use crate::render::DocumentRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single form session. Holds the current letter slot.
    pub session: Arc<Mutex<FormSession>>,
    /// Pluggable generator. Default: TemplateLetterGenerator.
    pub generator: Arc<dyn LetterGenerator>,
    /// Pluggable document writer. Default: PdfRenderer.
    pub renderer: Arc<dyn DocumentRenderer>,
    pub clipboard: ClipboardChain,
    /// Page geometry for export (A4, 11pt, 25 mm margins).
    pub page_config: PageConfig,
}
