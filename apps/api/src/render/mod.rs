//! Document rendering: turns a laid-out letter into a downloadable file.
//!
//! Generation and layout never depend on the concrete writer; `AppState`
//! carries an `Arc<dyn DocumentRenderer>` that can be swapped at startup.

pub mod pdf;

use crate::errors::AppError;
use crate::layout::PaginatedDocument;

pub use pdf::PdfRenderer;

/// Render paginated text to a document.
pub trait DocumentRenderer: Send + Sync {
    /// MIME type of the produced bytes.
    fn content_type(&self) -> &'static str;

    fn render(&self, document: &PaginatedDocument) -> Result<Vec<u8>, AppError>;
}
