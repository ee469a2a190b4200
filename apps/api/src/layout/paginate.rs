//! Pagination: places wrapped letter lines onto fixed-size pages.
//!
//! # Placement rules
//! - The cursor starts at the top margin of the first page.
//! - A blank source line advances the cursor by one line height and emits nothing.
//! - Before each printed line: if `y + line_height > page_height - margin`, start
//!   a new page with the cursor back at the top margin.
//! - Each printed line sits at `(margin, y)`, then the cursor advances one line.
//!
//! Coordinates are millimetres from the top-left corner; `y` is the baseline.

use tracing::debug;

use crate::layout::font_metrics::{get_metrics, PageConfig};
use crate::layout::wrap::wrap_line;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One printed line at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// The laid-out document. Always holds at least one (possibly empty) page.
#[derive(Debug, Clone)]
pub struct PaginatedDocument {
    pub config: PageConfig,
    pub pages: Vec<PageLayout>,
}

impl PaginatedDocument {
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core function
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `text` (newline-separated source lines) according to `config`.
pub fn paginate(text: &str, config: &PageConfig) -> PaginatedDocument {
    let metrics = get_metrics(&config.font);
    let bottom_limit = config.page_height_mm - config.margin_mm;

    let mut pages = vec![PageLayout::default()];
    let mut y = config.margin_mm;

    for source_line in text.split('\n') {
        if source_line.trim().is_empty() {
            y += config.line_height_mm;
            continue;
        }

        for printed in wrap_line(source_line, metrics, config) {
            if y + config.line_height_mm > bottom_limit {
                pages.push(PageLayout::default());
                y = config.margin_mm;
            }

            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    text: printed,
                    x_mm: config.margin_mm,
                    y_mm: y,
                });
            }
            y += config.line_height_mm;
        }
    }

    let document = PaginatedDocument {
        config: config.clone(),
        pages,
    };
    debug!(
        "Paginated letter: {} pages, {} printed lines",
        document.pages.len(),
        document.line_count()
    );
    document
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{default_page_config, FontFamily};

    fn config() -> PageConfig {
        default_page_config(FontFamily::Helvetica)
    }

    #[test]
    fn test_empty_text_yields_one_empty_page() {
        let doc = paginate("", &config());
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.line_count(), 0);
    }

    #[test]
    fn test_first_line_at_top_margin() {
        let doc = paginate("Hello", &config());
        let line = &doc.pages[0].lines[0];
        assert_eq!(line.text, "Hello");
        assert_eq!(line.x_mm, 25.0);
        assert_eq!(line.y_mm, 25.0);
    }

    #[test]
    fn test_blank_lines_advance_without_text() {
        let doc = paginate("One\n\n\nTwo", &config());
        let lines = &doc.pages[0].lines;
        assert_eq!(lines.len(), 2);
        assert!((lines[1].y_mm - (25.0 + 3.0 * 7.0)).abs() < 1e-3);
    }

    #[test]
    fn test_page_breaks_when_vertical_space_exhausted() {
        // A4: lines at y = 25 + 7k while 25 + 7k + 7 <= 272 → 35 lines per page.
        let text = vec!["line"; 40].join("\n");
        let doc = paginate(&text, &config());
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].lines.len(), 35);
        assert_eq!(doc.pages[1].lines.len(), 5);
        assert_eq!(doc.pages[1].lines[0].y_mm, 25.0);
    }

    #[test]
    fn test_wrapped_lines_are_stacked() {
        let paragraph = "word ".repeat(60);
        let doc = paginate(&paragraph, &config());
        let lines = &doc.pages[0].lines;
        assert!(lines.len() >= 2);
        for pair in lines.windows(2) {
            assert!((pair[1].y_mm - pair[0].y_mm - 7.0).abs() < 1e-3);
        }
    }
}
