//! Greedy word wrap against a font-metric table.
//!
//! A word that does not fit on the current line starts a new one. A single word
//! wider than the whole line is broken between characters so no printed line
//! exceeds the text width.

use crate::layout::font_metrics::{FontMetricTable, PageConfig};

/// Wraps one source line into printed lines no wider than `config.text_width_em()`.
///
/// Whitespace runs collapse to a single space. A line with no words returns an
/// empty vec.
pub fn wrap_line(text: &str, metrics: &FontMetricTable, config: &PageConfig) -> Vec<String> {
    let max_width = config.text_width_em();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_str(word);

        if word_w > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, metrics, max_width);
            // The tail of a broken word keeps collecting following words.
            let tail = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            current_width = metrics.measure_str(&tail);
            current = tail;
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + metrics.space_width + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += metrics.space_width + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits an over-long word into chunks that each fit within `max_width`.
/// Every chunk holds at least one character.
fn break_word(word: &str, metrics: &FontMetricTable, max_width: f32) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0.0_f32;

    for c in word.chars() {
        let w = metrics.measure_char(c);
        if !chunk.is_empty() && chunk_width + w > max_width {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0.0;
        }
        chunk.push(c);
        chunk_width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}
