//! Axum route handlers for the output view: read, copy, export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::layout::paginate;
use crate::models::letter::GeneratedLetter;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub label: &'static str,
    /// When the label reverts to its default text.
    pub revert_after_ms: u64,
}

/// GET /api/v1/letter
///
/// Returns the current letter verbatim. Clients may copy `text` themselves.
pub async fn handle_get_letter(
    State(state): State<AppState>,
) -> Result<Json<GeneratedLetter>, AppError> {
    let session = state.session.lock().await;
    Ok(Json(session.current_letter()?.clone()))
}

/// POST /api/v1/letter/copy
///
/// Copies the letter text with the primary mechanism, then the fallback.
/// Fails with the alert text when both fail; the letter is untouched either way.
pub async fn handle_copy(State(state): State<AppState>) -> Result<Json<CopyResponse>, AppError> {
    let text = state.session.lock().await.current_letter()?.text.clone();

    state.clipboard.copy(&text).await?;

    let mut session = state.session.lock().await;
    session.mark_copied();
    let feedback = session.copy_feedback();
    Ok(Json(CopyResponse {
        label: feedback.label(),
        revert_after_ms: feedback.window().as_millis() as u64,
    }))
}

/// GET /api/v1/letter/export
///
/// Lays out and renders the letter, returned as a file download.
/// Layout and rendering are CPU-bound and run inside `spawn_blocking`.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let letter = state.session.lock().await.current_letter()?.clone();
    let file_name = letter.export_file_name();

    let renderer = state.renderer.clone();
    let page_config = state.page_config.clone();
    let content_type = renderer.content_type();

    let bytes = tokio::task::spawn_blocking(move || {
        let document = paginate(&letter.text, &page_config);
        renderer.render(&document)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Export task failed: {e}")))??;

    info!("Exported {file_name} ({} bytes)", bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}

/// `attachment` disposition with an ASCII `filename` and an RFC 5987
/// `filename*` carrying the exact UTF-8 name. Always a valid header value.
fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(file_name.len() * 3);
    for byte in file_name.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }

    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
