//! Axum route handlers for the form session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::form::controller::{run_submission, FieldsUpdate, SessionSnapshot};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompanyUpdateRequest {
    pub value: String,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

/// PATCH /api/v1/session/fields
pub async fn handle_update_fields(
    State(state): State<AppState>,
    Json(update): Json<FieldsUpdate>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.session.lock().await;
    session.update_fields(update)?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/session/companies
///
/// Appends an empty company row. Every row's remove control is recomputed.
pub async fn handle_add_company(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let mut session = state.session.lock().await;
    session.add_company_field()?;
    Ok((StatusCode::CREATED, Json(session.snapshot())))
}

/// PUT /api/v1/session/companies/:id
pub async fn handle_update_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompanyUpdateRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.session.lock().await;
    session.set_company(id, request.value)?;
    Ok(Json(session.snapshot()))
}

/// DELETE /api/v1/session/companies/:id
pub async fn handle_remove_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.session.lock().await;
    session.remove_company_field(id)?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/session/submit
///
/// Validates the form, generates the letter and switches to the output view.
/// Responds only after generation finishes (including the simulated delay).
pub async fn handle_submit(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = run_submission(state.session.clone(), state.generator.clone()).await?;
    Ok(Json(snapshot))
}

/// POST /api/v1/session/reset
///
/// "Generate another": clears the form and discards the current letter.
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.session.lock().await;
    session.generate_another()?;
    Ok(Json(session.snapshot()))
}
