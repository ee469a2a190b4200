pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::form::handlers as form;
use crate::output::handlers as output;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form session
        .route("/api/v1/session", get(form::handle_get_session))
        .route("/api/v1/session/fields", patch(form::handle_update_fields))
        .route("/api/v1/session/companies", post(form::handle_add_company))
        .route(
            "/api/v1/session/companies/:id",
            put(form::handle_update_company).delete(form::handle_remove_company),
        )
        .route("/api/v1/session/submit", post(form::handle_submit))
        .route("/api/v1/session/reset", post(form::handle_reset))
        // Output actions
        .route("/api/v1/letter", get(output::handle_get_letter))
        .route("/api/v1/letter/copy", post(output::handle_copy))
        .route("/api/v1/letter/export", get(output::handle_export))
        .with_state(state)
}
