//! Form Controller: the single in-memory session behind the form.
//!
//! Every UI event is an explicit transition on `FormSession`:
//!
//! ```text
//! Form   --submit(valid)-->   Loading --ok-->   Output --generate another--> Form
//! Form   --submit(invalid)--> Error
//! Error  --submit(valid)-->   Loading --fail--> Error
//! ```
//!
//! Field edits and company-row changes are only accepted while the form is
//! visible (Form or Error). The company list never drops below one row.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clipboard::CopyFeedback;
use crate::errors::AppError;
use crate::form::validation::validate_submission;
use crate::generation::generator::LetterGenerator;
use crate::models::form::{CompanyRow, ViewState};
use crate::models::letter::{GeneratedLetter, Submission};

/// Shown when generation fails without a usable message.
pub const GENERATION_FALLBACK_MESSAGE: &str = "Failed to generate cover letter. Please try again.";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Partial update of the free-text fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldsUpdate {
    pub candidate_name: Option<String>,
    pub job_role: Option<String>,
    pub skills: Option<String>,
}

/// Everything a client needs to draw the page.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub view: ViewState,
    pub form_visible: bool,
    pub candidate_name: String,
    pub job_role: String,
    pub skills: String,
    pub companies: Vec<CompanyRow>,
    pub copy_label: &'static str,
    pub letter: Option<GeneratedLetter>,
}

#[derive(Debug)]
pub struct FormSession {
    candidate_name: String,
    job_role: String,
    skills: String,
    companies: Vec<CompanyRow>,
    view: ViewState,
    letter: Option<GeneratedLetter>,
    copy_feedback: CopyFeedback,
}

impl FormSession {
    pub fn new(copy_feedback_window: Duration) -> Self {
        Self {
            candidate_name: String::new(),
            job_role: String::new(),
            skills: String::new(),
            companies: vec![CompanyRow::empty()],
            view: ViewState::Form,
            letter: None,
            copy_feedback: CopyFeedback::new(copy_feedback_window),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn companies(&self) -> &[CompanyRow] {
        &self.companies
    }

    pub fn letter(&self) -> Option<&GeneratedLetter> {
        self.letter.as_ref()
    }

    /// The stored letter, or NotFound before the first successful generation.
    pub fn current_letter(&self) -> Result<&GeneratedLetter, AppError> {
        self.letter()
            .ok_or_else(|| AppError::NotFound("No cover letter has been generated yet".to_string()))
    }

    pub fn copy_feedback(&self) -> &CopyFeedback {
        &self.copy_feedback
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view.clone(),
            form_visible: self.view.form_visible(),
            candidate_name: self.candidate_name.clone(),
            job_role: self.job_role.clone(),
            skills: self.skills.clone(),
            companies: self.companies.clone(),
            copy_label: self.copy_feedback.label(),
            letter: self.letter.clone(),
        }
    }

    // ── Company rows ────────────────────────────────────────────────────────

    /// Appends an empty row and returns its id.
    pub fn add_company_field(&mut self) -> Result<Uuid, AppError> {
        self.require_form_visible()?;
        let row = CompanyRow::empty();
        let id = row.id;
        self.companies.push(row);
        self.recompute_remove_visibility();
        Ok(id)
    }

    pub fn remove_company_field(&mut self, id: Uuid) -> Result<(), AppError> {
        self.require_form_visible()?;
        let index = self.row_index(id)?;
        if !self.companies[index].remove_visible {
            return Err(AppError::Conflict(
                "At least one company field is required".to_string(),
            ));
        }
        self.companies.remove(index);
        self.recompute_remove_visibility();
        Ok(())
    }

    /// Remove controls are shown only while more than one row exists.
    pub fn recompute_remove_visibility(&mut self) {
        let visible = self.companies.len() > 1;
        for row in &mut self.companies {
            row.remove_visible = visible;
        }
    }

    pub fn set_company(&mut self, id: Uuid, value: String) -> Result<(), AppError> {
        self.require_form_visible()?;
        let index = self.row_index(id)?;
        self.companies[index].value = value;
        Ok(())
    }

    // ── Free-text fields ────────────────────────────────────────────────────

    pub fn update_fields(&mut self, update: FieldsUpdate) -> Result<(), AppError> {
        self.require_form_visible()?;
        if let Some(name) = update.candidate_name {
            self.candidate_name = name;
        }
        if let Some(role) = update.job_role {
            self.job_role = role;
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        Ok(())
    }

    // ── Submission ──────────────────────────────────────────────────────────

    /// Validates the form. Invalid → Error view and `AppError::Validation`;
    /// valid → Loading view and the submission to generate from.
    pub fn begin_submit(&mut self) -> Result<Submission, AppError> {
        self.require_form_visible()?;

        match validate_submission(
            &self.candidate_name,
            &self.job_role,
            self.companies(),
            &self.skills,
        ) {
            Ok(submission) => {
                self.transition(ViewState::Loading);
                Ok(submission)
            }
            Err(e) => {
                self.transition(ViewState::Error {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Stores the generation outcome. Only meaningful while Loading.
    pub fn complete_submit(
        &mut self,
        submission: &Submission,
        outcome: Result<String, AppError>,
    ) -> Result<(), AppError> {
        if self.view != ViewState::Loading {
            return Err(AppError::Conflict(format!(
                "No generation in progress (view is {})",
                self.view.name()
            )));
        }

        match outcome {
            Ok(text) => {
                self.letter = Some(GeneratedLetter::new(text, submission));
                self.copy_feedback.reset();
                self.transition(ViewState::Output);
                Ok(())
            }
            Err(e) => {
                warn!("Cover letter generation failed: {e}");
                self.transition(ViewState::Error {
                    message: failure_message(&e),
                });
                Err(e)
            }
        }
    }

    /// Clears every field, collapses to one empty row, discards the letter.
    pub fn generate_another(&mut self) -> Result<(), AppError> {
        if self.view != ViewState::Output {
            return Err(AppError::Conflict(format!(
                "Nothing to reset from the {} view",
                self.view.name()
            )));
        }
        self.candidate_name.clear();
        self.job_role.clear();
        self.skills.clear();
        self.companies = vec![CompanyRow::empty()];
        self.recompute_remove_visibility();
        self.letter = None;
        self.copy_feedback.reset();
        self.transition(ViewState::Form);
        Ok(())
    }

    pub fn mark_copied(&mut self) {
        self.copy_feedback.mark_copied();
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn transition(&mut self, next: ViewState) {
        info!("View transition: {} -> {}", self.view.name(), next.name());
        self.view = next;
    }

    fn require_form_visible(&self) -> Result<(), AppError> {
        if self.view.form_visible() {
            Ok(())
        } else {
            Err(AppError::Conflict(format!(
                "The form is not available in the {} view",
                self.view.name()
            )))
        }
    }

    fn row_index(&self, id: Uuid) -> Result<usize, AppError> {
        self.companies
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Company field {id} not found")))
    }
}

/// The user-visible message for a failed generation.
fn failure_message(err: &AppError) -> String {
    let message = match err {
        AppError::Generation(msg) => msg.clone(),
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        GENERATION_FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Submit orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Runs a full submit: validate → Loading → generate → Output / Error.
///
/// The session lock is released while the generator runs; a second submit in
/// that window sees the Loading view and is rejected. Generation and the
/// settle step run on their own task, so a dropped request still leaves
/// Loading.
pub async fn run_submission(
    session: Arc<Mutex<FormSession>>,
    generator: Arc<dyn LetterGenerator>,
) -> Result<SessionSnapshot, AppError> {
    let submission = session.lock().await.begin_submit()?;

    info!(
        "Generating cover letter for {} at {}",
        submission.job_role,
        submission.primary_company()
    );

    let task = tokio::spawn(async move {
        let outcome = generator.generate(&submission).await;

        let mut guard = session.lock().await;
        guard.complete_submit(&submission, outcome)?;
        debug!("Submission settled in {} view", guard.view().name());
        Ok::<_, AppError>(guard.snapshot())
    });

    task.await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Generation task failed: {e}")))?
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::form::validation::VALIDATION_MESSAGE;
    use crate::generation::clock::{FixedClock, NoDelay, TokioDelay};
    use crate::generation::generator::TemplateLetterGenerator;

    /// Counts calls and delegates to the template generator.
    struct CountingGenerator {
        calls: AtomicUsize,
        inner: TemplateLetterGenerator,
    }

    impl CountingGenerator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                inner: TemplateLetterGenerator::new(
                    Arc::new(NoDelay),
                    Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())),
                ),
            }
        }
    }

    #[async_trait]
    impl LetterGenerator for CountingGenerator {
        async fn generate(&self, submission: &Submission) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.generate(submission).await
        }
    }

    struct FailingGenerator(&'static str);

    #[async_trait]
    impl LetterGenerator for FailingGenerator {
        async fn generate(&self, _submission: &Submission) -> Result<String, AppError> {
            Err(AppError::Generation(self.0.to_string()))
        }
    }

    fn new_session() -> FormSession {
        FormSession::new(Duration::from_secs(2))
    }

    fn fill(session: &mut FormSession, name: &str, role: &str, skills: &str, companies: &[&str]) {
        session
            .update_fields(FieldsUpdate {
                candidate_name: Some(name.to_string()),
                job_role: Some(role.to_string()),
                skills: Some(skills.to_string()),
            })
            .unwrap();
        let first = session.companies()[0].id;
        session.set_company(first, companies[0].to_string()).unwrap();
        for company in &companies[1..] {
            let id = session.add_company_field().unwrap();
            session.set_company(id, company.to_string()).unwrap();
        }
    }

    // ── Company rows ────────────────────────────────────────────────────────

    #[test]
    fn test_initial_state_has_one_row_with_hidden_remove() {
        let session = new_session();
        assert_eq!(*session.view(), ViewState::Form);
        assert_eq!(session.companies().len(), 1);
        assert!(!session.companies()[0].remove_visible);
    }

    #[test]
    fn test_adding_second_row_shows_both_remove_controls() {
        let mut session = new_session();
        session.add_company_field().unwrap();
        assert_eq!(session.companies().len(), 2);
        assert!(session.companies().iter().all(|r| r.remove_visible));
    }

    #[test]
    fn test_removing_down_to_one_hides_remove_control() {
        let mut session = new_session();
        let second = session.add_company_field().unwrap();
        session.remove_company_field(second).unwrap();
        assert_eq!(session.companies().len(), 1);
        assert!(!session.companies()[0].remove_visible);
    }

    #[test]
    fn test_cannot_remove_last_row() {
        let mut session = new_session();
        let only = session.companies()[0].id;
        assert!(matches!(
            session.remove_company_field(only),
            Err(AppError::Conflict(_))
        ));
        assert_eq!(session.companies().len(), 1);
    }

    #[test]
    fn test_remove_unknown_row_is_not_found() {
        let mut session = new_session();
        session.add_company_field().unwrap();
        assert!(matches!(
            session.remove_company_field(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_middle_row_keeps_order() {
        let mut session = new_session();
        fill(&mut session, "Ada", "Engineer", "Rust", &["Acme", "Globex", "Initech"]);
        let globex = session.companies()[1].id;
        session.remove_company_field(globex).unwrap();
        let values: Vec<&str> = session.companies().iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["Acme", "Initech"]);
        assert!(session.companies().iter().all(|r| r.remove_visible));
    }

    // ── Submit ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_valid_submit_reaches_output() {
        let session = Arc::new(Mutex::new(new_session()));
        fill(
            &mut *session.lock().await,
            "Ada Lovelace",
            "Software Engineer",
            "Python, Data Analytics, Leadership",
            &["Acme", "Globex"],
        );
        let generator = Arc::new(CountingGenerator::new());

        let snapshot = run_submission(session.clone(), generator.clone()).await.unwrap();

        assert_eq!(snapshot.view, ViewState::Output);
        assert!(!snapshot.form_visible);
        let letter = snapshot.letter.unwrap();
        assert!(letter.text.contains("Ada Lovelace"));
        assert_eq!(letter.companies, vec!["Acme", "Globex"]);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_skills_is_validation_error_without_generation() {
        let session = Arc::new(Mutex::new(new_session()));
        fill(&mut *session.lock().await, "Ada", "Engineer", "   ", &["Acme"]);
        let generator = Arc::new(CountingGenerator::new());

        let err = run_submission(session.clone(), generator.clone()).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == VALIDATION_MESSAGE));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        let guard = session.lock().await;
        assert_eq!(
            *guard.view(),
            ViewState::Error {
                message: VALIDATION_MESSAGE.to_string()
            }
        );
        // Form stays populated beneath the error.
        assert_eq!(guard.snapshot().candidate_name, "Ada");
        assert!(guard.snapshot().form_visible);
    }

    #[tokio::test]
    async fn test_resubmit_from_error_state() {
        let session = Arc::new(Mutex::new(new_session()));
        fill(&mut *session.lock().await, "Ada", "Engineer", "", &["Acme"]);
        let generator = Arc::new(CountingGenerator::new());
        assert!(run_submission(session.clone(), generator.clone()).await.is_err());

        session
            .lock()
            .await
            .update_fields(FieldsUpdate {
                skills: Some("Rust".to_string()),
                ..Default::default()
            })
            .unwrap();
        let snapshot = run_submission(session.clone(), generator.clone()).await.unwrap();
        assert_eq!(snapshot.view, ViewState::Output);
    }

    #[tokio::test]
    async fn test_generation_failure_shows_message() {
        let session = Arc::new(Mutex::new(new_session()));
        fill(&mut *session.lock().await, "Ada", "Engineer", "Rust", &["Acme"]);

        let err = run_submission(session.clone(), Arc::new(FailingGenerator("template engine offline")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
        let guard = session.lock().await;
        assert_eq!(
            *guard.view(),
            ViewState::Error {
                message: "template engine offline".to_string()
            }
        );
        assert!(guard.letter().is_none());
    }

    #[tokio::test]
    async fn test_generation_failure_without_message_uses_fallback() {
        let session = Arc::new(Mutex::new(new_session()));
        fill(&mut *session.lock().await, "Ada", "Engineer", "Rust", &["Acme"]);

        let _ = run_submission(session.clone(), Arc::new(FailingGenerator(""))).await;

        assert_eq!(
            *session.lock().await.view(),
            ViewState::Error {
                message: GENERATION_FALLBACK_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_submit_while_loading_is_conflict() {
        let mut session = new_session();
        fill(&mut session, "Ada", "Engineer", "Rust", &["Acme"]);
        session.begin_submit().unwrap();
        assert_eq!(*session.view(), ViewState::Loading);

        assert!(matches!(session.begin_submit(), Err(AppError::Conflict(_))));
        assert_eq!(*session.view(), ViewState::Loading);
    }

    #[test]
    fn test_edits_rejected_outside_form() {
        let mut session = new_session();
        fill(&mut session, "Ada", "Engineer", "Rust", &["Acme"]);
        session.begin_submit().unwrap();

        assert!(matches!(
            session.update_fields(FieldsUpdate::default()),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(session.add_company_field(), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_new_letter_replaces_previous() {
        let mut session = new_session();
        fill(&mut session, "Ada", "Engineer", "Rust", &["Acme"]);
        let sub = session.begin_submit().unwrap();
        session.complete_submit(&sub, Ok("first".to_string())).unwrap();
        session.generate_another().unwrap();

        fill(&mut session, "Grace", "Admiral", "COBOL", &["Navy"]);
        let sub = session.begin_submit().unwrap();
        session.complete_submit(&sub, Ok("second".to_string())).unwrap();

        let letter = session.current_letter().unwrap();
        assert_eq!(letter.text, "second");
        assert_eq!(letter.candidate_name, "Grace");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submit_still_leaves_loading() {
        let session = Arc::new(Mutex::new(new_session()));
        fill(&mut *session.lock().await, "Ada", "Engineer", "Rust", &["Acme"]);
        let generator = Arc::new(TemplateLetterGenerator::new(
            Arc::new(TokioDelay(Duration::from_secs(2))),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())),
        ));

        let request = tokio::spawn(run_submission(session.clone(), generator));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(*session.lock().await.view(), ViewState::Loading);

        request.abort();
        tokio::time::sleep(Duration::from_secs(60)).await;

        let mut guard = session.lock().await;
        assert_eq!(*guard.view(), ViewState::Output);
        assert!(guard.current_letter().is_ok());
        guard.generate_another().unwrap();
        assert_eq!(*guard.view(), ViewState::Form);
    }

    // ── Generate another ────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_another_resets_form() {
        let session = Arc::new(Mutex::new(new_session()));
        fill(
            &mut *session.lock().await,
            "Ada",
            "Engineer",
            "Rust",
            &["Acme", "Globex", "Initech"],
        );
        run_submission(session.clone(), Arc::new(CountingGenerator::new()))
            .await
            .unwrap();

        let mut guard = session.lock().await;
        guard.generate_another().unwrap();
        let snapshot = guard.snapshot();

        assert_eq!(snapshot.view, ViewState::Form);
        assert!(snapshot.candidate_name.is_empty());
        assert!(snapshot.job_role.is_empty());
        assert!(snapshot.skills.is_empty());
        assert_eq!(snapshot.companies.len(), 1);
        assert!(snapshot.companies[0].value.is_empty());
        assert!(!snapshot.companies[0].remove_visible);
        assert!(snapshot.letter.is_none());
        assert!(matches!(guard.current_letter(), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_generate_another_only_from_output() {
        let mut session = new_session();
        assert!(matches!(session.generate_another(), Err(AppError::Conflict(_))));
    }
}
