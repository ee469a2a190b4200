//! Letter Generation: turns a validated `Submission` into cover-letter text.
//!
//! Flow: delay → classify skills → pick paragraph variants → fill templates →
//!       assemble letter under today's date.
//!
//! `compose_letter` is pure: for a fixed submission and date it always returns
//! the same text. The delay and the date come from injected `Delay`/`Clock`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::classifier::{classify_skills, SkillProfile, SkillsEmphasis};
use crate::generation::clock::{format_long_date, Clock, Delay};
use crate::generation::templates::{
    commitment_clause, fill_template, passion_clause, reputation_clause, CLOSING_TEMPLATE,
    COMPANY_MULTIPLE_TEMPLATE, COMPANY_SINGLE_TEMPLATE, INTRO_TEMPLATE, LETTER_TEMPLATE,
    SALUTATION, SIGN_OFF, SKILLS_GENERAL_TEMPLATE, SKILLS_MANAGERIAL_TEMPLATE,
    SKILLS_TECHNICAL_DATA_TEMPLATE,
};
use crate::models::letter::Submission;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The letter generator trait. Carried in `AppState` as `Arc<dyn LetterGenerator>`.
#[async_trait]
pub trait LetterGenerator: Send + Sync {
    async fn generate(&self, submission: &Submission) -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateLetterGenerator: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Keyword-classified, template-based generator.
pub struct TemplateLetterGenerator {
    delay: Arc<dyn Delay>,
    clock: Arc<dyn Clock>,
}

impl TemplateLetterGenerator {
    pub fn new(delay: Arc<dyn Delay>, clock: Arc<dyn Clock>) -> Self {
        Self { delay, clock }
    }
}

#[async_trait]
impl LetterGenerator for TemplateLetterGenerator {
    async fn generate(&self, submission: &Submission) -> Result<String, AppError> {
        if submission.companies.is_empty() {
            return Err(AppError::Generation(
                "A cover letter needs at least one target company".to_string(),
            ));
        }

        self.delay.wait().await;

        let text = compose_letter(submission, self.clock.today());
        info!(
            "Generated cover letter for {} ({} companies, {} skills)",
            submission.job_role,
            submission.companies.len(),
            submission.skills.len()
        );
        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Letter composition
// ────────────────────────────────────────────────────────────────────────────

/// Builds the full letter text for a submission dated `date`.
pub fn compose_letter(submission: &Submission, date: NaiveDate) -> String {
    let profile = classify_skills(&submission.skills);
    debug!("Skill profile: {:?}", profile);

    let date = format_long_date(date);
    let intro = intro_paragraph(submission);
    let skills_paragraph = skills_paragraph(submission, &profile);
    let company_paragraph = company_paragraph(submission, &profile);
    let closing = closing_paragraph(submission, &profile);

    fill_template(
        LETTER_TEMPLATE,
        &[
            ("date", &date),
            ("salutation", SALUTATION),
            ("intro", &intro),
            ("skills_paragraph", &skills_paragraph),
            ("company_paragraph", &company_paragraph),
            ("closing", &closing),
            ("sign_off", SIGN_OFF),
            ("candidate_name", &submission.candidate_name),
        ],
    )
}

fn intro_paragraph(submission: &Submission) -> String {
    let first_two = join_skills(&submission.skills, 0, 2, " and ");
    fill_template(
        INTRO_TEMPLATE,
        &[
            ("job_role", &submission.job_role),
            ("primary_company", submission.primary_company()),
            ("first_two_skills", &first_two),
        ],
    )
}

fn skills_paragraph(submission: &Submission, profile: &SkillProfile) -> String {
    let template = match profile.skills_emphasis() {
        SkillsEmphasis::TechnicalData => SKILLS_TECHNICAL_DATA_TEMPLATE,
        SkillsEmphasis::Managerial => SKILLS_MANAGERIAL_TEMPLATE,
        SkillsEmphasis::General => SKILLS_GENERAL_TEMPLATE,
    };

    let first_three = join_skills(&submission.skills, 0, 3, ", ");
    let first = join_skills(&submission.skills, 0, 1, "");
    let second_and_third = join_skills(&submission.skills, 1, 3, " and ");

    fill_template(
        template,
        &[
            ("first_three_skills", &first_three),
            ("first_skill", &first),
            ("second_and_third_skills", &second_and_third),
            ("job_role", &submission.job_role),
        ],
    )
}

fn company_paragraph(submission: &Submission, profile: &SkillProfile) -> String {
    let focus = profile.primary_focus();
    let primary = submission.primary_company();

    if submission.companies.len() > 1 {
        let others = submission.companies[1..].join(", ");
        fill_template(
            COMPANY_MULTIPLE_TEMPLATE,
            &[
                ("primary_company", primary),
                ("commitment", commitment_clause(focus)),
                ("other_companies", &others),
            ],
        )
    } else {
        fill_template(
            COMPANY_SINGLE_TEMPLATE,
            &[
                ("primary_company", primary),
                ("reputation", reputation_clause(focus)),
            ],
        )
    }
}

fn closing_paragraph(submission: &Submission, profile: &SkillProfile) -> String {
    let first_two = join_skills(&submission.skills, 0, 2, " and ");
    fill_template(
        CLOSING_TEMPLATE,
        &[
            ("first_two_skills", &first_two),
            ("passion", passion_clause(profile.primary_focus())),
            ("primary_company", submission.primary_company()),
        ],
    )
}

/// Joins `skills[start..end]`, clamped to the available length. Never pads.
fn join_skills(skills: &[String], start: usize, end: usize, separator: &str) -> String {
    let end = end.min(skills.len());
    if start >= end {
        return String::new();
    }
    skills[start..end].join(separator)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::clock::{FixedClock, NoDelay, TokioDelay};
    use std::time::Duration;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    fn submission(companies: &[&str], skills: &[&str]) -> Submission {
        Submission {
            candidate_name: "Ada Lovelace".to_string(),
            job_role: "Software Engineer".to_string(),
            companies: companies.iter().map(|s| s.to_string()).collect(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_letter_contains_name_role_and_primary_company() {
        let text = compose_letter(&submission(&["Acme"], &["Python", "SQL", "Docker"]), date());
        assert!(!text.is_empty());
        assert!(text.contains("Ada Lovelace"));
        assert!(text.contains("Software Engineer"));
        assert!(text.contains("Acme"));
    }

    #[test]
    fn test_letter_layout() {
        let text = compose_letter(&submission(&["Acme"], &["Python", "SQL", "Docker"]), date());
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[0], "January 5, 2025");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Dear Hiring Manager,");
        assert_eq!(lines[3], "");
        assert!(lines[4].starts_with("I am writing to express my strong interest"));
        assert_eq!(lines[lines.len() - 2], "Sincerely,");
        assert_eq!(lines[lines.len() - 1], "Ada Lovelace");
        // date, salutation, four paragraphs, sign-off block
        assert_eq!(lines.len(), 14);
    }

    #[test]
    fn test_intro_exact_text() {
        let text = intro_paragraph(&submission(&["Acme"], &["Rust", "Go", "SQL"]));
        assert_eq!(
            text,
            "I am writing to express my strong interest in the Software Engineer position at Acme. \
             With a proven track record in Rust and Go, I am excited about the opportunity to \
             contribute to your team's success."
        );
    }

    #[test]
    fn test_technical_data_variant_beats_managerial() {
        let sub = submission(&["Acme"], &["Python", "Data Analytics", "Leadership"]);
        let text = compose_letter(&sub, date());
        assert!(text.contains(
            "Throughout my career, I have developed strong expertise in Python, Data Analytics, Leadership"
        ));
        assert!(!text.contains("My professional background encompasses"));
    }

    #[test]
    fn test_managerial_variant() {
        let sub = submission(&["Acme"], &["Leadership", "Budgeting", "Hiring"]);
        let text = compose_letter(&sub, date());
        assert!(text.contains(
            "My professional background encompasses Leadership, Budgeting, Hiring, with a particular emphasis on Leadership."
        ));
        assert!(text.contains("fostering leadership and professional growth"));
        assert!(text.contains("leadership and team development"));
    }

    #[test]
    fn test_default_variant_uses_second_and_third_skills() {
        let sub = submission(&["Acme"], &["Negotiation", "Writing", "Research"]);
        let text = compose_letter(&sub, date());
        assert!(text.contains("I bring comprehensive experience in Negotiation, Writing, Research"));
        assert!(text.contains(
            "My proficiency in Negotiation is complemented by strong capabilities in Writing and Research"
        ));
        assert!(text.contains("excellence and commitment to quality"));
    }

    #[test]
    fn test_single_company_never_mentions_preferred_choice() {
        let text = compose_letter(&submission(&["Acme"], &["Python"]), date());
        assert!(!text.contains("preferred choice"));
        assert!(text.contains("What particularly draws me to Acme"));
        assert!(text.contains("cutting-edge technology and innovation"));
    }

    #[test]
    fn test_multiple_companies_names_alternatives() {
        let text = compose_letter(&submission(&["Acme", "Globex"], &["Python"]), date());
        assert!(text.contains("preferred choice"));
        assert!(text.contains("While I am also exploring opportunities with Globex, Acme stands out"));
        assert!(text.contains("commitment to technological advancement"));
    }

    #[test]
    fn test_multiple_companies_list_all_alternatives() {
        let text = compose_letter(
            &submission(&["Acme", "Globex", "Initech"], &["Leadership"]),
            date(),
        );
        assert!(text.contains("opportunities with Globex, Initech, Acme"));
        // Multi-company clause has no managerial variant.
        assert!(text.contains("commitment to professional excellence"));
    }

    #[test]
    fn test_multiple_companies_data_focus_commitment() {
        let text = compose_letter(&submission(&["Acme", "Globex"], &["Analytics"]), date());
        assert!(text.contains("commitment to data-driven decision making"));
        assert!(!text.contains("technological advancement"));
    }

    #[test]
    fn test_data_focus_clauses() {
        let text = compose_letter(&submission(&["Acme"], &["Analytics"]), date());
        assert!(text.contains("leveraging data to drive business outcomes"));
        assert!(text.contains("passion for data and analytics"));
    }

    #[test]
    fn test_single_skill_does_not_fail() {
        let text = compose_letter(&submission(&["Acme"], &["Negotiation"]), date());
        assert!(text.contains("With a proven track record in Negotiation, I am excited"));
        assert!(text.contains("strong capabilities in , creating"));
    }

    #[test]
    fn test_two_skills_do_not_fail() {
        let text = compose_letter(&submission(&["Acme"], &["Negotiation", "Writing"]), date());
        assert!(text.contains("experience in Negotiation, Writing, which"));
        assert!(text.contains("strong capabilities in Writing, creating"));
    }

    #[test]
    fn test_compose_is_deterministic_for_fixed_date() {
        let sub = submission(&["Acme", "Globex"], &["Python", "Data", "Team lead"]);
        assert_eq!(compose_letter(&sub, date()), compose_letter(&sub, date()));
    }

    #[test]
    fn test_user_braces_are_inserted_literally() {
        let mut sub = submission(&["{primary_company}"], &["{job_role}"]);
        sub.candidate_name = "{date}".to_string();
        let text = compose_letter(&sub, date());
        assert!(text.ends_with("Sincerely,\n{date}"));
        assert!(text.contains("position at {primary_company}."));
    }

    #[test]
    fn test_join_skills_clamps() {
        let skills = vec!["a".to_string()];
        assert_eq!(join_skills(&skills, 0, 3, ", "), "a");
        assert_eq!(join_skills(&skills, 1, 3, " and "), "");
    }

    #[tokio::test]
    async fn test_generator_uses_injected_clock() {
        let generator = TemplateLetterGenerator::new(Arc::new(NoDelay), Arc::new(FixedClock(date())));
        let text = generator
            .generate(&submission(&["Acme"], &["Python"]))
            .await
            .unwrap();
        assert!(text.starts_with("January 5, 2025\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generator_waits_for_delay() {
        let generator = TemplateLetterGenerator::new(
            Arc::new(TokioDelay(Duration::from_secs(2))),
            Arc::new(FixedClock(date())),
        );
        let start = tokio::time::Instant::now();
        generator
            .generate(&submission(&["Acme"], &["Python"]))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_generator_rejects_submission_without_companies() {
        let generator = TemplateLetterGenerator::new(Arc::new(NoDelay), Arc::new(FixedClock(date())));
        let err = generator
            .generate(&submission(&[], &["Python"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }
}
