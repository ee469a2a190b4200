use crate::errors::AppError;
use crate::models::form::CompanyRow;
use crate::models::letter::{parse_skills, Submission};

/// Shown whenever a required field is empty after trimming.
pub const VALIDATION_MESSAGE: &str = "Please fill in all required fields.";

/// Presence check over the raw form contents.
///
/// Company values are trimmed and empty rows dropped, keeping row order.
/// Fails if name, role or skills is blank, or no company row has text.
pub fn validate_submission(
    candidate_name: &str,
    job_role: &str,
    companies: &[CompanyRow],
    skills_raw: &str,
) -> Result<Submission, AppError> {
    let candidate_name = candidate_name.trim();
    let job_role = job_role.trim();
    let skills_raw = skills_raw.trim();

    let companies: Vec<String> = companies
        .iter()
        .map(|row| row.value.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if candidate_name.is_empty() || job_role.is_empty() || companies.is_empty() || skills_raw.is_empty()
    {
        return Err(AppError::Validation(VALIDATION_MESSAGE.to_string()));
    }

    Ok(Submission {
        candidate_name: candidate_name.to_string(),
        job_role: job_role.to_string(),
        companies,
        skills: parse_skills(skills_raw),
    })
}
