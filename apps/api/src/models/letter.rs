use serde::{Deserialize, Serialize};

/// The validated inputs for one generation request.
///
/// Built only by `form::validation::validate_submission`, which guarantees that
/// name, role and skills are non-empty after trimming and that `companies`
/// holds at least one non-empty entry in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub candidate_name: String,
    pub job_role: String,
    pub companies: Vec<String>,
    pub skills: Vec<String>,
}

impl Submission {
    /// The first company in the list. Receives the "preferred choice" phrasing.
    pub fn primary_company(&self) -> &str {
        self.companies.first().map(String::as_str).unwrap_or_default()
    }
}

/// Splits a raw comma-separated skills string and trims each entry.
///
/// Empty entries (e.g. from `"Rust,,Go"`) are kept in place.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// The single current letter. Replaced wholesale on every successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedLetter {
    pub text: String,
    pub candidate_name: String,
    pub job_role: String,
    pub companies: Vec<String>,
}

impl GeneratedLetter {
    pub fn new(text: String, submission: &Submission) -> Self {
        Self {
            text,
            candidate_name: submission.candidate_name.clone(),
            job_role: submission.job_role.clone(),
            companies: submission.companies.clone(),
        }
    }

    /// `Cover_Letter_<name>.pdf` with every whitespace run in the name replaced by `_`.
    pub fn export_file_name(&self) -> String {
        let mut name = String::with_capacity(self.candidate_name.len());
        let mut in_space = false;
        for c in self.candidate_name.chars() {
            if c.is_whitespace() {
                if !in_space {
                    name.push('_');
                }
                in_space = true;
            } else {
                name.push(c);
                in_space = false;
            }
        }
        format!("Cover_Letter_{name}.pdf")
    }
}
