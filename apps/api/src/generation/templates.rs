// Fixed prose templates for the cover letter.
// Placeholders use `{name}` syntax and are filled by `fill_template`.

use crate::generation::classifier::PrimaryFocus;

pub const SALUTATION: &str = "Dear Hiring Manager,";
pub const SIGN_OFF: &str = "Sincerely,";

/// Whole-letter layout. Paragraphs are separated by blank lines.
pub const LETTER_TEMPLATE: &str = "{date}

{salutation}

{intro}

{skills_paragraph}

{company_paragraph}

{closing}

{sign_off}
{candidate_name}";

pub const INTRO_TEMPLATE: &str = "I am writing to express my strong interest in the {job_role} position at {primary_company}. \
With a proven track record in {first_two_skills}, I am excited about the opportunity to contribute to your team's success.";

/// Skills paragraph when the profile is both technical and data-oriented.
pub const SKILLS_TECHNICAL_DATA_TEMPLATE: &str = "Throughout my career, I have developed strong expertise in {first_three_skills}, among other technical competencies. \
My experience spans across multiple domains, enabling me to tackle complex challenges with innovative solutions. \
I have consistently demonstrated the ability to leverage these skills to drive measurable results and exceed project objectives.";

pub const SKILLS_MANAGERIAL_TEMPLATE: &str = "My professional background encompasses {first_three_skills}, with a particular emphasis on {first_skill}. \
I have successfully led cross-functional teams, managed complex projects, and delivered results that align with organizational goals. \
My experience has equipped me with the tools necessary to excel in fast-paced, dynamic environments.";

pub const SKILLS_GENERAL_TEMPLATE: &str = "I bring comprehensive experience in {first_three_skills}, which I have honed through dedicated professional practice. \
My proficiency in {first_skill} is complemented by strong capabilities in {second_and_third_skills}, \
creating a well-rounded skill set that I am eager to apply to the {job_role} position.";

pub const COMPANY_MULTIPLE_TEMPLATE: &str = "What particularly attracts me to {primary_company} is your reputation for innovation and excellence in the industry. \
I have been following your company's growth and am impressed by your commitment to {commitment}. \
While I am also exploring opportunities with {other_companies}, {primary_company} stands out as my preferred choice \
due to your company culture and industry leadership.";

pub const COMPANY_SINGLE_TEMPLATE: &str = "What particularly draws me to {primary_company} is your organization's reputation for {reputation}. \
Your company's mission aligns perfectly with my professional values and career aspirations, \
making this opportunity especially compelling.";

pub const CLOSING_TEMPLATE: &str = "I am confident that my background in {first_two_skills}, combined with my passion for {passion}, \
makes me an ideal candidate for this position. \
I would welcome the opportunity to discuss how my experience and skills can contribute to {primary_company}'s continued success. \
Thank you for considering my application, and I look forward to the possibility of speaking with you soon.";

/// Multi-company commitment clause. Has no managerial variant.
pub fn commitment_clause(focus: PrimaryFocus) -> &'static str {
    match focus {
        PrimaryFocus::Technical => "technological advancement",
        PrimaryFocus::Data => "data-driven decision making",
        PrimaryFocus::Managerial | PrimaryFocus::General => "professional excellence",
    }
}

/// Single-company reputation clause.
pub fn reputation_clause(focus: PrimaryFocus) -> &'static str {
    match focus {
        PrimaryFocus::Technical => "cutting-edge technology and innovation",
        PrimaryFocus::Data => "leveraging data to drive business outcomes",
        PrimaryFocus::Managerial => "fostering leadership and professional growth",
        PrimaryFocus::General => "excellence and commitment to quality",
    }
}

/// Closing-paragraph passion clause.
pub fn passion_clause(focus: PrimaryFocus) -> &'static str {
    match focus {
        PrimaryFocus::Technical => "technology and innovation",
        PrimaryFocus::Data => "data and analytics",
        PrimaryFocus::Managerial => "leadership and team development",
        PrimaryFocus::General => "professional excellence",
    }
}

/// Substitutes `{key}` placeholders in a single left-to-right pass.
///
/// Substituted values are never re-scanned, so user text containing braces is
/// inserted literally. Unknown placeholders are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_known_keys() {
        let out = fill_template("Hello {name}, welcome to {place}.", &[("name", "Ada"), ("place", "Acme")]);
        assert_eq!(out, "Hello Ada, welcome to Acme.");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template("{a} {b}", &[("a", "{b}"), ("b", "x")]);
        assert_eq!(out, "{b} x");
    }

    #[test]
    fn test_fill_template_leaves_unknown_and_unclosed() {
        assert_eq!(fill_template("{missing} ok", &[]), "{missing} ok");
        assert_eq!(fill_template("tail {open", &[("open", "x")]), "tail {open");
    }

    #[test]
    fn test_commitment_clause_has_no_managerial_variant() {
        assert_eq!(
            commitment_clause(PrimaryFocus::Managerial),
            commitment_clause(PrimaryFocus::General)
        );
    }

    #[test]
    fn test_clause_families_distinguish_all_focuses() {
        let focuses = [
            PrimaryFocus::Technical,
            PrimaryFocus::Data,
            PrimaryFocus::Managerial,
            PrimaryFocus::General,
        ];
        let reputations: std::collections::HashSet<_> =
            focuses.iter().map(|f| reputation_clause(*f)).collect();
        let passions: std::collections::HashSet<_> =
            focuses.iter().map(|f| passion_clause(*f)).collect();
        assert_eq!(reputations.len(), 4);
        assert_eq!(passions.len(), 4);
    }
}
