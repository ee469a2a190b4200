//! Skill classification: maps a skills list to three non-exclusive category flags.
//!
//! Matching is a case-insensitive substring test against fixed keyword sets, so
//! "JavaScript" counts as technical via both `javascript` and `java`, and one
//! skill may raise several flags at once. Phrase selection in the letter relies
//! on fixed priority orders over these flags (see `SkillProfile`).

/// Keywords that mark a skill as technical.
pub const TECHNICAL_KEYWORDS: &[&str] = &["python", "javascript", "java", "programming", "coding"];

/// Keywords that mark a skill as managerial.
pub const MANAGERIAL_KEYWORDS: &[&str] = &["management", "leadership", "team"];

/// Keywords that mark a skill as data-oriented.
pub const DATA_KEYWORDS: &[&str] = &["data", "analytics", "machine learning"];

/// Category flags derived from a skills list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillProfile {
    pub technical: bool,
    pub managerial: bool,
    pub data_oriented: bool,
}

/// Which skills-paragraph variant applies. Priority: technical+data > managerial > default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillsEmphasis {
    TechnicalData,
    Managerial,
    General,
}

/// Which clause family applies to the single-company paragraph and the closing.
/// Priority: technical > data > managerial > generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryFocus {
    Technical,
    Data,
    Managerial,
    General,
}

impl SkillProfile {
    pub fn skills_emphasis(&self) -> SkillsEmphasis {
        if self.technical && self.data_oriented {
            SkillsEmphasis::TechnicalData
        } else if self.managerial {
            SkillsEmphasis::Managerial
        } else {
            SkillsEmphasis::General
        }
    }

    pub fn primary_focus(&self) -> PrimaryFocus {
        if self.technical {
            PrimaryFocus::Technical
        } else if self.data_oriented {
            PrimaryFocus::Data
        } else if self.managerial {
            PrimaryFocus::Managerial
        } else {
            PrimaryFocus::General
        }
    }
}

/// Classifies a skills list. Order-independent and case-insensitive.
pub fn classify_skills<S: AsRef<str>>(skills: &[S]) -> SkillProfile {
    let lowered: Vec<String> = skills.iter().map(|s| s.as_ref().to_lowercase()).collect();

    SkillProfile {
        technical: any_keyword(&lowered, TECHNICAL_KEYWORDS),
        managerial: any_keyword(&lowered, MANAGERIAL_KEYWORDS),
        data_oriented: any_keyword(&lowered, DATA_KEYWORDS),
    }
}

fn any_keyword(lowered_skills: &[String], keywords: &[&str]) -> bool {
    lowered_skills
        .iter()
        .any(|skill| keywords.iter().any(|kw| skill.contains(kw)))
}
