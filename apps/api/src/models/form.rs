use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One company-name input row and its remove control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRow {
    pub id: Uuid,
    pub value: String,
    /// Shown only while more than one row exists.
    pub remove_visible: bool,
}

impl CompanyRow {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            value: String::new(),
            remove_visible: false,
        }
    }
}

/// The visible UI mode. Exactly one is current at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Form,
    Loading,
    Error { message: String },
    Output,
}

impl ViewState {
    /// The form stays visible beneath the error message so it can be corrected.
    pub fn form_visible(&self) -> bool {
        matches!(self, ViewState::Form | ViewState::Error { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Form => "form",
            ViewState::Loading => "loading",
            ViewState::Error { .. } => "error",
            ViewState::Output => "output",
        }
    }
}
