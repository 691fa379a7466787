// ============================================================
// Layer 3 — Example Domain Type
// ============================================================
// The uniform output record of every dataset format:
//   - a question
//   - a candidate passage (or answer span) to judge against it
//   - a binary label, or Unknown when ground truth is withheld
//
// Example:
//   Question: "Who wrote the Tale of Kieu?"
//   Text:     "The Tale of Kieu is an epic poem by Nguyen Du."
//   Label:    True
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use serde::{Deserialize, Serialize};

/// Ground truth for one (question, text) pair.
///
/// `Unknown` only appears on held-out records, so consumers
/// can leave them out of any loss computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    True,
    False,
    Unknown,
}

impl Label {
    /// `Some(bool)` for labelled records, `None` for `Unknown`
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Label::True    => Some(true),
            Label::False   => Some(false),
            Label::Unknown => None,
        }
    }

    /// Index into the class list `["False", "True"]`.
    /// Unlabelled records have no class.
    pub fn class_index(self) -> Option<usize> {
        self.as_bool().map(usize::from)
    }
}

impl From<bool> for Label {
    fn from(value: bool) -> Self {
        if value { Label::True } else { Label::False }
    }
}

/// One normalised classification example.
///
/// `question` and `text` are always present; records that
/// cannot resolve both are dropped before an Example is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// The natural language question
    pub question: String,

    /// The passage or answer span judged against the question
    pub text: String,

    pub label: Label,
}

impl Example {
    pub fn new(question: impl Into<String>, text: impl Into<String>, label: Label) -> Self {
        Self {
            question: question.into(),
            text:     text.into(),
            label,
        }
    }
}
