// ============================================================
// Layer 3 — Load Modes and Source Formats
// ============================================================
// A `load` call names a MODE (which split it feeds) and the
// normaliser's configuration picks the SOURCE FORMAT (how the
// raw JSON is read). Together they fix the parse path:
//
//   mode    destination   default format
//   ─────   ───────────   ─────────────────────────────
//   train   train         ChallengeFlat
//   val     validation    ChallengeFlat (or ChallengeNested)
//   test    test          ChallengeNested
//   squad   train         SquadSpanText | SquadFirstAnswer
//
// `squad` is a training-data source, not a split of its own.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::collection::Split;
use crate::domain::error::DatasetError;

/// The `mode` argument of a load call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    Train,
    Val,
    Test,
    Squad,
}

impl LoadMode {
    /// The collection this mode appends to
    pub fn destination(self) -> Split {
        match self {
            LoadMode::Train | LoadMode::Squad => Split::Train,
            LoadMode::Val                     => Split::Validation,
            LoadMode::Test                    => Split::Test,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LoadMode::Train => "train",
            LoadMode::Val   => "val",
            LoadMode::Test  => "test",
            LoadMode::Squad => "squad",
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadMode {
    type Err = DatasetError;

    /// Case-insensitive; anything outside the four modes is a
    /// configuration error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "train" => Ok(LoadMode::Train),
            "val"   => Ok(LoadMode::Val),
            "test"  => Ok(LoadMode::Test),
            "squad" => Ok(LoadMode::Squad),
            other   => Err(DatasetError::Configuration(format!(
                "unknown load mode '{other}', expected one of train, val, test, squad"
            ))),
        }
    }
}

/// How a raw JSON document is turned into examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// `[{question, text, label?}]`, missing label → False
    ChallengeFlat,

    /// `[{question, paragraphs: [{text, label?}]}]`,
    /// one example per paragraph, missing label → Unknown
    ChallengeNested,

    /// SQuAD traversal, text = the paragraph context
    SquadSpanText,

    /// SQuAD traversal, text = the first (plausible) answer
    SquadFirstAnswer,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::ChallengeFlat    => "challenge-flat",
            SourceFormat::ChallengeNested  => "challenge-nested",
            SourceFormat::SquadSpanText    => "squad-span-text",
            SourceFormat::SquadFirstAnswer => "squad-first-answer",
        };
        f.write_str(name)
    }
}

/// Which SQuAD extraction strategy a normaliser is deployed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SquadPolicy {
    /// Whole paragraph context as text
    SpanText,

    /// First answer (or plausible answer) text; units
    /// without one are skipped
    #[default]
    FirstAnswer,
}

impl SquadPolicy {
    pub fn source_format(self) -> SourceFormat {
        match self {
            SquadPolicy::SpanText    => SourceFormat::SquadSpanText,
            SquadPolicy::FirstAnswer => SourceFormat::SquadFirstAnswer,
        }
    }
}
