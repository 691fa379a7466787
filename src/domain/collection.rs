// ============================================================
// Layer 3 — Dataset Collection
// ============================================================
// Three ordered sequences of Examples owned by one normaliser:
//
//   train       ← modes `train` and `squad`
//   validation  ← mode `val`, or carved out of train
//   test        ← mode `test`
//
// Sequences only ever grow by appending; ordering is decided
// by the normaliser's seeded shuffle, not by this type.
//
// Reference: Rust Book §8 (Vectors)

use std::fmt;

use serde::Serialize;

use crate::domain::example::{Example, Label};

/// Names one of the three collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Validation, Split::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train      => "train",
            Split::Validation => "validation",
            Split::Test       => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetCollection {
    pub train:      Vec<Example>,
    pub validation: Vec<Example>,
    pub test:       Vec<Example>,
}

impl DatasetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, split: Split) -> &[Example] {
        match split {
            Split::Train      => &self.train,
            Split::Validation => &self.validation,
            Split::Test       => &self.test,
        }
    }

    pub fn get_mut(&mut self, split: Split) -> &mut Vec<Example> {
        match split {
            Split::Train      => &mut self.train,
            Split::Validation => &mut self.validation,
            Split::Test       => &mut self.test,
        }
    }

    pub fn len(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self, split: Split) -> SplitSummary {
        SplitSummary::of(self.get(split))
    }
}

/// Label distribution of one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub total:    usize,
    pub positive: usize,
    pub negative: usize,
    pub unknown:  usize,
}

impl SplitSummary {
    pub fn of(examples: &[Example]) -> Self {
        examples.iter().fold(Self::default(), |mut s, ex| {
            s.total += 1;
            match ex.label {
                Label::True    => s.positive += 1,
                Label::False   => s.negative += 1,
                Label::Unknown => s.unknown  += 1,
            }
            s
        })
    }

    /// Fraction of labelled records that are positive.
    /// Returns 0.0 when nothing is labelled.
    pub fn positive_ratio(&self) -> f64 {
        let labelled = self.positive + self.negative;
        if labelled == 0 {
            return 0.0;
        }
        self.positive as f64 / labelled as f64
    }
}
