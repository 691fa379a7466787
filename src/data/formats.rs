// ============================================================
// Layer 4 — Source Format Extractors
// ============================================================
// Implements `RecordExtractor` for each `SourceFormat`.
//
// Layouts handled:
//
//   ChallengeFlat
//     [ { "question", "text", "label"? }, ... ]
//
//   ChallengeNested
//     [ { "question", "paragraphs": [ { "text", "label"? } ] } ]
//
//   SquadSpanText / SquadFirstAnswer
//     { "data": [ { "paragraphs": [ { "context",
//         "qas": [ { "question", "is_impossible",
//                    "answers"?, "plausible_answers"? } ] } ] } ] }
//
// Each record is deserialised on its own from a serde_json
// Value, so one bad record costs exactly that record. Only a
// wrong top-level shape fails the whole document.
//
// Reference: serde / serde_json crate documentation
//            Rust Book §13 (Iterators)

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::error::ShapeError;
use crate::domain::example::{Example, Label};
use crate::domain::format::{LoadMode, SourceFormat};
use crate::domain::traits::{Extraction, RecordExtractor};

// ─── Raw challenge records ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct FlatRecord {
    question: String,
    text:     String,
    #[serde(default)]
    label:    Option<bool>,
}

#[derive(Debug, Deserialize)]
struct NestedRecord {
    question:   String,
    paragraphs: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct NestedParagraph {
    text:  String,
    #[serde(default)]
    label: Option<bool>,
}

// ─── Raw SQuAD records ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SquadDocument {
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SquadArticle {
    paragraphs: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SquadParagraph {
    #[serde(default)]
    context: Option<String>,
    qas:     Vec<Value>,
}

/// Fields every question unit must carry under both policies
#[derive(Debug, Deserialize)]
struct SquadUnit {
    question:      String,
    is_impossible: bool,
    #[serde(default)]
    answers:           Option<Vec<Value>>,
    #[serde(default)]
    plausible_answers: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SquadAnswer {
    text: String,
}

/// Deserialise one record, `None` if it does not fit `T`.
fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}

fn expect_array(document: Value, format: SourceFormat) -> Result<Vec<Value>, ShapeError> {
    match document {
        Value::Array(items) => Ok(items),
        other => Err(ShapeError(format!(
            "{format} expects a top-level JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_)  => "an array",
        Value::Object(_) => "an object",
    }
}

impl RecordExtractor for SourceFormat {
    fn extract(&self, document: Value, mode: LoadMode) -> Result<Extraction, ShapeError> {
        let out = match self {
            SourceFormat::ChallengeFlat    => extract_flat(expect_array(document, *self)?),
            SourceFormat::ChallengeNested  => extract_nested(expect_array(document, *self)?),
            SourceFormat::SquadSpanText    => extract_squad(document, *self, span_text)?,
            SourceFormat::SquadFirstAnswer => extract_squad(document, *self, first_answer)?,
        };

        if out.skipped > 0 {
            tracing::warn!(
                "{} ({} mode): skipped {} unresolvable record(s)",
                self,
                mode,
                out.skipped
            );
        }
        Ok(out)
    }
}

// ─── ChallengeFlat ────────────────────────────────────────────────────────────
fn extract_flat(items: Vec<Value>) -> Extraction {
    let mut out = Extraction::default();

    for item in items {
        match decode::<FlatRecord>(item) {
            Some(r) => out.push(Example::new(
                r.question,
                r.text,
                Label::from(r.label.unwrap_or(false)),
            )),
            None => out.skip(1),
        }
    }

    out
}

// ─── ChallengeNested ──────────────────────────────────────────────────────────
// Cross product: the parent question is repeated for every
// paragraph. A missing label stays Unknown.
fn extract_nested(items: Vec<Value>) -> Extraction {
    let mut out = Extraction::default();

    for item in items {
        let Some(record) = decode::<NestedRecord>(item) else {
            out.skip(1);
            continue;
        };

        for paragraph in record.paragraphs {
            match decode::<NestedParagraph>(paragraph) {
                Some(p) => out.push(Example::new(
                    record.question.clone(),
                    p.text,
                    p.label.map_or(Label::Unknown, Label::from),
                )),
                None => out.skip(1),
            }
        }
    }

    out
}

// ─── SQuAD traversal ──────────────────────────────────────────────────────────
// Walks data → paragraphs → qas and hands every question unit
// to `resolve`. A unit that resolves to None is skipped, as is
// any article or paragraph whose structure cannot be read.
fn extract_squad(
    document: Value,
    format:   SourceFormat,
    resolve:  fn(&SquadParagraph, SquadUnit) -> Option<Example>,
) -> Result<Extraction, ShapeError> {
    if !document.is_object() {
        return Err(ShapeError(format!(
            "{format} expects a top-level JSON object, found {}",
            json_kind(&document)
        )));
    }
    let root: SquadDocument = serde_json::from_value(document)
        .map_err(|e| ShapeError(format!("{format} expects a top-level 'data' array: {e}")))?;

    let mut out = Extraction::default();

    for article in root.data {
        let Some(article) = decode::<SquadArticle>(article) else {
            out.skip(1);
            continue;
        };

        for paragraph in article.paragraphs {
            let Some(mut paragraph) = decode::<SquadParagraph>(paragraph) else {
                out.skip(1);
                continue;
            };

            let units = std::mem::take(&mut paragraph.qas);
            for unit in units {
                match decode::<SquadUnit>(unit).and_then(|u| resolve(&paragraph, u)) {
                    Some(example) => out.push(example),
                    None          => out.skip(1),
                }
            }
        }
    }

    Ok(out)
}

/// Whole paragraph context as text, whether or not it holds
/// the answer.
fn span_text(paragraph: &SquadParagraph, unit: SquadUnit) -> Option<Example> {
    let context = paragraph.context.as_ref()?;
    Some(Example::new(unit.question, context.clone(), Label::from(unit.is_impossible)))
}

/// Text of the first answer, drawn from `plausible_answers`
/// for impossible questions and from `answers` otherwise.
/// Never falls back to the context.
fn first_answer(_paragraph: &SquadParagraph, unit: SquadUnit) -> Option<Example> {
    let candidates = if unit.is_impossible {
        unit.plausible_answers
    } else {
        unit.answers
    };
    let first = candidates?.into_iter().next()?;
    let answer = decode::<SquadAnswer>(first)?;
    Some(Example::new(unit.question, answer.text, Label::from(unit.is_impossible)))
}
