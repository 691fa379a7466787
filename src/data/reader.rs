// ============================================================
// Layer 4 — Dataset File Reader
// ============================================================
// Reads one dataset file from disk into a serde_json Value.
//
// Outcomes:
//   - file missing            → Ok(None), zero contribution
//   - bytes not decodable     → DatasetError::MalformedInput
//   - text is not valid JSON  → DatasetError::MalformedInput
//   - any other read failure  → DatasetError::Io
//
// Callers look for optional files (augmented training data,
// a dev set) by simply loading them; absence is not an error.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DatasetError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Text encodings a dataset file may be stored in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    #[default]
    Utf8,

    /// UTF-8 with an optional leading byte order mark
    Utf8Sig,

    /// ISO-8859-1: every byte is the code point of the same value
    Latin1,
}

impl TextEncoding {
    /// Decode raw file bytes into a String.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| e.to_string()),
            TextEncoding::Utf8Sig => {
                let mut bytes = bytes;
                if bytes.starts_with(UTF8_BOM) {
                    bytes.drain(..UTF8_BOM.len());
                }
                String::from_utf8(bytes).map_err(|e| e.to_string())
            }
            TextEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8    => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Latin1  => "latin-1",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8"                       => Ok(TextEncoding::Utf8),
            "utf-8-sig" | "utf8-sig"               => Ok(TextEncoding::Utf8Sig),
            "latin-1" | "latin1" | "iso-8859-1"    => Ok(TextEncoding::Latin1),
            other => Err(DatasetError::Configuration(format!(
                "unsupported encoding '{other}', expected utf-8, utf-8-sig or latin-1"
            ))),
        }
    }
}

/// Read and parse `path`. Returns `Ok(None)` when the file does
/// not exist.
pub fn read_document(path: &Path, encoding: TextEncoding) -> Result<Option<Value>, DatasetError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("'{}' not found, contributing no records", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let text = encoding
        .decode(bytes)
        .map_err(|e| DatasetError::malformed(path, format!("not valid {encoding}: {e}")))?;

    let value = serde_json::from_str(&text)
        .map_err(|e| DatasetError::malformed(path, format!("invalid JSON: {e}")))?;

    tracing::debug!("Read '{}' ({} bytes, {})", path.display(), text.len(), encoding);
    Ok(Some(value))
}
