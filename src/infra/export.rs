// ============================================================
// Layer 6 — Split Exporter
// ============================================================
// Writes the normalised collections to disk for the external
// training / prediction component.
//
// File layout:
//   output/
//     train.jsonl          ← one Example per line
//     validation.jsonl
//     test.jsonl
//     prepare_config.json  ← configuration that produced them
//
// Each line is a serde_json Example:
//   {"question":"...","text":"...","label":"true"}
// with label one of "true", "false" or "unknown".
//
// Reference: Rust Book §12 (I/O and File Handling)
//            serde_json crate documentation

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::collection::{DatasetCollection, Split};
use crate::domain::example::Example;

/// Writes splits and the run configuration into one directory.
pub struct SplitExporter {
    dir: PathBuf,
}

impl SplitExporter {
    /// Create the exporter, creating `dir` (and parents) if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the JSON Lines file for `split`
    pub fn split_path(&self, split: Split) -> PathBuf {
        self.dir.join(format!("{}.jsonl", split.as_str()))
    }

    /// Write one split, replacing any previous export of it.
    pub fn write_split(&self, split: Split, examples: &[Example]) -> Result<PathBuf> {
        let path = self.split_path(split);
        let file = File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        let mut out = BufWriter::new(file);

        for example in examples {
            serde_json::to_writer(&mut out, example)?;
            out.write_all(b"\n")?;
        }
        out.flush()
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Exported {} {} record(s) to '{}'", examples.len(), split, path.display());
        Ok(path)
    }

    /// Write all three splits.
    pub fn write_all(&self, collection: &DatasetCollection) -> Result<Vec<PathBuf>> {
        Split::ALL
            .iter()
            .map(|&split| self.write_split(split, collection.get(split)))
            .collect()
    }

    /// Read an exported split back.
    pub fn read_split(&self, split: Split) -> Result<Vec<Example>> {
        let path = self.split_path(split);
        let file = File::open(&path)
            .with_context(|| format!("Cannot open '{}'", path.display()))?;

        let mut examples = Vec::new();
        for (n, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let example = serde_json::from_str(&line)
                .with_context(|| format!("Bad record on line {} of '{}'", n + 1, path.display()))?;
            examples.push(example);
        }
        Ok(examples)
    }

    /// Save the configuration of this run as pretty JSON.
    pub fn save_config<C: Serialize>(&self, cfg: &C) -> Result<PathBuf> {
        let path = self.dir.join("prepare_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved prepare config to '{}'", path.display());
        Ok(path)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Label;

    #[test]
    fn test_writes_one_line_per_example() {
        let dir      = tempfile::tempdir().unwrap();
        let exporter = SplitExporter::new(dir.path().join("out")).unwrap();
        let examples = vec![
            Example::new("Q1", "T1", Label::True),
            Example::new("Q2", "T2", Label::Unknown),
        ];

        let path = exporter.write_split(Split::Test, &examples).unwrap();
        let body = fs::read_to_string(&path).unwrap();

        assert!(path.ends_with("test.jsonl"));
        assert_eq!(body.lines().count(), 2);
        assert!(body.lines().nth(1).unwrap().contains(r#""label":"unknown""#));
        assert_eq!(exporter.read_split(Split::Test).unwrap(), examples);
    }

    #[test]
    fn test_write_all_creates_every_split() {
        let dir      = tempfile::tempdir().unwrap();
        let exporter = SplitExporter::new(dir.path()).unwrap();
        let mut c    = DatasetCollection::new();
        c.train.push(Example::new("Q", "T", Label::False));

        let paths = exporter.write_all(&c).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.exists()));
        assert!(exporter.read_split(Split::Validation).unwrap().is_empty());
    }

    #[test]
    fn test_save_config_writes_json() {
        let dir      = tempfile::tempdir().unwrap();
        let exporter = SplitExporter::new(dir.path()).unwrap();
        let path     = exporter.save_config(&serde_json::json!({"seed": 0})).unwrap();
        let back: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back["seed"], 0);
    }
}
