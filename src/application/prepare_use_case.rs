// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Orchestrates a full dataset preparation run in order:
//
//   Step 1: Load the training file            (mode train)
//   Step 2: Try an augmented training file    (mode train)
//   Step 3: Load an optional SQuAD file       (mode squad)
//   Step 4: Try the dev file                  (mode val)
//   Step 5: Carve validation out of train if no dev set
//   Step 6: Load the test file                (mode test)
//   Step 7: Log per-split label distribution
//   Step 8: Export splits + config            (Layer 6 - infra)
//
// Missing optional files simply contribute nothing; only a
// bad configuration or an unreadable file stops the run.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::normalizer::{DatasetNormalizer, LoadReport, NormalizerConfig};
use crate::data::reader::TextEncoding;
use crate::domain::collection::{DatasetCollection, Split, SplitSummary};
use crate::domain::format::LoadMode;
use crate::infra::export::SplitExporter;

// ─── Preparation Configuration ───────────────────────────────────────────────
// Everything a run needs. Serialisable so the exact settings
// can be stored next to the exported splits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub dataset_dir:    PathBuf,
    pub train_file:     String,
    pub augmented_file: Option<String>,
    pub squad_file:     Option<String>,
    pub dev_file:       String,
    pub test_file:      String,
    pub encoding:       String,
    /// Fraction of train moved to validation when no dev file exists
    pub dev_size:       f64,
    pub output_dir:     Option<PathBuf>,
    pub normalizer:     NormalizerConfig,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            dataset_dir:    PathBuf::from("data"),
            train_file:     "train.json".to_string(),
            augmented_file: None,
            squad_file:     None,
            dev_file:       "dev.json".to_string(),
            test_file:      "test.json".to_string(),
            encoding:       "utf-8".to_string(),
            dev_size:       0.2,
            output_dir:     None,
            normalizer:     NormalizerConfig::default(),
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct PrepareOutcome {
    pub collection: DatasetCollection,
    pub reports:    Vec<LoadReport>,
    /// Records moved from train into validation
    pub carved:     usize,
    pub skipped:    usize,
    /// Files written, empty when no output directory was set
    pub exported:   Vec<PathBuf>,
}

impl PrepareOutcome {
    pub fn summary(&self, split: Split) -> SplitSummary {
        self.collection.summary(split)
    }
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Execute the preparation pipeline end to end
    pub fn execute(&self) -> Result<PrepareOutcome> {
        let cfg      = &self.config;
        let encoding = cfg.encoding.parse::<TextEncoding>()?;
        let dir      = &cfg.dataset_dir;

        let mut normalizer = DatasetNormalizer::new(cfg.normalizer);
        let mut reports    = Vec::new();

        // ── Steps 1-4: Load every source that exists ─────────────────────────
        let mut plan: Vec<(LoadMode, &str)> = vec![(LoadMode::Train, cfg.train_file.as_str())];
        if let Some(augmented) = &cfg.augmented_file {
            plan.push((LoadMode::Train, augmented.as_str()));
        }
        if let Some(squad) = &cfg.squad_file {
            plan.push((LoadMode::Squad, squad.as_str()));
        }
        plan.push((LoadMode::Val, cfg.dev_file.as_str()));

        for (mode, file) in plan {
            let report = normalizer
                .load_mode(dir, mode, file, encoding)
                .with_context(|| format!("Failed to load '{file}' as {mode}"))?;
            reports.push(report);
        }

        // ── Step 5: Validation carve-out ──────────────────────────────────────
        let carved = normalizer.carve_validation(cfg.dev_size)?;

        // ── Step 6: Test file ─────────────────────────────────────────────────
        let report = normalizer
            .load_mode(dir, LoadMode::Test, &cfg.test_file, encoding)
            .with_context(|| format!("Failed to load '{}' as test", cfg.test_file))?;
        reports.push(report);

        let skipped    = normalizer.skipped_records();
        let collection = normalizer.into_collection();

        // ── Step 7: Summaries ─────────────────────────────────────────────────
        for split in Split::ALL {
            let s = collection.summary(split);
            tracing::info!(
                "{:<10} {:>7} records ({} true / {} false / {} unknown)",
                split.as_str(),
                s.total,
                s.positive,
                s.negative,
                s.unknown
            );
        }
        if skipped > 0 {
            tracing::warn!("{} record(s) were skipped during extraction", skipped);
        }

        // ── Step 8: Export ────────────────────────────────────────────────────
        let mut exported = Vec::new();
        if let Some(out_dir) = &cfg.output_dir {
            let exporter = SplitExporter::new(out_dir)?;
            exported = exporter.write_all(&collection)?;
            exported.push(exporter.save_config(cfg)?);
            tracing::info!("Exported splits to '{}'", exporter.dir().display());
        }

        Ok(PrepareOutcome {
            collection,
            reports,
            carved,
            skipped,
            exported,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Label;
    use std::fs;

    fn flat(n: usize, prefix: &str) -> String {
        let items: Vec<String> = (0..n)
            .map(|i| format!(r#"{{"question":"{prefix}{i}","text":"T{i}","label":{}}}"#, i % 3 == 0))
            .collect();
        format!("[{}]", items.join(","))
    }

    fn config_for(dir: &std::path::Path) -> PrepareConfig {
        PrepareConfig {
            dataset_dir: dir.to_path_buf(),
            ..PrepareConfig::default()
        }
    }

    #[test]
    fn test_carves_validation_without_dev_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("train.json"), flat(10, "Q")).unwrap();
        fs::write(
            dir.path().join("test.json"),
            r#"[{"question":"TQ","paragraphs":[{"text":"P1"},{"text":"P2"}]}]"#,
        ).unwrap();

        let outcome = PrepareUseCase::new(config_for(dir.path())).execute().unwrap();

        assert_eq!(outcome.carved, 2);
        assert_eq!(outcome.summary(Split::Train).total, 8);
        assert_eq!(outcome.summary(Split::Validation).total, 2);
        assert_eq!(outcome.summary(Split::Test).unknown, 2);
        assert!(outcome.exported.is_empty());
        // train, val (missing) and test
        assert_eq!(outcome.reports.len(), 3);
        assert!(!outcome.reports[1].found);
    }

    #[test]
    fn test_dev_file_suppresses_carve_out() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("train.json"), flat(10, "Q")).unwrap();
        fs::write(dir.path().join("dev.json"), flat(4, "D")).unwrap();

        let outcome = PrepareUseCase::new(config_for(dir.path())).execute().unwrap();

        assert_eq!(outcome.carved, 0);
        assert_eq!(outcome.summary(Split::Train).total, 10);
        assert!(outcome
            .collection
            .validation
            .iter()
            .all(|e| e.question.starts_with('D')));
    }

    #[test]
    fn test_augmented_and_squad_sources_feed_train() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("train.json"), flat(3, "Q")).unwrap();
        fs::write(dir.path().join("aug.json"), flat(2, "A")).unwrap();
        fs::write(
            dir.path().join("squad.json"),
            r#"{"data":[{"paragraphs":[{"context":"C","qas":[
                {"question":"S1","is_impossible":false,"answers":[{"text":"X"}]},
                {"question":"S2","is_impossible":false,"answers":[]}
            ]}]}]}"#,
        ).unwrap();

        let cfg = PrepareConfig {
            augmented_file: Some("aug.json".into()),
            squad_file:     Some("squad.json".into()),
            dev_size:       0.0,
            ..config_for(dir.path())
        };
        let outcome = PrepareUseCase::new(cfg).execute().unwrap();

        assert_eq!(outcome.summary(Split::Train).total, 6);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.collection.validation.is_empty());
    }

    #[test]
    fn test_exports_splits_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        fs::write(dir.path().join("train.json"), flat(5, "Q")).unwrap();

        let cfg = PrepareConfig {
            output_dir: Some(out.clone()),
            ..config_for(dir.path())
        };
        let outcome = PrepareUseCase::new(cfg).execute().unwrap();

        assert_eq!(outcome.exported.len(), 4);
        assert!(out.join("train.jsonl").exists());
        assert!(out.join("prepare_config.json").exists());

        let exported = SplitExporter::new(&out).unwrap().read_split(Split::Train).unwrap();
        assert_eq!(exported, outcome.collection.train);
        assert!(exported.iter().all(|e| e.label != Label::Unknown));
    }

    #[test]
    fn test_malformed_train_file_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("train.json"), "not json").unwrap();
        assert!(PrepareUseCase::new(config_for(dir.path())).execute().is_err());
    }

    #[test]
    fn test_unknown_encoding_fails_before_io() {
        let cfg = PrepareConfig {
            encoding: "ebcdic".into(),
            ..PrepareConfig::default()
        };
        assert!(PrepareUseCase::new(cfg).execute().is_err());
    }
}
