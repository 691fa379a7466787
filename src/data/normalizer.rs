// ============================================================
// Layer 4 — Dataset Normaliser
// ============================================================
// Owns the train / validation / test collections and fills
// them from dataset files:
//
//   load(dir, mode, file, encoding)
//       │
//       ├── parse mode + encoding      → Configuration error
//       ├── read dir/file              → missing: no-op
//       ├── extract with SourceFormat  → bad shape: MalformedInput
//       ├── append to destination split
//       └── reshuffle train/validation with the seeded RNG
//
// One StdRng is seeded at construction and reused for every
// shuffle, so the permutation after N loads is reproducible
// across runs but depends on everything loaded so far.
//
// Reference: Rust Book §5 (Method Syntax)
//            rand crate documentation (SeedableRng)

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::data::reader::{read_document, TextEncoding};
use crate::data::splitter::split_train_val;
use crate::domain::collection::{DatasetCollection, Split};
use crate::domain::error::DatasetError;
use crate::domain::example::Example;
use crate::domain::format::{LoadMode, SourceFormat, SquadPolicy};
use crate::domain::traits::RecordExtractor;

/// File name used when a load call does not name one.
pub const DEFAULT_FILE_NAME: &str = "train.json";

/// Seed used unless the caller overrides it.
pub const DEFAULT_SEED: u64 = 0;

// ─── Normaliser Configuration ────────────────────────────────────────────────
// Fixed for the lifetime of a normaliser. The SQuAD policy is a
// deployment choice, never switched between load calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    pub seed:              u64,
    pub squad_policy:      SquadPolicy,
    /// Read `val` files with the nested (per-paragraph) layout
    pub nested_validation: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            seed:              DEFAULT_SEED,
            squad_policy:      SquadPolicy::default(),
            nested_validation: false,
        }
    }
}

impl NormalizerConfig {
    /// The extraction strategy used for `mode`
    pub fn format_for(&self, mode: LoadMode) -> SourceFormat {
        match mode {
            LoadMode::Train => SourceFormat::ChallengeFlat,
            LoadMode::Val if self.nested_validation => SourceFormat::ChallengeNested,
            LoadMode::Val   => SourceFormat::ChallengeFlat,
            LoadMode::Test  => SourceFormat::ChallengeNested,
            LoadMode::Squad => self.squad_policy.source_format(),
        }
    }
}

/// What one `load` call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub path:        PathBuf,
    pub mode:        LoadMode,
    pub format:      SourceFormat,
    pub destination: Split,
    /// False when the file did not exist
    pub found:       bool,
    pub loaded:      usize,
    pub skipped:     usize,
}

// ─── DatasetNormalizer ────────────────────────────────────────────────────────
pub struct DatasetNormalizer {
    config:     NormalizerConfig,
    collection: DatasetCollection,
    rng:        StdRng,
    /// Records dropped across every load so far
    skipped:    usize,
}

impl DatasetNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            rng:        StdRng::seed_from_u64(config.seed),
            config,
            collection: DatasetCollection::new(),
            skipped:    0,
        }
    }

    /// Default configuration with a custom seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(NormalizerConfig {
            seed,
            ..NormalizerConfig::default()
        })
    }

    /// Load `directory/file_name` (default `train.json`) in `mode`.
    ///
    /// `mode` and `encoding` are validated before any file access.
    /// A missing file returns a report with `found == false` and
    /// leaves every collection unchanged.
    pub fn load(
        &mut self,
        directory: impl AsRef<Path>,
        mode:      &str,
        file_name: Option<&str>,
        encoding:  &str,
    ) -> Result<LoadReport, DatasetError> {
        let mode     = mode.parse::<LoadMode>()?;
        let encoding = encoding.parse::<TextEncoding>()?;
        self.load_mode(directory, mode, file_name.unwrap_or(DEFAULT_FILE_NAME), encoding)
    }

    /// Typed variant of [`load`](Self::load).
    pub fn load_mode(
        &mut self,
        directory: impl AsRef<Path>,
        mode:      LoadMode,
        file_name: &str,
        encoding:  TextEncoding,
    ) -> Result<LoadReport, DatasetError> {
        let path        = directory.as_ref().join(file_name);
        let format      = self.config.format_for(mode);
        let destination = mode.destination();

        let mut report = LoadReport {
            path: path.clone(),
            mode,
            format,
            destination,
            found:   false,
            loaded:  0,
            skipped: 0,
        };

        let Some(document) = read_document(&path, encoding)? else {
            return Ok(report);
        };
        report.found = true;

        // Extraction finishes before anything is appended, so a
        // malformed file leaves the collections untouched.
        let extraction = format
            .extract(document, mode)
            .map_err(|e| DatasetError::malformed(&path, e))?;

        report.loaded  = extraction.examples.len();
        report.skipped = extraction.skipped;
        self.skipped  += extraction.skipped;

        let target = self.collection.get_mut(destination);
        target.extend(extraction.examples);

        if report.loaded > 0 && destination != Split::Test {
            target.shuffle(&mut self.rng);
            tracing::debug!("Reshuffled {} ({} records)", destination, target.len());
        }

        tracing::info!(
            "Loaded {} record(s) from '{}' as {} [{}] into {}, skipped {}",
            report.loaded,
            path.display(),
            mode,
            format,
            destination,
            report.skipped
        );

        Ok(report)
    }

    /// Move a `fraction` of the training data into validation.
    ///
    /// Only applies while validation is still empty; once a dev
    /// file has been loaded this returns 0 and changes nothing.
    /// `fraction` must lie in `[0, 1)`: 0 disables the carve-out,
    /// and 1 would leave no training data.
    /// Returns the number of records moved.
    pub fn carve_validation(&mut self, fraction: f64) -> Result<usize, DatasetError> {
        if !(0.0..1.0).contains(&fraction) {
            return Err(DatasetError::Configuration(format!(
                "validation fraction must be within [0, 1), got {fraction}"
            )));
        }
        if !self.collection.validation.is_empty() {
            tracing::info!("Validation set already loaded, not carving from train");
            return Ok(0);
        }
        if fraction == 0.0 || self.collection.train.is_empty() {
            return Ok(0);
        }

        let train = std::mem::take(&mut self.collection.train);
        let (train, validation) = split_train_val(train, 1.0 - fraction, &mut self.rng);
        let moved = validation.len();

        self.collection.train      = train;
        self.collection.validation = validation;

        tracing::info!(
            "Carved {} validation record(s) from train ({} remain)",
            moved,
            self.collection.train.len()
        );
        Ok(moved)
    }

    pub fn train(&self) -> &[Example] {
        &self.collection.train
    }

    pub fn validation(&self) -> &[Example] {
        &self.collection.validation
    }

    pub fn test(&self) -> &[Example] {
        &self.collection.test
    }

    pub fn collection(&self) -> &DatasetCollection {
        &self.collection
    }

    pub fn into_collection(self) -> DatasetCollection {
        self.collection
    }

    /// Records dropped by best-effort extraction, across all loads
    pub fn skipped_records(&self) -> usize {
        self.skipped
    }
}

impl Default for DatasetNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Label;
    use std::fs;
    use tempfile::TempDir;

    fn dataset(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            fs::write(dir.path().join(name), body).unwrap();
        }
        dir
    }

    fn many_flat(n: usize) -> String {
        let items: Vec<String> = (0..n)
            .map(|i| format!(r#"{{"question":"Q{i}","text":"T{i}","label":{}}}"#, i % 2 == 0))
            .collect();
        format!("[{}]", items.join(","))
    }

    /// Flat records whose questions are exactly `ids`, in order
    fn flat_ids(ids: &[&str]) -> String {
        let items: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"question":"{id}","text":"T-{id}"}}"#))
            .collect();
        format!("[{}]", items.join(","))
    }

    fn questions(examples: &[Example]) -> Vec<&str> {
        examples.iter().map(|e| e.question.as_str()).collect()
    }

    fn sorted(examples: &[Example]) -> Vec<Example> {
        let mut v = examples.to_vec();
        v.sort_by(|a, b| a.question.cmp(&b.question));
        v
    }

    #[test]
    fn test_flat_train_file() {
        let dir = dataset(&[(
            "train.json",
            r#"[{"question":"Q1","text":"T1"},{"question":"Q2","text":"T2","label":true}]"#,
        )]);
        let mut n = DatasetNormalizer::default();
        let report = n.load(dir.path(), "train", None, "utf-8").unwrap();

        assert!(report.found);
        assert_eq!(report.loaded, 2);
        assert_eq!(n.train().len(), 2);
        assert_eq!(sorted(n.train()), vec![
            Example::new("Q1", "T1", Label::False),
            Example::new("Q2", "T2", Label::True),
        ]);
    }

    #[test]
    fn test_nested_test_file() {
        let dir = dataset(&[(
            "test.json",
            r#"[{"question":"Q1","paragraphs":[{"text":"P1"},{"text":"P2","label":false}]}]"#,
        )]);
        let mut n = DatasetNormalizer::default();
        n.load(dir.path(), "test", Some("test.json"), "utf-8").unwrap();

        // test is never shuffled, so source order holds
        assert_eq!(n.test(), &[
            Example::new("Q1", "P1", Label::Unknown),
            Example::new("Q1", "P2", Label::False),
        ][..]);
        assert!(n.train().is_empty());
    }

    #[test]
    fn test_squad_mode_appends_to_train() {
        let dir = dataset(&[(
            "squad.json",
            r#"{"data":[{"paragraphs":[{"context":"C","qas":[
                {"question":"Q","is_impossible":true,"plausible_answers":[{"text":"A"}]}
            ]}]}]}"#,
        )]);
        let mut n = DatasetNormalizer::default();
        let report = n.load(dir.path(), "squad", Some("squad.json"), "utf-8").unwrap();

        assert_eq!(report.format, SourceFormat::SquadFirstAnswer);
        assert_eq!(report.destination, Split::Train);
        assert_eq!(n.train(), &[Example::new("Q", "A", Label::True)][..]);
    }

    #[test]
    fn test_span_text_policy_is_configurable() {
        let dir = dataset(&[(
            "squad.json",
            r#"{"data":[{"paragraphs":[{"context":"C","qas":[
                {"question":"Q","is_impossible":false,"answers":[]}
            ]}]}]}"#,
        )]);
        let mut n = DatasetNormalizer::new(NormalizerConfig {
            squad_policy: SquadPolicy::SpanText,
            ..NormalizerConfig::default()
        });
        n.load(dir.path(), "squad", Some("squad.json"), "utf-8").unwrap();
        assert_eq!(n.train(), &[Example::new("Q", "C", Label::False)][..]);

        let mut strict = DatasetNormalizer::default();
        let report = strict.load(dir.path(), "squad", Some("squad.json"), "utf-8").unwrap();
        assert_eq!(report.loaded, 0);
        assert_eq!(strict.skipped_records(), 1);
    }

    #[test]
    fn test_nested_validation_option() {
        let dir = dataset(&[(
            "dev.json",
            r#"[{"question":"Q","paragraphs":[{"text":"P1","label":true},{"text":"P2"}]}]"#,
        )]);
        let mut n = DatasetNormalizer::new(NormalizerConfig {
            nested_validation: true,
            ..NormalizerConfig::default()
        });
        let report = n.load(dir.path(), "val", Some("dev.json"), "utf-8").unwrap();
        assert_eq!(report.format, SourceFormat::ChallengeNested);
        assert_eq!(n.validation().len(), 2);
    }

    #[test]
    fn test_invalid_mode_is_configuration_error() {
        let mut n = DatasetNormalizer::default();
        let err = n.load("/definitely/not/here", "predict", None, "utf-8").unwrap_err();
        assert!(matches!(err, DatasetError::Configuration(_)));
    }

    #[test]
    fn test_missing_file_is_a_no_op() {
        let dir = dataset(&[("train.json", many_flat(5).as_str())]);
        let mut n = DatasetNormalizer::default();
        n.load(dir.path(), "train", None, "utf-8").unwrap();
        let before = n.train().to_vec();

        let report = n.load(dir.path(), "train", Some("augmented.json"), "utf-8").unwrap();
        assert!(!report.found);
        assert_eq!(report.loaded, 0);
        assert_eq!(n.train(), &before[..]);
    }

    #[test]
    fn test_malformed_file_keeps_previous_records() {
        let dir = dataset(&[
            ("train.json", many_flat(4).as_str()),
            ("broken.json", "[{\"question\": \"Q\", "),
            ("object.json", r#"{"question":"Q","text":"T"}"#),
        ]);
        let mut n = DatasetNormalizer::default();
        n.load(dir.path(), "train", None, "utf-8").unwrap();
        let before = n.train().to_vec();

        let err = n.load(dir.path(), "train", Some("broken.json"), "utf-8").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedInput { .. }));

        let err = n.load(dir.path(), "train", Some("object.json"), "utf-8").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedInput { .. }));

        assert_eq!(n.train(), &before[..]);
    }

    #[test]
    fn test_loading_twice_accumulates() {
        let dir = dataset(&[("train.json", many_flat(3).as_str())]);
        let mut n = DatasetNormalizer::default();
        n.load(dir.path(), "train", None, "utf-8").unwrap();
        n.load(dir.path(), "train", None, "utf-8").unwrap();
        assert_eq!(n.train().len(), 6);
    }

    #[test]
    fn test_same_seed_gives_same_order() {
        let dir = dataset(&[
            ("train.json", many_flat(30).as_str()),
            ("extra.json", many_flat(10).as_str()),
        ]);

        let run = || {
            let mut n = DatasetNormalizer::with_seed(DEFAULT_SEED);
            n.load(dir.path(), "train", None, "utf-8").unwrap();
            n.load(dir.path(), "train", Some("extra.json"), "utf-8").unwrap();
            n.train().to_vec()
        };

        let first  = run();
        let second = run();
        assert_eq!(first, second);
        assert_eq!(first.len(), 40);
    }

    #[test]
    fn test_train_is_permuted_not_altered() {
        let body = many_flat(50);
        let dir  = dataset(&[("train.json", &body)]);
        let mut n = DatasetNormalizer::with_seed(7);
        n.load(dir.path(), "train", None, "utf-8").unwrap();

        let mut expected: Vec<Example> = serde_json::from_str::<Vec<serde_json::Value>>(&body)
            .unwrap()
            .into_iter()
            .map(|v| Example::new(
                v["question"].as_str().unwrap(),
                v["text"].as_str().unwrap(),
                Label::from(v["label"].as_bool().unwrap()),
            ))
            .collect();
        expected.sort_by(|a, b| a.question.cmp(&b.question));
        assert_eq!(sorted(n.train()), expected);
    }

    #[test]
    fn test_instances_are_independent() {
        let dir = dataset(&[("train.json", many_flat(20).as_str())]);
        let mut a = DatasetNormalizer::default();
        let mut b = DatasetNormalizer::default();

        // Extra work on `a` must not disturb `b`'s generator
        a.load(dir.path(), "train", None, "utf-8").unwrap();
        a.load(dir.path(), "train", None, "utf-8").unwrap();
        b.load(dir.path(), "train", None, "utf-8").unwrap();

        let mut c = DatasetNormalizer::default();
        c.load(dir.path(), "train", None, "utf-8").unwrap();
        assert_eq!(b.train(), c.train());
    }

    // Pinned permutations hold for rand 0.8 (StdRng = ChaCha12).
    #[test]
    fn test_train_order_is_pinned_for_seed_zero() {
        let first  = ["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"];
        let second = ["Q7", "Q8", "Q9", "Q10"];
        let dir = dataset(&[
            ("first.json", flat_ids(&first).as_str()),
            ("second.json", flat_ids(&second).as_str()),
        ]);
        let mut n = DatasetNormalizer::with_seed(0);

        n.load(dir.path(), "train", Some("first.json"), "utf-8").unwrap();
        assert_eq!(questions(n.train()), ["Q4", "Q2", "Q3", "Q1", "Q6", "Q5"]);
        assert_ne!(questions(n.train()), first);

        // The whole sequence is reshuffled, not just the appended tail
        n.load(dir.path(), "train", Some("second.json"), "utf-8").unwrap();
        assert_eq!(
            questions(n.train()),
            ["Q5", "Q8", "Q6", "Q10", "Q1", "Q9", "Q4", "Q7", "Q2", "Q3"]
        );
        assert!(n.train().iter().all(|e| e.text == format!("T-{}", e.question)));
    }

    #[test]
    fn test_validation_order_is_pinned_for_seed_zero() {
        let first  = ["D1", "D2", "D3", "D4", "D5"];
        let second = ["D6", "D7", "D8"];
        let dir = dataset(&[
            ("dev.json", flat_ids(&first).as_str()),
            ("dev_extra.json", flat_ids(&second).as_str()),
        ]);
        let mut n = DatasetNormalizer::with_seed(0);

        n.load(dir.path(), "val", Some("dev.json"), "utf-8").unwrap();
        assert_eq!(questions(n.validation()), ["D2", "D1", "D4", "D3", "D5"]);
        assert_ne!(questions(n.validation()), first);

        n.load(dir.path(), "val", Some("dev_extra.json"), "utf-8").unwrap();
        assert_eq!(
            questions(n.validation()),
            ["D7", "D3", "D4", "D2", "D1", "D8", "D5", "D6"]
        );
        assert!(n.train().is_empty());
    }

    #[test]
    fn test_empty_load_leaves_order_and_generator_untouched() {
        let dir = dataset(&[
            ("first.json", flat_ids(&["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"]).as_str()),
            ("empty.json", "[]"),
            ("unusable.json", r#"[{"question":"X"}]"#),
            ("second.json", flat_ids(&["Q7", "Q8", "Q9", "Q10"]).as_str()),
        ]);
        let mut n = DatasetNormalizer::with_seed(0);
        n.load(dir.path(), "train", Some("first.json"), "utf-8").unwrap();
        let before = n.train().to_vec();

        for file in ["empty.json", "unusable.json"] {
            let report = n.load(dir.path(), "train", Some(file), "utf-8").unwrap();
            assert!(report.found);
            assert_eq!(report.loaded, 0);
            assert_eq!(n.train(), before.as_slice());
        }
        assert_eq!(n.skipped_records(), 1);

        // Same order as if the empty loads never happened
        n.load(dir.path(), "train", Some("second.json"), "utf-8").unwrap();
        assert_eq!(
            questions(n.train()),
            ["Q5", "Q8", "Q6", "Q10", "Q1", "Q9", "Q4", "Q7", "Q2", "Q3"]
        );
    }

    #[test]
    fn test_carve_validation_moves_fraction() {
        let dir = dataset(&[("train.json", many_flat(10).as_str())]);
        let mut n = DatasetNormalizer::default();
        n.load(dir.path(), "train", None, "utf-8").unwrap();

        let moved = n.carve_validation(0.2).unwrap();
        assert_eq!(moved, 2);
        assert_eq!(n.train().len(), 8);
        assert_eq!(n.validation().len(), 2);
    }

    #[test]
    fn test_carve_validation_respects_loaded_dev_set() {
        let dir = dataset(&[
            ("train.json", many_flat(10).as_str()),
            ("dev.json", many_flat(3).as_str()),
        ]);
        let mut n = DatasetNormalizer::default();
        n.load(dir.path(), "train", None, "utf-8").unwrap();
        n.load(dir.path(), "val", Some("dev.json"), "utf-8").unwrap();

        assert_eq!(n.carve_validation(0.5).unwrap(), 0);
        assert_eq!(n.train().len(), 10);
        assert_eq!(n.validation().len(), 3);
    }

    #[test]
    fn test_carve_validation_rejects_bad_fraction() {
        let dir = dataset(&[("train.json", many_flat(10).as_str())]);
        let mut n = DatasetNormalizer::default();
        n.load(dir.path(), "train", None, "utf-8").unwrap();
        let before = n.train().to_vec();

        for fraction in [1.0, 1.5, -0.1] {
            assert!(matches!(
                n.carve_validation(fraction),
                Err(DatasetError::Configuration(_))
            ));
        }
        // A rejected fraction moves nothing
        assert_eq!(n.train(), before.as_slice());
        assert!(n.validation().is_empty());
    }
}
