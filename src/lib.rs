//! Normalises challenge-format and SQuAD-style question answering
//! datasets into uniform `(question, text, label)` examples, split
//! into reproducibly shuffled train / validation / test collections.
//!
//! ```no_run
//! use qa_dataset_prep::data::normalizer::DatasetNormalizer;
//!
//! let mut normalizer = DatasetNormalizer::default();
//! normalizer.load("dataset", "train", None, "utf-8")?;
//! normalizer.load("dataset", "test", Some("test.json"), "utf-8")?;
//! println!("{} training examples", normalizer.train().len());
//! # Ok::<(), qa_dataset_prep::domain::error::DatasetError>(())
//! ```

pub mod application;
pub mod data;
pub mod domain;
pub mod infra;
