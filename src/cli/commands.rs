// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `prepare` and `inspect`
// and all their configurable flags.
//
// clap's derive macros generate help text, error messages for
// missing args and type conversion (string → f64, u64, ...).
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use qa_dataset_prep::application::inspect_use_case::InspectRequest;
use qa_dataset_prep::application::prepare_use_case::PrepareConfig;
use qa_dataset_prep::data::normalizer::{NormalizerConfig, DEFAULT_SEED};
use qa_dataset_prep::domain::format::SquadPolicy;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalise a dataset directory into train/validation/test splits
    Prepare(PrepareArgs),

    /// Load one file and show what the normaliser extracts from it
    Inspect(InspectArgs),
}

/// SQuAD extraction strategy as spelled on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SquadPolicyArg {
    /// Use the whole paragraph context as the passage
    SpanText,
    /// Use the first answer / plausible answer text
    FirstAnswer,
}

impl From<SquadPolicyArg> for SquadPolicy {
    fn from(a: SquadPolicyArg) -> Self {
        match a {
            SquadPolicyArg::SpanText    => SquadPolicy::SpanText,
            SquadPolicyArg::FirstAnswer => SquadPolicy::FirstAnswer,
        }
    }
}

/// Flags shared by every command that builds a normaliser
#[derive(Args, Debug)]
pub struct NormalizerArgs {
    /// Seed for every shuffle; identical seeds give identical orderings
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// How SQuAD-format files are turned into examples
    #[arg(long, value_enum, default_value = "first-answer")]
    pub squad_policy: SquadPolicyArg,

    /// Read the dev file with the nested (question → paragraphs) layout
    #[arg(long)]
    pub nested_validation: bool,
}

impl From<&NormalizerArgs> for NormalizerConfig {
    fn from(a: &NormalizerArgs) -> Self {
        NormalizerConfig {
            seed:              a.seed,
            squad_policy:      a.squad_policy.into(),
            nested_validation: a.nested_validation,
        }
    }
}

/// All arguments for the `prepare` command.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Directory containing the dataset files
    #[arg(long)]
    pub dataset_dir: PathBuf,

    /// Training file (flat challenge format)
    #[arg(long, default_value = "train.json")]
    pub train_file: String,

    /// Optional extra training file with augmented data
    #[arg(long)]
    pub augmented_file: Option<String>,

    /// Optional SQuAD-format file appended to the training data
    #[arg(long)]
    pub squad_file: Option<String>,

    /// Development file; when absent, validation is carved from train
    #[arg(long, default_value = "dev.json")]
    pub dev_file: String,

    /// Test file (nested challenge format)
    #[arg(long, default_value = "test.json")]
    pub test_file: String,

    /// Encoding of every dataset file (utf-8, utf-8-sig, latin-1)
    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    /// Fraction of train used for validation when no dev file exists, in [0, 1)
    #[arg(long, default_value_t = 0.2)]
    pub dev_size: f64,

    /// Where to write train/validation/test .jsonl files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub normalizer: NormalizerArgs,
}

/// Convert CLI PrepareArgs into the application-layer PrepareConfig.
/// The application layer never sees clap types.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            normalizer:     NormalizerConfig::from(&a.normalizer),
            dataset_dir:    a.dataset_dir,
            train_file:     a.train_file,
            augmented_file: a.augmented_file,
            squad_file:     a.squad_file,
            dev_file:       a.dev_file,
            test_file:      a.test_file,
            encoding:       a.encoding,
            dev_size:       a.dev_size,
            output_dir:     a.output_dir,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory containing the file
    #[arg(long)]
    pub dataset_dir: PathBuf,

    /// File name inside the dataset directory
    #[arg(long, default_value = "train.json")]
    pub file: String,

    /// Load mode: train, val, test or squad
    #[arg(long, default_value = "train")]
    pub mode: String,

    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    /// Number of examples to print
    #[arg(long, default_value_t = 5)]
    pub show: usize,

    #[command(flatten)]
    pub normalizer: NormalizerArgs,
}

impl From<InspectArgs> for InspectRequest {
    fn from(a: InspectArgs) -> Self {
        InspectRequest {
            normalizer:  NormalizerConfig::from(&a.normalizer),
            dataset_dir: a.dataset_dir,
            file:        a.file,
            mode:        a.mode,
            encoding:    a.encoding,
            preview:     a.show,
        }
    }
}
