// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// The four subcommands map 1:1 onto the user-facing operations
// the original windowed UI exposed: predict, add (which always
// retrains), categories, and an explicit train.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a proverb and retrieve its closest recorded meaning
    Predict(PredictArgs),

    /// Add a labelled proverb to the dataset and retrain
    Add(AddArgs),

    /// List the current category set
    Categories(CategoriesArgs),

    /// Retrain the classifier on the current dataset
    Train(TrainArgs),
}

/// Paths shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the proverb dataset JSON file
    #[arg(long, default_value = "data/atasozleri.json")]
    pub dataset_path: String,

    /// Directory holding the checkpoint, tokenizer and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}

impl CommonArgs {
    /// Default hyperparameters with this invocation's paths.
    pub fn into_config(self) -> TrainConfig {
        TrainConfig {
            dataset_path:   self.dataset_path,
            checkpoint_dir: self.checkpoint_dir,
            ..TrainConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The proverb text to classify
    #[arg(long)]
    pub text: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// The proverb text
    #[arg(long)]
    pub text: String,

    /// Its semantic category
    #[arg(long)]
    pub category: String,

    /// Its meaning, free text
    #[arg(long)]
    pub meaning: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Maximum number of tokens per input sequence
    #[arg(long, default_value_t = 128)]
    pub max_seq_len: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 8)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 5)]
    pub epochs: usize,

    /// Learning rate for the AdamW optimiser
    #[arg(long, default_value_t = 2e-5)]
    pub lr: f64,

    /// Fraction of the data kept for training; the rest is the
    /// held-out test partition
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Seed for the shuffle and split, fixed for reproducibility
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Hidden dimension of the transformer
    #[arg(long, default_value_t = 256)]
    pub d_model: usize,

    /// Number of attention heads; d_model must be divisible by this
    #[arg(long, default_value_t = 8)]
    pub num_heads: usize,

    /// Number of stacked encoder layers
    #[arg(long, default_value_t = 4)]
    pub num_layers: usize,

    /// Inner dimension of the feed-forward network
    #[arg(long, default_value_t = 1024)]
    pub d_ff: usize,

    /// Dropout probability during training
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Maximum vocabulary size for a freshly built tokenizer
    #[arg(long, default_value_t = 32000)]
    pub vocab_size: usize,
}

/// CLI TrainArgs → application-layer TrainConfig. This is the
/// boundary between Layer 1 and Layer 2; the application layer
/// never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset_path:   a.common.dataset_path,
            checkpoint_dir: a.common.checkpoint_dir,
            max_seq_len:    a.max_seq_len,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            train_fraction: a.train_fraction,
            seed:           a.seed,
            d_model:        a.d_model,
            num_heads:      a.num_heads,
            num_layers:     a.num_layers,
            d_ff:           a.d_ff,
            dropout:        a.dropout,
            vocab_size:     a.vocab_size,
        }
    }
}
