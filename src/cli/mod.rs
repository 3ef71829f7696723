// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction; stands in for the
// original windowed UI. It only routes and prints — all business
// logic lives in Layer 2.
//
// Reference: Rust Book §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AddArgs, CategoriesArgs, Commands, PredictArgs, TrainArgs};

use crate::application::app::App;
use crate::application::train_use_case::TrainUseCase;

#[derive(Parser, Debug)]
#[command(
    name = "atasozu-classifier",
    version = "0.1.0",
    about = "Classify Turkish proverbs and retrieve their recorded meanings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Predict(args)    => run_predict(args),
            Commands::Add(args)        => run_add(args),
            Commands::Categories(args) => run_categories(args),
            Commands::Train(args)      => run_train(args),
        }
    }
}

/// Handles `predict`: starts the application (training in the
/// background first if no usable checkpoint exists), waits for the
/// model, and prints category plus closest meaning.
fn run_predict(args: PredictArgs) -> Result<()> {
    let app = App::start(args.common.into_config());
    let prediction = app.predict(&args.text)?;

    println!("Category: {}", prediction.category);
    match prediction.meaning {
        Some(meaning) => println!("Meaning:  {}", meaning),
        None          => println!("Meaning:  no recorded meaning found"),
    }
    Ok(())
}

/// Handles `add`: appends the record, retrains, and confirms.
/// Opens without model bring-up — the add itself retrains.
fn run_add(args: AddArgs) -> Result<()> {
    let app = App::open(args.common.into_config());
    app.add_record(&args.text, &args.category, &args.meaning)?;

    println!("Record added and model retrained.");
    Ok(())
}

/// Handles `categories`: prints the current category set, one per line.
fn run_categories(args: CategoriesArgs) -> Result<()> {
    let app = App::open(args.common.into_config());
    for category in app.list_categories()? {
        println!("{category}");
    }
    Ok(())
}

/// Handles `train`: unconditional foreground retrain with the
/// given hyperparameters.
fn run_train(args: TrainArgs) -> Result<()> {
    tracing::info!("Starting training on '{}'", args.common.dataset_path);

    let use_case = TrainUseCase::new(args.into());
    use_case.execute()?;

    println!("Training complete. Checkpoint saved.");
    Ok(())
}
