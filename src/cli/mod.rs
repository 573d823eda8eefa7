// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the command line with `clap` and routes to Layer 2
// (application) or to the HTTP service. Nothing here computes.
//
//   1. `train` — fit and save the model, print the report
//   2. `serve` — load the model, then serve HTTP forever
//   3. `ask`   — load the model and answer one question

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{AskArgs, Commands, ServeArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "health-chatbot",
    version,
    about = "Train a TF-IDF + logistic-regression health Q&A model, then serve its answers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => run_train(args),
            Commands::Serve(args) => run_serve(args),
            Commands::Ask(args)   => run_ask(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let outcome = TrainUseCase::new(args.into()).execute()?;

    match &outcome.report {
        Some(report) => println!("{report}"),
        None         => println!("No test records; classification report skipped."),
    }
    println!(
        "Model trained on {} records ({} features) and saved.",
        outcome.train_size, outcome.num_features
    );
    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    use crate::infra::artifact::ArtifactStore;
    use crate::ml::inferencer::Inferencer;

    // Load before binding: a process that listens always has a model.
    let inferencer = Inferencer::from_store(&ArtifactStore::new(&args.artifact))?;
    tracing::info!(
        "Model ready: {} answers, {} features",
        inferencer.classes().len(),
        inferencer.classifier().num_features()
    );

    let runtime = tokio::runtime::Runtime::new().context("Cannot start tokio runtime")?;
    runtime.block_on(crate::api::serve(inferencer, args.addr))
}

fn run_ask(args: AskArgs) -> Result<()> {
    use crate::application::ask_use_case::AskUseCase;
    use crate::domain::traits::QuestionAnswerer;

    let use_case = AskUseCase::new(&args.artifact)?;
    let answer   = use_case.answer(&args.message)?;
    println!("\nAnswer: {}", answer);
    Ok(())
}
