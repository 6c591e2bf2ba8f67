// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`   — fits the model and writes the artifact
//   2. `serve`   — loads the artifact and runs the HTTP API
//   3. `predict` — scores one customer from a JSON file
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, sync::Arc};

use crate::api::{self, config::ServeConfig, AppState};
use crate::application::{
    predict_use_case::PredictUseCase,
    train_use_case::{TrainConfig, TrainUseCase},
};
use crate::data::loader::CsvLoader;
use crate::domain::customer::CustomerRecord;
use crate::infra::{download::fetch_csv, model_store::DEFAULT_MODEL_PATHS};
use commands::{Commands, PredictArgs, ServeArgs, TrainArgs};

/// The main CLI struct. clap reads the fields and generates
/// argument parsing code via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "churn-service",
    version = "0.1.0",
    about = "Train a churn model on the Telco dataset, then serve predictions over HTTP."
)]
pub struct Cli {
    /// The subcommand to run (train, serve or predict)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args).await,
            Commands::Serve(args)   => run_serve(args).await,
            Commands::Predict(args) => run_predict(args),
        }
    }
}

/// Handles the `train` subcommand. The download is async, the fit
/// itself runs on a blocking thread.
async fn run_train(args: TrainArgs) -> Result<()> {
    let config: TrainConfig = args.into();

    let source = match &config.data_path {
        Some(path) => {
            tracing::info!("Loading dataset from {}", path);
            CsvLoader::open(path)?
        }
        None => CsvLoader::from_text(config.data_url.as_str(), fetch_csv(&config.data_url).await?),
    };

    let output = config.output.clone();
    let metrics = tokio::task::spawn_blocking(move || TrainUseCase::new(config).execute(&source))
        .await
        .context("Training task did not complete")??;

    println!("Training complete. Model saved to {output}");
    println!(
        "Hold-out accuracy: {:.4}  precision: {:.4}  recall: {:.4}",
        metrics.accuracy, metrics.precision, metrics.recall
    );
    Ok(())
}

/// Handles the `serve` subcommand. A missing artifact fails here,
/// before anything is bound.
async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => api::config::load_config(path)?,
        None => ServeConfig::default(),
    };
    if let Some(addr) = args.listen_addr {
        config.listen_addr = addr;
    }
    let mut candidates = args.model_paths;
    candidates.extend(config.model_paths);

    let predictor = PredictUseCase::locate_and_load(&candidates)?;
    let state = Arc::new(AppState::with_predictor(predictor));
    api::serve(&config.listen_addr, state).await
}

/// Handles the `predict` subcommand. Prints the same JSON body
/// POST /predict would return.
fn run_predict(args: PredictArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot read input file '{}'", args.input.display()))?;
    let record: CustomerRecord = serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not a valid customer record", args.input.display()))?;

    let mut candidates = args.model_paths;
    candidates.extend(DEFAULT_MODEL_PATHS.iter().map(PathBuf::from));

    let prediction = PredictUseCase::locate_and_load(&candidates)?.predict(&record)?;
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}
