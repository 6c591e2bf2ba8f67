// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `serve` and `predict`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::train_use_case::TrainConfig;
use crate::infra::download::DEFAULT_DATASET_URL;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the churn model on the Telco dataset and save the artifact
    Train(TrainArgs),

    /// Load the artifact and serve predictions over HTTP
    Serve(ServeArgs),

    /// Score one customer from a JSON file and print the result
    Predict(PredictArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Local Telco CSV; skips the download
    #[arg(long, conflicts_with = "data_url")]
    pub data_path: Option<String>,

    /// Where to download the Telco CSV from
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    pub data_url: String,

    /// Path of the model artifact to write
    #[arg(long, default_value = "api/churn_model.json")]
    pub output: String,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Upper bound on optimiser steps
    #[arg(long, default_value_t = 1000)]
    pub max_iter: usize,

    #[arg(long, default_value_t = 0.05)]
    pub learning_rate: f64,

    /// Inverse regularisation strength; smaller means a stronger L2 penalty
    #[arg(long = "c", default_value_t = 1.0)]
    pub c: f64,

    /// Convergence tolerance on the change in loss
    #[arg(long, default_value_t = 1e-6)]
    pub tol: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:     a.data_path,
            data_url:      a.data_url,
            output:        a.output,
            test_size:     a.test_size,
            seed:          a.seed,
            max_iter:      a.max_iter,
            learning_rate: a.learning_rate,
            c:             a.c,
            tol:           a.tol,
        }
    }
}

/// All arguments for the `serve` command. Flags override the YAML file.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// YAML file with listen_addr / model_paths
    #[arg(long, env = "CHURN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Socket address to bind, e.g. 0.0.0.0:8000
    #[arg(long)]
    pub listen_addr: Option<String>,

    /// Artifact path to try before the configured candidates (repeatable)
    #[arg(long = "model-path")]
    pub model_paths: Vec<PathBuf>,
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// JSON file holding one customer, same shape as the POST /predict body
    #[arg(long)]
    pub input: PathBuf,

    /// Artifact path to try before the default candidates (repeatable)
    #[arg(long = "model-path")]
    pub model_paths: Vec<PathBuf>,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["churn-service", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        assert_eq!(TrainConfig::from(args), TrainConfig::default());
    }

    #[test]
    fn test_train_flags() {
        let cli = Cli::try_parse_from([
            "churn-service", "train",
            "--data-path", "telco.csv",
            "--seed", "7",
            "--c", "0.5",
            "--test-size", "0.25",
        ])
        .unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg = TrainConfig::from(args);
        assert_eq!(cfg.data_path.as_deref(), Some("telco.csv"));
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.c, 0.5);
        assert_eq!(cfg.test_size, 0.25);
    }

    #[test]
    fn test_data_path_conflicts_with_url() {
        let parsed = Cli::try_parse_from([
            "churn-service", "train",
            "--data-path", "telco.csv",
            "--data-url", "http://example.com/telco.csv",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serve_repeated_model_paths() {
        let cli = Cli::try_parse_from([
            "churn-service", "serve",
            "--listen-addr", "127.0.0.1:9000",
            "--model-path", "a.json",
            "--model-path", "b.json",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else { panic!("expected serve") };
        assert_eq!(args.listen_addr.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(args.model_paths, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn test_predict_requires_input() {
        assert!(Cli::try_parse_from(["churn-service", "predict"]).is_err());
    }
}
