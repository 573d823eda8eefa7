// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands: `train`, `serve` and `ask`, plus their flags.
// Defaults match the fixed relative paths the service has always
// used: `chatbot_data/medquad.csv` in, `health_chatbot_model.bin`
// out.

use clap::{Args, Subcommand};
use std::net::SocketAddr;

use crate::application::train_use_case::TrainConfig;
use crate::ml::trainer::ClassifierConfig;

const DEFAULT_ARTIFACT: &str = "health_chatbot_model.bin";

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the vectorizer and classifier on a question/answer CSV
    Train(TrainArgs),

    /// Serve predictions over HTTP
    Serve(ServeArgs),

    /// Answer a single question from the command line
    Ask(AskArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with `question` and `answer` columns
    #[arg(long, default_value = "chatbot_data/medquad.csv")]
    pub dataset: String,

    /// Where to write the trained model (overwritten)
    #[arg(long, default_value = DEFAULT_ARTIFACT)]
    pub artifact: String,

    /// Keep only the first N cleaned records; 0 keeps all of them
    #[arg(long, default_value_t = 500)]
    pub max_records: usize,

    /// Vocabulary size cap; 0 keeps every term
    #[arg(long, default_value_t = 5000)]
    pub max_features: usize,

    /// Fraction of records held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Upper bound on optimizer iterations
    #[arg(long, default_value_t = 500)]
    pub max_iter: usize,

    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Inverse L2 regularisation strength
    #[arg(long, default_value_t = 1.0)]
    pub c: f64,

    /// Stop once the loss improves by less than this
    #[arg(long, default_value_t = 1e-4)]
    pub tol: f64,
}

/// `0` on the command line means "no cap".
fn cap(n: usize) -> Option<usize> {
    (n > 0).then_some(n)
}

/// Boundary between Layer 1 and Layer 2: the application layer
/// never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset_path:  a.dataset,
            artifact_path: a.artifact,
            max_records:   cap(a.max_records),
            max_features:  cap(a.max_features),
            test_fraction: a.test_fraction,
            seed:          a.seed,
            classifier:    ClassifierConfig {
                max_iter:      a.max_iter,
                learning_rate: a.learning_rate,
                c:             a.c,
                tol:           a.tol,
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Trained model produced by `train`
    #[arg(long, default_value = DEFAULT_ARTIFACT)]
    pub artifact: String,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub addr: SocketAddr,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(long)]
    pub message: String,

    #[arg(long, default_value = DEFAULT_ARTIFACT)]
    pub artifact: String,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn train_config(args: &[&str]) -> TrainConfig {
        let cli = Cli::try_parse_from(["health-chatbot", "train"].iter().chain(args.iter()).copied()).unwrap();
        match cli.command {
            Commands::Train(a) => a.into(),
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn test_train_defaults_match_train_config_defaults() {
        let parsed   = train_config(&[]);
        let defaults = TrainConfig::default();
        assert_eq!(parsed.dataset_path, defaults.dataset_path);
        assert_eq!(parsed.artifact_path, defaults.artifact_path);
        assert_eq!(parsed.max_records, defaults.max_records);
        assert_eq!(parsed.max_features, defaults.max_features);
        assert_eq!(parsed.test_fraction, defaults.test_fraction);
        assert_eq!(parsed.seed, defaults.seed);
        assert_eq!(parsed.classifier.max_iter, defaults.classifier.max_iter);
        assert_eq!(parsed.classifier.learning_rate, defaults.classifier.learning_rate);
    }

    #[test]
    fn test_zero_disables_caps() {
        let cfg = train_config(&["--max-records", "0", "--max-features", "0"]);
        assert_eq!(cfg.max_records, None);
        assert_eq!(cfg.max_features, None);
    }

    #[test]
    fn test_serve_parses_address() {
        let cli = Cli::try_parse_from(["health-chatbot", "serve", "--addr", "0.0.0.0:8080"]).unwrap();
        match cli.command {
            Commands::Serve(a) => {
                assert_eq!(a.addr.port(), 8080);
                assert_eq!(a.artifact, DEFAULT_ARTIFACT);
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn test_ask_requires_message() {
        assert!(Cli::try_parse_from(["health-chatbot", "ask"]).is_err());
    }
}
