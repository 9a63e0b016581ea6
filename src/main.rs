//! # demand-forecast
//!
//! Command-line entry point: prints the prediction contract for one
//! (industry, experience) pair as JSON on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use demand_forecast::loader::{ModelLoader, DEFAULT_MODELS_DIR};
use demand_forecast::report::ErrorReport;
use demand_forecast::{ModelKey, Pipeline, PipelineConfig, PredictionOutcome, Result};

#[derive(Parser)]
#[command(name = "demand-forecast")]
#[command(about = "Job-demand predictions from fitted forecasting models", long_about = None)]
struct Cli {
    /// Directory holding model artifacts
    #[arg(long, global = true, default_value = DEFAULT_MODELS_DIR)]
    models_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict demand for an industry and experience level
    Predict {
        /// Industry name, e.g. Technology
        industry: String,

        /// Experience level, e.g. Entry-level
        experience: String,

        /// Treat the names as front-end request keys (technology, entry, ...)
        #[arg(long)]
        request_keys: bool,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of periods to predict
        #[arg(short, long)]
        periods: Option<usize>,

        /// Growth window length
        #[arg(short, long)]
        window: Option<usize>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// List the (industry, experience) pairs with a model artifact
    List,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demand_forecast=warn".into()),
        )
        .init();
}

fn load_config(
    path: Option<PathBuf>,
    periods: Option<usize>,
    window: Option<usize>,
) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(periods) = periods {
        config = config.with_periods(periods);
    }
    if let Some(window) = window {
        config = config.with_window(window);
    }
    Ok(config)
}

/// Print `value` as JSON on stdout; false if it could not be serialized.
fn emit<T: Serialize>(value: &T, compact: bool) -> bool {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match rendered {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(e) => {
            let error = format!("failed to serialize output: {e}");
            println!("{}", serde_json::json!({ "error": error }));
            false
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let loader = ModelLoader::new(cli.models_dir);

    let ok = match cli.command {
        Commands::Predict {
            industry,
            experience,
            request_keys,
            config,
            periods,
            window,
            compact,
        } => {
            let key = if request_keys {
                ModelKey::from_request(&industry, &experience)
            } else {
                ModelKey::new(industry, experience)
            };

            let outcome = match load_config(config, periods, window).and_then(Pipeline::new) {
                Ok(pipeline) => pipeline.respond(&loader, &key),
                Err(err) => PredictionOutcome::Failure(ErrorReport::from(&err)),
            };
            emit(&outcome, compact) && outcome.is_success()
        }
        Commands::List => match loader.available() {
            Ok(keys) => emit(&keys, false),
            Err(err) => {
                emit(&ErrorReport::from(&err), false);
                false
            }
        },
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
