// ABOUTME: Fitcast CLI - command-line tool for training, inspecting, and querying the fitness model
// ABOUTME: Runs the same artifact store and predictor the HTTP server uses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Train and persist a model
//! fitcast-cli train --samples 1000 --output fitness_model.json
//!
//! # Replace an existing artifact
//! fitcast-cli train --force
//!
//! # Inspect the artifact on disk
//! fitcast-cli status --model fitness_model.json
//!
//! # Predict for a request file
//! fitcast-cli predict --input request.json
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use fitcast_core::{constants::defaults, errors::AppResult};
use std::env;
use std::path::PathBuf;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "fitcast-cli",
    about = "Fitcast model management CLI",
    long_about = "Train, inspect, and query the fitness prediction model artifact."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Train on a fresh synthetic cohort and persist the artifact
    Train {
        /// Synthetic training rows (defaults to the configured value)
        #[arg(long)]
        samples: Option<usize>,

        /// Artifact destination
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite an existing artifact
        #[arg(long)]
        force: bool,
    },

    /// Report whether the artifact is absent, corrupt, or loaded
    Status {
        /// Artifact location
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Predict for a JSON request file and print the JSON result
    Predict {
        /// Request file with `user`, `workout_history`, `fitness_metrics`
        #[arg(long)]
        input: PathBuf,

        /// Artifact location
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env::set_var("RUST_LOG", "debug");
    }
    fitcast_server::logging::init_for_cli()
        .map_err(|e| fitcast_core::errors::AppError::internal(e.to_string()))?;

    match cli.command {
        Command::Train {
            samples,
            output,
            force,
        } => commands::model::train(samples, resolve_model_path(output), force),
        Command::Status { model } => {
            commands::model::status(&resolve_model_path(model));
            Ok(())
        }
        Command::Predict { input, model } => {
            commands::predict::run(&input, resolve_model_path(model))
        }
    }
}

/// Flag, then `FITCAST_MODEL_PATH`, then the default file name
fn resolve_model_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| env::var_os("FITCAST_MODEL_PATH").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(defaults::MODEL_PATH))
}
