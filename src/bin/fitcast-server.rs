// ABOUTME: Server binary for the Fitcast prediction API
// ABOUTME: Loads environment configuration, warms the fitness model, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitcast API Server Binary

use anyhow::{Context, Result};
use clap::Parser;
use fitcast_server::{
    config::{IntelligenceConfig, ServerConfig},
    logging, server, ServerResources,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "fitcast-server")]
#[command(about = "Fitcast - fitness trajectory prediction API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the model artifact location
    #[arg(long)]
    model_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(model_path) = args.model_path {
        config.model_path = model_path;
    }

    logging::init_from_env()?;

    let intelligence =
        IntelligenceConfig::load().context("Invalid fitness intelligence configuration")?;

    info!("Starting Fitcast API");
    info!("{}", config.summary());

    server::run(ServerResources::new(config, &intelligence)).await
}
