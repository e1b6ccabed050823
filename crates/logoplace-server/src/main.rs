// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logoplace — logo placement analysis service
//
// Entry point. Initialises logging, loads configuration, wires the engine and
// storage, and serves the HTTP API.

mod routes;
mod services;
mod state;

use std::path::PathBuf;

use clap::Parser;
use logoplace_core::error::Result;

use services::bootstrap::{self, Overrides};

#[derive(Parser, Debug)]
#[command(name = "logoplace", version, about = "Logo placement analysis service")]
struct CliArgs {
    /// JSON configuration file; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Socket address to listen on, e.g. `0.0.0.0:5001`.
    #[arg(long)]
    bind: Option<String>,

    /// Directory for locally stored composites.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Named AWS profile for S3 uploads.
    #[arg(long)]
    aws_profile: Option<String>,

    /// Directory holding `text-detection.rten` and `text-recognition.rten`.
    #[arg(long)]
    ocr_models: Option<PathBuf>,

    /// Never upload to S3; every composite goes to the output directory.
    #[arg(long)]
    no_s3: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let config = bootstrap::load_config(
        args.config.as_deref(),
        Overrides {
            bind_address: args.bind,
            output_dir: args.output_dir,
            aws_profile: args.aws_profile,
            ocr_model_dir: args.ocr_models,
        },
    )?;

    tracing::info!(bind = %config.bind_address, "Logoplace starting");

    let state = bootstrap::build_state(&config, !args.no_s3).await?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app).await?;
    Ok(())
}
