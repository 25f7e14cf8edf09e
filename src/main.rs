// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Runboard batch job
//!
//! Reads decoded running activities, derives every dashboard artifact and
//! writes them to the output directory in one all-or-nothing step.

use anyhow::Context;
use runboard::{config::Config, services::execute};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load and validate configuration before touching any input
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        input = %config.input.display(),
        out_dir = %config.out_dir.display(),
        sport = ?config.sport,
        "Starting Runboard"
    );

    match execute(&config) {
        Ok((report, written)) => {
            report.log();
            tracing::info!(files = written.len(), "Done");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, input_error = err.is_input_error(), "Run failed, no artifacts written");
            Err(err.into())
        }
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("runboard=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
