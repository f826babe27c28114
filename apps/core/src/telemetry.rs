//! Tracing subscriber setup for the command-line front end.
//!
//! Logs always go to stderr; stdout carries the JSON replies.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogFormat};
use crate::error::AppError;

pub const SERVICE_NAME: &str = "bizdesk-core";

fn build_filter(directive: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(directive)
        .map_err(|e| AppError::Config(format!("Invalid log filter '{}': {}", directive, e)))
}

/// Install the global subscriber described by `config`.
pub fn init_tracing(config: &AppConfig) -> Result<(), AppError> {
    let filter = build_filter(&config.log_filter)?;

    match config.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| AppError::Config(format!("Failed to install subscriber: {}", e))),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                SERVICE_NAME.to_string(),
                std::io::stderr,
            ))
            .try_init()
            .map_err(|e| AppError::Config(format!("Failed to install subscriber: {}", e))),
    }
}
