//! Push 2 wave demo
//!
//! Drives the Push 2 display with an animated wave and mirrors incoming
//! MIDI events to the status output.

mod app;
mod bridge;
mod config;
mod status;
mod wave;

use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use app::Demo;
use config::Config;
use status::{LogSink, StatusSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load configuration, falling back to defaults
    let config = match std::env::args().nth(1) {
        Some(path) => match Config::load(&path) {
            Ok(config) => {
                info!("Loaded configuration from: {}", path);
                config
            }
            Err(e) => {
                warn!("{:#}. Using defaults.", e);
                Config::default()
            }
        },
        None => Config::default(),
    };

    let sink: Arc<dyn StatusSink> = Arc::new(LogSink);

    // Start the demo; a failed stage leaves the process running with the
    // failure message on the status display instead of the animation.
    let animation: Option<JoinHandle<()>> = match Demo::init(&config, sink.clone()) {
        Ok(demo) => {
            sink.publish("Push 2 connected");
            Some(tokio::spawn(demo.run()))
        }
        Err(e) => {
            warn!("Initialization failed: {:#}", e);
            sink.publish(&format!("{:#}", e));
            None
        }
    };

    // Setup Unix signal handlers
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;

    tokio::select! {
        _ = wait_animation(animation) => {
            error!("Animation loop terminated unexpectedly");
            std::process::exit(1);
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
    }

    Ok(())
}

/// Resolves only if the animation task ends, which it never does healthy.
async fn wait_animation(handle: Option<JoinHandle<()>>) {
    match handle {
        Some(handle) => {
            let _ = handle.await;
        }
        None => std::future::pending::<()>().await,
    }
}
