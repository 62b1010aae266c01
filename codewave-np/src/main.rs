//! Narration Player (codewave-np) - Main entry point
//!
//! Loads an article document, runs the narration engine over it, and logs
//! the event stream until the article completes or the user interrupts.
//! This binary is the reference consumer of the engine's event interface;
//! a graphical front end would subscribe the same way.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use codewave_common::events::{CodeMode, NarrationEvent};
use codewave_common::model::Article;
use codewave_np::config::Config;
use codewave_np::playback::NarrationEngine;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, trace, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for codewave-np
#[derive(Parser, Debug)]
#[command(name = "codewave-np")]
#[command(about = "Narration player for CodeWave articles")]
#[command(version)]
struct Args {
    /// Article JSON document to narrate (built-in sample when omitted)
    #[arg(short, long, env = "CODEWAVE_ARTICLE")]
    article: Option<PathBuf>,

    /// Code handling mode: skip, label or summary
    #[arg(short, long, default_value = "summary", env = "CODEWAVE_CODE_MODE")]
    code_mode: String,

    /// Speed-cycle steps to apply before starting (each step: 1.0 -> 1.5 -> 2.0 -> 1.0)
    #[arg(short, long, default_value = "0")]
    speed_steps: u8,

    /// Configuration file (TOML)
    #[arg(long, env = "CODEWAVE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codewave_np=debug,codewave_common=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config =
        Config::resolve(args.config.as_deref()).context("Failed to load configuration")?;

    let code_mode = args.code_mode.parse::<CodeMode>().unwrap_or_else(|e| {
        warn!("{}, falling back to {}", e, CodeMode::default());
        CodeMode::default()
    });

    let article = match &args.article {
        Some(path) => Arc::new(
            Article::from_json_file(path)
                .with_context(|| format!("Failed to load article from {}", path.display()))?,
        ),
        None => Article::demo(),
    };

    if article.segments.is_empty() {
        warn!("Article \"{}\" has no segments, nothing to narrate", article.title);
        return Ok(());
    }

    info!(
        "Narrating \"{}\" by {} ({} segments)",
        article.title,
        article.author,
        article.segments.len()
    );

    let engine = NarrationEngine::new(config.pace);
    let mut events = engine.subscribe();

    engine.set_article(Some(article)).await;
    engine.set_code_mode(code_mode).await;
    for _ in 0..args.speed_steps {
        engine.cycle_speed().await;
    }
    engine.play_pause().await;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(NarrationEvent::ArticleCompleted { .. }) => {
                    info!("Narration complete");
                    break;
                }
                Ok(NarrationEvent::SegmentStarted { segment_index, .. }) => {
                    let snapshot = engine.snapshot().await;
                    if let Some(segment) = &snapshot.current_segment {
                        debug!(
                            "Now narrating segment {}/{} ({})",
                            segment_index + 1,
                            snapshot.segment_count,
                            segment.kind()
                        );
                    }
                }
                Ok(NarrationEvent::PlaybackProgress { snapshot, .. }) => {
                    trace!(
                        "segment {} progress {:.1}%",
                        snapshot.segment_index,
                        snapshot.progress
                    );
                }
                Ok(_) => {}
                Err(RecvError::Lagged(n)) => {
                    warn!("Event stream lagged, {} events dropped", n);
                }
                Err(RecvError::Closed) => break,
            },
            _ = signal::ctrl_c() => {
                info!("Shutting down");
                engine.set_article(None).await;
                break;
            }
        }
    }

    Ok(())
}
