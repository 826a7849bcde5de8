use anyhow::{Context, Result};
use clap::Parser;
use meeting_captions::backend::{generative_backends, translation_backend};
use meeting_captions::pipeline::{BatchTranslator, InMemoryTranscripts, ReorganizeEngine, SummaryEngine};
use meeting_captions::{create_router, AppState, Config};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "meeting-captions", version, about = "Live caption post-processing service")]
struct Args {
    /// Config file path (without extension)
    #[arg(long, default_value = "config/meeting-captions")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config))?;

    info!("{} starting", cfg.service.name);

    let generative = generative_backends(&cfg.backends).context("generative backends")?;
    let translation = translation_backend(&cfg.backends).context("translation backend")?;

    let state = AppState::new(
        Arc::new(ReorganizeEngine::new(generative.clone())),
        Arc::new(BatchTranslator::new(translation)),
        Arc::new(SummaryEngine::new(
            generative,
            Arc::new(InMemoryTranscripts::new(HashMap::new())),
        )),
    );

    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await.context("HTTP server")?;

    Ok(())
}
