mod config;
mod errors;
mod extraction;
mod matching;
mod profile;
mod routes;
mod scan;
mod skills;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::matching::{CachedEmbedder, FastEmbedder, SkillEmbedder};
use crate::routes::build_router;
use crate::scan::JobIndex;
use crate::skills::SkillTaxonomy;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS scanner v{}", env!("CARGO_PKG_VERSION"));

    // Skill taxonomy: loaded once, read-only for the process lifetime
    let taxonomy = Arc::new(SkillTaxonomy::load(&config.skill_taxonomy_path));

    // Embedding model (downloads on first run, so keep it off the async workers)
    let embedder = build_embedder(config.embedding_cache).await?;

    // Job corpus index: built once against the same taxonomy
    let job_index = {
        let taxonomy = Arc::clone(&taxonomy);
        let dir = config.job_corpus_dir.clone();
        tokio::task::spawn_blocking(move || JobIndex::build(&dir, &taxonomy))
            .await
            .context("job index build task failed")?
    };
    info!("Job recommender ready with {} postings", job_index.len());

    let state = AppState {
        config: config.clone(),
        taxonomy,
        job_index: Arc::new(job_index),
        embedder,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads all-MiniLM-L6-v2, wrapped in the read-through cache when enabled.
async fn build_embedder(use_cache: bool) -> Result<Arc<dyn SkillEmbedder>> {
    let model = tokio::task::spawn_blocking(FastEmbedder::new)
        .await
        .context("embedding model init task failed")??;

    if use_cache {
        info!("Embedding cache enabled");
        Ok(Arc::new(CachedEmbedder::new(model)))
    } else {
        Ok(Arc::new(model))
    }
}
