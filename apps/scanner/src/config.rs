use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

use crate::matching::DEFAULT_MATCH_THRESHOLD;
use crate::scan::recommender::DEFAULT_RECOMMENDATION_COUNT;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub skill_taxonomy_path: PathBuf,
    pub job_corpus_dir: PathBuf,
    pub match_threshold: f64,
    pub recommendation_count: usize,
    pub embedding_cache: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let match_threshold = parse_env("MATCH_THRESHOLD", DEFAULT_MATCH_THRESHOLD)?;
        ensure!(
            (0.0..=1.0).contains(&match_threshold),
            "MATCH_THRESHOLD must be between 0 and 1, got {match_threshold}"
        );

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skill_taxonomy_path: std::env::var("SKILL_TAXONOMY_PATH")
                .unwrap_or_else(|_| "dataset/skill_taxonomy.csv".to_string())
                .into(),
            job_corpus_dir: std::env::var("JOB_CORPUS_DIR")
                .unwrap_or_else(|_| "dataset/sample_jds".to_string())
                .into(),
            match_threshold,
            recommendation_count: parse_env("RECOMMENDATION_COUNT", DEFAULT_RECOMMENDATION_COUNT)?,
            embedding_cache: parse_env("EMBEDDING_CACHE", true)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}
