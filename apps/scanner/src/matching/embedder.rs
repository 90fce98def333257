//! Embedding backends for skill strings.
//!
//! `FastEmbedder` runs the all-MiniLM-L6-v2 sentence model through fastembed.
//! The model is synchronous and CPU-bound; async callers go through
//! `tokio::task::spawn_blocking`.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model error: {0}")]
    Model(String),

    #[error("embedding model returned {got} vectors for {expected} inputs")]
    ShapeMismatch { expected: usize, got: usize },
}

/// Embeds skill strings into fixed-dimension vectors, one per input, in input order.
pub trait SkillEmbedder: Send + Sync {
    fn embed(&self, skills: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Sentence-embedding model backed by fastembed.
pub struct FastEmbedder {
    model: fastembed::TextEmbedding,
}

impl FastEmbedder {
    /// Loads all-MiniLM-L6-v2. Downloads the model on first run.
    pub fn new() -> Result<Self, EmbeddingError> {
        let options = fastembed::InitOptions::new(fastembed::EmbeddingModel::AllMiniLML6V2)
            .with_show_download_progress(true);
        let model = fastembed::TextEmbedding::try_new(options)
            .map_err(|e| EmbeddingError::Model(format!("model initialization failed: {e}")))?;

        info!("Embedding model all-MiniLM-L6-v2 loaded");
        Ok(Self { model })
    }
}

impl SkillEmbedder for FastEmbedder {
    fn embed(&self, skills: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if skills.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = self
            .model
            .embed(skills.to_vec(), None)
            .map_err(|e| EmbeddingError::Model(format!("skill embedding failed: {e}")))?;
        check_shape(skills.len(), vectors)
    }
}

/// Process-wide read-through cache in front of another embedder.
///
/// Keyed by the trimmed, lowercased skill string. Entries are never evicted;
/// the key space is bounded by the taxonomy.
pub struct CachedEmbedder<E> {
    inner: E,
    cache: RwLock<HashMap<String, Vec<f32>>>,
}

impl<E: SkillEmbedder> CachedEmbedder<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl<E: SkillEmbedder> SkillEmbedder for CachedEmbedder<E> {
    fn embed(&self, skills: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let keys: Vec<String> = skills.iter().map(|s| cache_key(s)).collect();

        let mut misses: Vec<String> = {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            keys.iter()
                .zip(skills)
                .filter(|(key, _)| !cache.contains_key(*key))
                .map(|(_, skill)| skill.clone())
                .collect()
        };
        misses.sort_by_key(|s| cache_key(s));
        misses.dedup_by_key(|s| cache_key(s));

        if !misses.is_empty() {
            debug!("Embedding {} uncached skills", misses.len());
            let vectors = self.inner.embed(&misses)?;
            let vectors = check_shape(misses.len(), vectors)?;

            let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
            for (skill, vector) in misses.iter().zip(vectors) {
                cache.insert(cache_key(skill), vector);
            }
        }

        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        keys.iter()
            .map(|key| {
                cache
                    .get(key)
                    .cloned()
                    .ok_or_else(|| EmbeddingError::Model(format!("no cached vector for '{key}'")))
            })
            .collect()
    }
}

fn cache_key(skill: &str) -> String {
    skill.trim().to_lowercase()
}

fn check_shape(expected: usize, vectors: Vec<Vec<f32>>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if vectors.len() == expected {
        Ok(vectors)
    } else {
        Err(EmbeddingError::ShapeMismatch {
            expected,
            got: vectors.len(),
        })
    }
}
