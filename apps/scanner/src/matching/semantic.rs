//! Semantic Matcher: pairs every JD skill with its most similar resume skill.
//!
//! Algorithm:
//! 1. Either side empty → nothing matched, every JD skill missing, embedder not called.
//! 2. Embed resume skills and JD skills.
//! 3. Cosine similarity matrix, JD skills as rows, resume skills as columns.
//! 4. Per row, the best column wins; on ties the lowest resume index wins.
//! 5. best ≥ threshold → matched (recorded in `match_scores`), otherwise missing.
//!
//! This is a greedy per-JD-skill pairing, not an optimal assignment: two JD
//! skills may both be matched by the same resume skill.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::embedder::{EmbeddingError, SkillEmbedder};
use crate::skills::SkillSet;

pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.70;

/// The resume skill that satisfied a JD skill, and how closely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub matched_with: String,
    /// Cosine similarity, 0.0 – 1.0 for skill phrases.
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Resume-side skills that satisfied at least one JD skill.
    pub matched_skills: SkillSet,
    /// JD skills with no resume skill above the threshold.
    pub missing_skills: SkillSet,
    /// Keyed by JD skill; one entry per matched JD skill.
    pub match_scores: BTreeMap<String, SkillMatch>,
}

impl MatchResult {
    fn nothing_matched(jd_skills: &SkillSet) -> Self {
        Self {
            matched_skills: SkillSet::new(),
            missing_skills: jd_skills.clone(),
            match_scores: BTreeMap::new(),
        }
    }
}

/// The JD skills a candidate still lacks.
pub fn missing_skills(result: &MatchResult) -> &SkillSet {
    &result.missing_skills
}

pub fn semantic_match(
    resume_skills: &SkillSet,
    jd_skills: &SkillSet,
    threshold: f64,
    embedder: &dyn SkillEmbedder,
) -> Result<MatchResult, EmbeddingError> {
    if resume_skills.is_empty() || jd_skills.is_empty() {
        return Ok(MatchResult::nothing_matched(jd_skills));
    }

    let resume_vectors = embedder.embed(resume_skills.as_slice())?;
    let jd_vectors = embedder.embed(jd_skills.as_slice())?;
    if resume_vectors.len() != resume_skills.len() {
        return Err(EmbeddingError::ShapeMismatch {
            expected: resume_skills.len(),
            got: resume_vectors.len(),
        });
    }
    if jd_vectors.len() != jd_skills.len() {
        return Err(EmbeddingError::ShapeMismatch {
            expected: jd_skills.len(),
            got: jd_vectors.len(),
        });
    }

    let matrix = similarity_matrix(&jd_vectors, &resume_vectors);

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut match_scores = BTreeMap::new();

    for (jd_skill, row) in jd_skills.iter().zip(&matrix) {
        match best_match(row) {
            Some((index, score)) if score >= threshold => {
                let resume_skill = &resume_skills.as_slice()[index];
                matched.push(resume_skill.clone());
                match_scores.insert(
                    jd_skill.clone(),
                    SkillMatch {
                        matched_with: resume_skill.clone(),
                        score,
                    },
                );
            }
            _ => missing.push(jd_skill.clone()),
        }
    }

    debug!(
        "Semantic match: {} of {} JD skills matched at threshold {threshold}",
        match_scores.len(),
        jd_skills.len()
    );

    Ok(MatchResult {
        matched_skills: matched.into_iter().collect(),
        missing_skills: missing.into_iter().collect(),
        match_scores,
    })
}

/// Cosine similarity. Zero-norm or mismatched vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

fn similarity_matrix(rows: &[Vec<f32>], columns: &[Vec<f32>]) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| columns.iter().map(|col| cosine_similarity(row, col)).collect())
        .collect()
}

/// Index and value of the row maximum; the first maximum wins ties.
fn best_match(row: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &score) in row.iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ if score.is_nan() => {}
            _ => best = Some((index, score)),
        }
    }
    best
}
