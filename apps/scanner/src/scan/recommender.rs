//! Job Recommender: ranks a prebuilt corpus of job descriptions against a resume.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::extraction::{extract_text, DocumentKind};
use crate::matching::{calculate_score, semantic_match, EmbeddingError, ScoreWeights, SkillEmbedder};
use crate::skills::{extract_skills, SkillSet, SkillTaxonomy};

pub const DEFAULT_RECOMMENDATION_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobIndexEntry {
    pub job_title: String,
    pub skills: SkillSet,
}

/// Skill sets of every corpus job, built once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct JobIndex {
    entries: Vec<JobIndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub job_title: String,
    pub match_score: f64,
}

impl JobIndex {
    /// Indexes every readable file in `dir`, in file-name order.
    ///
    /// A missing directory yields an empty index and a warning. Files that
    /// produce no text are skipped.
    pub fn build(dir: &Path, taxonomy: &SkillTaxonomy) -> Self {
        let read_dir = match std::fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                warn!(
                    "Job directory not found: {} ({e}). Job recommender will be empty.",
                    dir.display()
                );
                return Self::default();
            }
        };

        let mut paths: Vec<_> = read_dir
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let entries: Vec<JobIndexEntry> = paths
            .iter()
            .filter_map(|path| {
                let text = extract_text(path);
                if text.is_empty() {
                    debug!("Skipping {}: no text extracted", path.display());
                    return None;
                }
                let file_name = path.file_name()?.to_string_lossy();
                Some(JobIndexEntry {
                    job_title: job_label(&file_name),
                    skills: extract_skills(&text, taxonomy),
                })
            })
            .collect();

        info!("Indexed {} job descriptions from {}", entries.len(), dir.display());
        Self { entries }
    }

    #[cfg(test)]
    pub fn from_entries(entries: Vec<JobIndexEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[JobIndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// File name with a known document extension stripped, e.g. `ML_Engineer.pdf` → `ML_Engineer`.
pub fn job_label(file_name: &str) -> String {
    if let Some((stem, extension)) = file_name.rsplit_once('.') {
        let extension = extension.to_ascii_lowercase();
        if DocumentKind::EXTENSIONS.contains(&extension.as_str()) {
            return stem.to_string();
        }
    }
    file_name.to_string()
}

/// Scores the resume against every indexed job and returns the best `top_n`.
///
/// Sorting is stable: jobs with equal scores keep index order.
pub fn recommend_jobs(
    resume_skills: &SkillSet,
    index: &JobIndex,
    top_n: usize,
    threshold: f64,
    embedder: &dyn SkillEmbedder,
) -> Result<Vec<Recommendation>, EmbeddingError> {
    if resume_skills.is_empty() || index.is_empty() {
        return Ok(Vec::new());
    }

    let weights = ScoreWeights::default();
    let mut recommendations = Vec::with_capacity(index.len());
    for job in index.entries() {
        let match_result = semantic_match(resume_skills, &job.skills, threshold, embedder)?;
        let score = calculate_score(&match_result, &weights);
        recommendations.push(Recommendation {
            job_title: job.job_title.clone(),
            match_score: score.score,
        });
    }

    recommendations.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    recommendations.truncate(top_n);
    Ok(recommendations)
}
