//! Axum route handlers for the Scan API.
//!
//! Handlers only translate HTTP into plain data. The pipeline itself is
//! synchronous and runs on the blocking pool.

use std::path::Path;

use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::scan::pipeline::{run_scan, JdSource, ScanContext, ScanInput, ScanReport};
use crate::scan::recommender::{recommend_jobs, Recommendation};
use crate::skills::{process_jd_text, SkillSet};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JdSkillsRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct JdSkillsResponse {
    pub skills: SkillSet,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub skills: Vec<String>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/scan
///
/// Multipart fields: `resume` (file, required), `jd_text` (optional), `jd_file` (optional,
/// used only when `jd_text` is blank). Uploads live in temp files that are removed when
/// the handler returns, on success or failure.
pub async fn handle_scan(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScanReport>, AppError> {
    let mut resume: Option<NamedTempFile> = None;
    let mut jd_text = String::new();
    let mut jd_file: Option<NamedTempFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" | "jd_file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read {name}: {e}")))?;
                let upload = persist_upload(&file_name, &bytes)?;
                if name == "resume" {
                    resume = Some(upload);
                } else {
                    jd_file = Some(upload);
                }
            }
            "jd_text" => {
                jd_text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read jd_text: {e}")))?;
            }
            _ => {}
        }
    }

    let resume = resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    let report = tokio::task::spawn_blocking(move || {
        let resume_text = extract_text(resume.path());
        let jd = match jd_file.as_ref() {
            Some(file) if jd_text.trim().is_empty() => JdSource::File(file.path().to_path_buf()),
            _ => JdSource::Text(jd_text),
        };
        let input = ScanInput { resume_text, jd };

        let ctx = ScanContext {
            taxonomy: &state.taxonomy,
            job_index: &state.job_index,
            embedder: state.embedder.as_ref(),
            threshold: state.config.match_threshold,
            weights: Default::default(),
            top_n: state.config.recommendation_count,
        };
        // `resume` and `jd_file` are dropped (and deleted) when this closure returns.
        run_scan(&input, &ctx)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("scan task failed: {e}")))??;

    Ok(Json(report))
}

/// POST /api/v1/jd/skills
///
/// Previews the skills the taxonomy finds in a raw job description.
pub async fn handle_jd_skills(
    State(state): State<AppState>,
    Json(request): Json<JdSkillsRequest>,
) -> Result<Json<JdSkillsResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let skills = process_jd_text(&request.jd_text, &state.taxonomy);
    Ok(Json(JdSkillsResponse { skills }))
}

/// POST /api/v1/recommendations
///
/// Ranks the indexed job corpus against an explicit skill list.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let skills: SkillSet = request
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    let top_n = request.top_n.unwrap_or(state.config.recommendation_count);

    let recommendations = tokio::task::spawn_blocking(move || {
        recommend_jobs(
            &skills,
            &state.job_index,
            top_n,
            state.config.match_threshold,
            state.embedder.as_ref(),
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("recommendation task failed: {e}")))??;

    Ok(Json(RecommendResponse { recommendations }))
}

/// Writes an upload to a temp file that keeps the original extension for format dispatch.
fn persist_upload(file_name: &str, bytes: &[u8]) -> Result<NamedTempFile, AppError> {
    use std::io::Write;

    let suffix = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow!("could not create temp file: {e}")))?;
    file.write_all(bytes)
        .map_err(|e| AppError::Internal(anyhow!("could not write upload: {e}")))?;
    Ok(file)
}
