//! One full resume scan: parse → skills → JD → match → score → suggestions → jobs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::matching::semantic::missing_skills;
use crate::matching::{
    calculate_score, semantic_match, EmbeddingError, ScoreResult, ScoreWeights, SkillEmbedder,
    SkillMatch,
};
use crate::profile::{parse_basic_info, BasicInfo};
use crate::scan::recommender::{recommend_jobs, JobIndex, Recommendation};
use crate::scan::suggestions::generate_suggestions;
use crate::skills::{extract_skills, process_jd_file, process_jd_text, SkillSet, SkillTaxonomy};

/// Where the job description comes from.
#[derive(Debug, Clone)]
pub enum JdSource {
    Text(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ScanInput {
    pub resume_text: String,
    pub jd: JdSource,
}

/// Everything a scan needs that outlives a single request.
pub struct ScanContext<'a> {
    pub taxonomy: &'a SkillTaxonomy,
    pub job_index: &'a JobIndex,
    pub embedder: &'a dyn SkillEmbedder,
    pub threshold: f64,
    pub weights: ScoreWeights,
    pub top_n: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub basic_info: BasicInfo,
    pub resume_skills: SkillSet,
    pub jd_skills: SkillSet,
    pub ats_score: ScoreResult,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub match_scores: BTreeMap<String, SkillMatch>,
    pub suggestions: Vec<String>,
    pub recommended_jobs: Vec<Recommendation>,
}

/// Runs the whole pipeline synchronously. Only embedding failures are errors;
/// every other degraded input produces an empty or zero-valued report section.
pub fn run_scan(input: &ScanInput, ctx: &ScanContext<'_>) -> Result<ScanReport, EmbeddingError> {
    let basic_info = parse_basic_info(&input.resume_text);
    let resume_skills = extract_skills(&input.resume_text, ctx.taxonomy);

    let jd_skills = match &input.jd {
        JdSource::Text(text) => process_jd_text(text, ctx.taxonomy),
        JdSource::File(path) => process_jd_file(path, ctx.taxonomy),
    };

    let match_result = semantic_match(&resume_skills, &jd_skills, ctx.threshold, ctx.embedder)?;
    let ats_score = calculate_score(&match_result, &ctx.weights);
    let gaps = missing_skills(&match_result).clone();
    let suggestions = generate_suggestions(&input.resume_text, &basic_info, &resume_skills);
    let recommended_jobs = recommend_jobs(
        &resume_skills,
        ctx.job_index,
        ctx.top_n,
        ctx.threshold,
        ctx.embedder,
    )?;

    info!(
        "Scan complete: {} resume skills, {} JD skills, {} missing, score {}",
        resume_skills.len(),
        jd_skills.len(),
        gaps.len(),
        ats_score.score
    );

    Ok(ScanReport {
        basic_info,
        resume_skills,
        jd_skills,
        ats_score,
        matched_skills: match_result.matched_skills,
        missing_skills: gaps,
        match_scores: match_result.match_scores,
        suggestions,
        recommended_jobs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::testing::FixtureEmbedder;
    use crate::scan::recommender::JobIndexEntry;
    use std::fs;

    const RESUME: &str = "Name: John Doe\nEmail: john@example.com\nSkills: Python, Django";

    fn taxonomy() -> SkillTaxonomy {
        SkillTaxonomy::from_skills(["python", "django", "sql", "react"])
    }

    fn embedder() -> FixtureEmbedder {
        FixtureEmbedder::one_hot(&["python", "django", "sql", "react"])
    }

    fn index() -> JobIndex {
        JobIndex::from_entries(vec![
            JobIndexEntry {
                job_title: "Frontend".to_string(),
                skills: ["react"].into_iter().collect(),
            },
            JobIndexEntry {
                job_title: "Django Developer".to_string(),
                skills: ["django", "python", "sql"].into_iter().collect(),
            },
        ])
    }

    fn run(input: ScanInput) -> ScanReport {
        let taxonomy = taxonomy();
        let index = index();
        let embedder = embedder();
        let ctx = ScanContext {
            taxonomy: &taxonomy,
            job_index: &index,
            embedder: &embedder,
            threshold: 0.7,
            weights: ScoreWeights::default(),
            top_n: 3,
        };
        run_scan(&input, &ctx).unwrap()
    }

    #[test]
    fn test_full_scan_from_jd_text() {
        let report = run(ScanInput {
            resume_text: RESUME.to_string(),
            jd: JdSource::Text("We need a Python Developer with Django skills.".to_string()),
        });

        assert_eq!(report.basic_info.name.as_deref(), Some("John Doe"));
        assert_eq!(report.basic_info.email.as_deref(), Some("john@example.com"));
        assert_eq!(report.resume_skills.as_slice(), &["django", "python"]);
        assert_eq!(report.jd_skills.as_slice(), &["django", "python"]);
        assert_eq!(report.ats_score.score, 100.0);
        assert!(report.missing_skills.is_empty());
        assert_eq!(report.recommended_jobs[0].job_title, "Django Developer");
        assert!(report.suggestions.iter().any(|s| s.contains("phone number")));
    }

    #[test]
    fn test_full_scan_from_jd_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jd.txt");
        fs::write(&path, "Python, SQL and React").unwrap();

        let report = run(ScanInput {
            resume_text: RESUME.to_string(),
            jd: JdSource::File(path),
        });

        assert_eq!(report.matched_skills.as_slice(), &["python"]);
        assert_eq!(report.missing_skills.as_slice(), &["react", "sql"]);
        // ratio 1/3, similarity 1.0 → 0.2333 + 0.3
        assert_eq!(report.ats_score.score, 53.33);
    }

    #[test]
    fn test_empty_resume_degrades_gracefully() {
        let report = run(ScanInput {
            resume_text: String::new(),
            jd: JdSource::Text("Python".to_string()),
        });

        assert_eq!(report.basic_info, BasicInfo::default());
        assert!(report.resume_skills.is_empty());
        assert_eq!(report.missing_skills.as_slice(), &["python"]);
        assert_eq!(report.ats_score, ScoreResult::default());
        assert_eq!(report.suggestions.len(), 8);
        assert!(report.recommended_jobs.is_empty());
    }

    #[test]
    fn test_missing_jd_file_scores_zero() {
        let report = run(ScanInput {
            resume_text: RESUME.to_string(),
            jd: JdSource::File(PathBuf::from("/definitely/not/here.txt")),
        });
        assert!(report.jd_skills.is_empty());
        assert_eq!(report.ats_score.score, 0.0);
    }
}
