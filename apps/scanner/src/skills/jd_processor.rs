//! Job-Description Processor: skill sets from raw JD text or JD files.

use std::path::Path;

use tracing::error;

use crate::extraction::extract_text;
use crate::skills::{extract_skills, SkillSet, SkillTaxonomy};

pub fn process_jd_text(jd_text: &str, taxonomy: &SkillTaxonomy) -> SkillSet {
    extract_skills(jd_text, taxonomy)
}

/// Reads a `.txt`, `.pdf` or `.docx` JD. Missing or unreadable files yield an empty set.
pub fn process_jd_file(path: &Path, taxonomy: &SkillTaxonomy) -> SkillSet {
    if !path.exists() {
        error!("Job description file not found at: {}", path.display());
        return SkillSet::new();
    }

    let jd_text = extract_text(path);
    if jd_text.is_empty() {
        error!("Could not extract text from JD file: {}", path.display());
        return SkillSet::new();
    }

    process_jd_text(&jd_text, taxonomy)
}
