use crate::skills::{SkillSet, SkillTaxonomy};

/// Returns every taxonomy skill that occurs in `text` as a whole word.
///
/// Matching is case-insensitive: the text is lowercased once and tested
/// against each entry's `\b<skill>\b` pattern, so "java" never matches
/// inside "javascript".
pub fn extract_skills(text: &str, taxonomy: &SkillTaxonomy) -> SkillSet {
    let text_lower = text.to_lowercase();

    taxonomy
        .entries()
        .iter()
        .filter(|entry| entry.pattern.is_match(&text_lower))
        .map(|entry| entry.skill.clone())
        .collect()
}
