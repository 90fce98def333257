#![allow(dead_code)]

//! Skill taxonomy, whole-word skill extraction and JD processing.

pub mod extractor;
pub mod jd_processor;
pub mod taxonomy;

use serde::{Deserialize, Serialize};

pub use extractor::extract_skills;
pub use jd_processor::{process_jd_file, process_jd_text};
pub use taxonomy::SkillTaxonomy;

/// Sorted, duplicate-free list of normalized skill strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.binary_search_by(|s| s.as_str().cmp(skill)).is_ok()
    }

}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut skills: Vec<String> = iter.into_iter().map(Into::into).collect();
        skills.sort();
        skills.dedup();
        SkillSet(skills)
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_set_sorts_and_dedups() {
        let set: SkillSet = ["sql", "python", "sql", "aws"].into_iter().collect();
        assert_eq!(set.as_slice(), &["aws", "python", "sql"]);
        assert!(set.contains("python"));
        assert!(!set.contains("rust"));
    }

    #[test]
    fn test_skill_set_serializes_as_plain_list() {
        let set: SkillSet = ["rust", "go"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["go","rust"]"#);
    }
}
