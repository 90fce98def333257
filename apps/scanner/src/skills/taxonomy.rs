#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;
use tracing::{info, warn};

/// A known skill and its precompiled whole-word pattern.
#[derive(Debug, Clone)]
pub struct SkillPattern {
    pub skill: String,
    pub pattern: Regex,
}

/// Immutable reference set of normalized skill strings, built once at startup.
///
/// Entries are kept in lexicographic order, so anything collected while
/// iterating them is already sorted.
#[derive(Debug, Clone, Default)]
pub struct SkillTaxonomy {
    entries: Vec<SkillPattern>,
}

impl SkillTaxonomy {
    /// Loads the taxonomy from a header-less CSV file, reading the first field of each record.
    ///
    /// A missing or unreadable file yields an empty taxonomy and a warning.
    pub fn load(path: &Path) -> Self {
        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
        {
            Ok(reader) => reader,
            Err(e) => {
                warn!(
                    "Skill taxonomy not found at {}: {e}. Skill extraction will find nothing.",
                    path.display()
                );
                return Self::default();
            }
        };

        let mut skills = Vec::new();
        for (line, record) in reader.records().enumerate() {
            match record {
                Ok(record) => {
                    if let Some(first) = record.get(0) {
                        skills.push(first.to_string());
                    }
                }
                Err(e) => warn!("Skipping unreadable taxonomy record {}: {e}", line + 1),
            }
        }

        let taxonomy = Self::from_skills(skills);
        info!(
            "Loaded {} skills from {}",
            taxonomy.len(),
            path.display()
        );
        taxonomy
    }

    /// Builds a taxonomy from raw skill strings (lowercased, trimmed, deduplicated).
    pub fn from_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized: BTreeSet<String> = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let entries = normalized
            .into_iter()
            .filter_map(|skill| {
                let source = format!(r"\b{}\b", regex::escape(&skill));
                match Regex::new(&source) {
                    Ok(pattern) => Some(SkillPattern { skill, pattern }),
                    Err(e) => {
                        warn!("Skipping skill '{skill}': pattern did not compile: {e}");
                        None
                    }
                }
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[SkillPattern] {
        &self.entries
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.entries
            .binary_search_by(|entry| entry.skill.as_str().cmp(skill))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
