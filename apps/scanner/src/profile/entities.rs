//! Named-entity recognition seam used by the name extractor.
//!
//! `HeuristicRecognizer` is the default backend: pure Rust, no model files.
//! A candidate entity is a run of capitalized alphabetic tokens. Runs are cut
//! at punctuation, digits, contact tokens and common resume vocabulary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Implement this to swap in a model-backed recognizer without touching the parser.
pub trait EntityRecognizer: Send + Sync {
    /// Entities in order of appearance.
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

/// Words that never form part of a person's name in a resume header.
const NON_NAME_WORDS: &[&str] = &[
    "resume", "curriculum", "vitae", "cv", "name", "email", "e-mail", "mail", "phone",
    "mobile", "tel", "contact", "address", "linkedin", "github", "portfolio", "website",
    "summary", "profile", "objective", "about", "skills", "skill", "technical", "experience",
    "work", "employment", "education", "projects", "project", "certifications",
    "achievements", "references", "languages", "interests", "engineer", "developer",
    "software", "senior", "junior", "lead", "manager", "intern", "analyst", "scientist",
    "data", "consultant", "designer", "architect", "full", "stack", "frontend", "backend",
    "the", "and", "of", "at", "in", "for", "with", "mr", "mrs", "ms", "dr",
];

/// Role and title vocabulary. A header line such as "Product Manager" right under
/// the name must end the name run instead of extending it.
const TITLE_WORDS: &[&str] = &[
    "product", "program", "project", "devops", "cloud", "machine", "learning",
    "platform", "infrastructure", "site", "reliability", "sre", "qa", "quality", "test",
    "security", "network", "systems", "embedded", "firmware", "hardware", "mobile", "web",
    "ios", "android", "ui", "ux", "ml", "ai", "nlp", "principal", "staff", "head", "chief",
    "director", "officer", "specialist", "coordinator", "administrator", "associate",
    "assistant", "executive", "vp", "president", "technician", "programmer", "tester",
    "researcher", "research", "marketing", "sales", "business", "operations", "support",
    "finance", "accountant", "recruiter", "student", "graduate", "founder", "cofounder",
    "co-founder", "freelance", "freelancer", "full-stack", "front-end", "back-end",
    "analytics", "computer", "science", "application", "applications", "integration",
];

/// Tokens that turn a capitalized run into an organization.
const ORG_MARKERS: &[&str] = &[
    "inc", "ltd", "llc", "corp", "corporation", "company", "university", "college",
    "institute", "technologies", "solutions", "labs", "group",
];

const TRAILING_BREAKS: &[char] = &[',', '.', ':', ';', '|', '/', ')', '!', '?', '•'];
const LEADING_STRIP: &[char] = &['(', '"', '\'', '•', '-'];

#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicRecognizer;

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for raw in text.split_whitespace() {
            let stripped = raw.trim_start_matches(LEADING_STRIP);
            let word = stripped.trim_end_matches(TRAILING_BREAKS);
            let breaks_after = word.len() != stripped.len();

            if is_capitalized_word(word) {
                run.push(word);
                if breaks_after {
                    flush_run(&mut run, &mut entities);
                }
            } else {
                flush_run(&mut run, &mut entities);
            }
        }
        flush_run(&mut run, &mut entities);

        entities
    }
}

fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() || word.chars().count() < 2 {
        return false;
    }
    if !word
        .chars()
        .all(|c| c.is_alphabetic() || c == '-' || c == '\'')
    {
        return false;
    }

    let lower = word.to_lowercase();
    !NON_NAME_WORDS.contains(&lower.as_str()) && !TITLE_WORDS.contains(&lower.as_str())
}

fn flush_run(run: &mut Vec<&str>, entities: &mut Vec<Entity>) {
    if run.len() >= 2 {
        let is_org = run
            .iter()
            .any(|word| ORG_MARKERS.contains(&word.to_lowercase().as_str()));
        entities.push(Entity {
            text: run.join(" "),
            label: if is_org {
                EntityLabel::Organization
            } else {
                EntityLabel::Person
            },
        });
    }
    run.clear();
}
