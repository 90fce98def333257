//! Field Parser: pulls name, email and phone out of resume text.

pub mod entities;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::profile::entities::{EntityLabel, EntityRecognizer, HeuristicRecognizer};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+").expect("valid regex")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?(\d{10}|\d{5}[-.\s]\d{5})").expect("valid regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Names are expected near the top of a resume; only this many chars are scanned.
const NAME_WINDOW_CHARS: usize = 300;

/// Entities with this many tokens or more are treated as false positives.
const MAX_NAME_TOKENS: usize = 4;

/// Contact fields derived once per document. Each field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Parses contact fields using the default heuristic entity recognizer.
pub fn parse_basic_info(text: &str) -> BasicInfo {
    parse_basic_info_with(text, &HeuristicRecognizer)
}

pub fn parse_basic_info_with(text: &str, recognizer: &dyn EntityRecognizer) -> BasicInfo {
    let cleaned = clean_text(text);

    BasicInfo {
        name: extract_name(&cleaned, recognizer),
        email: extract_email(&cleaned),
        phone: extract_phone(&cleaned),
    }
}

/// Collapses every whitespace run (tabs and newlines included) to one space.
pub fn clean_text(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

fn extract_name(text: &str, recognizer: &dyn EntityRecognizer) -> Option<String> {
    let window: String = text.chars().take(NAME_WINDOW_CHARS).collect();

    recognizer
        .recognize(&window)
        .into_iter()
        .filter(|entity| entity.label == EntityLabel::Person)
        .find(|entity| entity.text.split_whitespace().count() < MAX_NAME_TOKENS)
        .map(|entity| entity.text.trim().to_string())
}
