//! Rule-based resume feedback.
//!
//! Rules run in a fixed priority order and every rule is evaluated:
//! contact info first, then section presence, then content quality.

use crate::profile::BasicInfo;
use crate::skills::SkillSet;

const MISSING_EMAIL: &str = "Critical: Your resume is missing an email address.";
const MISSING_PHONE: &str = "Critical: Your resume is missing a phone number.";
const MISSING_NAME: &str = "Warning: Could not detect a name. Ensure your name is at the top.";
const ADD_SKILLS: &str =
    "Recommendation: Add a dedicated 'Skills' section to improve ATS parsing.";
const ADD_EXPERIENCE: &str =
    "Recommendation: Add a 'Work Experience' section with clear job titles and dates.";
const ADD_EDUCATION: &str = "Recommendation: Add an 'Education' section detailing your degrees.";
const ADD_PROJECTS: &str =
    "Tip: Consider adding a 'Projects' section to showcase your practical skills.";
const USE_ACTION_VERBS: &str = "Tip: Improve your experience bullet points by starting them with action verbs (e.g., 'Developed', 'Managed', 'Led').";

const ACTION_VERBS: &[&str] = &[
    "developed",
    "managed",
    "led",
    "created",
    "implemented",
    "optimized",
];

pub fn generate_suggestions(
    resume_text: &str,
    basic_info: &BasicInfo,
    skills: &SkillSet,
) -> Vec<String> {
    let text_lower = resume_text.to_lowercase();
    let mut suggestions = Vec::new();

    if basic_info.email.is_none() {
        suggestions.push(MISSING_EMAIL);
    }
    if basic_info.phone.is_none() {
        suggestions.push(MISSING_PHONE);
    }
    if basic_info.name.is_none() {
        suggestions.push(MISSING_NAME);
    }

    if !text_lower.contains("skills") && skills.is_empty() {
        suggestions.push(ADD_SKILLS);
    }
    if !text_lower.contains("experience") && !text_lower.contains("employment") {
        suggestions.push(ADD_EXPERIENCE);
    }
    if !text_lower.contains("education") {
        suggestions.push(ADD_EDUCATION);
    }
    if !text_lower.contains("project") {
        suggestions.push(ADD_PROJECTS);
    }

    if !ACTION_VERBS.iter().any(|verb| text_lower.contains(verb)) {
        suggestions.push(USE_ACTION_VERBS);
    }

    suggestions.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_info() -> BasicInfo {
        BasicInfo {
            name: Some("Jane Smith".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: Some("9876543210".to_string()),
        }
    }

    #[test]
    fn test_bare_text_triggers_all_eight_in_order() {
        let tips = generate_suggestions("hello world", &BasicInfo::default(), &SkillSet::new());
        assert_eq!(
            tips,
            vec![
                MISSING_EMAIL,
                MISSING_PHONE,
                MISSING_NAME,
                ADD_SKILLS,
                ADD_EXPERIENCE,
                ADD_EDUCATION,
                ADD_PROJECTS,
                USE_ACTION_VERBS,
            ]
        );
    }

    #[test]
    fn test_complete_resume_has_no_suggestions() {
        let text = "Skills: Rust\nWork Experience: Developed services\nEducation: BSc\nProjects: scanner";
        let tips = generate_suggestions(text, &complete_info(), &SkillSet::new());
        assert!(tips.is_empty(), "unexpected: {tips:?}");
    }

    #[test]
    fn test_extracted_skills_suppress_skills_section_tip() {
        let skills: SkillSet = ["python"].into_iter().collect();
        let tips = generate_suggestions("python", &complete_info(), &skills);
        assert!(!tips.iter().any(|t| t == ADD_SKILLS));
    }

    #[test]
    fn test_employment_counts_as_experience() {
        let tips = generate_suggestions("Employment history", &complete_info(), &SkillSet::new());
        assert!(!tips.iter().any(|t| t == ADD_EXPERIENCE));
    }

    #[test]
    fn test_name_over_title_line_is_detected() {
        let text = "Priya Raman\nProduct Manager\npriya@example.com\n9876543210";
        let info = crate::profile::parse_basic_info(text);
        let tips = generate_suggestions(text, &info, &SkillSet::new());
        assert!(!tips.iter().any(|t| t == MISSING_NAME));
    }

    #[test]
    fn test_only_missing_phone() {
        let info = BasicInfo {
            phone: None,
            ..complete_info()
        };
        let text = "skills experience education projects implemented";
        assert_eq!(generate_suggestions(text, &info, &SkillSet::new()), vec![MISSING_PHONE]);
    }
}
