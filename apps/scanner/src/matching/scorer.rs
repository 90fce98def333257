use serde::{Deserialize, Serialize};

use crate::matching::semantic::MatchResult;

/// Component weights for the ATS score. Expected to sum to 1.0; not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skill_match_ratio: f64,
    pub avg_similarity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill_match_ratio: 0.7,
            avg_similarity: 0.3,
        }
    }
}

/// All values are percentages (0 – 100) rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub skill_match_ratio: f64,
    pub avg_similarity: f64,
}

/// score = ratio × w_ratio + mean(similarity) × w_similarity, as a percentage.
///
/// A JD with no skills at all scores zero; so does a JD where nothing matched.
pub fn calculate_score(match_result: &MatchResult, weights: &ScoreWeights) -> ScoreResult {
    let matched = match_result.matched_skills.len();
    let total_jd_skills = matched + match_result.missing_skills.len();

    if total_jd_skills == 0 {
        return ScoreResult::default();
    }

    let skill_match_ratio = matched as f64 / total_jd_skills as f64;

    let avg_similarity = if match_result.match_scores.is_empty() {
        0.0
    } else {
        let total: f64 = match_result.match_scores.values().map(|m| m.score).sum();
        total / match_result.match_scores.len() as f64
    };

    let final_score = skill_match_ratio * weights.skill_match_ratio
        + avg_similarity * weights.avg_similarity;

    ScoreResult {
        score: round2(final_score * 100.0),
        skill_match_ratio: round2(skill_match_ratio * 100.0),
        avg_similarity: round2(avg_similarity * 100.0),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::semantic::SkillMatch;
    use crate::skills::SkillSet;
    use std::collections::BTreeMap;

    fn result(matched: &[&str], missing: &[&str], scores: &[(&str, f64)]) -> MatchResult {
        MatchResult {
            matched_skills: matched.iter().copied().collect::<SkillSet>(),
            missing_skills: missing.iter().copied().collect::<SkillSet>(),
            match_scores: scores
                .iter()
                .map(|(jd, score)| {
                    (
                        jd.to_string(),
                        SkillMatch {
                            matched_with: jd.to_string(),
                            score: *score,
                        },
                    )
                })
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_four_of_five_at_point_nine() {
        let r = result(
            &["aws", "docker", "python", "sql"],
            &["spark"],
            &[("aws", 0.9), ("docker", 0.9), ("python", 0.9), ("sql", 0.9)],
        );
        let score = calculate_score(&r, &ScoreWeights::default());
        // 100 × (0.8×0.7 + 0.9×0.3) = 83.0
        assert!((score.skill_match_ratio - 80.0).abs() < 1e-9);
        assert!((score.avg_similarity - 90.0).abs() < 1e-9);
        assert!((score.score - 83.0).abs() < 1e-9, "score was {}", score.score);
    }

    #[test]
    fn test_zero_jd_skills_is_all_zero() {
        let score = calculate_score(&MatchResult::default(), &ScoreWeights::default());
        assert_eq!(score, ScoreResult::default());
    }

    #[test]
    fn test_nothing_matched_is_zero() {
        let r = result(&[], &["go", "rust"], &[]);
        let score = calculate_score(&r, &ScoreWeights::default());
        assert_eq!(score.score, 0.0);
        assert_eq!(score.skill_match_ratio, 0.0);
        assert_eq!(score.avg_similarity, 0.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // ratio 1/3, similarity 0.777…
        let r = result(&["go"], &["rust", "zig"], &[("go", 0.7777777)]);
        let score = calculate_score(&r, &ScoreWeights::default());
        assert_eq!(score.skill_match_ratio, 33.33);
        assert_eq!(score.avg_similarity, 77.78);
        assert_eq!(score.score, 46.67);
    }

    #[test]
    fn test_custom_weights() {
        let r = result(&["go"], &["rust"], &[("go", 1.0)]);
        let weights = ScoreWeights {
            skill_match_ratio: 1.0,
            avg_similarity: 0.0,
        };
        assert_eq!(calculate_score(&r, &weights).score, 50.0);
    }

    #[test]
    fn test_perfect_match_is_one_hundred() {
        let r = result(&["go"], &[], &[("go", 1.0)]);
        assert_eq!(calculate_score(&r, &ScoreWeights::default()).score, 100.0);
    }
}
