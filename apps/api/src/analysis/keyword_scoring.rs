//! Scores how many job-description keywords also appear in a résumé, and lists which
//! ones matched and which are missing.
//!
//! Both sides must come from [`normalize_for_ats`](crate::analysis::normalize::normalize_for_ats);
//! [`AtsTokens`] can only be built that way.
//!
//! Algorithm:
//! 1. matched = job ∩ resume, missing = job − matched
//! 2. score = |matched| / |job| × 100, capped at 100, 0 for an empty job set
//! 3. Round to 2 decimals (half away from zero). A non-empty match never rounds to 0.

use crate::analysis::normalize::AtsTokens;
use crate::analysis::round_to_hundredths;

/// Maximum number of matched / missing keywords reported back to callers.
pub const REPORT_LIMIT: usize = 20;

/// Smallest reportable score when at least one keyword matched.
const MIN_NONZERO_SCORE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64, // 0 – 100
    /// First `REPORT_LIMIT` matches, lexicographic.
    pub matched_keywords: Vec<String>,
    /// First `REPORT_LIMIT` gaps, lexicographic.
    pub missing_keywords: Vec<String>,
    pub total_job_keywords: usize,
    pub matched_count: usize,
}

impl ScoreResult {
    fn empty() -> Self {
        ScoreResult {
            score: 0.0,
            matched_keywords: vec![],
            missing_keywords: vec![],
            total_job_keywords: 0,
            matched_count: 0,
        }
    }
}

pub fn score_keywords(job: &AtsTokens, resume: &AtsTokens) -> ScoreResult {
    if job.is_empty() {
        return ScoreResult::empty();
    }

    // AtsTokens iterates in order, so both partitions come out sorted.
    let (matched, missing): (Vec<&str>, Vec<&str>) = job.iter().partition(|kw| resume.contains(kw));

    let total_job_keywords = job.len();
    let matched_count = matched.len();

    let raw = (matched_count as f64 / total_job_keywords as f64 * 100.0).min(100.0);
    let mut score = round_to_hundredths(raw);
    if matched_count > 0 {
        score = score.max(MIN_NONZERO_SCORE);
    }

    ScoreResult {
        score,
        matched_keywords: top_keywords(&matched),
        missing_keywords: top_keywords(&missing),
        total_job_keywords,
        matched_count,
    }
}

fn top_keywords(keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .take(REPORT_LIMIT)
        .map(|kw| kw.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::normalize_for_ats;

    fn score(job: &str, resume: &str) -> ScoreResult {
        score_keywords(&normalize_for_ats(job), &normalize_for_ats(resume))
    }

    #[test]
    fn test_python_sql_scenario() {
        let result = score("Need Python and SQL experience", "I have Python skills");
        assert_eq!(result.matched_keywords, vec!["python"]);
        assert_eq!(result.missing_keywords, vec!["experience", "sql"]);
        assert_eq!(result.total_job_keywords, 3);
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.score, 33.33);
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        let result = score("", "Rust Python Go");
        assert_eq!(result, ScoreResult::empty());
    }

    #[test]
    fn test_stop_word_only_job_description_scores_zero() {
        let result = score("the and of", "anything at all");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.total_job_keywords, 0);
    }

    #[test]
    fn test_empty_resume_misses_everything() {
        let result = score("Rust Kubernetes", "");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.missing_keywords, vec!["kubernetes", "rust"]);
    }

    #[test]
    fn test_full_overlap_scores_100() {
        let result = score("Rust, Tokio, Axum", "Built services in Rust with Tokio and Axum");
        assert_eq!(result.score, 100.0);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_matched_and_missing_partition_job_keywords() {
        let job = normalize_for_ats("Rust Go Python CI/CD Docker Terraform AWS");
        let resume = normalize_for_ats("Go and Docker on AWS with CI pipelines");
        let result = score_keywords(&job, &resume);

        let mut union: Vec<String> = result
            .matched_keywords
            .iter()
            .chain(result.missing_keywords.iter())
            .cloned()
            .collect();
        union.sort();
        let expected: Vec<String> = job.iter().map(String::from).collect();
        assert_eq!(union, expected);
        assert!(result
            .matched_keywords
            .iter()
            .all(|kw| !result.missing_keywords.contains(kw)));
        assert_eq!(result.matched_count, result.matched_keywords.len());
        assert!(result.matched_count <= result.total_job_keywords);
    }

    #[test]
    fn test_reported_lists_are_capped_but_counts_are_not() {
        let job: String = (0..30).map(|i| format!("skill{i:02} ")).collect();
        let resume: String = (0..25).map(|i| format!("skill{i:02} ")).collect();
        let result = score(&job, &resume);

        assert_eq!(result.total_job_keywords, 30);
        assert_eq!(result.matched_count, 25);
        assert_eq!(result.matched_keywords.len(), REPORT_LIMIT);
        assert_eq!(result.missing_keywords.len(), 5);
        assert_eq!(result.matched_keywords[0], "skill00");
        assert_eq!(result.matched_keywords[19], "skill19");
        assert_eq!(result.score, 83.33);
    }

    #[test]
    fn test_single_match_in_large_job_never_rounds_to_zero() {
        let job: String = (0..100_001).map(|i| format!("k{i} ")).collect();
        let result = score(&job, "k0");
        assert_eq!(result.matched_count, 1);
        assert!(result.score > 0.0);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        for (job, resume) in [("a b c", "x"), ("rust", "rust rust"), ("go rust", "go")] {
            let result = score(job, resume);
            assert!((0.0..=100.0).contains(&result.score));
        }
    }
}
