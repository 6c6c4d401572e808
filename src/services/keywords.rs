//! Keyword overlap between a resume and a job description.
//!
//! Exact token matching only: no stemming, synonyms, stop words or weighting.
//! Keyword lists keep first-occurrence order so truncation is deterministic.

use std::collections::HashSet;

/// Cap on how many missing keywords are reported and fed into the prompt.
pub const MAX_MISSING_KEYWORDS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordAnalysis {
    /// 0–100, the share of distinct job tokens found in the resume.
    pub score: u8,
    pub matching_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Lowercase, drop anything that is not a word character or whitespace, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    normalized.split_whitespace().map(str::to_string).collect()
}

/// Distinct tokens in first-occurrence order.
pub fn unique_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

pub fn analyze(resume_text: &str, job_description: &str) -> KeywordAnalysis {
    let resume_words: HashSet<String> = tokenize(resume_text).into_iter().collect();
    let job_words = unique_tokens(job_description);

    let (matching_keywords, mut missing_keywords): (Vec<String>, Vec<String>) = job_words
        .iter()
        .cloned()
        .partition(|word| resume_words.contains(word));

    let score = if job_words.is_empty() {
        0
    } else {
        (100.0 * matching_keywords.len() as f64 / job_words.len() as f64).round() as u8
    };

    missing_keywords.truncate(MAX_MISSING_KEYWORDS);

    KeywordAnalysis {
        score,
        matching_keywords,
        missing_keywords,
    }
}
