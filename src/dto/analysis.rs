use serde::Serialize;

use crate::services::keywords::KeywordAnalysis;

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub score: u8,
    pub missing_keywords: Vec<String>,
    pub suggestions: String,
}

impl AnalyzeResponse {
    pub fn new(analysis: KeywordAnalysis, suggestions: String) -> Self {
        Self {
            score: analysis.score,
            missing_keywords: analysis.missing_keywords,
            suggestions,
        }
    }
}

/// Shape of the multipart upload, for the API docs only.
#[cfg(feature = "openapi")]
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeForm {
    /// PDF or DOCX resume.
    #[schema(value_type = String, format = Binary)]
    pub resume: Vec<u8>,
    pub job_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_without_matching_keywords() {
        let analysis = KeywordAnalysis {
            score: 42,
            matching_keywords: vec!["rust".into()],
            missing_keywords: vec!["kafka".into()],
        };
        let json = serde_json::to_value(AnalyzeResponse::new(analysis, "- tip".into())).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "score": 42,
                "missingKeywords": ["kafka"],
                "suggestions": "- tip",
            })
        );
    }
}
