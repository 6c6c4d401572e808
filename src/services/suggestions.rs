//! Resume rewrite suggestions from a generative model.
//!
//! The handler only sees [`SuggestionRequester`]; the model behind it is a
//! [`SuggestionModel`] so tests can swap in a canned implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rig::client::completion::CompletionClientDyn;
use rig::completion::Prompt;

use crate::config::LlmConfig;
use crate::services::llm_provider::Provider;

/// How much of the resume and of the job description goes into the prompt,
/// in characters. A rough token-budget cap, not a tuned value.
pub const PROMPT_TEXT_LIMIT: usize = 2000;

/// A text-in, text-out generative model.
#[async_trait]
pub trait SuggestionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// [`SuggestionModel`] backed by a rig completion client, built once at startup.
pub struct RigSuggestionModel {
    provider: Provider,
    model: String,
    /// `None` when the provider needs a key and none is configured.
    client: Option<Box<dyn CompletionClientDyn>>,
}

impl RigSuggestionModel {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let provider: Provider = config.provider.parse()?;

        let client = if provider.requires_api_key() && config.api_key.trim().is_empty() {
            None
        } else {
            Some(provider.completion_client(&config.api_key)?)
        };

        Ok(Self {
            provider,
            model: config.model.clone(),
            client,
        })
    }
}

#[async_trait]
impl SuggestionModel for RigSuggestionModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let Some(client) = &self.client else {
            anyhow::bail!(
                "No API key configured for provider '{}' (set APP__LLM__API_KEY)",
                self.provider
            );
        };

        let agent = client.agent(&self.model).build();

        tracing::debug!(
            "Requesting suggestions from {}/{} ({} prompt chars)",
            self.provider,
            self.model,
            prompt.chars().count()
        );

        agent
            .prompt(prompt)
            .await
            .map_err(|e| anyhow::anyhow!("LLM error: {e}"))
    }
}

#[derive(Clone)]
pub struct SuggestionRequester {
    model: Arc<dyn SuggestionModel>,
}

impl SuggestionRequester {
    pub fn new(model: Arc<dyn SuggestionModel>) -> Self {
        Self { model }
    }

    /// Ask the model for rewritten bullet points. The reply is returned verbatim.
    pub async fn suggest(
        &self,
        resume_text: &str,
        job_description: &str,
        missing_keywords: &[String],
    ) -> Result<String> {
        let prompt = build_prompt(resume_text, job_description, missing_keywords);
        self.model
            .complete(&prompt)
            .await
            .context("Suggestion request failed")
    }
}

pub fn build_prompt(resume_text: &str, job_description: &str, missing_keywords: &[String]) -> String {
    format!(
        "You are an expert resume writer and career coach.\n\
         A candidate's resume is missing these keywords from the job description: {missing}.\n\
         \n\
         Resume:\n\
         {resume}\n\
         \n\
         Job Description:\n\
         {job}\n\
         \n\
         Suggest rewritten resume bullet points that naturally work in the missing keywords \
         where the candidate's experience supports them. Keep each bullet concise, start it \
         with a strong action verb and quantify impact where possible. Return only the bullet points.",
        missing = missing_keywords.join(", "),
        resume = truncate_chars(resume_text, PROMPT_TEXT_LIMIT),
        job = truncate_chars(job_description, PROMPT_TEXT_LIMIT),
    )
}

/// First `max` characters of `text`, never splitting a character.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Canned model: returns a fixed reply (or error) and records the prompts it saw.
    pub(crate) struct FakeModel {
        reply: Result<String, String>,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl FakeModel {
        pub(crate) fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SuggestionModel for FakeModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|msg| anyhow::anyhow!(msg))
        }
    }

    #[test]
    fn test_prompt_contains_sections() {
        let prompt = build_prompt(
            "Built data pipelines",
            "Need Spark and Airflow",
            &["spark".to_string(), "airflow".to_string()],
        );

        assert!(prompt.starts_with("You are an expert resume writer"));
        assert!(prompt.contains("spark, airflow"));
        assert!(prompt.contains("Resume:\nBuilt data pipelines"));
        assert!(prompt.contains("Job Description:\nNeed Spark and Airflow"));
    }

    #[test]
    fn test_prompt_truncates_long_inputs() {
        let resume = "r".repeat(PROMPT_TEXT_LIMIT + 500);
        let job = "j".repeat(PROMPT_TEXT_LIMIT * 2);
        let prompt = build_prompt(&resume, &job, &[]);

        assert!(prompt.contains(&"r".repeat(PROMPT_TEXT_LIMIT)));
        assert!(!prompt.contains(&"r".repeat(PROMPT_TEXT_LIMIT + 1)));
        assert!(prompt.contains(&"j".repeat(PROMPT_TEXT_LIMIT)));
        assert!(!prompt.contains(&"j".repeat(PROMPT_TEXT_LIMIT + 1)));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[tokio::test]
    async fn test_suggest_returns_model_text_verbatim() {
        let model = FakeModel::replying("- Led migration to Kubernetes\n");
        let requester = SuggestionRequester::new(model.clone());

        let text = requester
            .suggest("resume", "job", &["kubernetes".to_string()])
            .await
            .unwrap();

        assert_eq!(text, "- Led migration to Kubernetes\n");
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("kubernetes"));
    }

    #[tokio::test]
    async fn test_suggest_propagates_model_failure() {
        let requester = SuggestionRequester::new(FakeModel::failing("quota exceeded"));
        let err = requester.suggest("resume", "job", &[]).await.unwrap_err();
        assert!(format!("{err:#}").contains("quota exceeded"));
    }

    #[test]
    fn test_rig_model_rejects_unknown_provider() {
        let config = LlmConfig {
            provider: "watson".into(),
            model: "x".into(),
            api_key: "k".into(),
        };
        assert!(RigSuggestionModel::new(&config).is_err());
    }

    #[test]
    fn test_rig_model_builds_client_once_key_is_set() {
        let config = LlmConfig {
            provider: "OpenAI".into(),
            model: "gpt-4o-mini".into(),
            api_key: "sk-test".into(),
        };
        let model = RigSuggestionModel::new(&config).unwrap();
        assert_eq!(model.provider, Provider::OpenAi);
        assert!(model.client.is_some());
    }

    #[tokio::test]
    async fn test_rig_model_requires_api_key() {
        let config = LlmConfig {
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            api_key: String::new(),
        };
        let model = RigSuggestionModel::new(&config).unwrap();
        let err = model.complete("hi").await.unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }
}
