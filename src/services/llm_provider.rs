use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use rig::client::completion::CompletionClientDyn;
use rig::client::{ProviderClient, ProviderValue};
use rig::providers::{
    anthropic, cohere, deepseek, gemini, groq, mistral, ollama, openai, openrouter, perplexity,
    together, xai,
};

/// A completion provider, parsed from `llm.provider` (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
    Gemini,
    Groq,
    DeepSeek,
    Cohere,
    Mistral,
    OpenRouter,
    Perplexity,
    Together,
    Xai,
    Ollama,
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        let provider = match name.to_lowercase().as_str() {
            "openai" => Provider::OpenAi,
            "anthropic" => Provider::Anthropic,
            "gemini" | "google" => Provider::Gemini,
            "groq" => Provider::Groq,
            "deepseek" => Provider::DeepSeek,
            "cohere" => Provider::Cohere,
            "mistral" => Provider::Mistral,
            "openrouter" => Provider::OpenRouter,
            "perplexity" => Provider::Perplexity,
            "together" => Provider::Together,
            "xai" => Provider::Xai,
            "ollama" => Provider::Ollama,
            other => anyhow::bail!("Unsupported provider: {other}"),
        };
        Ok(provider)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
            Provider::Groq => "groq",
            Provider::DeepSeek => "deepseek",
            Provider::Cohere => "cohere",
            Provider::Mistral => "mistral",
            Provider::OpenRouter => "openrouter",
            Provider::Perplexity => "perplexity",
            Provider::Together => "together",
            Provider::Xai => "xai",
            Provider::Ollama => "ollama",
        };
        f.write_str(name)
    }
}

impl Provider {
    /// Local providers run without a credential.
    pub fn requires_api_key(self) -> bool {
        self != Provider::Ollama
    }

    /// Build a completion client authenticated with `api_key`.
    pub fn completion_client(self, api_key: &str) -> Result<Box<dyn CompletionClientDyn>> {
        let value = ProviderValue::Simple(api_key.to_string());

        let client: Box<dyn ProviderClient> = match self {
            Provider::OpenAi => openai::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::Anthropic => anthropic::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::Gemini => gemini::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::Groq => groq::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::DeepSeek => deepseek::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::Cohere => cohere::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::Mistral => mistral::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::OpenRouter => openrouter::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::Perplexity => perplexity::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::Together => together::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::Xai => xai::Client::<reqwest::Client>::from_val_boxed(value),
            Provider::Ollama => ollama::Client::<reqwest::Client>::from_val_boxed(value),
        };

        client
            .as_completion()
            .with_context(|| format!("Provider '{self}' does not support completions"))
    }
}
