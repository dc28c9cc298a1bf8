//! Narrative generation through an OpenAI-compatible chat-completion API.
//!
//! Groq, OpenAI and a local Ollama all speak the same `/chat/completions`
//! protocol, so one [`ChatClient`] serves every provider; only the base URL,
//! key and default model differ. When nothing is configured, or the call
//! fails, [`generate_weekly_narrative`] returns a fixed fallback narrative.

pub mod client;
pub mod prompt;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::report::prompt::PromptInputs;

pub use client::ChatClient;

pub const FALLBACK_UNCONFIGURED: &str = "Weekly roundup unavailable (LLM not configured).";
pub const FALLBACK_FAILED: &str = "Weekly roundup unavailable (LLM request failed).";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("No LLM provider configured")]
    NotConfigured,

    #[error("Missing {env_var} environment variable")]
    MissingApiKey { env_var: &'static str },

    #[error("Unsupported LLM_PROVIDER: {0}")]
    UnsupportedProvider(String),

    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to encode prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("LLM API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("LLM returned no choices")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Groq,
    OpenAi,
    Ollama,
}

impl LlmProvider {
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "llama-3.1-8b-instant",
            LlmProvider::OpenAi => "gpt-4o-mini",
            LlmProvider::Ollama => "llama3.1",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "https://api.groq.com/openai/v1",
            LlmProvider::OpenAi => "https://api.openai.com/v1",
            LlmProvider::Ollama => "http://localhost:11434/v1",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LlmProvider::Groq => "groq",
            LlmProvider::OpenAi => "openai",
            LlmProvider::Ollama => "ollama",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LlmProvider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(LlmProvider::Groq),
            "openai" => Ok(LlmProvider::OpenAi),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(LlmError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Resolved connection settings for one provider.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl LlmSettings {
    /// Resolve `LLM_PROVIDER` (default groq) and its key, model and URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider: LlmProvider = lookup("LLM_PROVIDER")
            .unwrap_or_else(|| "groq".to_string())
            .parse()?;

        let (api_key, base_url) = match provider {
            LlmProvider::Groq => (
                lookup("GROQ_API_KEY").ok_or(LlmError::MissingApiKey {
                    env_var: "GROQ_API_KEY",
                })?,
                provider.default_base_url().to_string(),
            ),
            LlmProvider::OpenAi => (
                lookup("OPENAI_API_KEY").ok_or(LlmError::MissingApiKey {
                    env_var: "OPENAI_API_KEY",
                })?,
                provider.default_base_url().to_string(),
            ),
            // Ollama ignores the key but the protocol still wants one.
            LlmProvider::Ollama => (
                lookup("OLLAMA_API_KEY").unwrap_or_else(|| "ollama".to_string()),
                lookup("OLLAMA_BASE_URL")
                    .unwrap_or_else(|| provider.default_base_url().to_string()),
            ),
        };

        let model = lookup("LLM_MODEL").unwrap_or_else(|| provider.default_model().to_string());

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
        })
    }
}

/// The five narrative sections shown on the roundup page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub storylines: String,
    #[serde(default)]
    pub matchup_highlights: String,
    #[serde(default)]
    pub standings_blurb: String,
    #[serde(default)]
    pub incentives_blurb: String,
}

impl Narrative {
    /// A narrative carrying only an overview line.
    pub fn fallback(overview: &str) -> Self {
        Self {
            overview: overview.to_string(),
            ..Self::default()
        }
    }

    pub fn is_fallback(&self) -> bool {
        (self.overview == FALLBACK_UNCONFIGURED || self.overview == FALLBACK_FAILED)
            && self.storylines.is_empty()
            && self.matchup_highlights.is_empty()
            && self.standings_blurb.is_empty()
            && self.incentives_blurb.is_empty()
    }
}

/// Anything that can turn prompt inputs into a narrative.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, inputs: &PromptInputs) -> Result<Narrative, LlmError>;

    /// Label stored alongside generated narratives, e.g. `groq/llama3`.
    fn describe(&self) -> (String, String);
}

/// Generate a narrative, falling back to fixed text when the LLM is absent or fails.
pub async fn generate_weekly_narrative(
    generator: Option<&dyn NarrativeGenerator>,
    inputs: &PromptInputs,
) -> Narrative {
    let Some(generator) = generator else {
        return Narrative::fallback(FALLBACK_UNCONFIGURED);
    };

    match generator.generate(inputs).await {
        Ok(narrative) => {
            info!(week = inputs.week, "narrative generated");
            narrative
        }
        Err(e) => {
            warn!(error = %e, week = inputs.week, "narrative generation failed");
            Narrative::fallback(FALLBACK_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<LlmSettings, LlmError> {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        LlmSettings::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    struct FailingGenerator;

    #[async_trait]
    impl NarrativeGenerator for FailingGenerator {
        async fn generate(&self, _inputs: &PromptInputs) -> Result<Narrative, LlmError> {
            Err(LlmError::EmptyResponse)
        }

        fn describe(&self) -> (String, String) {
            ("test".to_string(), "failing".to_string())
        }
    }

    #[test]
    fn test_groq_is_default_and_needs_key() {
        match settings_from(&[]) {
            Err(LlmError::MissingApiKey { env_var }) => assert_eq!(env_var, "GROQ_API_KEY"),
            other => panic!("expected missing key, got {other:?}"),
        }

        let settings = settings_from(&[("GROQ_API_KEY", "gsk")]).unwrap();
        assert_eq!(settings.provider, LlmProvider::Groq);
        assert_eq!(settings.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(settings.model, "llama-3.1-8b-instant");
    }

    #[test]
    fn test_ollama_needs_no_key_and_honours_base_url() {
        let settings = settings_from(&[
            ("LLM_PROVIDER", "ollama"),
            ("OLLAMA_BASE_URL", "http://gpu-box:11434/v1"),
            ("LLM_MODEL", "mistral"),
        ])
        .unwrap();

        assert_eq!(settings.provider, LlmProvider::Ollama);
        assert_eq!(settings.api_key, "ollama");
        assert_eq!(settings.base_url, "http://gpu-box:11434/v1");
        assert_eq!(settings.model, "mistral");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(matches!(
            settings_from(&[("LLM_PROVIDER", "anthropic")]),
            Err(LlmError::UnsupportedProvider(p)) if p == "anthropic"
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_generator_uses_fallback() {
        let narrative = generate_weekly_narrative(None, &PromptInputs::default()).await;
        assert_eq!(narrative.overview, FALLBACK_UNCONFIGURED);
        assert!(narrative.storylines.is_empty());
        assert!(narrative.is_fallback());
    }

    #[tokio::test]
    async fn test_failing_generator_uses_fallback() {
        let narrative =
            generate_weekly_narrative(Some(&FailingGenerator), &PromptInputs::default()).await;
        assert_eq!(narrative.overview, FALLBACK_FAILED);
        assert!(narrative.is_fallback());
    }

    #[test]
    fn test_narrative_missing_keys_default_to_empty() {
        let narrative: Narrative =
            serde_json::from_str(r#"{"overview": "Chaos in week 3"}"#).unwrap();
        assert_eq!(narrative.overview, "Chaos in week 3");
        assert_eq!(narrative.incentives_blurb, "");
        assert!(!narrative.is_fallback());
    }
}
