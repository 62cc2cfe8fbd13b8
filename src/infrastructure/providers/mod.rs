pub mod anthropic;
pub mod mock;
pub mod openai;

use crate::application::registry::ProviderRegistry;
use crate::domain::error::ProviderError;
use crate::infrastructure::config::Config;
use anthropic::AnthropicProvider;
use mock::MockProvider;
use openai::OpenAiProvider;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::sync::Arc;

pub(crate) const SYSTEM_PROMPT: &str = "You are a translation engine. Translate the user's text \
into English. If it is already English, translate it into Chinese. Reply with the translation only.";

/// Identifier of the reference echo provider
pub const ECHO_MODEL: &str = "echo";

// (id, mock label, remote model name)
const OPENAI_MODELS: [(&str, &str, &str); 2] =
    [("gpt-3.5", "GPT-3.5", "gpt-3.5-turbo"), ("gpt-4", "GPT-4", "gpt-4")];
const CLAUDE_MODEL: (&str, &str, &str) = ("claude", "Claude", "claude-3-5-haiku-latest");
const LLAMA_MODEL: (&str, &str) = ("llama", "Llama");

/// Build the startup registry.
///
/// Every model gets a mock binding first; configured API keys then replace
/// the matching bindings with real backends.
pub fn build_registry(config: &Config, client: &Client) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    for (id, label, _) in OPENAI_MODELS {
        registry.register(id, Arc::new(MockProvider::new(label)));
    }
    registry.register(CLAUDE_MODEL.0, Arc::new(MockProvider::new(CLAUDE_MODEL.1)));
    registry.register(LLAMA_MODEL.0, Arc::new(MockProvider::new(LLAMA_MODEL.1)));
    registry.register(ECHO_MODEL, Arc::new(MockProvider::new("echoed")));

    if let Some(key) = config.openai_key() {
        for (id, _, model) in OPENAI_MODELS {
            registry.register(
                id,
                Arc::new(OpenAiProvider::new(
                    client.clone(),
                    key,
                    config.llm.openai_base_url.as_str(),
                    model,
                )),
            );
        }
        tracing::info!("OpenAI backend enabled");
    }

    if let Some(key) = config.anthropic_key() {
        registry.register(
            CLAUDE_MODEL.0,
            Arc::new(AnthropicProvider::new(
                client.clone(),
                key,
                config.llm.anthropic_base_url.as_str(),
                CLAUDE_MODEL.2,
            )),
        );
        tracing::info!("Anthropic backend enabled");
    }

    registry
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Turn a non-2xx backend response into `ProviderError::Rejected`
pub(crate) async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Rejected {
        status: status.as_u16(),
        message: rejection_message(&body, status.canonical_reason()),
    })
}

fn rejection_message(body: &str, reason: Option<&str>) -> String {
    // Both OpenAI and Anthropic wrap errors as {"error": {"message": ...}}
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => reason.unwrap_or("Unknown error").to_string(),
    }
}
