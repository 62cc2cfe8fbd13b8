use super::{check_status, SYSTEM_PROMPT};
use crate::domain::context::RequestContext;
use crate::domain::error::ProviderError;
use crate::domain::model::{TranslationRequest, TranslationResponse};
use crate::domain::traits::Provider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

// Chat Completions API structures
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions backend
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn translate(
        &self,
        ctx: &RequestContext,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Misconfigured(
                "OpenAI API key not configured".to_string(),
            ));
        }
        ctx.check()?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &request.text,
                },
            ],
            temperature: 0.0,
        };

        let mut builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(remaining) = ctx.remaining() {
            builder = builder.timeout(remaining);
        }

        let response = check_status(builder.send().await?).await?;
        let completion = response.json::<ChatResponse>().await?;

        Ok(TranslationResponse::new(
            request,
            extract_content(completion)?,
        ))
    }
}

fn extract_content(completion: ChatResponse) -> Result<String, ProviderError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ProviderError::Internal("empty completion".to_string()))
}
