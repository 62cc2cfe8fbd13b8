use super::{check_status, SYSTEM_PROMPT};
use crate::domain::context::RequestContext;
use crate::domain::error::ProviderError;
use crate::domain::model::{TranslationRequest, TranslationResponse};
use crate::domain::traits::Provider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Serialize, Debug)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize, Debug)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize, Debug)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Anthropic Messages API backend
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
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
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn translate(
        &self,
        ctx: &RequestContext,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Misconfigured(
                "Anthropic API key not configured".to_string(),
            ));
        }
        ctx.check()?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: &request.text,
            }],
        };

        let mut builder = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", API_VERSION)
            .json(&body);
        if let Some(remaining) = ctx.remaining() {
            builder = builder.timeout(remaining);
        }

        let response = check_status(builder.send().await?).await?;
        let message = response.json::<MessagesResponse>().await?;

        Ok(TranslationResponse::new(request, extract_text(message)?))
    }
}

fn extract_text(message: MessagesResponse) -> Result<String, ProviderError> {
    message
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ProviderError::Internal("response carried no text block".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_text_block() {
        let message: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"thinking","thinking":"..."},
                           {"type":"text","text":"Bonjour"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(message).unwrap(), "Bonjour");
    }

    #[test]
    fn no_text_block_is_internal_error() {
        let message: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(matches!(
            extract_text(message),
            Err(ProviderError::Internal(_))
        ));
    }

    #[test]
    fn request_body_carries_system_prompt() {
        let body = MessagesRequest {
            model: "claude-3-5-haiku-latest",
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["system"], SYSTEM_PROMPT);
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["messages"][0]["content"], "hello");
    }
}
