// Deterministic provider used for the default model set and for tests
use crate::domain::context::RequestContext;
use crate::domain::error::ProviderError;
use crate::domain::model::{TranslationRequest, TranslationResponse};
use crate::domain::traits::Provider;
use async_trait::async_trait;
use std::time::Duration;

/// Echo-style provider: `translated` is the input annotated with `label`.
#[derive(Debug, Clone)]
pub struct MockProvider {
    label: String,
    latency: Option<Duration>,
}

impl MockProvider {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            latency: None,
        }
    }

    /// Simulates a slow backend. The delay is cut short when `ctx` ends.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate(
        &self,
        ctx: &RequestContext,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, ProviderError> {
        ctx.check()?;

        if let Some(latency) = self.latency {
            tokio::select! {
                cause = ctx.cancelled() => return Err(cause),
                _ = tokio::time::sleep(latency) => {}
            }
        }

        Ok(TranslationResponse::new(
            request,
            format!("{} [{}]", request.text, self.label),
        ))
    }
}
