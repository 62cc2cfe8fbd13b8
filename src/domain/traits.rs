use crate::domain::context::RequestContext;
use crate::domain::error::ProviderError;
use crate::domain::model::{TranslationRequest, TranslationResponse};
use async_trait::async_trait;

/// Trait for translation providers
///
/// Every backend (mock, OpenAI, Anthropic, ...) implements this single
/// operation; the dispatch service is written once against it.
/// Implementations should observe `ctx` so that in-flight work stops when
/// the caller goes away.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Translate the request text
    async fn translate(
        &self,
        ctx: &RequestContext,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, ProviderError>;
}
