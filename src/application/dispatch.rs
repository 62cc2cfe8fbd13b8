use crate::application::registry::ProviderRegistry;
use crate::domain::context::RequestContext;
use crate::domain::error::TranslateError;
use crate::domain::model::{TranslationRequest, TranslationResponse};
use std::collections::BTreeSet;
use tracing::Instrument;
use uuid::Uuid;

/// Single entry point for translations.
///
/// Validates the request, resolves the provider and runs it under the
/// caller's context. No retries and no timeout of its own: the deadline,
/// if any, comes with `ctx`.
#[derive(Debug)]
pub struct DispatchService {
    registry: ProviderRegistry,
}

impl DispatchService {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub async fn translate(
        &self,
        ctx: &RequestContext,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError> {
        // 1. Validate (handlers check too, but don't trust them)
        if let Some(reason) = request.validation_error() {
            return Err(TranslateError::InvalidRequest(reason.to_string()));
        }

        // 2. Resolve
        let provider =
            self.registry
                .resolve(&request.model)
                .ok_or_else(|| TranslateError::UnsupportedModel {
                    model: request.model.clone(),
                })?;

        // 3. Invoke under the caller's context
        let span = tracing::info_span!(
            "translate",
            request_id = %Uuid::new_v4(),
            model = %request.model
        );
        async move {
            tracing::debug!(chars = request.text.chars().count(), "dispatching");

            // Dropping the provider future on cancellation aborts its I/O.
            let outcome = tokio::select! {
                biased;
                cause = ctx.cancelled() => Err(cause),
                result = provider.translate(ctx, request) => result,
            };

            match outcome {
                Ok(response) => {
                    tracing::debug!("translation complete");
                    Ok(response)
                }
                Err(cause) => {
                    tracing::warn!(error = %cause, "translation failed");
                    Err(TranslateError::ProviderFailure {
                        model: request.model.clone(),
                        cause,
                    })
                }
            }
        }
        .instrument(span)
        .await
    }

    pub fn is_supported(&self, model: &str) -> bool {
        self.registry.contains(model)
    }

    pub fn list_ids(&self) -> BTreeSet<String> {
        self.registry.list_ids()
    }
}
