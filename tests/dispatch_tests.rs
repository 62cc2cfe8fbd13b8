//! 调度服务测试

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use translator_service::infrastructure::providers::mock::MockProvider;
use translator_service::{
    DispatchService, Provider, ProviderError, ProviderRegistry, RequestContext, TranslateError,
    TranslationRequest, TranslationResponse,
};

/// Counts invocations and answers like the mock.
#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl Provider for CountingProvider {
    async fn translate(
        &self,
        _ctx: &RequestContext,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TranslationResponse::new(request, request.text.to_uppercase()))
    }
}

/// Blocks until released and never looks at the context.
struct BlockingProvider {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl Provider for BlockingProvider {
    async fn translate(
        &self,
        _ctx: &RequestContext,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, ProviderError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(TranslationResponse::new(request, "released"))
    }
}

struct RejectingProvider;

#[async_trait]
impl Provider for RejectingProvider {
    async fn translate(
        &self,
        _ctx: &RequestContext,
        _request: &TranslationRequest,
    ) -> Result<TranslationResponse, ProviderError> {
        Err(ProviderError::Rejected {
            status: 429,
            message: "rate limited".to_string(),
        })
    }
}

fn echo_registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register("echo", Arc::new(MockProvider::new("echoed")));
    registry
}

#[tokio::test]
async fn test_echo_end_to_end() {
    let service = DispatchService::new(echo_registry());

    let resp = service
        .translate(
            &RequestContext::new(),
            &TranslationRequest::new("hello", "echo"),
        )
        .await
        .unwrap();

    assert_eq!(resp.original, "hello");
    assert_eq!(resp.translated, "hello [echoed]");
    assert_eq!(resp.model, "echo");
}

#[tokio::test]
async fn test_unknown_model_is_unsupported() {
    let counter = Arc::new(CountingProvider::default());
    let mut registry = echo_registry();
    registry.register("counted", counter.clone());
    let service = DispatchService::new(registry);

    let err = service
        .translate(
            &RequestContext::new(),
            &TranslationRequest::new("hello", "nonexistent"),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TranslateError::UnsupportedModel {
            model: "nonexistent".to_string()
        }
    );
    assert!(err.is_client_error());
    assert_eq!(counter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_fields_are_invalid() {
    let counter = Arc::new(CountingProvider::default());
    let mut registry = ProviderRegistry::new();
    registry.register("", counter.clone());
    registry.register("echo", counter.clone());
    let service = DispatchService::new(registry);
    let ctx = RequestContext::new();

    for req in [
        TranslationRequest::new("", "echo"),
        TranslationRequest::new("hello", ""),
        TranslationRequest::new("", ""),
    ] {
        let err = service.translate(&ctx, &req).await.unwrap_err();
        assert!(
            matches!(err, TranslateError::InvalidRequest(_)),
            "{:?} gave {:?}",
            req,
            err
        );
    }

    // Even a provider bound to "" is never reached
    assert_eq!(counter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_every_registered_model_translates() {
    let mut registry = ProviderRegistry::new();
    for id in ["gpt-3.5", "gpt-4", "claude", "llama", "echo"] {
        registry.register(id, Arc::new(MockProvider::new(id)));
    }
    let service = DispatchService::new(registry);
    let ctx = RequestContext::new();

    for id in service.list_ids() {
        assert!(service.is_supported(&id));
        let resp = service
            .translate(&ctx, &TranslationRequest::new("any text", id.as_str()))
            .await
            .unwrap();
        assert_eq!(resp.model, id);
        assert_eq!(resp.translated, format!("any text [{}]", id));
    }
}

#[tokio::test]
async fn test_overwrite_replaces_binding() {
    let counter = Arc::new(CountingProvider::default());
    let mut registry = echo_registry();
    registry.register("echo", counter.clone());
    let service = DispatchService::new(registry);

    let resp = service
        .translate(
            &RequestContext::new(),
            &TranslationRequest::new("hello", "echo"),
        )
        .await
        .unwrap();

    assert_eq!(resp.translated, "HELLO");
    assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancel_unblocks_stuck_provider() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let mut registry = ProviderRegistry::new();
    registry.register(
        "stuck",
        Arc::new(BlockingProvider {
            started: started.clone(),
            release: release.clone(),
        }),
    );
    let service = Arc::new(DispatchService::new(registry));
    let ctx = RequestContext::new();

    let task = {
        let service = service.clone();
        let ctx = ctx.clone();
        tokio::spawn(async move {
            service
                .translate(&ctx, &TranslationRequest::new("hello", "stuck"))
                .await
        })
    };

    started.notified().await;
    ctx.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("translate hung after cancellation")
        .unwrap();

    match result {
        Err(TranslateError::ProviderFailure { model, cause }) => {
            assert_eq!(model, "stuck");
            assert!(cause.is_cancellation());
        }
        other => panic!("expected cancellation failure, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_deadline_surfaces_as_timeout() {
    let mut registry = ProviderRegistry::new();
    registry.register(
        "stuck",
        Arc::new(BlockingProvider {
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }),
    );
    let service = DispatchService::new(registry);
    let ctx = RequestContext::new().with_timeout(Duration::from_secs(30));

    let err = service
        .translate(&ctx, &TranslationRequest::new("hello", "stuck"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TranslateError::ProviderFailure {
            model: "stuck".to_string(),
            cause: ProviderError::DeadlineExceeded,
        }
    );
    assert_eq!(err.status_hint(), 504);
}

#[tokio::test]
async fn test_backend_rejection_is_wrapped() {
    let mut registry = ProviderRegistry::new();
    registry.register("flaky", Arc::new(RejectingProvider));
    let service = DispatchService::new(registry);

    let err = service
        .translate(
            &RequestContext::new(),
            &TranslationRequest::new("hello", "flaky"),
        )
        .await
        .unwrap_err();

    match err {
        TranslateError::ProviderFailure { ref model, ref cause } => {
            assert_eq!(model, "flaky");
            assert!(!cause.is_timeout());
            assert!(!cause.is_cancellation());
            assert_eq!(
                *cause,
                ProviderError::Rejected {
                    status: 429,
                    message: "rate limited".to_string()
                }
            );
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(err.status_hint(), 502);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_are_independent() {
    let service = Arc::new(DispatchService::new(echo_registry()));

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                let text = format!("line {}", i);
                let resp = service
                    .translate(
                        &RequestContext::new().with_timeout(Duration::from_secs(30)),
                        &TranslationRequest::new(text.as_str(), "echo"),
                    )
                    .await
                    .unwrap();
                assert_eq!(resp.translated, format!("{} [echoed]", text));
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
}
