//! HTTP surface: form flow, JSON API and static files.
//!
//! Handlers own the per-request deadline. Dropping a handler future (client
//! disconnect) drops the in-flight provider call with it.

use crate::domain::context::RequestContext;
use crate::domain::error::{ServiceError, TranslateError};
use crate::domain::model::{TranslationRequest, TranslationResponse};
use crate::presentation::html;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build the HTTP router for the service.
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/translate", post(translate_form))
        .route("/api/translate", post(translate_api))
        .route("/api/models", get(list_models))
        .route("/healthz", get(health))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<(), ServiceError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn status_of(err: &TranslateError) -> StatusCode {
    StatusCode::from_u16(err.status_hint()).unwrap_or(StatusCode::BAD_GATEWAY)
}

async fn run_translation(
    state: &AppState,
    request: &TranslationRequest,
) -> Result<TranslationResponse, TranslateError> {
    if let Some(reason) = request.validation_error() {
        return Err(TranslateError::InvalidRequest(reason.to_string()));
    }

    let ctx = RequestContext::new().with_timeout(state.request_timeout);
    let result = state.dispatch.translate(&ctx, request).await;
    if let Err(e) = &result {
        if e.is_client_error() {
            tracing::debug!(error = %e, "rejected translation request");
        }
    }
    result
}

async fn home(State(state): State<AppState>) -> Html<String> {
    Html(html::render_home(&state.dispatch.list_ids()))
}

async fn translate_form(
    State(state): State<AppState>,
    form: Result<Form<TranslationRequest>, FormRejection>,
) -> Response {
    let Form(request) = match form {
        Ok(form) => form,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Html(html::render_error(&rejection.body_text())),
            )
                .into_response()
        }
    };

    match run_translation(&state, &request).await {
        Ok(response) => Html(html::render_result(&response)).into_response(),
        Err(e) => (
            status_of(&e),
            Html(html::render_error(&format!("Translation failed: {}", e))),
        )
            .into_response(),
    }
}

/// JSON error body: `{"error": "..."}`
struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<TranslateError> for ApiError {
    fn from(err: TranslateError) -> Self {
        Self {
            status: status_of(&err),
            message: err.to_string(),
        }
    }
}

async fn translate_api(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Invalid JSON request: {}", rejection.body_text()),
    })?;

    Ok(Json(run_translation(&state, &request).await?))
}

async fn list_models(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "models": state.dispatch.list_ids() }))
}

/// Liveness probe endpoint.
async fn health() -> &'static str {
    "OK"
}

/// Wait for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
