//! Translation service: a provider registry and dispatch core behind a
//! form-based web flow and a JSON API.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use application::dispatch::DispatchService;
pub use application::registry::ProviderRegistry;
pub use domain::context::RequestContext;
pub use domain::error::{ProviderError, ServiceError, TranslateError};
pub use domain::model::{TranslationRequest, TranslationResponse};
pub use domain::traits::Provider;
