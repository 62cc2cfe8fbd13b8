// HTTP client utilities
use crate::domain::error::ServiceError;
use reqwest::Client;

/// Create the shared HTTP client used by remote providers
///
/// No client-wide timeout: each call is bounded by its request context.
pub fn create_client() -> Result<Client, ServiceError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .user_agent(concat!("translator/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
