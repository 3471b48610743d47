//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the real diagnosis backend
//! - `mock`: canned in-process backend
//! - `sanitize`: PII filtering for logs

pub mod http;
pub mod mock;
pub mod sanitize;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::ports::DiagnosisApi;

pub use http::HttpDiagnosisApi;
pub use mock::MockDiagnosisApi;

/// Build the backend selected by the configuration.
///
/// # Errors
/// Returns error if the HTTP client cannot be constructed.
pub fn connect(config: &ClientConfig) -> crate::Result<Arc<dyn DiagnosisApi>> {
    if config.mock {
        tracing::info!("Using built-in mock diagnosis backend");
        return Ok(Arc::new(MockDiagnosisApi::new()));
    }

    tracing::info!(url = %config.api_url, timeout_secs = config.timeout_secs, "Using HTTP diagnosis backend");
    let api = HttpDiagnosisApi::new(&config.api_url, config.timeout_secs)?;
    Ok(Arc::new(api))
}
