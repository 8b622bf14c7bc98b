//! Token refresher trait.
//!
//! A refresher turns one bearer credential into another by calling an
//! identity provider's token endpoint.

use async_trait::async_trait;
use guard_core::{AuthResponse, RefreshError};
use std::sync::Arc;

/// Exchanges an input token for a new one.
///
/// Implementations hold no per-call state and may be shared across tasks.
/// Each call to [`refresh`](TokenRefresher::refresh) performs exactly one
/// request; failures are returned, never retried.
#[async_trait]
pub trait TokenRefresher: Send + Sync + std::fmt::Debug {
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Exchange `token` for a new credential.
    async fn refresh(&self, token: &str) -> Result<AuthResponse, RefreshError>;
}

/// Type alias for shared refreshers.
pub type BoxedRefresher = Arc<dyn TokenRefresher>;
