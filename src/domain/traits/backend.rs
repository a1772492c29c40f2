use async_trait::async_trait;

use crate::application::errors::RelayError;
use crate::domain::entities::OutboundRequest;

/// A successful (2xx) backend response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub status_text: String,
}

/// The fixed endpoint invocations are relayed to
#[async_trait]
pub trait Backend: Send + Sync {
    /// Issue exactly one request. Non-2xx responses are errors.
    async fn send(&self, request: &OutboundRequest) -> Result<BackendResponse, RelayError>;
}
