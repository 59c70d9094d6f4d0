//! Capability interface onto the messaging session layer.
//!
//! `CapabilityProvider` is implemented by the client app on top of its
//! connected session. Using a trait keeps the share pipeline decoupled from
//! the session internals and testable with mocks.

use std::future::Future;
use std::pin::Pin;

use linnet_protocol::addr::AccountAddress;
use linnet_protocol::types::{ErrorCondition, UploadComponent, UploadSlot};

/// Errors surfaced by a capability provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The account has no connected session.
    #[error("no active session for account")]
    NoSession,

    /// The remote server answered with a stanza-level error.
    #[error("remote error: {0}")]
    Remote(ErrorCondition),

    /// The remote server did not answer in time.
    #[error("request timed out")]
    Timeout,

    /// The response could not be parsed.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Session capabilities the share pipeline depends on.
pub trait CapabilityProvider: Send + Sync {
    /// Discovers upload components available to `account`, in server order.
    fn find_upload_components(
        &self,
        account: &AccountAddress,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<UploadComponent>, ProviderError>> + Send + '_>>;

    /// Requests a single-use upload slot from `component`.
    fn request_upload_slot(
        &self,
        component: &UploadComponent,
        filename: &str,
        size: u64,
        content_type: &str,
    ) -> Pin<Box<dyn Future<Output = Result<UploadSlot, ProviderError>> + Send + '_>>;
}
