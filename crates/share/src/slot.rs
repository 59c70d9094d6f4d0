//! Upload slot negotiation.

use linnet_protocol::types::{ErrorCondition, UploadComponent, UploadSlot};
use tracing::{debug, warn};

use crate::error::ShareError;
use crate::provider::{CapabilityProvider, ProviderError};

/// Negotiates a single-use upload slot with a chosen component.
pub struct SlotNegotiator<'a> {
    provider: &'a dyn CapabilityProvider,
}

impl<'a> SlotNegotiator<'a> {
    /// Creates a negotiator over the given session capabilities.
    pub fn new(provider: &'a dyn CapabilityProvider) -> Self {
        Self { provider }
    }

    /// Requests a slot for one file.
    ///
    /// A remote `item-not-found` answer means the component advertised the
    /// feature earlier but no longer serves it and maps to
    /// [`ShareError::NotSupported`]; every other failure maps to
    /// [`ShareError::Unknown`].
    pub async fn request_slot(
        &self,
        component: &UploadComponent,
        filename: &str,
        size: u64,
        content_type: &str,
    ) -> Result<UploadSlot, ShareError> {
        let slot = self
            .provider
            .request_upload_slot(component, filename, size, content_type)
            .await
            .map_err(|e| {
                warn!(component = %component.address, error = %e, "slot request failed");
                match e {
                    ProviderError::Remote(ErrorCondition::ItemNotFound) => ShareError::NotSupported,
                    _ => ShareError::Unknown,
                }
            })?;

        debug!(
            component = %component.address,
            put_url = %slot.put_url,
            get_url = %slot.get_url,
            headers = slot.put_headers.len(),
            "slot negotiated"
        );
        Ok(slot)
    }
}
