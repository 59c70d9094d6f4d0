//! Share pipeline coordinator.
//!
//! Chains resolve → discover → select → negotiate → transfer for one
//! upload, maps every failure into [`ShareError`] at its origin, and emits
//! [`ShareEvent`]s along the way. One coordinator runs one transfer at a
//! time; concurrent calls on the same instance queue up.

use std::sync::{Arc, RwLock};

use linnet_protocol::addr::AccountAddress;
use linnet_protocol::types::{ErrorCondition, UploadProgress};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ShareError;
use crate::provider::{CapabilityProvider, ProviderError};
use crate::resource::{AccessGuard, FileResource};
use crate::selector::select_component;
use crate::slot::SlotNegotiator;
use crate::source::ByteSource;
use crate::transport::{ProgressCallback, UploadTransport};

/// One upload, fully characterized before the pipeline starts.
pub struct UploadRequest {
    pub filename: String,
    pub source: ByteSource,
    pub size: u64,
    pub content_type: String,
    /// Optional preview token echoed back on success for message embedding.
    pub preview: Option<String>,
}

/// Terminal success: what the caller embeds in the outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    /// Permanent URL the uploaded file can be fetched from.
    pub get_url: String,
    /// Preview token carried over from the request.
    pub preview: Option<String>,
}

/// Pipeline phase, tracked for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePhase {
    Idle,
    AccessAcquired,
    ComponentsDiscovered,
    ComponentSelected,
    SlotObtained,
    Transferring,
    Terminal,
}

/// Events emitted while a share attempt runs.
///
/// Delivered in order through the channel returned by
/// [`ShareCoordinator::take_events`]; progress strictly precedes the
/// terminal event.
#[derive(Debug, Clone)]
pub enum ShareEvent {
    /// A transfer started.
    Started {
        transfer: String,
        filename: String,
        size: u64,
    },
    /// Bytes went out.
    Progress {
        transfer: String,
        progress: UploadProgress,
    },
    /// The transfer finished; the URL is ready to embed.
    Completed { transfer: String, get_url: String },
    /// The transfer failed terminally.
    Failed { transfer: String, error: ShareError },
}

/// Orchestrates one upload at a time against a session and a transport.
pub struct ShareCoordinator {
    provider: Arc<dyn CapabilityProvider>,
    transport: Arc<dyn UploadTransport>,
    events_tx: mpsc::UnboundedSender<ShareEvent>,
    events_rx: std::sync::Mutex<Option<mpsc::UnboundedReceiver<ShareEvent>>>,
    busy: tokio::sync::Mutex<()>,
    phase: RwLock<SharePhase>,
}

impl ShareCoordinator {
    /// Creates a coordinator over the given session capabilities and transport.
    pub fn new(provider: Arc<dyn CapabilityProvider>, transport: Arc<dyn UploadTransport>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            transport,
            events_tx,
            events_rx: std::sync::Mutex::new(Some(events_rx)),
            busy: tokio::sync::Mutex::new(()),
            phase: RwLock::new(SharePhase::Idle),
        }
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<ShareEvent>> {
        self.events_rx.lock().unwrap().take()
    }

    /// Returns the current pipeline phase.
    pub fn phase(&self) -> SharePhase {
        *self.phase.read().unwrap()
    }

    /// Shares a picked file: resolves size and content type from the
    /// resource, then runs the pipeline.
    ///
    /// Access to the resource is acquired up front and released exactly
    /// once on every exit path.
    pub async fn share_file(
        &self,
        account: &AccountAddress,
        filename: &str,
        resource: &dyn FileResource,
    ) -> Result<SharedFile, ShareError> {
        let _busy = self.busy.lock().await;
        self.set_phase(SharePhase::Idle);
        let transfer = Uuid::new_v4().to_string();
        let outcome = self.resolve_and_run(&transfer, account, filename, resource).await;
        self.finish(&transfer, filename, &outcome);
        outcome
    }

    /// Shares bytes that are already characterized (size and content type
    /// known), e.g. encoder output from the photo path.
    pub async fn share_bytes(
        &self,
        account: &AccountAddress,
        request: UploadRequest,
    ) -> Result<SharedFile, ShareError> {
        let _busy = self.busy.lock().await;
        self.set_phase(SharePhase::Idle);
        let transfer = Uuid::new_v4().to_string();
        let filename = request.filename.clone();
        let outcome = self.run_pipeline(&transfer, account, request).await;
        self.finish(&transfer, &filename, &outcome);
        outcome
    }

    async fn resolve_and_run(
        &self,
        transfer: &str,
        account: &AccountAddress,
        filename: &str,
        resource: &dyn FileResource,
    ) -> Result<SharedFile, ShareError> {
        // Guard releases on every path out of this function.
        let _guard = AccessGuard::acquire(resource)?;
        self.set_phase(SharePhase::AccessAcquired);

        let size = resource.size().ok_or(ShareError::NoFileSize)?;
        let content_type = resolve_content_type(resource.type_tag().as_deref())?;
        let source = resource.open().await?;

        let request = UploadRequest {
            filename: filename.to_string(),
            source,
            size,
            content_type,
            preview: None,
        };
        self.run_pipeline(transfer, account, request).await
    }

    async fn run_pipeline(
        &self,
        transfer: &str,
        account: &AccountAddress,
        request: UploadRequest,
    ) -> Result<SharedFile, ShareError> {
        let UploadRequest {
            filename,
            source,
            size,
            content_type,
            preview,
        } = request;

        self.emit(ShareEvent::Started {
            transfer: transfer.to_string(),
            filename: filename.clone(),
            size,
        });

        debug!(transfer, account = %account, "discovering upload components");
        let components = self
            .provider
            .find_upload_components(account)
            .await
            .map_err(|e| {
                warn!(transfer, error = %e, "component discovery failed");
                map_discovery_error(e)
            })?;
        self.set_phase(SharePhase::ComponentsDiscovered);

        let component = select_component(&components, size)?.clone();
        self.set_phase(SharePhase::ComponentSelected);
        debug!(transfer, component = %component.address, "component selected");

        let negotiator = SlotNegotiator::new(self.provider.as_ref());
        let slot = negotiator
            .request_slot(&component, &filename, size, &content_type)
            .await?;
        self.set_phase(SharePhase::SlotObtained);

        let get_url = slot.get_url.clone();
        self.set_phase(SharePhase::Transferring);
        self.transport
            .upload(
                slot,
                source,
                size,
                &content_type,
                Some(self.progress_callback(transfer)),
            )
            .await?;

        Ok(SharedFile { get_url, preview })
    }

    fn progress_callback(&self, transfer: &str) -> ProgressCallback {
        let tx = self.events_tx.clone();
        let transfer = transfer.to_string();
        Box::new(move |progress| {
            let _ = tx.send(ShareEvent::Progress {
                transfer: transfer.clone(),
                progress,
            });
        })
    }

    fn finish(&self, transfer: &str, filename: &str, outcome: &Result<SharedFile, ShareError>) {
        self.set_phase(SharePhase::Terminal);
        match outcome {
            Ok(shared) => {
                info!(transfer, filename, url = %shared.get_url, "share completed");
                self.emit(ShareEvent::Completed {
                    transfer: transfer.to_string(),
                    get_url: shared.get_url.clone(),
                });
            }
            Err(e) => {
                warn!(transfer, filename, error = %e, "share failed");
                self.emit(ShareEvent::Failed {
                    transfer: transfer.to_string(),
                    error: *e,
                });
            }
        }
    }

    fn emit(&self, event: ShareEvent) {
        // The receiver may have been dropped; events are best-effort.
        let _ = self.events_tx.send(event);
    }

    fn set_phase(&self, phase: SharePhase) {
        debug!(?phase, "share phase");
        *self.phase.write().unwrap() = phase;
    }
}

/// Maps a discovery failure into the share taxonomy.
///
/// `item-not-found` means the server answered but lacks the feature;
/// everything else (no session, timeouts, other conditions) is opaque to
/// the user.
fn map_discovery_error(e: ProviderError) -> ShareError {
    match e {
        ProviderError::Remote(ErrorCondition::ItemNotFound) => ShareError::NotSupported,
        _ => ShareError::Unknown,
    }
}

/// Resolves a resource type tag to a MIME content type.
///
/// No tag at all falls back to `application/octet-stream`; a tag with no
/// known MIME mapping is a distinct failure.
fn resolve_content_type(tag: Option<&str>) -> Result<String, ShareError> {
    match tag {
        None => Ok(mime::APPLICATION_OCTET_STREAM.essence_str().to_string()),
        Some(tag) => mime_guess::from_ext(tag)
            .first()
            .map(|m| m.essence_str().to_string())
            .ok_or(ShareError::NoMimeType),
    }
}
