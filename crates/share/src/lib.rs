//! Out-of-band file sharing for the Linnet messaging client.
//!
//! Given a local file or an in-memory buffer, the pipeline discovers a
//! server-side upload component for the account, negotiates a single-use
//! upload slot, streams the bytes to the slot's PUT URL, and returns the
//! retrievable GET URL for embedding in an outgoing message.
//!
//! The session layer is abstracted behind [`CapabilityProvider`]; the HTTP
//! leg behind [`UploadTransport`]. [`ShareCoordinator`] chains the two and
//! maps every failure into the closed [`ShareError`] taxonomy.

mod coordinator;
mod error;
mod provider;
mod resource;
mod selector;
mod settings;
mod slot;
mod source;
mod transport;

pub use coordinator::{ShareCoordinator, ShareEvent, SharePhase, SharedFile, UploadRequest};
pub use error::ShareError;
pub use provider::{CapabilityProvider, ProviderError};
pub use resource::{FileResource, LocalFile};
pub use selector::select_component;
pub use settings::ShareSettings;
pub use slot::SlotNegotiator;
pub use source::ByteSource;
pub use transport::{HttpTransport, ProgressCallback, UploadTransport};
