//! Shared data and wire types for Linnet's out-of-band file sharing.
//!
//! The session layer speaks these types when discovering upload components
//! and negotiating slots; the share pipeline consumes them.

pub mod addr;
pub mod messages;
pub mod types;

pub use addr::{AccountAddress, AddrError, ComponentAddress};
pub use types::{ErrorCondition, UploadComponent, UploadProgress, UploadSlot};
