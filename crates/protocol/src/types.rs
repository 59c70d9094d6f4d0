use serde::{Deserialize, Serialize};

use crate::addr::ComponentAddress;

/// A server-side upload component discovered for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadComponent {
    pub address: ComponentAddress,
    /// Maximum accepted file size in bytes. `None` means no declared limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
}

impl UploadComponent {
    /// Returns `true` if this component accepts a file of `size` bytes.
    pub fn accepts(&self, size: u64) -> bool {
        match self.max_size {
            Some(max) => max >= size,
            None => true,
        }
    }
}

/// A single-use upload authorization issued by a component.
///
/// Consumed exactly once by the transport; never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSlot {
    /// URL the file body is PUT to.
    pub put_url: String,
    /// Headers the component requires on the PUT request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub put_headers: Vec<(String, String)>,
    /// Permanent URL the uploaded file can be fetched from.
    pub get_url: String,
}

/// Transfer progress in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub bytes_total: u64,
}

impl UploadProgress {
    /// Returns progress as a fraction in `0.0..=1.0`.
    ///
    /// A zero-byte transfer reports 1.0 once complete.
    pub fn fraction(&self) -> f64 {
        if self.bytes_total == 0 {
            return 1.0;
        }
        self.bytes_sent as f64 / self.bytes_total as f64
    }

    /// Returns `true` once every byte has been sent.
    pub fn is_complete(&self) -> bool {
        self.bytes_sent >= self.bytes_total
    }
}

/// Stanza-level error conditions reported by the remote server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCondition {
    ItemNotFound,
    FeatureNotImplemented,
    Forbidden,
    NotAcceptable,
    ResourceConstraint,
    ServiceUnavailable,
    InternalServerError,
    RemoteServerTimeout,
    UndefinedCondition,
}

impl ErrorCondition {
    /// Returns the wire name of the condition (`item-not-found` etc.).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCondition::ItemNotFound => "item-not-found",
            ErrorCondition::FeatureNotImplemented => "feature-not-implemented",
            ErrorCondition::Forbidden => "forbidden",
            ErrorCondition::NotAcceptable => "not-acceptable",
            ErrorCondition::ResourceConstraint => "resource-constraint",
            ErrorCondition::ServiceUnavailable => "service-unavailable",
            ErrorCondition::InternalServerError => "internal-server-error",
            ErrorCondition::RemoteServerTimeout => "remote-server-timeout",
            ErrorCondition::UndefinedCondition => "undefined-condition",
        }
    }
}

impl std::fmt::Display for ErrorCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
