use serde::{Deserialize, Serialize};

use crate::types::{ErrorCondition, UploadSlot};

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Asks an upload component for a single-use slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub filename: String,
    pub size: u64,
    pub content_type: String,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// One header the component requires on the PUT request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotHeader {
    pub name: String,
    pub value: String,
}

/// Successful slot-request response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub put_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub put_headers: Vec<SlotHeader>,
    pub get_url: String,
}

impl SlotResponse {
    /// Converts the wire payload into an [`UploadSlot`].
    pub fn into_slot(self) -> UploadSlot {
        UploadSlot {
            put_url: self.put_url,
            put_headers: self
                .put_headers
                .into_iter()
                .map(|h| (h.name, h.value))
                .collect(),
            get_url: self.get_url,
        }
    }
}

/// Failed slot-request or discovery response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub condition: ErrorCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
