//! Upload component selection.

use linnet_protocol::types::UploadComponent;

use crate::error::ShareError;

/// Picks the upload component for a file of `required_size` bytes.
///
/// First-fit over discovery order: a candidate qualifies if it declares no
/// size limit or its limit covers `required_size`. Later candidates are
/// never preferred, even with a larger declared limit.
///
/// Fails with [`ShareError::NotSupported`] when no components were
/// discovered at all, and [`ShareError::FileTooBig`] when components exist
/// but none accepts the file.
pub fn select_component(
    components: &[UploadComponent],
    required_size: u64,
) -> Result<&UploadComponent, ShareError> {
    if components.is_empty() {
        return Err(ShareError::NotSupported);
    }
    components
        .iter()
        .find(|c| c.accepts(required_size))
        .ok_or(ShareError::FileTooBig)
}
