//! Persisted sharing preferences.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// User preferences for the sharing feature.
///
/// Read once by the app layer to decide whether sharing is offered at all;
/// the transfer pipeline itself never consults it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSettings {
    /// Whether sharing via upload is enabled.
    #[serde(default = "default_true")]
    pub sharing_via_upload: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            sharing_via_upload: true,
        }
    }
}

impl ShareSettings {
    /// Loads settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Saves settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, data)
    }
}
