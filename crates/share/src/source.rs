//! Byte sources for an upload.

use std::io::Cursor;
use std::path::Path;

use tokio::io::AsyncRead;

/// The bytes of one upload, consumed exactly once by the transport.
///
/// `Memory` serves the photo-share path, where the payload comes out of an
/// encoder rather than a file on disk.
pub enum ByteSource {
    /// An opened file, streamed from disk.
    File(tokio::fs::File),
    /// An in-memory buffer.
    Memory(Cursor<Vec<u8>>),
}

impl ByteSource {
    /// Opens `path` for streaming.
    pub async fn open(path: &Path) -> std::io::Result<Self> {
        Ok(Self::File(tokio::fs::File::open(path).await?))
    }

    /// Wraps an in-memory buffer.
    pub fn memory(data: Vec<u8>) -> Self {
        Self::Memory(Cursor::new(data))
    }

    /// Converts into a boxed async reader for the transport body.
    pub fn into_reader(self) -> Box<dyn AsyncRead + Send + Unpin> {
        match self {
            Self::File(f) => Box::new(f),
            Self::Memory(c) => Box::new(c),
        }
    }
}

impl std::fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(_) => f.write_str("ByteSource::File"),
            Self::Memory(c) => write!(f, "ByteSource::Memory({} bytes)", c.get_ref().len()),
        }
    }
}
