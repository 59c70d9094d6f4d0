//! Scoped read access to shareable resources.
//!
//! `FileResource` models the platform's hand-out of a file the user picked:
//! access must be acquired before metadata or bytes can be read, and
//! released exactly once when the share attempt terminates, successfully or
//! not. [`AccessGuard`] ties the release to scope exit.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::error::ShareError;
use crate::source::ByteSource;

/// A resource the user picked for sharing.
pub trait FileResource: Send + Sync {
    /// Acquires read access.
    fn acquire(&self) -> Result<(), ShareError>;

    /// Releases access acquired with [`acquire`](Self::acquire).
    fn release(&self);

    /// File size in bytes from metadata, if available.
    fn size(&self) -> Option<u64>;

    /// Type tag for MIME resolution (the file extension), if any.
    fn type_tag(&self) -> Option<String>;

    /// Opens the byte stream.
    fn open(&self) -> Pin<Box<dyn Future<Output = Result<ByteSource, ShareError>> + Send + '_>>;
}

/// Holds acquired access and releases it exactly once on drop.
pub(crate) struct AccessGuard<'a> {
    resource: &'a dyn FileResource,
}

impl<'a> AccessGuard<'a> {
    /// Acquires access to `resource`, failing with [`ShareError::NoAccess`].
    pub(crate) fn acquire(resource: &'a dyn FileResource) -> Result<Self, ShareError> {
        resource.acquire()?;
        Ok(Self { resource })
    }
}

impl Drop for AccessGuard<'_> {
    fn drop(&mut self) {
        self.resource.release();
    }
}

/// A plain local file addressed by path.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    /// Creates a resource for `path`. Nothing is checked until acquisition.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file name component, if the path has one.
    pub fn filename(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

impl FileResource for LocalFile {
    fn acquire(&self) -> Result<(), ShareError> {
        // Opening read-only proves access; the handle itself is not kept.
        std::fs::File::open(&self.path).map_err(|_| ShareError::NoAccess)?;
        Ok(())
    }

    fn release(&self) {}

    fn size(&self) -> Option<u64> {
        let meta = std::fs::metadata(&self.path).ok()?;
        meta.is_file().then(|| meta.len())
    }

    fn type_tag(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    fn open(&self) -> Pin<Box<dyn Future<Output = Result<ByteSource, ShareError>> + Send + '_>> {
        Box::pin(async {
            ByteSource::open(&self.path)
                .await
                .map_err(|_| ShareError::NoAccess)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn local_file_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Photo.JPG");
        std::fs::write(&path, b"12345").unwrap();

        let file = LocalFile::new(&path);
        file.acquire().unwrap();
        assert_eq!(file.size(), Some(5));
        assert_eq!(file.type_tag().as_deref(), Some("jpg"));
        assert_eq!(file.filename().as_deref(), Some("Photo.JPG"));
        file.release();
    }

    #[test]
    fn local_file_missing_denies_access() {
        let dir = tempfile::tempdir().unwrap();
        let file = LocalFile::new(dir.path().join("absent.bin"));
        assert_eq!(file.acquire(), Err(ShareError::NoAccess));
        assert_eq!(file.size(), None);
    }

    #[test]
    fn local_file_without_extension_has_no_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README");
        std::fs::write(&path, b"x").unwrap();
        assert_eq!(LocalFile::new(&path).type_tag(), None);
    }

    struct CountingResource {
        acquired: AtomicU32,
        released: AtomicU32,
        deny: bool,
    }

    impl CountingResource {
        fn new(deny: bool) -> Self {
            Self {
                acquired: AtomicU32::new(0),
                released: AtomicU32::new(0),
                deny,
            }
        }
    }

    impl FileResource for CountingResource {
        fn acquire(&self) -> Result<(), ShareError> {
            if self.deny {
                return Err(ShareError::NoAccess);
            }
            self.acquired.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn release(&self) {
            let prev = self.released.fetch_add(1, Ordering::SeqCst);
            assert_eq!(prev, 0, "resource released more than once");
        }

        fn size(&self) -> Option<u64> {
            Some(1)
        }

        fn type_tag(&self) -> Option<String> {
            None
        }

        fn open(&self) -> Pin<Box<dyn Future<Output = Result<ByteSource, ShareError>> + Send + '_>>
        {
            Box::pin(async { Ok(ByteSource::memory(vec![0])) })
        }
    }

    #[test]
    fn guard_releases_once_on_drop() {
        let resource = CountingResource::new(false);
        {
            let _guard = AccessGuard::acquire(&resource).unwrap();
        }
        assert_eq!(resource.acquired.load(Ordering::SeqCst), 1);
        assert_eq!(resource.released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_denied_acquire_never_releases() {
        let resource = CountingResource::new(true);
        assert!(AccessGuard::acquire(&resource).is_err());
        assert_eq!(resource.released.load(Ordering::SeqCst), 0);
    }
}
