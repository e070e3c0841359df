//! Directory capability
//!
//! The mirror never owns a directory; it borrows one the user granted.
//! [`DirectoryAccess`] is the injected capability surface: acquire the
//! remembered handle, verify it is still writable, and read/write/
//! delete named files inside it. [`FsDirectory`] is the local
//! filesystem implementation.
//!
//! Writes are atomic (temp file + rename) so a mirrored file is never
//! left in a partially-written state.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::{MirrorError, MirrorResult};

/// Capability surface over a user-granted directory
///
/// Every operation is independent and fallible; callers decide what a
/// failure means (for the mirror worker: log and move on).
pub trait DirectoryAccess: Send + Sync {
    /// The remembered directory handle, or `None` when the user has
    /// not granted one (mirroring disabled, not an error)
    fn acquire(&self) -> Option<PathBuf>;

    /// Whether the handle still permits writing
    fn verify_writable(&self, handle: &Path) -> bool;

    /// Replace the named file's content entirely
    fn write_file(&self, handle: &Path, name: &str, data: &[u8]) -> MirrorResult<()>;

    /// Remove the named file
    fn delete_file(&self, handle: &Path, name: &str) -> MirrorResult<()>;

    /// Paths of the mirrored document files currently in the directory
    fn list_files(&self, handle: &Path) -> MirrorResult<Vec<PathBuf>>;

    /// Read one file's content
    fn read_file(&self, path: &Path) -> MirrorResult<Vec<u8>>;
}

/// Local-filesystem directory capability
pub struct FsDirectory {
    root: Option<PathBuf>,
}

impl FsDirectory {
    /// Wrap a granted directory; `None` disables mirroring
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }
}

impl DirectoryAccess for FsDirectory {
    fn acquire(&self) -> Option<PathBuf> {
        self.root.clone()
    }

    fn verify_writable(&self, handle: &Path) -> bool {
        if !handle.exists() {
            // The grant may predate the directory; recreate it
            if fs::create_dir_all(handle).is_err() {
                return false;
            }
        }
        match fs::metadata(handle) {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(_) => false,
        }
    }

    fn write_file(&self, handle: &Path, name: &str, data: &[u8]) -> MirrorResult<()> {
        atomic_write(&handle.join(name), data)
    }

    fn delete_file(&self, handle: &Path, name: &str) -> MirrorResult<()> {
        let path = handle.join(name);
        fs::remove_file(&path).map_err(|e| MirrorError::from_io(e, path))
    }

    fn list_files(&self, handle: &Path) -> MirrorResult<Vec<PathBuf>> {
        let entries = fs::read_dir(handle)
            .map_err(|e| MirrorError::from_io(e, handle.to_path_buf()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MirrorError::from_io(e, handle.to_path_buf()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_file(&self, path: &Path) -> MirrorResult<Vec<u8>> {
        fs::read(path).map_err(|e| MirrorError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> MirrorResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MirrorError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|e| MirrorError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| MirrorError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| MirrorError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| MirrorError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_none_when_not_granted() {
        let dir = FsDirectory::new(None);
        assert!(dir.acquire().is_none());
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let temp = TempDir::new().unwrap();
        let dir = FsDirectory::new(Some(temp.path().to_path_buf()));
        let handle = dir.acquire().unwrap();

        dir.write_file(&handle, "Resume.json", b"{\"ok\":true}").unwrap();

        let files = dir.list_files(&handle).unwrap();
        assert_eq!(files.len(), 1);
        let content = dir.read_file(&files[0]).unwrap();
        assert_eq!(content, b"{\"ok\":true}");
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let temp = TempDir::new().unwrap();
        let dir = FsDirectory::new(Some(temp.path().to_path_buf()));
        let handle = dir.acquire().unwrap();

        dir.write_file(&handle, "a.json", b"first version, longer").unwrap();
        dir.write_file(&handle, "a.json", b"second").unwrap();

        let content = dir.read_file(&handle.join("a.json")).unwrap();
        assert_eq!(content, b"second");
    }

    #[test]
    fn test_delete_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        let dir = FsDirectory::new(Some(temp.path().to_path_buf()));
        let handle = dir.acquire().unwrap();

        let err = dir.delete_file(&handle, "ghost.json").unwrap_err();
        assert!(matches!(err, MirrorError::NotFound { .. }));
    }

    #[test]
    fn test_list_files_ignores_non_json() {
        let temp = TempDir::new().unwrap();
        let dir = FsDirectory::new(Some(temp.path().to_path_buf()));
        let handle = dir.acquire().unwrap();

        dir.write_file(&handle, "a.json", b"{}").unwrap();
        std::fs::write(handle.join("notes.txt"), b"not a mirror file").unwrap();

        let files = dir.list_files(&handle).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.json"));
    }

    #[test]
    fn test_verify_writable_recreates_missing_dir() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("mirror");
        let dir = FsDirectory::new(Some(nested.clone()));

        assert!(!nested.exists());
        assert!(dir.verify_writable(&nested));
        assert!(nested.exists());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("doc.json");

        atomic_write(&target, b"data").unwrap();

        assert!(target.exists());
        assert!(!temp.path().join("doc.tmp").exists());
    }
}
