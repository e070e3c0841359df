//! Mirror outbox worker
//!
//! Every committed store mutation pushes a [`MirrorTask`] into an
//! outbox channel; a background task consumes it and performs the
//! actual file I/O. The store never awaits the outcome: the in-memory
//! result stands whether the mirror write completes, fails, or never
//! starts. Failures are classified, logged, and swallowed here —
//! nothing propagates back into the store.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::directory::DirectoryAccess;
use super::error::MirrorError;
use crate::models::Resume;

/// A pending persistence action queued by the store
#[derive(Debug, Clone)]
pub enum MirrorTask {
    /// Mirror a snapshot; `previous` enables title-change cleanup
    WriteThrough {
        resume: Box<Resume>,
        previous: Option<Box<Resume>>,
    },
    /// Best-effort removal of a document's mirrored file
    Delete { title: String },
    /// Stop the worker after draining nothing further
    Shutdown,
}

/// Mirror file name for a document title
///
/// `None` when the title contains a path separator: such a name would
/// address a file outside the granted directory, so it is never
/// mirrored.
pub fn file_name(title: &str) -> Option<String> {
    if title.contains(['/', '\\']) {
        return None;
    }
    Some(format!("{}.json", title))
}

/// Spawn the background task that drains the mirror outbox
///
/// The task ends when the channel closes (all senders dropped) or a
/// [`MirrorTask::Shutdown`] arrives. Tasks queued before the close are
/// processed in order, so dropping the sender and awaiting the handle
/// flushes all pending writes. The file I/O itself runs on the
/// blocking pool; a slow disk never stalls the async workers.
pub fn spawn_mirror_task(
    dir: Arc<dyn DirectoryAccess>,
    mut rx: mpsc::UnboundedReceiver<MirrorTask>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(task) = rx.recv().await {
            if matches!(task, MirrorTask::Shutdown) {
                break;
            }
            // Awaiting each blocking task keeps the per-file write order
            let dir = Arc::clone(&dir);
            let io = tokio::task::spawn_blocking(move || match task {
                MirrorTask::WriteThrough { resume, previous } => {
                    write_through(dir.as_ref(), &resume, previous.as_deref());
                }
                MirrorTask::Delete { title } => delete_mirror(dir.as_ref(), &title),
                MirrorTask::Shutdown => {}
            });
            if io.await.is_err() {
                warn!("mirror i/o task panicked");
            }
        }
        debug!("mirror worker stopped");
    })
}

/// Mirror one snapshot to `{title}.json`, replacing any existing file
///
/// If `previous` carries a different title, the old-name file is
/// deleted first, best-effort: a failed delete is logged and does not
/// block the write. Re-running with the same snapshot produces a
/// byte-identical file. Never fails outward and never re-enters the
/// store.
pub fn write_through(dir: &dyn DirectoryAccess, resume: &Resume, previous: Option<&Resume>) {
    // No granted directory: mirroring is disabled, not an error
    let Some(handle) = dir.acquire() else {
        return;
    };

    if !dir.verify_writable(&handle) {
        debug!(dir = %handle.display(), "mirror directory no longer writable, skipping write");
        return;
    }

    let Some(name) = file_name(&resume.title) else {
        warn!(title = %resume.title, "title contains a path separator, skipping mirror write");
        return;
    };

    if let Some(prev) = previous {
        if prev.title != resume.title {
            if let Some(old_name) = file_name(&prev.title) {
                match dir.delete_file(&handle, &old_name) {
                    Ok(()) => debug!(file = %old_name, "removed mirror file under previous title"),
                    Err(MirrorError::NotFound { .. }) => {}
                    Err(e) => {
                        warn!(file = %old_name, error = %e, "failed to remove stale mirror file")
                    }
                }
            }
        }
    }

    let json = match serde_json::to_vec_pretty(resume) {
        Ok(json) => json,
        Err(e) => {
            warn!(resume = %resume.id, error = %e, "failed to serialize resume for mirror");
            return;
        }
    };

    if let Err(e) = dir.write_file(&handle, &name, &json) {
        warn!(file = %name, error = %e, "mirror write failed");
    }
}

/// Best-effort removal of the file named after `title`
///
/// Absence of the file is not an error.
pub fn delete_mirror(dir: &dyn DirectoryAccess, title: &str) {
    let Some(handle) = dir.acquire() else {
        return;
    };

    let Some(name) = file_name(title) else {
        warn!(title = %title, "title contains a path separator, skipping mirror delete");
        return;
    };
    match dir.delete_file(&handle, &name) {
        Ok(()) => debug!(file = %name, "deleted mirror file"),
        Err(MirrorError::NotFound { .. }) => {}
        Err(e) => warn!(file = %name, error = %e, "mirror delete failed"),
    }
}

/// Re-hydrate documents from the granted directory
///
/// Reads every `*.json` file; unreadable or unparsable files are
/// logged and skipped so one corrupt file cannot block the rest.
pub fn load_mirrored(dir: &dyn DirectoryAccess) -> Vec<Resume> {
    let Some(handle) = dir.acquire() else {
        return Vec::new();
    };

    let files = match dir.list_files(&handle) {
        Ok(files) => files,
        Err(e) => {
            warn!(dir = %handle.display(), error = %e, "failed to list mirror directory");
            return Vec::new();
        }
    };

    let mut resumes = Vec::new();
    for path in files {
        let bytes = match dir.read_file(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable mirror file");
                continue;
            }
        };
        match serde_json::from_slice::<Resume>(&bytes) {
            Ok(resume) => resumes.push(resume),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping invalid mirror file");
            }
        }
    }
    resumes
}
