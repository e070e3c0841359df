//! Directory mirror
//!
//! Keeps a human-readable `{title}.json` copy of each document in a
//! user-granted directory, eventually consistent with the in-memory
//! store. Split into:
//! - `directory`: the injected directory capability and its
//!   filesystem implementation
//! - `worker`: the outbox task that performs writes without ever
//!   blocking or failing a store mutation
//! - `error`: typed failure classification for logging

pub mod directory;
pub mod error;
pub mod worker;

pub use directory::{DirectoryAccess, FsDirectory};
pub use error::{MirrorError, MirrorResult};
pub use worker::{
    delete_mirror, file_name, load_mirrored, spawn_mirror_task, write_through, MirrorTask,
};
