//! File operations, path validation and directory listing.
//!
//! Every operation here takes already-resolved absolute paths. Resolving
//! user input against the session's current directory, and checking that
//! it exists, is the job of [`PathValidator`].

mod browse;
mod ops;
mod paths;

use std::path::PathBuf;

pub use browse::{DirEntry, EntryKind, list_directory};
pub use ops::{copy_file, create_directory, create_file, delete_file, move_file, rename_file};
pub use paths::{InvalidPath, PathValidator, normalize};

/// Errors produced by file operations.
#[derive(Debug, thiserror::Error)]
pub enum FileOpsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error(transparent)]
    Transfer(#[from] fileshell_transfer::TransferError),
}

/// Returns the user's home directory.
pub fn home_dir() -> PathBuf {
    #[cfg(windows)]
    let var = "USERPROFILE";
    #[cfg(not(windows))]
    let var = "HOME";

    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir())
}
