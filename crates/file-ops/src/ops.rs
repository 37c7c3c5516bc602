//! Single-purpose file and directory mutations.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fileshell_transfer::TransferError;
use tokio::io::AsyncWriteExt;

use crate::FileOpsError;

/// Creates `path` holding exactly `content`.
///
/// Uses exclusive create, so an existing entry fails with
/// [`FileOpsError::AlreadyExists`] and is left untouched.
pub async fn create_file(path: &Path, content: &[u8]) -> Result<(), FileOpsError> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| already_exists_or(path, e))?;
    file.write_all(content).await?;
    file.flush().await?;

    tracing::info!(path = %path.display(), "created file");
    Ok(())
}

/// Creates `path` and any missing parents.
///
/// The existence check and the creation are two steps; a directory created
/// concurrently in between is not reported.
pub async fn create_directory(path: &Path) -> Result<(), FileOpsError> {
    if tokio::fs::try_exists(path).await? {
        return Err(FileOpsError::AlreadyExists(path.to_path_buf()));
    }
    tokio::fs::create_dir_all(path).await?;

    tracing::info!(path = %path.display(), "created directory");
    Ok(())
}

/// Renames `old` to `new`. Refuses to replace an existing `new`.
///
/// Like [`create_directory`], the existence check and the rename are two
/// steps; a `new` created concurrently in between is replaced.
pub async fn rename_file(old: &Path, new: &Path) -> Result<(), FileOpsError> {
    if tokio::fs::try_exists(new).await? {
        return Err(FileOpsError::AlreadyExists(new.to_path_buf()));
    }
    tokio::fs::rename(old, new).await?;

    tracing::info!(from = %old.display(), to = %new.display(), "renamed file");
    Ok(())
}

/// Removes a single file. Directories are rejected by the OS.
pub async fn delete_file(path: &Path) -> Result<(), FileOpsError> {
    tokio::fs::remove_file(path).await?;

    tracing::info!(path = %path.display(), "deleted file");
    Ok(())
}

/// Copies `source` into `dest_dir`, keeping its file name.
///
/// Returns the path of the new copy.
pub async fn copy_file(
    source: &Path,
    dest_dir: &Path,
    chunk_size: usize,
) -> Result<PathBuf, FileOpsError> {
    let name = source.file_name().ok_or_else(|| {
        std::io::Error::new(
            ErrorKind::InvalidInput,
            format!("no file name in {}", source.display()),
        )
    })?;
    let dest = dest_dir.join(name);

    match fileshell_transfer::copy_file(source, &dest, chunk_size).await {
        Ok(bytes) => {
            tracing::info!(src = %source.display(), dst = %dest.display(), bytes, "copied file");
            Ok(dest)
        }
        Err(TransferError::Io(e)) => Err(already_exists_or(&dest, e)),
        Err(e) => Err(e.into()),
    }
}

/// Copies `source` into `dest_dir`, then deletes `source`.
///
/// Not atomic: if the delete fails after a successful copy, the copy is
/// kept and the delete error is returned.
pub async fn move_file(
    source: &Path,
    dest_dir: &Path,
    chunk_size: usize,
) -> Result<PathBuf, FileOpsError> {
    let dest = copy_file(source, dest_dir, chunk_size).await?;
    if let Err(e) = delete_file(source).await {
        tracing::warn!(
            src = %source.display(),
            dst = %dest.display(),
            error = %e,
            "copy succeeded but source could not be removed"
        );
        return Err(e);
    }

    tracing::info!(src = %source.display(), dst = %dest.display(), "moved file");
    Ok(dest)
}

fn already_exists_or(path: &Path, e: std::io::Error) -> FileOpsError {
    if e.kind() == ErrorKind::AlreadyExists {
        FileOpsError::AlreadyExists(path.to_path_buf())
    } else {
        FileOpsError::Io(e)
    }
}
