//! Directory listing.

use std::fmt;
use std::path::Path;

/// Kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => f.write_str("directory"),
            EntryKind::File => f.write_str("file"),
        }
    }
}

/// A directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (not full path).
    pub name: String,
    pub kind: EntryKind,
}

/// Lists the contents of a directory.
///
/// Directories come first, then files; each group is sorted by name.
/// Entries that are neither (symlinks, sockets, fifos) are omitted.
pub async fn list_directory(path: &Path) -> Result<Vec<DirEntry>, std::io::Error> {
    let mut entries = tokio::fs::read_dir(path).await?;
    let mut result = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let file_type = match entry.file_type().await {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(entry = ?entry.file_name(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            continue;
        };
        result.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }

    result.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));

    Ok(result)
}
