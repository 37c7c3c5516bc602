//! Resolution of user-typed paths against the current directory.

use std::io;
use std::path::{Component, Path, PathBuf};

/// A path that failed validation, with the I/O reason attached.
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", path.display())]
pub struct InvalidPath {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl InvalidPath {
    fn new(path: PathBuf, source: io::Error) -> Self {
        Self { path, source }
    }
}

/// Resolves and checks paths relative to a base directory.
///
/// Checks are point-in-time: the entry can disappear between validation
/// and the operation that follows, in which case the operation reports
/// its own I/O error.
#[derive(Debug, Clone, Copy)]
pub struct PathValidator<'a> {
    base: &'a Path,
}

impl<'a> PathValidator<'a> {
    pub fn new(base: &'a Path) -> Self {
        Self { base }
    }

    /// Joins `raw` onto the base directory and normalizes the result.
    ///
    /// `~` and `~/...` expand to the home directory. Absolute input
    /// replaces the base.
    pub fn resolve(&self, raw: &str) -> PathBuf {
        normalize(&self.base.join(expand_home(raw)))
    }

    /// Resolves `raw` and requires that it exists.
    pub async fn existing(&self, raw: &str) -> Result<PathBuf, InvalidPath> {
        let path = self.resolve(raw);
        match tokio::fs::metadata(&path).await {
            Ok(_) => Ok(path),
            Err(e) => Err(InvalidPath::new(path, e)),
        }
    }

    /// Resolves `raw` and requires that it is a directory.
    pub async fn existing_dir(&self, raw: &str) -> Result<PathBuf, InvalidPath> {
        let path = self.resolve(raw);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Ok(path),
            Ok(_) => Err(InvalidPath::new(
                path,
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            )),
            Err(e) => Err(InvalidPath::new(path, e)),
        }
    }

    /// Resolves `raw` and requires that it is not a directory.
    pub async fn existing_file(&self, raw: &str) -> Result<PathBuf, InvalidPath> {
        let path = self.resolve(raw);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Err(InvalidPath::new(
                path,
                io::Error::new(io::ErrorKind::IsADirectory, "is a directory"),
            )),
            Ok(_) => Ok(path),
            Err(e) => Err(InvalidPath::new(path, e)),
        }
    }
}

/// Lexically normalizes an absolute path: drops `.`, and lets `..` remove
/// the previous component without ever climbing above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Expands `~` prefix to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        crate::home_dir().join(rest)
    } else if path == "~" {
        crate::home_dir()
    } else {
        PathBuf::from(path)
    }
}
