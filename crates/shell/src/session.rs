use std::path::{Path, PathBuf};

/// Placeholder used when no username is configured.
pub const ANONYMOUS: &str = "Anonymous";

/// Per-process shell state.
#[derive(Debug, Clone)]
pub struct Session {
    current_dir: PathBuf,
    username: String,
}

impl Session {
    /// Creates a session rooted at `current_dir`, which should be an
    /// existing absolute directory.
    pub fn new(current_dir: impl Into<PathBuf>, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            current_dir: current_dir.into(),
            username: if username.trim().is_empty() {
                ANONYMOUS.into()
            } else {
                username
            },
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Replaces the current directory. Callers validate `dir` first.
    pub(crate) fn set_current_dir(&mut self, dir: PathBuf) {
        tracing::debug!(from = %self.current_dir.display(), to = %dir.display(), "changed directory");
        self.current_dir = dir;
    }

    /// Moves to the parent directory. Returns `false` at the root.
    pub fn up(&mut self) -> bool {
        match self.current_dir.parent() {
            Some(parent) => {
                let parent = parent.to_path_buf();
                self.set_current_dir(parent);
                true
            }
            None => false,
        }
    }
}
