//! Shell error types.

use fileshell_file_ops::{FileOpsError, InvalidPath};
use fileshell_transfer::TransferError;

/// Coarse classification of a [`ShellError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownCommand,
    MissingOperand,
    TooManyArguments,
    InvalidInput,
    AlreadyExists,
    OperationFailed,
}

/// Errors produced while parsing or executing one input line.
///
/// Everything except [`ShellError::OperationFailed`] is raised before the
/// command's handler runs, so no filesystem mutation has happened.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing operand")]
    MissingOperand { command: &'static str },

    #[error("{command}: too many arguments")]
    TooManyArguments { command: &'static str },

    #[error("{input}: {source}")]
    InvalidInput {
        input: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command}: {source}")]
    OperationFailed {
        command: &'static str,
        #[source]
        source: FileOpsError,
    },
}

impl ShellError {
    pub(crate) fn invalid(input: impl Into<String>, reason: &str) -> Self {
        ShellError::InvalidInput {
            input: input.into(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, reason.to_string()),
        }
    }

    /// Returns the error's kind. Failures caused by an existing target
    /// report [`ErrorKind::AlreadyExists`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShellError::UnknownCommand(_) => ErrorKind::UnknownCommand,
            ShellError::MissingOperand { .. } => ErrorKind::MissingOperand,
            ShellError::TooManyArguments { .. } => ErrorKind::TooManyArguments,
            ShellError::InvalidInput { .. } => ErrorKind::InvalidInput,
            ShellError::OperationFailed {
                source: FileOpsError::AlreadyExists(_),
                ..
            } => ErrorKind::AlreadyExists,
            ShellError::OperationFailed {
                source: FileOpsError::Transfer(TransferError::Io(e)),
                ..
            } if e.kind() == std::io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
            ShellError::OperationFailed { .. } => ErrorKind::OperationFailed,
        }
    }

    /// Whether the error was raised before any handler ran.
    pub fn is_structural(&self) -> bool {
        !matches!(self, ShellError::OperationFailed { .. })
    }
}

impl From<InvalidPath> for ShellError {
    fn from(e: InvalidPath) -> Self {
        ShellError::InvalidInput {
            input: e.path.display().to_string(),
            source: e.source,
        }
    }
}
