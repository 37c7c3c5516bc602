//! Line-at-a-time command execution against a [`Session`].
//!
//! Each line goes through three stages, and a failure in one stage stops
//! the later ones:
//! 1. parse and check operand count,
//! 2. resolve and validate every path operand,
//! 3. run the operation.
//!
//! Only stage 3 touches the filesystem for writing.

use std::io;

use fileshell_file_ops::{self as ops, FileOpsError, PathValidator};
use fileshell_transfer::DEFAULT_CHUNK_SIZE;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::command::{Command, Invocation, Operands, parse_line};
use crate::error::ShellError;
use crate::host::{self, OsFact};
use crate::render;
use crate::session::Session;

/// What the input loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Executes input lines and writes their output to `W`.
pub struct Dispatcher<W> {
    session: Session,
    out: W,
    chunk_size: usize,
}

impl<W: AsyncWrite + Unpin> Dispatcher<W> {
    pub fn new(session: Session, out: W) -> Self {
        Self {
            session,
            out,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets the chunk size used for streaming operations. 0 keeps the
    /// default.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        if chunk_size > 0 {
            self.chunk_size = chunk_size;
        }
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Prints the welcome message and the starting directory.
    pub async fn greet(&mut self) -> io::Result<()> {
        let text = format!(
            "{}\n{}",
            render::welcome(self.session.username()),
            render::current_dir(self.session.current_dir())
        );
        write_line(&mut self.out, &text).await
    }

    /// Prints the farewell message.
    pub async fn farewell(&mut self) -> io::Result<()> {
        let text = render::farewell(self.session.username());
        write_line(&mut self.out, &text).await
    }

    /// Executes `line` and reports any failure to the output.
    ///
    /// Command failures never end the session; only `.exit` does. The
    /// returned error is a failure to write to the output itself.
    pub async fn handle_line(&mut self, line: &str) -> io::Result<Outcome> {
        match self.execute(line).await {
            Ok(Outcome::Exit) => {
                self.farewell().await?;
                Ok(Outcome::Exit)
            }
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind(), "command failed");
                let prefix = if e.is_structural() {
                    "Invalid input"
                } else {
                    "Operation failed"
                };
                write_line(&mut self.out, &format!("{prefix}: {e}")).await?;
                Ok(Outcome::Continue)
            }
        }
    }

    /// Executes `line`, reprinting the current directory on success.
    pub async fn execute(&mut self, line: &str) -> Result<Outcome, ShellError> {
        let Some(invocation) = parse_line(line)? else {
            return Ok(Outcome::Continue);
        };
        let command = invocation.command;
        if command == Command::Exit {
            return Ok(Outcome::Exit);
        }

        self.run(invocation).await?;

        let text = render::current_dir(self.session.current_dir());
        write_line(&mut self.out, &text)
            .await
            .map_err(failed(command))?;
        Ok(Outcome::Continue)
    }

    async fn run(&mut self, invocation: Invocation) -> Result<(), ShellError> {
        let Invocation { command, operands } = invocation;
        let chunk_size = self.chunk_size;
        let paths = PathValidator::new(self.session.current_dir());
        tracing::debug!(command = command.name(), cwd = %self.session.current_dir().display(), "executing");

        match (command, operands) {
            (Command::Up, _) => {
                if !self.session.up() {
                    tracing::debug!("already at filesystem root");
                }
            }
            (Command::Cd, operands) => {
                let raw = match operands {
                    Operands::One(raw) => raw,
                    _ => "~".to_string(),
                };
                let dir = paths.existing_dir(&raw).await?;
                self.session.set_current_dir(dir);
            }
            (Command::Ls, _) => {
                let entries = ops::list_directory(self.session.current_dir())
                    .await
                    .map_err(failed(command))?;
                write_line(&mut self.out, &render::listing_table(&entries))
                    .await
                    .map_err(failed(command))?;
            }
            (Command::Cat, Operands::One(raw)) => {
                let path = paths.existing_file(&raw).await?;
                fileshell_transfer::stream_to(&path, &mut self.out, chunk_size)
                    .await
                    .map_err(failed(command))?;
                write_line(&mut self.out, "").await.map_err(failed(command))?;
            }
            (Command::Add, Operands::One(raw)) => {
                ops::create_file(&paths.resolve(&raw), b"")
                    .await
                    .map_err(failed(command))?;
            }
            (Command::Mkdir, Operands::One(raw)) => {
                ops::create_directory(&paths.resolve(&raw))
                    .await
                    .map_err(failed(command))?;
            }
            (Command::Rn, Operands::Two(old, new)) => {
                let old = paths.existing_file(&old).await?;
                let new = paths.resolve(&new);
                ops::rename_file(&old, &new)
                    .await
                    .map_err(failed(command))?;
            }
            (Command::Cp, Operands::Two(src, dest)) => {
                let src = paths.existing_file(&src).await?;
                let dest = paths.existing_dir(&dest).await?;
                ops::copy_file(&src, &dest, chunk_size)
                    .await
                    .map_err(failed(command))?;
            }
            (Command::Mv, Operands::Two(src, dest)) => {
                let src = paths.existing_file(&src).await?;
                let dest = paths.existing_dir(&dest).await?;
                ops::move_file(&src, &dest, chunk_size)
                    .await
                    .map_err(failed(command))?;
            }
            (Command::Rm, Operands::One(raw)) => {
                let path = paths.existing(&raw).await?;
                ops::delete_file(&path).await.map_err(failed(command))?;
            }
            (Command::Os, Operands::One(flag)) => {
                let fact = OsFact::from_flag(flag.trim())
                    .ok_or_else(|| ShellError::invalid(flag, "unsupported os flag"))?;
                write_line(&mut self.out, &host::report(fact))
                    .await
                    .map_err(failed(command))?;
            }
            (Command::Hash, Operands::One(raw)) => {
                let path = paths.existing_file(&raw).await?;
                let digest = fileshell_transfer::hash_file(&path, chunk_size)
                    .await
                    .map_err(failed(command))?;
                write_line(&mut self.out, &digest)
                    .await
                    .map_err(failed(command))?;
            }
            (Command::Compress, Operands::Two(src, dest)) => {
                let src = paths.existing_file(&src).await?;
                let dest = paths.existing_dir(&dest).await?;
                fileshell_transfer::compress_file(&src, &dest, chunk_size)
                    .await
                    .map_err(failed(command))?;
            }
            (Command::Decompress, Operands::Two(src, dest)) => {
                let src = paths.existing_file(&src).await?;
                let dest = paths.existing_dir(&dest).await?;
                fileshell_transfer::decompress_file(&src, &dest, chunk_size)
                    .await
                    .map_err(failed(command))?;
            }
            (command, operands) => {
                return Err(ShellError::invalid(
                    command.name(),
                    &format!("unexpected operands {operands:?}"),
                ));
            }
        }

        Ok(())
    }
}

/// Wraps an execution-time error with the command that raised it.
fn failed<E: Into<FileOpsError>>(command: Command) -> impl FnOnce(E) -> ShellError {
    move |e| ShellError::OperationFailed {
        command: command.name(),
        source: e.into(),
    }
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}
