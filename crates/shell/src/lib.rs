//! Interactive file manager shell: session state, command parsing and
//! dispatch.
//!
//! The binary owns the input loop; everything it needs to turn a line of
//! text into a filesystem operation lives here.

mod command;
mod dispatcher;
mod error;
pub mod host;
pub mod render;
mod session;

pub use command::{Arity, Command, Invocation, Operands, parse_line};
pub use dispatcher::{Dispatcher, Outcome};
pub use error::{ErrorKind, ShellError};
pub use session::{ANONYMOUS, Session};
