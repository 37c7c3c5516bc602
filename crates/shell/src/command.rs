//! Command table and input line parsing.

use crate::error::ShellError;

/// Number of operands a command takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Optional,
    One,
    Two,
}

/// The closed set of shell commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Cd,
    Ls,
    Cat,
    Add,
    Mkdir,
    Rn,
    Cp,
    Mv,
    Rm,
    Os,
    Hash,
    Compress,
    Decompress,
    Exit,
}

impl Command {
    pub const ALL: [Command; 15] = [
        Command::Up,
        Command::Cd,
        Command::Ls,
        Command::Cat,
        Command::Add,
        Command::Mkdir,
        Command::Rn,
        Command::Cp,
        Command::Mv,
        Command::Rm,
        Command::Os,
        Command::Hash,
        Command::Compress,
        Command::Decompress,
        Command::Exit,
    ];

    /// Looks up a command by the name typed at the prompt.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Up => "up",
            Command::Cd => "cd",
            Command::Ls => "ls",
            Command::Cat => "cat",
            Command::Add => "add",
            Command::Mkdir => "mkdir",
            Command::Rn => "rn",
            Command::Cp => "cp",
            Command::Mv => "mv",
            Command::Rm => "rm",
            Command::Os => "os",
            Command::Hash => "hash",
            Command::Compress => "compress",
            Command::Decompress => "decompress",
            Command::Exit => ".exit",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Command::Up | Command::Ls | Command::Exit => Arity::None,
            Command::Cd => Arity::Optional,
            Command::Cat
            | Command::Add
            | Command::Mkdir
            | Command::Rm
            | Command::Os
            | Command::Hash => Arity::One,
            Command::Rn | Command::Cp | Command::Mv | Command::Compress | Command::Decompress => {
                Arity::Two
            }
        }
    }
}

/// Operands of a parsed line, already checked against the command's arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operands {
    None,
    One(String),
    Two(String, String),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub operands: Operands,
}

/// Parses one input line.
///
/// Returns `Ok(None)` for a blank line. `.exit` is accepted regardless of
/// what follows it.
pub fn parse_line(line: &str) -> Result<Option<Invocation>, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command =
        Command::from_name(name).ok_or_else(|| ShellError::UnknownCommand(name.to_string()))?;
    if command == Command::Exit {
        return Ok(Some(Invocation {
            command,
            operands: Operands::None,
        }));
    }

    let operands = match command.arity() {
        Arity::None if rest.is_empty() => Operands::None,
        Arity::None => {
            return Err(ShellError::TooManyArguments {
                command: command.name(),
            });
        }
        Arity::Optional if rest.is_empty() => Operands::None,
        Arity::Optional | Arity::One => Operands::One(single_operand(command, rest)?),
        Arity::Two => {
            let mut tokens = tokenize(rest)?;
            match tokens.len() {
                0 | 1 => {
                    return Err(ShellError::MissingOperand {
                        command: command.name(),
                    });
                }
                2 => {
                    let second = tokens.pop().unwrap_or_default();
                    let first = tokens.pop().unwrap_or_default();
                    Operands::Two(first, second)
                }
                _ => {
                    return Err(ShellError::TooManyArguments {
                        command: command.name(),
                    });
                }
            }
        }
    };

    tracing::debug!(command = command.name(), ?operands, "parsed command");
    Ok(Some(Invocation { command, operands }))
}

/// The whole remainder is one operand; quotes are only needed to keep
/// leading or trailing whitespace, or to mark where the operand ends.
fn single_operand(command: Command, rest: &str) -> Result<String, ShellError> {
    if !rest.contains('"') {
        if rest.is_empty() {
            return Err(ShellError::MissingOperand {
                command: command.name(),
            });
        }
        return Ok(rest.to_string());
    }

    let mut tokens = tokenize(rest)?;
    match tokens.len() {
        1 if !tokens[0].is_empty() => Ok(tokens.remove(0)),
        0 | 1 => Err(ShellError::MissingOperand {
            command: command.name(),
        }),
        _ => Err(ShellError::TooManyArguments {
            command: command.name(),
        }),
    }
}

/// Splits on whitespace, keeping double-quoted runs together.
fn tokenize(input: &str) -> Result<Vec<String>, ShellError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ShellError::invalid(input, "unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
