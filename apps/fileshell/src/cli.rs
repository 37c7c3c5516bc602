use std::path::PathBuf;

use clap::Parser;

/// Interactive command-line file manager.
#[derive(Parser, Debug)]
#[command(name = "fileshell", version, about)]
pub struct Cli {
    /// Name shown in the welcome and farewell messages.
    #[arg(long)]
    pub username: Option<String>,

    /// Directory to start in (defaults to the home directory).
    #[arg(long)]
    pub start_dir: Option<String>,

    /// Path of the JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}
