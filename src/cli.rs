use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "timedquiz", version, about = "Timed multiple-choice quiz in the terminal")]
pub struct Cli {
    /// Markdown quiz file [default: built-in general knowledge quiz]
    #[arg(value_name = "quiz")]
    pub quiz: Option<PathBuf>,

    /// Seconds allowed per question (overrides the quiz file)
    #[arg(long, value_name = "secs")]
    pub duration: Option<u32>,

    /// Remaining seconds at which the countdown turns red
    #[arg(long, value_name = "secs")]
    pub warning: Option<u32>,

    /// Validate the quiz and print a summary without entering the TUI
    #[arg(long)]
    pub check: bool,

    /// Write logs here instead of the default data directory
    #[arg(long, value_name = "path")]
    pub log_file: Option<PathBuf>,
}
