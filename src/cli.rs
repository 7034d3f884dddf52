use clap::Parser;
use message_parser::config::{OutputFormat, Settings};
use std::path::PathBuf;

/// Stream text through the artifact parser and show what a chat UI would
/// display and which artifact/action events it would receive
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Plain text file with an assistant response ('-' or nothing reads stdin)
    pub input: Option<PathBuf>,

    /// Replay a recorded session file instead of a plain text input
    #[arg(long, conflicts_with = "input")]
    pub playback: Option<PathBuf>,

    /// Fast playback mode - ignore chunk timing when playing recordings
    #[arg(long)]
    pub fast_playback: bool,

    /// Characters per chunk for plain text input
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Message id for plain text input
    #[arg(long)]
    pub message_id: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Options after merging command line flags over the settings file
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub chunk_size: usize,
    pub message_id: String,
    pub format: OutputFormat,
}

impl Args {
    pub fn parse() -> Self {
        <Args as Parser>::parse()
    }

    pub fn resolve(&self, settings: Settings) -> RunOptions {
        RunOptions {
            chunk_size: self.chunk_size.unwrap_or(settings.chunk_size).max(1),
            message_id: self.message_id.clone().unwrap_or(settings.message_id),
            format: self.format.unwrap_or(settings.format),
        }
    }

    /// Whether plain text input comes from stdin
    pub fn reads_stdin(&self) -> bool {
        match &self.input {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}
