use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Terminal front-end for the compiler bot
#[derive(Parser)]
#[command(name = "compiler-bot")]
#[command(about = "Compile and run code through a remote compiler service, chat-bot style")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct CompilerBotCli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Command prefix override
    #[arg(long)]
    pub prefix: Option<String>,

    /// Compilation service base URL override
    #[arg(long)]
    pub wandbox_url: Option<String>,

    /// Timeout for remote calls (seconds)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Name used as the message author
    #[arg(long, default_value = "console")]
    pub author: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read chat messages from stdin, one per line or fenced block
    Console,

    /// Dispatch a single chat message
    Send {
        /// Message content, e.g. ";compile python ```print(1)```"
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// List supported languages
    Languages,

    /// List compilers for a language
    Compilers {
        /// Language name
        language: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
