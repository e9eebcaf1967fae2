//! Chat commands. Each takes the raw message and returns a [`Response`]
//! built from plain data, independent of any chat platform.

pub mod botinfo;
pub mod compile;
pub mod compilers;
pub mod error;
pub mod help;
pub mod invite;
pub mod languages;
pub mod parser;
pub mod ping;

pub use error::{CommandError, Result};
pub use parser::{parse_compile, ParseError, ParsedInput};

use crate::bot::Bot;
use crate::render::Response;

/// A chat message addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Display tag of the sender, e.g. `user#0001`.
    pub author: String,
    pub content: String,
}

impl IncomingMessage {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Compile,
    Languages,
    Compilers,
    BotInfo,
    Ping,
    Invite,
    Help,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Compile,
        Command::Languages,
        Command::Compilers,
        Command::BotInfo,
        Command::Ping,
        Command::Invite,
        Command::Help,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Compile => "compile",
            Command::Languages => "languages",
            Command::Compilers => "compilers",
            Command::BotInfo => "botinfo",
            Command::Ping => "ping",
            Command::Invite => "invite",
            Command::Help => "help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Compile => "Compiles and executes code in a code block",
            Command::Languages => "Displays all supported languages",
            Command::Compilers => "Displays the compilers for the specified language",
            Command::BotInfo => "Displays the bot's state information",
            Command::Ping => "Checks that the bot is responding",
            Command::Invite => "Displays a link to add the bot to your server",
            Command::Help => "Displays this help message",
        }
    }

    pub fn usage(&self, prefix: &str) -> String {
        match self {
            Command::Compile => {
                format!("{prefix}compile <language|compiler> [options] [< url] [| stdin] ```code```")
            }
            Command::Compilers => format!("{prefix}compilers <language>"),
            other => format!("{prefix}{}", other.name()),
        }
    }

    pub async fn execute(&self, bot: &Bot, message: &IncomingMessage) -> Result<Response> {
        match self {
            Command::Compile => compile::run(bot, message).await,
            Command::Languages => languages::run(bot, message).await,
            Command::Compilers => compilers::run(bot, message).await,
            Command::BotInfo => botinfo::run(bot, message).await,
            Command::Ping => ping::run(bot, message).await,
            Command::Invite => invite::run(bot, message).await,
            Command::Help => help::run(bot, message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lookup() {
        assert_eq!(Command::from_name("compile"), Some(Command::Compile));
        assert_eq!(Command::from_name("BotInfo"), Some(Command::BotInfo));
        assert_eq!(Command::from_name("INVITE"), Some(Command::Invite));
        assert_eq!(Command::from_name("asm"), None);
    }

    #[test]
    fn test_usage_uses_prefix() {
        assert_eq!(Command::Compilers.usage("!"), "!compilers <language>");
        assert_eq!(Command::Languages.usage(";"), ";languages");
    }
}
