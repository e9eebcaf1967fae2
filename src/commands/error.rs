use crate::backend::CompileError;
use crate::commands::parser::ParseError;
use thiserror::Error;

/// Failures shown to the requesting user as a failure reply.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    SourceFetch(String),

    #[error("{0}")]
    Unavailable(String),

    #[error(
        "The language *'{language}'* is either not supported, or you have accidentally typed in the wrong language. \
         Try using the *{prefix}languages* command to see supported languages!"
    )]
    UnknownLanguage { language: String, prefix: String },

    #[error("Internal request failure\nThe compiler cache is uninitialized, please try again shortly.")]
    RegistryNotReady,

    #[error("{0}")]
    Compile(#[from] CompileError),
}

pub type Result<T> = std::result::Result<T, CommandError>;
