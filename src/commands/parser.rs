//! Parses a compile message of the form
//! `;compile <target> [options..] [< url] [| stdin..]` followed by fenced
//! code blocks.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```[\S\s]*?\n([\s\S]*?)```").expect("code block pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("You must specify a language or compiler\n\nUsage: `{prefix}compile <language> ```code``` `")]
    MissingTarget { prefix: String },

    #[error("'<' operator requires a url\n\nUsage: `{prefix}compile c++ < http://foo.bar/code.txt`")]
    MissingUrl { prefix: String },

    #[error("`|` operator should be last, unable to continue")]
    PipeNotLast,

    #[error("You must attach a code-block containing code to your message")]
    MissingCode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    pub target: String,
    pub options: Vec<String>,
    pub stdin: String,
    /// Location to download the source from instead of a code block.
    pub url: Option<String>,
    pub code: String,
}

/// Everything before the first backtick is the command header; code blocks
/// follow. With two or more blocks the first is stdin and the second is the
/// code. When a `<` url is given, code blocks are ignored and `code` is left
/// empty for the caller to fill.
pub fn parse_compile(input: &str, prefix: &str) -> Result<ParsedInput, ParseError> {
    let header_end = input.find('`').unwrap_or(input.len());
    let mut args = input[..header_end].split_whitespace();

    // command name, e.g. ";compile"
    args.next();

    let target = args.next().ok_or_else(|| ParseError::MissingTarget {
        prefix: prefix.to_string(),
    })?;

    let mut result = ParsedInput {
        target: target.to_string(),
        ..ParsedInput::default()
    };

    while let Some(arg) = args.next() {
        match arg {
            "<" => {
                let url = args.next().ok_or_else(|| ParseError::MissingUrl {
                    prefix: prefix.to_string(),
                })?;
                result.url = Some(url.to_string());
            }
            "|" => {
                let mut stdin = Vec::new();
                for token in args.by_ref() {
                    if token == "<" {
                        return Err(ParseError::PipeNotLast);
                    }
                    stdin.push(token);
                }
                result.stdin = stdin.join(" ");
            }
            option => result.options.push(option.to_string()),
        }
    }

    if result.url.is_none() {
        find_code_blocks(&mut result, input)?;
    }

    Ok(result)
}

fn find_code_blocks(result: &mut ParsedInput, haystack: &str) -> Result<(), ParseError> {
    let blocks: Vec<&str> = CODE_BLOCK
        .captures_iter(haystack)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect();

    match blocks.as_slice() {
        [] => Err(ParseError::MissingCode),
        [code] => {
            result.code = code.to_string();
            Ok(())
        }
        [stdin, code, ..] => {
            result.stdin = stdin.to_string();
            result.code = code.to_string();
            Ok(())
        }
    }
}

/// Arguments after the command name, split on whitespace.
pub fn command_args(input: &str) -> Vec<&str> {
    input.split_whitespace().skip(1).collect()
}
