//! Request bodies understood by the statistics service

use serde::Serialize;

pub trait StatsRequest: Serialize + Send + Sync {
    /// Path relative to the configured statistics link.
    fn endpoint(&self) -> &'static str;
}

/// Wraps a request body with the API key expected by every endpoint.
#[derive(Serialize)]
pub struct Keyed<'a, T: Serialize> {
    pub key: &'a str,
    #[serde(flatten)]
    pub body: &'a T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRequest {
    pub command: String,
}

impl CommandRequest {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }
}

impl StatsRequest for CommandRequest {
    #[inline]
    fn endpoint(&self) -> &'static str {
        "insert/command"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageRequest {
    pub language: String,
    pub fail: bool,
}

impl LanguageRequest {
    pub fn new(language: &str, fail: bool) -> Self {
        Self {
            language: language.to_string(),
            fail,
        }
    }
}

impl StatsRequest for LanguageRequest {
    #[inline]
    fn endpoint(&self) -> &'static str {
        "insert/language"
    }
}

/// Server count updates (`amount` set) and bare request counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<usize>,
}

impl LegacyRequest {
    pub fn new(amount: Option<usize>) -> Self {
        let request_type = if amount.is_some() { "servers" } else { "request" };
        Self {
            request_type: request_type.to_string(),
            amount,
        }
    }
}

impl StatsRequest for LegacyRequest {
    #[inline]
    fn endpoint(&self) -> &'static str {
        "insert/legacy"
    }
}
