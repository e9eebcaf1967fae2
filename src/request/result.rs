use crate::backend::TransportError;
use serde::{Deserialize, Serialize};

/// Fields of the service's compile response this crate reads. Everything is
/// optional: the service omits fields that would be empty.
#[derive(Debug, Default, Deserialize)]
struct CompileResponse {
    status: Option<String>,
    signal: Option<String>,
    compiler_output: Option<String>,
    compiler_error: Option<String>,
    compiler_message: Option<String>,
    program_output: Option<String>,
    program_error: Option<String>,
    program_message: Option<String>,
    url: Option<String>,
    permlink: Option<String>,
}

/// Normalized outcome of one compilation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompileResult {
    /// True when the program ran and exited with status `0`.
    pub success: bool,
    /// Exit status as reported by the service.
    pub status: Option<String>,
    pub signal: Option<String>,
    /// Compiler diagnostics (stdout and stderr).
    pub compiler_output: String,
    /// Program output (stdout and stderr).
    pub program_output: String,
    /// Permanent link, present when the request asked to be saved.
    pub url: Option<String>,
    /// Identifier part of `url`.
    pub permlink: Option<String>,
    pub raw_response: serde_json::Value,
}

impl CompileResult {
    pub fn from_response(raw_response: serde_json::Value) -> Result<Self, TransportError> {
        let response = CompileResponse::deserialize(&raw_response)?;

        let success = response.status.as_deref() == Some("0");
        let compiler_output = combined(
            response.compiler_message,
            response.compiler_output,
            response.compiler_error,
        );
        let program_output = combined(
            response.program_message,
            response.program_output,
            response.program_error,
        );

        Ok(Self {
            success,
            status: response.status,
            signal: response.signal,
            compiler_output,
            program_output,
            url: response.url.filter(|u| !u.is_empty()),
            permlink: response.permlink.filter(|p| !p.is_empty()),
            raw_response,
        })
    }

    pub fn has_output(&self) -> bool {
        !self.compiler_output.is_empty() || !self.program_output.is_empty()
    }
}

/// The `*_message` fields carry stdout and stderr interleaved as the service
/// saw them; fall back to concatenating the separate streams.
fn combined(message: Option<String>, output: Option<String>, error: Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => message,
        _ => {
            let mut text = output.unwrap_or_default();
            text.push_str(error.as_deref().unwrap_or_default());
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_status_is_a_result_not_an_error() {
        let raw = json!({
            "status": "1",
            "compiler_output": "warning: unused variable 'x'",
            "program_output": "",
        });
        let result = CompileResult::from_response(raw.clone()).unwrap();

        assert!(!result.success);
        assert_eq!(result.status.as_deref(), Some("1"));
        assert_eq!(result.compiler_output, "warning: unused variable 'x'");
        assert_eq!(result.program_output, "");
        assert_eq!(result.raw_response, raw);
    }

    #[test]
    fn test_success_status() {
        let raw = json!({
            "status": "0",
            "program_message": "hello\n",
            "program_output": "hello\n",
            "url": "https://wandbox.org/permlink/abc",
            "permlink": "abc",
        });
        let result = CompileResult::from_response(raw).unwrap();

        assert!(result.success);
        assert_eq!(result.permlink.as_deref(), Some("abc"));
        assert_eq!(result.program_output, "hello\n");
        assert_eq!(result.url.as_deref(), Some("https://wandbox.org/permlink/abc"));
        assert!(result.has_output());
    }

    #[test]
    fn test_message_preferred_over_split_streams() {
        let raw = json!({
            "status": "0",
            "program_output": "out\n",
            "program_error": "err\n",
            "program_message": "err\nout\n",
        });
        let result = CompileResult::from_response(raw).unwrap();
        assert_eq!(result.program_output, "err\nout\n");
    }

    #[test]
    fn test_split_streams_concatenated_without_message() {
        let raw = json!({
            "status": "1",
            "compiler_output": "a\n",
            "compiler_error": "b\n",
        });
        let result = CompileResult::from_response(raw).unwrap();
        assert_eq!(result.compiler_output, "a\nb\n");
    }

    #[test]
    fn test_missing_status_is_not_success() {
        let raw = json!({ "signal": "Killed" });
        let result = CompileResult::from_response(raw).unwrap();
        assert!(!result.success);
        assert_eq!(result.signal.as_deref(), Some("Killed"));
        assert!(!result.has_output());
    }

    #[test]
    fn test_non_object_response_is_a_decode_error() {
        let result = CompileResult::from_response(json!(42));
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[test]
    fn test_empty_url_dropped() {
        let raw = json!({ "status": "0", "url": "", "permlink": "" });
        let result = CompileResult::from_response(raw).unwrap();
        assert!(result.url.is_none());
        assert!(result.permlink.is_none());
    }
}
