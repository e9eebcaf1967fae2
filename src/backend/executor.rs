use crate::backend::error::CompileError;
use crate::backend::traits::CompilationBackend;
use crate::request::{CompileRequest, CompileResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Submits compile requests to a backend and normalizes the response.
#[derive(Clone)]
pub struct CompileExecutor {
    backend: Arc<dyn CompilationBackend>,
    timeout: Option<Duration>,
}

impl CompileExecutor {
    pub fn new(backend: Arc<dyn CompilationBackend>) -> Self {
        Self {
            backend,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// One round trip to the backend. No retries.
    pub async fn compile(&self, request: &CompileRequest) -> Result<CompileResult, CompileError> {
        let call = self.backend.compile(request);

        let response = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(response) => response,
                Err(_) => {
                    warn!(
                        "Compilation with {} exceeded {}s",
                        request.compiler_id(),
                        limit.as_secs()
                    );
                    return Err(CompileError::Timeout {
                        seconds: limit.as_secs(),
                    });
                }
            },
            None => call.await,
        }?;

        let result = CompileResult::from_response(response)?;
        debug!(
            "Compilation with {} finished, success: {}",
            request.compiler_id(),
            result.success
        );
        Ok(result)
    }
}
