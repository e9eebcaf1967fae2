use crate::backend::error::TransportError;
use crate::registry::CompilerEntry;
use crate::request::CompileRequest;
use async_trait::async_trait;

/// Abstract remote compilation service
#[async_trait]
pub trait CompilationBackend: Send + Sync {
    /// Fetch the full compiler catalog, in service order.
    async fn fetch_catalog(&self) -> Result<Vec<CompilerEntry>, TransportError>;

    /// Submit one compile request and return the decoded response body.
    async fn compile(&self, request: &CompileRequest) -> Result<serde_json::Value, TransportError>;

    fn backend_name(&self) -> &'static str;
}
