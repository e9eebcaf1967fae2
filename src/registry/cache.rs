use crate::backend::{CompilationBackend, RegistryError};
use crate::registry::catalog::{Catalog, DenyList};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info, warn};

/// Shared cache of the service's supported languages and compilers.
///
/// Readers take an `Arc<Catalog>` snapshot; a rebuild assembles a complete
/// catalog before swapping the pointer, so a reader never observes a
/// partially populated mapping. Rebuilds run one at a time, so an older
/// fetch never replaces the result of a newer one.
pub struct CompilerRegistry {
    deny_list: DenyList,
    fetch_timeout: Option<Duration>,
    catalog: RwLock<Arc<Catalog>>,
    ready: watch::Sender<bool>,
    rebuilding: Mutex<()>,
}

impl CompilerRegistry {
    pub fn new(deny_list: DenyList) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            deny_list,
            fetch_timeout: None,
            catalog: RwLock::new(Arc::new(Catalog::default())),
            ready,
            rebuilding: Mutex::new(()),
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Fetch the catalog and install it. On failure the previously installed
    /// catalog (empty before the first success) is left in place.
    pub async fn initialize(&self, backend: &dyn CompilationBackend) -> Result<(), RegistryError> {
        let _rebuilding = self.rebuilding.lock().await;
        info!("Loading compiler catalog from {}", backend.backend_name());

        let fetch = backend.fetch_catalog();
        let entries = match self.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch).await.map_err(|_| {
                RegistryError::Timeout {
                    seconds: limit.as_secs(),
                }
            })?,
            None => fetch.await,
        }
        .map_err(|e| {
            warn!("Compiler catalog fetch failed: {e}");
            RegistryError::from(e)
        })?;

        let fetched = entries.len();
        let catalog = Arc::new(Catalog::from_entries(entries, &self.deny_list));
        info!(
            "Compiler catalog loaded: {} languages, {} compilers ({} skipped)",
            catalog.language_count(),
            catalog.compiler_count(),
            fetched - catalog.compiler_count()
        );

        *self.catalog.write().await = catalog;
        self.ready.send_replace(true);
        Ok(())
    }

    pub async fn rebuild(&self, backend: &dyn CompilationBackend) -> Result<(), RegistryError> {
        debug!("Rebuilding compiler catalog");
        self.initialize(backend).await
    }

    /// Install an already-built catalog.
    pub async fn replace(&self, catalog: Catalog) {
        let _rebuilding = self.rebuilding.lock().await;
        *self.catalog.write().await = Arc::new(catalog);
        self.ready.send_replace(true);
    }

    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }

    pub async fn get_compilers(&self, language: &str) -> Option<Vec<String>> {
        self.snapshot()
            .await
            .get_compilers(language)
            .map(<[String]>::to_vec)
    }

    pub async fn is_valid_compiler(&self, compiler_id: &str) -> bool {
        self.snapshot().await.is_valid_compiler(compiler_id)
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Observers are told when a catalog has been installed.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.ready.subscribe()
    }

    pub fn deny_list(&self) -> &DenyList {
        &self.deny_list
    }
}

impl Default for CompilerRegistry {
    fn default() -> Self {
        Self::new(DenyList::default())
    }
}
