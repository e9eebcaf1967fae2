use crate::stats::requests::{CommandRequest, Keyed, LanguageRequest, LegacyRequest, StatsRequest};
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

/// Point-in-time copy of the usage counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageSnapshot {
    pub commands: u64,
    pub compilations: u64,
    pub failed_compilations: u64,
    pub servers_joined: u64,
    pub servers_left: u64,
    pub languages: BTreeMap<String, u64>,
}

/// Usage statistics. Counters are always kept in memory; when a statistics
/// link is configured each event is also posted there. Delivery is best
/// effort: failures are logged and dropped.
pub struct StatsManager {
    client: Client,
    endpoint: Option<Url>,
    key: String,
    commands: AtomicU64,
    compilations: AtomicU64,
    failed_compilations: AtomicU64,
    servers_joined: AtomicU64,
    servers_left: AtomicU64,
    languages: Mutex<BTreeMap<String, u64>>,
}

impl StatsManager {
    pub fn new(link: Option<&str>, key: Option<&str>) -> Self {
        Self::with_client(Client::new(), link, key)
    }

    /// Use a preconfigured client, e.g. one with custom proxy settings.
    pub fn with_client(client: Client, link: Option<&str>, key: Option<&str>) -> Self {
        let endpoint = link.and_then(|link| {
            let link = if link.ends_with('/') {
                link.to_string()
            } else {
                format!("{link}/")
            };
            match Url::parse(&link) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("Ignoring invalid statistics link {link}: {e}");
                    None
                }
            }
        });

        Self {
            client,
            endpoint,
            key: key.unwrap_or_default().to_string(),
            commands: AtomicU64::new(0),
            compilations: AtomicU64::new(0),
            failed_compilations: AtomicU64::new(0),
            servers_joined: AtomicU64::new(0),
            servers_left: AtomicU64::new(0),
            languages: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    /// Whether events are reported to a remote statistics service.
    pub fn should_track(&self) -> bool {
        self.endpoint.is_some()
    }

    pub async fn command_executed(&self, command: &str) {
        self.commands.fetch_add(1, Ordering::Relaxed);
        self.send(CommandRequest::new(command)).await;
        self.send(LegacyRequest::new(None)).await;
    }

    pub async fn compilation(&self, language: &str, failed: bool) {
        self.compilations.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.failed_compilations.fetch_add(1, Ordering::Relaxed);
        }
        *self
            .languages
            .lock()
            .await
            .entry(language.to_string())
            .or_insert(0) += 1;

        self.send(LanguageRequest::new(language, failed)).await;
    }

    pub async fn new_server(&self) {
        self.servers_joined.fetch_add(1, Ordering::Relaxed);
    }

    pub async fn leave_server(&self) {
        self.servers_left.fetch_add(1, Ordering::Relaxed);
    }

    pub async fn post_servers(&self, amount: usize) {
        self.send(LegacyRequest::new(Some(amount))).await;
    }

    pub async fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            commands: self.commands.load(Ordering::Relaxed),
            compilations: self.compilations.load(Ordering::Relaxed),
            failed_compilations: self.failed_compilations.load(Ordering::Relaxed),
            servers_joined: self.servers_joined.load(Ordering::Relaxed),
            servers_left: self.servers_left.load(Ordering::Relaxed),
            languages: self.languages.lock().await.clone(),
        }
    }

    async fn send<R: StatsRequest>(&self, request: R) {
        let Some(base) = &self.endpoint else {
            return;
        };

        let url = match base.join(request.endpoint()) {
            Ok(url) => url,
            Err(e) => {
                warn!("Invalid statistics endpoint {}: {e}", request.endpoint());
                return;
            }
        };

        let body = Keyed {
            key: &self.key,
            body: &request,
        };

        match self.client.post(url.clone()).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Posted statistics to {url}");
            }
            Ok(response) => {
                warn!("Statistics endpoint {url} returned {}", response.status());
            }
            Err(e) => {
                warn!("Unable to post statistics to {url}: {e}");
            }
        }
    }
}

impl Default for StatsManager {
    fn default() -> Self {
        Self::disabled()
    }
}
