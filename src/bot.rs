use crate::backend::{CompilationBackend, CompileExecutor, RegistryError};
use crate::blocklist::Blocklist;
use crate::commands::{Command, CommandError, IncomingMessage};
use crate::config::{BotConfig, EmojiConfig};
use crate::events::ServerTracker;
use crate::registry::CompilerRegistry;
use crate::render::{build_fail_reply, Reaction, Response};
use crate::stats::StatsManager;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Everything a command needs, owned in one place and shared by reference.
pub struct Bot {
    config: BotConfig,
    backend: Arc<dyn CompilationBackend>,
    registry: Arc<CompilerRegistry>,
    executor: CompileExecutor,
    stats: Arc<StatsManager>,
    servers: ServerTracker,
    blocklist: RwLock<Blocklist>,
    http: reqwest::Client,
    started_at: DateTime<Utc>,
}

impl Bot {
    pub fn new(config: BotConfig, backend: Arc<dyn CompilationBackend>) -> Self {
        let registry = Arc::new(
            CompilerRegistry::new(config.deny_list()).with_fetch_timeout(config.timeout()),
        );
        let executor = CompileExecutor::new(backend.clone()).with_timeout(config.timeout());
        let stats = Arc::new(StatsManager::new(
            config.stats_api_link.as_deref(),
            config.stats_api_key.as_deref(),
        ));
        let servers = ServerTracker::new(&config.prefix, config.join_log, stats.clone());
        let blocklist = RwLock::new(Blocklist::new(config.blocked_users.iter().cloned()));

        if stats.should_track() {
            info!("Statistics tracking enabled");
        }

        Self {
            config,
            backend,
            registry,
            executor,
            stats,
            servers,
            blocklist,
            http: reqwest::Client::new(),
            started_at: Utc::now(),
        }
    }

    /// Use a preconfigured client for source downloads, e.g. one with custom
    /// proxy settings.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Load the compiler catalog. Commands needing it fail until this
    /// succeeds.
    pub async fn start(&self) -> Result<(), RegistryError> {
        self.registry.initialize(self.backend.as_ref()).await?;
        info!("Compiler cache loaded");
        Ok(())
    }

    pub async fn reload_compilers(&self) -> Result<(), RegistryError> {
        self.registry.rebuild(self.backend.as_ref()).await
    }

    /// Run the command addressed by `message`, rendering any failure as a
    /// failure reply. Returns `None` for messages that are not commands and
    /// for authors on the blocklist.
    pub async fn handle_message(&self, message: &IncomingMessage) -> Option<Response> {
        match self.dispatch(message).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Command from {} failed: {}", message.author, e);
                if matches!(e, CommandError::Compile(_)) {
                    error!("Compilation request failed: {e}");
                }
                Some(Response::single(build_fail_reply(
                    &message.author,
                    &e.to_string(),
                )))
            }
        }
    }

    pub async fn dispatch(
        &self,
        message: &IncomingMessage,
    ) -> Result<Option<Response>, CommandError> {
        let Some(command) = self.parse_command(&message.content) else {
            return Ok(None);
        };

        if self.is_blocked(&message.author).await {
            info!("Ignoring {} from blocked user {}", command.name(), message.author);
            return Ok(None);
        }

        debug!("{} invoked {}", message.author, command.name());
        self.stats.command_executed(command.name()).await;

        let response = command.execute(self, message).await?;
        debug!("Command executed");
        Ok(Some(response))
    }

    pub fn parse_command(&self, content: &str) -> Option<Command> {
        let rest = content.trim_start().strip_prefix(&self.config.prefix)?;
        let name = rest.split_whitespace().next()?;
        Command::from_name(name)
    }

    /// Download source code referenced with `<`. The download shares the
    /// remote-call timeout and is capped at `max_source_size` bytes.
    pub async fn fetch_source(&self, url: &str) -> Result<String, CommandError> {
        let mut request = self.http.get(url);
        if let Some(timeout) = self.config.timeout() {
            request = request.timeout(timeout);
        }

        let mut response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                debug!("Source download from {url} failed: {e}");
                CommandError::SourceFetch(
                    "GET request failed, perhaps your link is unreachable?".to_string(),
                )
            })?;

        let limit = self.config.max_source_size;
        let too_large = || {
            CommandError::SourceFetch(format!(
                "Source file is too large, the limit is {limit} bytes"
            ))
        };

        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            debug!("Reading source from {url} failed: {e}");
            CommandError::SourceFetch("Unable to grab resource".to_string())
        })? {
            if body.len() + chunk.len() > limit {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    pub async fn is_blocked(&self, user: &str) -> bool {
        self.blocklist.read().await.contains(user)
    }

    pub async fn block_user(&self, user: &str) -> bool {
        info!("Blocking {user}");
        self.blocklist.write().await.block(user)
    }

    pub async fn unblock_user(&self, user: &str) -> bool {
        info!("Unblocking {user}");
        self.blocklist.write().await.unblock(user)
    }

    pub fn success_reaction(&self) -> Reaction {
        match &self.config.success_emoji {
            Some(EmojiConfig { id, name }) => Reaction::Custom {
                id: *id,
                name: name.clone(),
            },
            None => Reaction::unicode("✅"),
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    pub fn registry(&self) -> &Arc<CompilerRegistry> {
        &self.registry
    }

    pub fn executor(&self) -> &CompileExecutor {
        &self.executor
    }

    pub fn stats(&self) -> &Arc<StatsManager> {
        &self.stats
    }

    pub fn servers(&self) -> &ServerTracker {
        &self.servers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
